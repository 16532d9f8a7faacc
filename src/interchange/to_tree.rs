//! Interchange document to a single GEDCOM tree rooted at `HEAD`.
//!
//! Persons are numbered `@I1@`, `@I2@`, ... in document order and every
//! family written gets the next `@F{n}@`. Relationships that name a child
//! missing from the document get a placeholder individual so that the family
//! still links to a record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use super::{
    schema::{Document, Fact, Person, Relationship},
    vocabulary::{FactType, RelationshipType, trailing_segment},
};
use crate::{
    domain::{Config, DivorcePolicy},
    gedcom::{Node, Pointer, Tag, header},
};

const PLACEHOLDER_TEXT: &str = "Unknown";
const LEGACY_DIVORCE_DATE: &str = "1 JAN 2025";
const LEGACY_DIVORCE_PLACE: &str = "California";

/// The result of [`to_tree_with`]: the tree and the identifiers assigned while
/// building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// The `HEAD`-rooted tree.
    pub tree: Node,
    /// Interchange ids and the pointers they were given.
    pub ids: IdMaps,
}

/// Interchange ids and the GEDCOM pointers assigned to them during one
/// export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMaps {
    /// Person id to individual pointer, including placeholder individuals.
    pub individuals: HashMap<String, Pointer>,
    /// Relationship id to family pointer, for couples that carry an id.
    pub families: HashMap<String, Pointer>,
}

/// Builds the `HEAD`-rooted tree for a document with the default settings.
#[must_use]
pub fn to_tree(document: &Document, now: DateTime<Utc>) -> Node {
    to_tree_with(document, now, &Config::default()).tree
}

/// Builds the `HEAD`-rooted tree for a document, returning the identifier
/// tables alongside it.
#[must_use]
#[instrument(level = "debug", skip(document, config), fields(persons = document.persons.len(), relationships = document.relationships.len()))]
pub fn to_tree_with(document: &Document, now: DateTime<Utc>, config: &Config) -> Export {
    let mut builder = TreeBuilder::new(config.divorce_policy);

    for person in &document.persons {
        builder.add_person(person);
    }
    for relationship in &document.relationships {
        builder.add_relationship(relationship);
    }

    builder.finish(&now)
}

/// Outcome of looking up a person id.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolved {
    /// The id belongs to a person already written.
    Known(Pointer),
    /// The id was unknown and has just been given a new pointer.
    Placeholder(Pointer),
}

/// Identifier tables and counters for one export.
#[derive(Debug, Default)]
struct IdContext {
    maps: IdMaps,
    individuals: usize,
    families: usize,
}

impl IdContext {
    fn next_individual(&mut self) -> Pointer {
        self.individuals += 1;
        Pointer::individual(self.individuals)
    }

    fn next_family(&mut self) -> Pointer {
        self.families += 1;
        Pointer::family(self.families)
    }

    /// Assigns the next individual pointer to a person id.
    fn register(&mut self, id: &str) -> Pointer {
        let pointer = self.next_individual();
        self.maps.individuals.insert(id.to_string(), pointer.clone());
        pointer
    }

    fn resolve(&self, id: &str) -> Option<Pointer> {
        self.maps.individuals.get(id).cloned()
    }

    fn resolve_or_placeholder(&mut self, id: &str) -> Resolved {
        self.resolve(id).map_or_else(
            || Resolved::Placeholder(self.register(id)),
            Resolved::Known,
        )
    }
}

struct TreeBuilder {
    policy: DivorcePolicy,
    ids: IdContext,
    individuals: Vec<Node>,
    placeholders: Vec<Node>,
    families: Vec<Node>,
    /// Families written for a resolved husband and wife, by position in
    /// `families`.
    couples: HashMap<(Pointer, Pointer), usize>,
}

impl TreeBuilder {
    fn new(policy: DivorcePolicy) -> Self {
        Self {
            policy,
            ids: IdContext::default(),
            individuals: Vec::new(),
            placeholders: Vec::new(),
            families: Vec::new(),
            couples: HashMap::new(),
        }
    }

    fn add_person(&mut self, person: &Person) {
        let pointer = self.ids.register(&person.id);
        let mut node = Node::record(1, pointer, Tag::Individual);

        let names = person
            .names
            .iter()
            .filter_map(|name| name.full_text().and_then(single_line));
        for name in names {
            node.push_child(Node::new(2, Tag::Name).with_payload(name));
        }

        if let Some(gender) = person.gender.as_ref().filter(|g| !g.kind.is_empty()) {
            node.push_child(Node::new(2, Tag::Sex).with_payload(sex_code(&gender.kind)));
        }

        for fact in &person.facts {
            if let Some(fact) = fact_node(2, fact) {
                node.push_child(fact);
            }
        }

        self.individuals.push(node);
    }

    fn add_relationship(&mut self, relationship: &Relationship) {
        let segment = trailing_segment(&relationship.kind);
        match RelationshipType::from_segment(segment) {
            Some(RelationshipType::Couple) => self.add_couple(relationship),
            Some(RelationshipType::ParentChild) => self.add_parent_child(relationship),
            Some(RelationshipType::Divorce) => match self.policy {
                DivorcePolicy::AttachToCouple => self.attach_divorce(relationship),
                DivorcePolicy::Legacy => self.add_legacy_divorce(relationship),
            },
            None => debug!(kind = %relationship.kind, "skipping unsupported relationship"),
        }
    }

    fn add_couple(&mut self, relationship: &Relationship) {
        let pointer = self.ids.next_family();
        if let Some(id) = &relationship.id {
            self.ids.maps.families.insert(id.clone(), pointer.clone());
        }

        let husband = self.ids.resolve(relationship.person1.target());
        let wife = self.ids.resolve(relationship.person2.target());

        let mut node = family_node(1, pointer, husband.clone(), wife.clone());
        for fact in &relationship.facts {
            if let Some(fact) = fact_node(2, fact) {
                node.push_child(fact);
            }
        }

        if let (Some(husband), Some(wife)) = (husband, wife) {
            self.couples
                .entry((husband, wife))
                .or_insert(self.families.len());
        }
        self.families.push(node);
    }

    fn add_parent_child(&mut self, relationship: &Relationship) {
        let parent = self.ids.resolve(relationship.person1.target());

        let child = match self.ids.resolve_or_placeholder(relationship.person2.target()) {
            Resolved::Known(pointer) => pointer,
            Resolved::Placeholder(pointer) => {
                debug!(
                    id = relationship.person2.target(),
                    %pointer,
                    "writing placeholder for unknown child"
                );
                self.placeholders.push(placeholder(pointer.clone()));
                pointer
            }
        };

        let node = family_node(1, self.ids.next_family(), parent, None)
            .with_child(Node::new(2, Tag::Child).with_pointer(child));
        self.families.push(node);
    }

    fn attach_divorce(&mut self, relationship: &Relationship) {
        let husband = self.ids.resolve(relationship.person1.target());
        let wife = self.ids.resolve(relationship.person2.target());

        let mut facts: Vec<Node> = relationship
            .facts
            .iter()
            .filter_map(|fact| fact_node(2, fact))
            .collect();
        if facts.is_empty() {
            facts.push(Node::new(2, Tag::Divorce));
        }

        if let Some(position) = self.couple_position(husband.as_ref(), wife.as_ref()) {
            let family = &mut self.families[position];
            for fact in facts {
                family.push_child(fact);
            }
            return;
        }

        let mut node = family_node(1, self.ids.next_family(), husband, wife);
        for fact in facts {
            node.push_child(fact);
        }
        self.families.push(node);
    }

    fn add_legacy_divorce(&mut self, relationship: &Relationship) {
        let husband = self.ids.resolve(relationship.person1.target());
        let wife = self.ids.resolve(relationship.person2.target());

        let mut node = Node::record(0, self.ids.next_family(), Tag::Family);
        if let Some(husband) = husband {
            node.push_child(Node::new(1, Tag::Husband).with_pointer(husband));
        }
        if let Some(wife) = wife {
            node.push_child(Node::new(1, Tag::Wife).with_pointer(wife));
        }
        node.push_child(
            Node::new(1, Tag::Divorce)
                .with_child(Node::new(2, Tag::Date).with_payload(LEGACY_DIVORCE_DATE))
                .with_child(Node::new(2, Tag::Place).with_payload(LEGACY_DIVORCE_PLACE)),
        );
        self.families.push(node);
    }

    /// The family already written for this pair, in either order.
    fn couple_position(&self, first: Option<&Pointer>, second: Option<&Pointer>) -> Option<usize> {
        let (first, second) = (first?, second?);
        self.couples
            .get(&(first.clone(), second.clone()))
            .or_else(|| self.couples.get(&(second.clone(), first.clone())))
            .copied()
    }

    fn finish(self, now: &DateTime<Utc>) -> Export {
        let mut head = Node::new(0, Tag::Head);
        for node in header::metadata(now)
            .into_iter()
            .chain(self.individuals)
            .chain(self.placeholders)
            .chain(self.families)
        {
            head.push_child(node);
        }
        head.push_child(Node::new(0, Tag::Trailer));

        Export {
            tree: head,
            ids: self.ids.maps,
        }
    }
}

/// The first letter of the gender's trailing segment, or `U` if it has none.
fn sex_code(kind: &str) -> String {
    trailing_segment(kind)
        .chars()
        .find(|c| !c.is_whitespace())
        .map_or_else(|| "U".to_string(), String::from)
}

/// Joins the lines of a payload with single spaces, or `None` if nothing but
/// whitespace remains.
///
/// A GEDCOM value cannot span lines, and a raw line break would let the rest
/// of the text be read as a line of its own.
fn single_line(text: &str) -> Option<String> {
    let joined = text
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn fact_node(level: usize, fact: &Fact) -> Option<Node> {
    let segment = trailing_segment(&fact.kind);
    if segment.is_empty() {
        debug!(kind = %fact.kind, "skipping fact without a type");
        return None;
    }
    if segment.contains(char::is_whitespace) {
        debug!(kind = %fact.kind, "skipping fact whose type is not a tag");
        return None;
    }
    let tag = FactType::from_segment(segment).map_or_else(|| Tag::new(segment), FactType::tag);

    let mut node = Node::new(level, tag);
    if let Some(date) = fact.date_text().and_then(single_line) {
        node.push_child(Node::new(level + 1, Tag::Date).with_payload(date));
    }
    if let Some(place) = fact.place_text().and_then(single_line) {
        node.push_child(Node::new(level + 1, Tag::Place).with_payload(place));
    }
    Some(node)
}

fn family_node(
    level: usize,
    pointer: Pointer,
    husband: Option<Pointer>,
    wife: Option<Pointer>,
) -> Node {
    let mut node = Node::record(level, pointer, Tag::Family);
    if let Some(husband) = husband {
        node.push_child(Node::new(level + 1, Tag::Husband).with_pointer(husband));
    }
    if let Some(wife) = wife {
        node.push_child(Node::new(level + 1, Tag::Wife).with_pointer(wife));
    }
    node
}

fn placeholder(pointer: Pointer) -> Node {
    Node::record(1, pointer, Tag::Individual)
        .with_child(Node::new(2, Tag::Name).with_payload(PLACEHOLDER_TEXT))
        .with_child(Node::new(2, Tag::Sex).with_payload("U"))
        .with_child(
            Node::new(2, Tag::Birth)
                .with_child(Node::new(3, Tag::Date).with_payload(PLACEHOLDER_TEXT))
                .with_child(Node::new(3, Tag::Place).with_payload(PLACEHOLDER_TEXT)),
        )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{
        gedcom::{parse, render},
        interchange::Name,
    };

    const HEADER: &str = "0 HEAD\n1 SOUR Kinship\n2 VERS 1.0\n1 DATE 01 JAN 2025\n2 TIME 123456\n";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 34, 56).unwrap()
    }

    fn person(id: &str, name: &str, gender: &str) -> Person {
        Person::new(id)
            .with_name(name)
            .with_gender(format!("http://gedcomx.org/{gender}"))
    }

    fn birth(date: &str, place: &str) -> Fact {
        Fact::new("http://gedcomx.org/Birth")
            .with_date(date)
            .with_place(place)
    }

    fn relationship(kind: &str, person1: &str, person2: &str) -> Relationship {
        Relationship::new(format!("http://gedcomx.org/{kind}"), person1, person2)
    }

    fn couple_document() -> Document {
        Document {
            persons: vec![
                person("@I1@", "John Doe", "Male").with_fact(birth("1 JAN 1990", "New York")),
                person("@I2@", "Jane Doe", "Female").with_fact(birth("1 JAN 1992", "Los Angeles")),
            ],
            relationships: vec![
                relationship("Couple", "@I1@", "@I2@").with_fact(
                    Fact::new("http://gedcomx.org/Marriage")
                        .with_date("1 JAN 2010")
                        .with_place("New York"),
                ),
            ],
        }
    }

    fn render_with(document: &Document, policy: DivorcePolicy) -> String {
        let config = Config {
            divorce_policy: policy,
            ..Config::default()
        };
        render(&to_tree_with(document, now(), &config).tree)
    }

    #[test]
    fn couple_with_marriage() {
        let expected = format!(
            "{HEADER}1 @I1@ INDI\n2 NAME John Doe\n2 SEX M\n2 BIRT\n3 DATE 1 JAN 1990\n3 PLAC New York\n1 @I2@ INDI\n2 NAME Jane Doe\n2 SEX F\n2 BIRT\n3 DATE 1 JAN 1992\n3 PLAC Los Angeles\n1 @F1@ FAM\n2 HUSB @I1@\n2 WIFE @I2@\n2 MARR\n3 DATE 1 JAN 2010\n3 PLAC New York\n0 TRLR"
        );

        assert_eq!(render(&to_tree(&couple_document(), now())), expected);
    }

    #[test]
    fn person_without_facts_or_relationships() {
        let document = Document {
            persons: vec![person("@I1@", "John Doe", "Male")],
            relationships: Vec::new(),
        };

        assert_eq!(
            render(&to_tree(&document, now())),
            format!("{HEADER}1 @I1@ INDI\n2 NAME John Doe\n2 SEX M\n0 TRLR")
        );
    }

    #[test]
    fn empty_document_renders_empty() {
        let tree = to_tree(&Document::default(), now());
        assert_eq!(render(&tree), "");
        assert_eq!(tree.children().len(), 3);
    }

    #[test]
    fn unknown_child_gets_a_placeholder() {
        let mut document = couple_document();
        document
            .relationships
            .push(relationship("ParentChild", "@I1@", "@I3@"));

        let export = to_tree_with(&document, now(), &Config::default());
        let rendered = render(&export.tree);

        assert!(rendered.contains(
            "1 @I3@ INDI\n2 NAME Unknown\n2 SEX U\n2 BIRT\n3 DATE Unknown\n3 PLAC Unknown\n1 @F1@ FAM"
        ));
        assert!(rendered.ends_with("1 @F2@ FAM\n2 HUSB @I1@\n2 CHIL @I3@\n0 TRLR"));
        assert_eq!(export.ids.individuals.get("@I3@"), Some(&Pointer::individual(3)));
    }

    #[test]
    fn placeholder_is_created_once() {
        let document = Document {
            persons: vec![person("p1", "Ann", "Female"), person("p2", "Bob", "Male")],
            relationships: vec![
                relationship("ParentChild", "p1", "kid"),
                relationship("ParentChild", "p2", "kid"),
            ],
        };

        let tree = to_tree(&document, now());
        let individuals = tree
            .children_with(&Tag::Individual)
            .count();
        assert_eq!(individuals, 3);

        let rendered = render(&tree);
        assert!(rendered.contains("1 @F1@ FAM\n2 HUSB @I1@\n2 CHIL @I3@"));
        assert!(rendered.contains("1 @F2@ FAM\n2 HUSB @I2@\n2 CHIL @I3@"));
    }

    #[test]
    fn unknown_parent_is_omitted() {
        let document = Document {
            persons: vec![person("c", "Child", "Male")],
            relationships: vec![relationship("ParentChild", "ghost", "c")],
        };

        let rendered = render(&to_tree(&document, now()));
        assert!(rendered.ends_with("1 @F1@ FAM\n2 CHIL @I1@\n0 TRLR"));
    }

    #[test]
    fn couple_with_unknown_spouse_and_identifier() {
        let document = Document {
            persons: vec![person("a", "Ann", "Female")],
            relationships: vec![relationship("Couple", "nobody", "a").with_id("r1")],
        };

        let export = to_tree_with(&document, now(), &Config::default());
        assert!(render(&export.tree).ends_with("1 @F1@ FAM\n2 WIFE @I1@\n0 TRLR"));
        assert_eq!(export.ids.families.get("r1"), Some(&Pointer::family(1)));
        assert_eq!(export.ids.individuals.len(), 1);
    }

    #[test]
    fn divorce_attaches_to_existing_couple() {
        let mut document = couple_document();
        document.relationships.push(
            relationship("Divorce", "@I2@", "@I1@").with_fact(
                Fact::new("http://gedcomx.org/Divorce")
                    .with_date("3 MAR 2020")
                    .with_place("Reno"),
            ),
        );

        let rendered = render_with(&document, DivorcePolicy::AttachToCouple);
        assert!(rendered.ends_with(
            "1 @F1@ FAM\n2 HUSB @I1@\n2 WIFE @I2@\n2 MARR\n3 DATE 1 JAN 2010\n3 PLAC New York\n2 DIV\n3 DATE 3 MAR 2020\n3 PLAC Reno\n0 TRLR"
        ));
        assert!(!rendered.contains("@F2@"));
    }

    #[test]
    fn divorce_without_couple_opens_a_family() {
        let mut document = couple_document();
        document.relationships.clear();
        document
            .relationships
            .push(relationship("Divorce", "@I1@", "@I2@"));

        let rendered = render_with(&document, DivorcePolicy::AttachToCouple);
        assert!(rendered.ends_with("1 @F1@ FAM\n2 HUSB @I1@\n2 WIFE @I2@\n2 DIV\n0 TRLR"));
    }

    #[test]
    fn legacy_divorce() {
        let mut document = couple_document();
        document.relationships.push(
            relationship("Divorce", "@I1@", "@I2@")
                .with_fact(Fact::new("http://gedcomx.org/Divorce").with_date("3 MAR 2020")),
        );

        let rendered = render_with(&document, DivorcePolicy::Legacy);
        assert!(rendered.ends_with(
            "0 @F2@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n1 DIV\n2 DATE 1 JAN 2025\n2 PLAC California\n0 TRLR"
        ));
    }

    #[test]
    fn legacy_divorce_is_the_default() {
        let mut document = couple_document();
        document
            .relationships
            .push(relationship("Divorce", "@I1@", "@I2@"));

        let rendered = render(&to_tree(&document, now()));
        assert!(rendered.ends_with(
            "0 @F2@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n1 DIV\n2 DATE 1 JAN 2025\n2 PLAC California\n0 TRLR"
        ));
    }

    #[test]
    fn line_breaks_in_payloads_stay_on_one_line() {
        let document = Document {
            persons: vec![
                Person::new("p")
                    .with_name("A\n0 @X@ INDI")
                    .with_gender("http://gedcomx.org/\nMale")
                    .with_fact(
                        Fact::new("http://gedcomx.org/Birth")
                            .with_date("1 JAN\r\n1900")
                            .with_place("Boston\n"),
                    )
                    .with_fact(Fact::new("http://example.org/Occ\n0 @Y@ INDI")),
            ],
            relationships: Vec::new(),
        };

        let rendered = render(&to_tree(&document, now()));
        assert!(rendered.contains(
            "1 @I1@ INDI\n2 NAME A 0 @X@ INDI\n2 SEX M\n2 BIRT\n3 DATE 1 JAN 1900\n3 PLAC Boston\n0 TRLR"
        ));
        assert_eq!(parse(&rendered).len(), 2);
    }

    #[test]
    fn other_relationship_types_are_skipped() {
        let mut document = couple_document();
        document
            .relationships
            .insert(0, relationship("Godparent", "@I1@", "@I2@"));

        let rendered = render(&to_tree(&document, now()));
        assert!(rendered.contains("1 @F1@ FAM\n2 HUSB @I1@\n2 WIFE @I2@"));
        assert!(!rendered.contains("@F2@"));
    }

    #[test]
    fn fact_and_gender_edge_cases() {
        let document = Document {
            persons: vec![
                Person::new("x")
                    .with_gender("http://gedcomx.org/")
                    .with_fact(Fact::new("http://gedcomx.org/Burial").with_date(""))
                    .with_fact(Fact::new("http://example.org/types/Occupation").with_place("Mill"))
                    .with_fact(Fact::new("")),
                Person {
                    names: vec![Name::default()],
                    ..Person::new("y")
                },
            ],
            relationships: Vec::new(),
        };

        let rendered = render(&to_tree(&document, now()));
        assert!(rendered.contains(
            "1 @I1@ INDI\n2 SEX U\n2 BURI\n2 Occupation\n3 PLAC Mill\n1 @I2@ INDI\n0 TRLR"
        ));
    }

    #[test]
    fn every_name_is_written() {
        let document = Document {
            persons: vec![Person::new("p").with_name("Jane Roe").with_name("Jane Doe")],
            relationships: Vec::new(),
        };

        let rendered = render(&to_tree(&document, now()));
        assert!(rendered.contains("1 @I1@ INDI\n2 NAME Jane Roe\n2 NAME Jane Doe\n0 TRLR"));
    }
}
