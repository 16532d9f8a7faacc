use tracing::{debug, instrument};

use super::{
    schema::{Document, Fact, Gender, Name, Person, Relationship},
    vocabulary::{FEMALE, FactType, MALE, RelationshipType},
};
use crate::domain::{self, DomainGraph, Family, Individual, Sex};

/// Converts a domain graph to an interchange document.
///
/// Persons keep their GEDCOM pointers as ids. Every family with both spouses
/// becomes a couple, and each of its children a parent-child relationship per
/// recorded parent. Events other than births, deaths, marriages and divorces
/// are not carried over.
#[must_use]
#[instrument(level = "debug", skip(graph), fields(individuals = graph.individuals.len(), families = graph.families.len()))]
pub fn to_interchange(graph: &DomainGraph) -> Document {
    Document {
        persons: graph.individuals.iter().map(person).collect(),
        relationships: graph.families.iter().flat_map(relationships).collect(),
    }
}

fn person(individual: &Individual) -> Person {
    Person {
        id: individual.id.to_string(),
        names: individual
            .names
            .iter()
            .map(|name| Name::new(name.full.as_str()))
            .collect(),
        gender: individual.gender.and_then(gender_uri).map(|uri| Gender {
            kind: uri.to_string(),
        }),
        facts: facts(&individual.facts),
    }
}

const fn gender_uri(sex: Sex) -> Option<&'static str> {
    match sex {
        Sex::Male => Some(MALE),
        Sex::Female => Some(FEMALE),
        Sex::Unknown => None,
    }
}

fn facts(facts: &[domain::Fact]) -> Vec<Fact> {
    facts
        .iter()
        .filter_map(|fact| {
            let Some(kind) = FactType::from_imported_tag(&fact.tag) else {
                debug!(tag = %fact.tag, "dropping fact without an interchange type");
                return None;
            };
            let mut converted = Fact::new(kind.uri());
            if let Some(date) = &fact.date {
                converted = converted.with_date(date.as_str());
            }
            if let Some(place) = &fact.place {
                converted = converted.with_place(place.as_str());
            }
            Some(converted)
        })
        .collect()
}

fn relationships(family: &Family) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    if let (Some(husband), Some(wife)) = (&family.husband_id, &family.wife_id) {
        let mut couple = Relationship::new(RelationshipType::Couple.uri(), husband, wife);
        couple.facts = facts(&family.facts);
        relationships.push(couple);
    }

    for child in &family.child_ids {
        for parent in [&family.husband_id, &family.wife_id].into_iter().flatten() {
            relationships.push(Relationship::new(
                RelationshipType::ParentChild.uri(),
                parent,
                child,
            ));
        }
    }

    relationships
}
