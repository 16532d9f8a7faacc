//! The JSON interchange document.
//!
//! Field names are camel case on the wire. Optional fields are omitted when
//! absent and list fields default to empty, so partial documents from other
//! producers deserialize.

use serde::{Deserialize, Serialize};

/// A set of persons and the relationships between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Persons, in document order.
    #[serde(default)]
    pub persons: Vec<Person>,
    /// Relationships, in document order.
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Document {
    /// Whether the document holds neither persons nor relationships.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty() && self.relationships.is_empty()
    }
}

/// A person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Identifier, unique within the document.
    pub id: String,
    /// Names, in preference order.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Gender, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Events in the person's life.
    #[serde(default)]
    pub facts: Vec<Fact>,
}

impl Person {
    /// A person with no names, gender or facts.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Adds a name with a single form.
    #[must_use]
    pub fn with_name(mut self, full_text: impl Into<String>) -> Self {
        self.names.push(Name::new(full_text));
        self
    }

    /// Sets the gender type URI.
    #[must_use]
    pub fn with_gender(mut self, kind: impl Into<String>) -> Self {
        self.gender = Some(Gender { kind: kind.into() });
        self
    }

    /// Adds a fact.
    #[must_use]
    pub fn with_fact(mut self, fact: Fact) -> Self {
        self.facts.push(fact);
        self
    }
}

/// A name made up of one or more forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    /// Renderings of the name. The first is the primary one.
    #[serde(default)]
    pub name_forms: Vec<NameForm>,
}

impl Name {
    /// A name with a single form.
    #[must_use]
    pub fn new(full_text: impl Into<String>) -> Self {
        Self {
            name_forms: vec![NameForm {
                full_text: Some(full_text.into()),
            }],
        }
    }

    /// The full text of the primary form, if it has any.
    #[must_use]
    pub fn full_text(&self) -> Option<&str> {
        self.name_forms
            .first()
            .and_then(|form| form.full_text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// One rendering of a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameForm {
    /// The complete name as displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

/// A person's gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gender {
    /// The gender type URI.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// An event with an optional date and place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    /// The fact type URI.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// When it happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    /// Where it happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceReference>,
}

impl Fact {
    /// A fact of the given type URI.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Sets the date as written.
    #[must_use]
    pub fn with_date(mut self, original: impl Into<String>) -> Self {
        self.date = Some(Date {
            original: original.into(),
        });
        self
    }

    /// Sets the place as written.
    #[must_use]
    pub fn with_place(mut self, original: impl Into<String>) -> Self {
        self.place = Some(PlaceReference {
            original: original.into(),
        });
        self
    }

    /// The date text, if present and non-empty.
    #[must_use]
    pub fn date_text(&self) -> Option<&str> {
        self.date
            .as_ref()
            .map(|date| date.original.as_str())
            .filter(|text| !text.is_empty())
    }

    /// The place text, if present and non-empty.
    #[must_use]
    pub fn place_text(&self) -> Option<&str> {
        self.place
            .as_ref()
            .map(|place| place.original.as_str())
            .filter(|text| !text.is_empty())
    }
}

/// A date as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    /// The original text.
    #[serde(default)]
    pub original: String,
}

/// A place as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceReference {
    /// The original text.
    #[serde(default)]
    pub original: String,
}

/// A relationship between two persons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Identifier, if the producer assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The relationship type URI.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// The first party: the husband of a couple, the parent of a parent-child
    /// pair.
    #[serde(default)]
    pub person1: ResourceReference,
    /// The second party: the wife of a couple, the child of a parent-child
    /// pair.
    #[serde(default)]
    pub person2: ResourceReference,
    /// Events of the relationship.
    #[serde(default)]
    pub facts: Vec<Fact>,
}

impl Relationship {
    /// A relationship of the given type URI between two person ids.
    #[must_use]
    pub fn new(kind: impl Into<String>, person1: &str, person2: &str) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            person1: ResourceReference::person(person1),
            person2: ResourceReference::person(person2),
            facts: Vec::new(),
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a fact.
    #[must_use]
    pub fn with_fact(mut self, fact: Fact) -> Self {
        self.facts.push(fact);
        self
    }
}

/// A reference to a person in the same document, `#<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// The fragment reference.
    #[serde(default)]
    pub resource: String,
}

impl ResourceReference {
    /// A reference to the person with the given id.
    #[must_use]
    pub fn person(id: &str) -> Self {
        Self {
            resource: format!("#{id}"),
        }
    }

    /// The referenced id, without a leading `#`.
    #[must_use]
    pub fn target(&self) -> &str {
        self.resource.strip_prefix('#').unwrap_or(&self.resource)
    }
}
