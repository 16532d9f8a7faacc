use crate::gedcom::{Pointer, Tag};

/// A record stored in the domain graph, keyed by its own pointer.
pub trait Record {
    /// The pointer identifying this record.
    fn id(&self) -> &Pointer;
}

/// A personal name as written in a `NAME` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalName {
    /// The full name, surname delimited by slashes (`John /Doe/`).
    pub full: String,
    /// The `GIVN` part, if given.
    pub given: Option<String>,
    /// The `SURN` part, if given.
    pub surname: Option<String>,
}

impl PersonalName {
    /// A name with only its full text.
    #[must_use]
    pub fn new(full: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            given: None,
            surname: None,
        }
    }
}

/// The `SEX` of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    /// `M`
    Male,
    /// `F`
    Female,
    /// `U`, or any code this crate does not recognise.
    Unknown,
}

impl Sex {
    /// Reads a `SEX` value. Anything other than `M` or `F` is unknown.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "M" => Self::Male,
            "F" => Self::Female,
            _ => Self::Unknown,
        }
    }

    /// The single-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Unknown => "U",
        }
    }
}

/// A dated and placed event attached to an individual or a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    /// The event tag, e.g. `BIRT` or `MARR`.
    pub tag: Tag,
    /// The `DATE` as written.
    pub date: Option<String>,
    /// The `PLAC` as written.
    pub place: Option<String>,
    /// The `AGE` at the event as written.
    pub age: Option<String>,
}

impl Fact {
    /// An undated, unplaced fact.
    #[must_use]
    pub const fn new(tag: Tag) -> Self {
        Self {
            tag,
            date: None,
            place: None,
            age: None,
        }
    }
}

/// An `INDI` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    /// The record's pointer.
    pub id: Pointer,
    /// Every `NAME`, in source order.
    pub names: Vec<PersonalName>,
    /// The `SEX`, if recorded.
    pub gender: Option<Sex>,
    /// `BIRT` and `DEAT` events.
    pub facts: Vec<Fact>,
    /// Families this individual is a spouse in (`FAMS`).
    pub spouse_family_ids: Vec<Pointer>,
    /// The family this individual is a child of (first `FAMC`).
    pub child_family_id: Option<Pointer>,
    /// Referenced `NOTE` records.
    pub note_ids: Vec<Pointer>,
}

impl Individual {
    /// An individual with nothing but an identifier.
    #[must_use]
    pub const fn new(id: Pointer) -> Self {
        Self {
            id,
            names: Vec::new(),
            gender: None,
            facts: Vec::new(),
            spouse_family_ids: Vec::new(),
            child_family_id: None,
            note_ids: Vec::new(),
        }
    }
}

/// A `FAM` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    /// The record's pointer.
    pub id: Pointer,
    /// `HUSB`
    pub husband_id: Option<Pointer>,
    /// `WIFE`
    pub wife_id: Option<Pointer>,
    /// Every `CHIL`, in source order.
    pub child_ids: Vec<Pointer>,
    /// `MARR` and `DIV` events.
    pub facts: Vec<Fact>,
    /// Referenced `NOTE` records.
    pub note_ids: Vec<Pointer>,
}

impl Family {
    /// A family with nothing but an identifier.
    #[must_use]
    pub const fn new(id: Pointer) -> Self {
        Self {
            id,
            husband_id: None,
            wife_id: None,
            child_ids: Vec::new(),
            facts: Vec::new(),
            note_ids: Vec::new(),
        }
    }
}

/// A `SOUR` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// The record's pointer.
    pub id: Pointer,
    /// `TITL`
    pub title: Option<String>,
    /// `AUTH`
    pub author: Option<String>,
    /// `PUBL`
    pub publication: Option<String>,
    /// The holding `REPO`.
    pub repository_id: Option<Pointer>,
}

/// A `REPO` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// The record's pointer.
    pub id: Pointer,
    /// `NAME`
    pub name: Option<String>,
    /// `ADDR`
    pub address: Option<String>,
}

/// An `OBJE` (multimedia) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    /// The record's pointer.
    pub id: Pointer,
    /// `FILE`
    pub file: Option<String>,
    /// `TITL`
    pub title: Option<String>,
    /// Referenced `NOTE` records.
    pub note_ids: Vec<Pointer>,
}

/// A `NOTE` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// The record's pointer.
    pub id: Pointer,
    /// The text, reassembled from `CONT` and `CONC` lines.
    pub text: String,
}

/// A `PLAC` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    /// The record's pointer.
    pub id: Pointer,
    /// `NAME`
    pub name: Option<String>,
    /// `FONE`
    pub phonetic: Option<String>,
}

/// A `CITN` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// The record's pointer.
    pub id: Pointer,
    /// The cited `SOUR`.
    pub source_id: Option<Pointer>,
    /// `PAGE`
    pub page: Option<String>,
    /// `TEXT`
    pub text: Option<String>,
}

macro_rules! impl_record {
    ($($record:ty),+ $(,)?) => {
        $(
            impl Record for $record {
                fn id(&self) -> &Pointer {
                    &self.id
                }
            }
        )+
    };
}

impl_record!(
    Individual, Family, Source, Repository, Media, Note, Place, Citation
);
