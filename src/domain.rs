//! Domain models for genealogical records.
//!
//! A [`DomainGraph`] holds the records recovered from one GEDCOM document,
//! one insertion-ordered map per record kind. [`Config`] carries the import
//! and export settings.

mod config;
pub use config::{Config, ConfigError, DivorcePolicy};

mod graph;
pub use graph::{DomainGraph, RecordMap};

/// Record types stored in the graph.
pub mod records;
pub use records::{
    Citation, Fact, Family, Individual, Media, Note, PersonalName, Place, Record, Repository, Sex,
    Source,
};
