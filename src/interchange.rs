//! The persons-and-relationships interchange form and its conversions to and
//! from GEDCOM.

mod from_graph;
pub use from_graph::to_interchange;

pub mod schema;
pub use schema::{
    Date, Document, Fact, Gender, Name, NameForm, Person, PlaceReference, Relationship,
    ResourceReference,
};

mod to_tree;
pub use to_tree::{Export, IdMaps, to_tree, to_tree_with};

pub mod vocabulary;
