//! GEDCOM interchange for genealogical records.
//!
//! GEDCOM text is parsed into a forest of level-tagged nodes, flattened into
//! a graph of records and mapped onto a persons-and-relationships
//! interchange document. The way back builds a single `HEAD`-rooted tree from
//! an interchange document and renders it as text.
//!
//! ```
//! use kinship::{flatten, parse, to_interchange};
//!
//! let forest = parse("0 @I1@ INDI\n1 NAME John /Doe/\n1 SEX M");
//! let graph = flatten(&forest).unwrap();
//! let document = to_interchange(&graph);
//!
//! assert_eq!(document.persons[0].id, "@I1@");
//! ```

pub mod domain;
pub use domain::{Config, ConfigError, DivorcePolicy, DomainGraph};

pub mod gedcom;
pub use gedcom::{
    FlattenError, LineError, Node, Pointer, Tag, Value, flatten, flatten_lenient, parse,
    parse_with_diagnostics, render, render_forest,
};

pub mod interchange;
pub use interchange::{Document, Export, to_interchange, to_tree, to_tree_with};
