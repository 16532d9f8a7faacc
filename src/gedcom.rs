//! GEDCOM text, the node tree it describes, and the domain graph recovered
//! from that tree.

mod flatten;
pub use flatten::{FlattenError, flatten, flatten_lenient};

/// The header this crate writes and the empty-document sentinel.
pub mod header;

mod node;
pub use node::{Node, Value};

mod parser;
pub use parser::{LineError, LineErrorKind, parse, parse_with_diagnostics};

mod pointer;
pub use pointer::{Pointer, PointerError};

mod serializer;
pub use serializer::{render, render_forest};

mod tag;
pub use tag::Tag;
