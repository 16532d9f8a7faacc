//! Rendering nodes back to GEDCOM text.
//!
//! The layout of each line follows from its [`Value`] variant: a record's own
//! identifier precedes the tag, every other payload follows it.

use std::fmt;

use super::{Node, Value, header};

impl fmt::Display for Node {
    /// Writes the node and its descendants, one line each, without a trailing
    /// newline.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value() {
            Some(Value::Xref(pointer)) => write!(f, "{} {} {}", self.level(), pointer, self.tag())?,
            Some(value) => write!(f, "{} {} {}", self.level(), self.tag(), value.as_str())?,
            None => write!(f, "{} {}", self.level(), self.tag())?,
        }

        for child in self.children() {
            writeln!(f)?;
            fmt::Display::fmt(child, f)?;
        }
        Ok(())
    }
}

/// Renders a node and its descendants to GEDCOM text.
///
/// A document holding nothing but the header written by this crate and the
/// trailer renders as the empty string, which callers treat as "no data".
#[must_use]
pub fn render(node: &Node) -> String {
    let rendered = node.to_string();
    if header::is_empty_document(&rendered) {
        String::new()
    } else {
        rendered
    }
}

/// Renders every root of a forest, newline separated.
///
/// Unlike [`render`] this never collapses to the empty string, so parsing the
/// output yields the same forest again.
#[must_use]
pub fn render_forest(forest: &[Node]) -> String {
    forest
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
