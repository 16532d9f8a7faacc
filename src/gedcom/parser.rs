//! Line-oriented GEDCOM text to a forest of [`Node`]s.
//!
//! GEDCOM has no indentation: nesting is encoded only by the level number at
//! the start of each line. The builder keeps a stack of the currently open
//! ancestors and closes every node whose level is not below the incoming
//! line's level before attaching it.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, warn};

use super::{Node, Pointer, Tag, Value};

/// `level (pointer)? TAG (value)?`, applied to a trimmed line.
static LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(?:(@[^@]+@)\s+)?([A-Z0-9_]+)(?:\s+(.*))?$")
        .expect("line grammar is a valid regex")
});

/// Parses GEDCOM text into a forest.
///
/// Lines that do not follow the line grammar are logged and skipped. Use
/// [`parse_with_diagnostics`] to receive them as values.
#[must_use]
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn parse(text: &str) -> Vec<Node> {
    parse_with_diagnostics(text).0
}

/// Parses GEDCOM text into a forest, also returning every skipped line.
#[must_use]
pub fn parse_with_diagnostics(text: &str) -> (Vec<Node>, Vec<LineError>) {
    let mut forest = ForestBuilder::default();
    let mut errors = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(node) => forest.push(node),
            Err(kind) => {
                let error = LineError {
                    line_number: index + 1,
                    line: line.to_string(),
                    kind,
                };
                warn!("{error}");
                errors.push(error);
            }
        }
    }

    (forest.finish(), errors)
}

fn parse_line(line: &str) -> Result<Node, LineErrorKind> {
    let captures = LINE.captures(line).ok_or(LineErrorKind::Malformed)?;

    let level = captures[1]
        .parse::<usize>()
        .map_err(|_| LineErrorKind::LevelOverflow)?;
    let tag = Tag::new(&captures[3]);
    let trailing = captures
        .get(4)
        .map(|m| m.as_str().trim())
        .filter(|text| !text.is_empty());

    let node = Node::new(level, tag);

    if let Some(xref) = captures.get(2) {
        if let Some(discarded) = trailing {
            debug!(xref = xref.as_str(), discarded, "discarding text after record pointer");
        }
        // the grammar only captures `@[^@]+@`, which is always a valid pointer
        let pointer = Pointer::new(xref.as_str()).map_err(|_| LineErrorKind::Malformed)?;
        if node.tag().is_family_role() {
            return Ok(node.with_pointer(pointer));
        }
        return Ok(node.with_value(Value::Xref(pointer)));
    }

    if let Some(text) = trailing {
        return Ok(node.with_payload(text));
    }
    // control tags always land here when they carry no payload
    Ok(node)
}

#[derive(Debug, Default)]
struct ForestBuilder {
    roots: Vec<Node>,
    open: Vec<Node>,
}

impl ForestBuilder {
    fn push(&mut self, node: Node) {
        while self
            .open
            .last()
            .is_some_and(|top| top.level() >= node.level())
        {
            self.close_innermost();
        }

        if let Some(parent) = self.open.last() {
            if node.level() > parent.level() + 1 {
                debug!(
                    parent = parent.level(),
                    child = node.level(),
                    tag = %node.tag(),
                    "level skips a generation"
                );
            }
        }

        self.open.push(node);
    }

    /// Pops the innermost open node and attaches it to its parent, or to the
    /// forest if it has none.
    fn close_innermost(&mut self) {
        if let Some(node) = self.open.pop() {
            match self.open.last_mut() {
                Some(parent) => parent.push_child(node),
                None => self.roots.push(node),
            }
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while !self.open.is_empty() {
            self.close_innermost();
        }
        self.roots
    }
}

/// A line skipped while parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line_number}: {kind}: {line:?}")]
pub struct LineError {
    /// One-based line number in the input.
    pub line_number: usize,
    /// The trimmed line.
    pub line: String,
    /// Why the line was skipped.
    pub kind: LineErrorKind,
}

/// The reason a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LineErrorKind {
    /// The line does not follow `level (pointer)? TAG (value)?`.
    #[error("unrecognised GEDCOM line")]
    Malformed,
    /// The level number does not fit in a `usize`.
    #[error("level number out of range")]
    LevelOverflow,
}
