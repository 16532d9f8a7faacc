use super::{Pointer, Tag};

/// The payload of a GEDCOM line.
///
/// A line carries either a pointer or a literal, never both. Where a pointer
/// appears on the line is part of its meaning: the record's own identifier is
/// written before the tag, a reference to another record after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The identifier of the record this line opens (`0 @I1@ INDI`).
    Xref(Pointer),
    /// A reference to another record (`1 HUSB @I1@`).
    Pointer(Pointer),
    /// A literal payload (`1 NAME John /Doe/`).
    Text(String),
}

impl Value {
    /// Classifies a payload found after the tag.
    ///
    /// Pointer-shaped text becomes [`Value::Pointer`], anything else
    /// [`Value::Text`].
    #[must_use]
    pub fn payload(text: impl Into<String>) -> Self {
        Pointer::new(text).map_or_else(|error| Self::Text(error.into_text()), Self::Pointer)
    }

    /// The value as it appears in text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Xref(pointer) | Self::Pointer(pointer) => pointer.as_str(),
            Self::Text(text) => text,
        }
    }

    /// The pointer carried by this value, in either position.
    #[must_use]
    pub const fn as_pointer(&self) -> Option<&Pointer> {
        match self {
            Self::Xref(pointer) | Self::Pointer(pointer) => Some(pointer),
            Self::Text(_) => None,
        }
    }
}

/// One line of a GEDCOM document together with its nested lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    level: usize,
    tag: Tag,
    value: Option<Value>,
    children: Vec<Node>,
}

impl Node {
    /// A node with no value and no children.
    #[must_use]
    pub const fn new(level: usize, tag: Tag) -> Self {
        Self {
            level,
            tag,
            value: None,
            children: Vec::new(),
        }
    }

    /// A node opening the record identified by `xref`.
    #[must_use]
    pub const fn record(level: usize, xref: Pointer, tag: Tag) -> Self {
        Self {
            level,
            tag,
            value: Some(Value::Xref(xref)),
            children: Vec::new(),
        }
    }

    /// Sets the value.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets a payload value, classified with [`Value::payload`].
    #[must_use]
    pub fn with_payload(self, text: impl Into<String>) -> Self {
        self.with_value(Value::payload(text))
    }

    /// Sets a reference to another record.
    #[must_use]
    pub fn with_pointer(self, pointer: Pointer) -> Self {
        self.with_value(Value::Pointer(pointer))
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child in place.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// The nesting level written at the start of the line.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// The line's tag.
    #[must_use]
    pub const fn tag(&self) -> &Tag {
        &self.tag
    }

    /// The line's value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The line's value as text, if any.
    #[must_use]
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_ref().map(Value::as_str)
    }

    /// The pointer carried by the line, in either position.
    #[must_use]
    pub fn pointer(&self) -> Option<&Pointer> {
        self.value.as_ref().and_then(Value::as_pointer)
    }

    /// The nested lines, in source order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// The first child with the given tag.
    #[must_use]
    pub fn child(&self, tag: &Tag) -> Option<&Self> {
        self.children.iter().find(|child| &child.tag == tag)
    }

    /// The text value of the first child with the given tag.
    #[must_use]
    pub fn child_value(&self, tag: &Tag) -> Option<&str> {
        self.child(tag).and_then(Self::value_str)
    }

    /// All children with the given tag, in source order.
    pub fn children_with<'a>(&'a self, tag: &'a Tag) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |child| &child.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual() -> Node {
        Node::record(0, Pointer::individual(1), Tag::Individual)
            .with_child(Node::new(1, Tag::Name).with_payload("John /Doe/"))
            .with_child(Node::new(1, Tag::SpouseFamily).with_payload("@F1@"))
            .with_child(Node::new(1, Tag::SpouseFamily).with_payload("@F2@"))
    }

    #[test]
    fn payload_classification() {
        assert_eq!(
            Value::payload("@F1@"),
            Value::Pointer(Pointer::family(1))
        );
        assert_eq!(
            Value::payload("John /Doe/"),
            Value::Text("John /Doe/".to_string())
        );
    }

    #[test]
    fn first_child_with_tag() {
        let node = individual();
        assert_eq!(node.child_value(&Tag::Name), Some("John /Doe/"));
        assert_eq!(node.child_value(&Tag::SpouseFamily), Some("@F1@"));
        assert!(node.child(&Tag::Sex).is_none());
    }

    #[test]
    fn all_children_with_tag() {
        let node = individual();
        let families: Vec<_> = node
            .children_with(&Tag::SpouseFamily)
            .filter_map(Node::pointer)
            .map(Pointer::as_str)
            .collect();
        assert_eq!(families, ["@F1@", "@F2@"]);
    }

    #[test]
    fn record_pointer_is_exposed_in_either_position() {
        let node = individual();
        assert_eq!(node.pointer(), Some(&Pointer::individual(1)));
        assert_eq!(node.value_str(), Some("@I1@"));
        assert!(matches!(node.value(), Some(Value::Xref(_))));
    }
}
