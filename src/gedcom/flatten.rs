//! Forest of [`Node`]s to a [`DomainGraph`].
//!
//! Each top-level node is dispatched on its tag to a handler that reads the
//! record's fields from its direct children. Every handler needs the record's
//! own pointer; a record without one is a [`FlattenError`].

use tracing::{debug, instrument, trace, warn};

use super::{Node, Pointer, Tag};
use crate::domain::{
    Citation, DomainGraph, Fact, Family, Individual, Media, Note, PersonalName, Place, Repository,
    Sex, Source,
};

const INDIVIDUAL_FACTS: &[Tag] = &[Tag::Birth, Tag::Death];
const FAMILY_FACTS: &[Tag] = &[Tag::Marriage, Tag::Divorce];

/// A top-level record that could not be flattened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    /// The record has no `@...@` identifier before its tag.
    #[error("{tag} record at position {index} has no identifier")]
    MissingIdentifier {
        /// The record's tag.
        tag: Tag,
        /// Position of the record among the forest roots.
        index: usize,
    },
}

/// Flattens a forest into a domain graph, stopping at the first record
/// without an identifier.
///
/// # Errors
///
/// Returns [`FlattenError::MissingIdentifier`] for the first supported record
/// that carries no pointer.
#[instrument(level = "debug", skip(forest), fields(roots = forest.len()))]
pub fn flatten(forest: &[Node]) -> Result<DomainGraph, FlattenError> {
    let mut graph = DomainGraph::default();
    for (index, node) in forest.iter().enumerate() {
        insert_record(&mut graph, index, node)?;
    }
    Ok(graph)
}

/// Flattens a forest into a domain graph, skipping records without an
/// identifier and returning them alongside the graph.
#[must_use]
#[instrument(level = "debug", skip(forest), fields(roots = forest.len()))]
pub fn flatten_lenient(forest: &[Node]) -> (DomainGraph, Vec<FlattenError>) {
    let mut graph = DomainGraph::default();
    let mut errors = Vec::new();
    for (index, node) in forest.iter().enumerate() {
        if let Err(error) = insert_record(&mut graph, index, node) {
            warn!("{error}");
            errors.push(error);
        }
    }
    (graph, errors)
}

fn insert_record(graph: &mut DomainGraph, index: usize, node: &Node) -> Result<(), FlattenError> {
    let id = || identifier(node, index);

    match node.tag() {
        Tag::Individual => {
            graph.individuals.insert(individual(id()?, node));
        }
        Tag::Family => {
            graph.families.insert(family(id()?, node));
        }
        Tag::Source => {
            graph.sources.insert(source(id()?, node));
        }
        Tag::Repository => {
            graph.repositories.insert(repository(id()?, node));
        }
        Tag::Object => {
            graph.media.insert(media(id()?, node));
        }
        Tag::Note => {
            graph.notes.insert(note(id()?, node));
        }
        Tag::Place => {
            graph.places.insert(place(id()?, node));
        }
        Tag::Citation => {
            graph.citations.insert(citation(id()?, node));
        }
        Tag::Head | Tag::Trailer => trace!(tag = %node.tag(), "skipping document framing"),
        other => warn!(tag = %other, index, "ignoring unsupported top-level record"),
    }
    Ok(())
}

fn identifier(node: &Node, index: usize) -> Result<Pointer, FlattenError> {
    node.pointer()
        .cloned()
        .ok_or_else(|| FlattenError::MissingIdentifier {
            tag: node.tag().clone(),
            index,
        })
}

fn text(node: &Node, tag: &Tag) -> Option<String> {
    node.child_value(tag).map(str::to_string)
}

/// Pointer-shaped values of every child with the given tag.
fn references(node: &Node, tag: &Tag) -> Vec<Pointer> {
    node.children_with(tag).filter_map(reference).collect()
}

fn first_reference(node: &Node, tag: &Tag) -> Option<Pointer> {
    node.children_with(tag).find_map(reference)
}

fn reference(child: &Node) -> Option<Pointer> {
    let pointer = child.pointer().cloned();
    if pointer.is_none() {
        debug!(tag = %child.tag(), value = child.value_str(), "skipping non-pointer reference");
    }
    pointer
}

/// Facts grouped by tag in the order of `allowed`, then by source order.
fn facts(node: &Node, allowed: &[Tag]) -> Vec<Fact> {
    allowed
        .iter()
        .flat_map(|tag| node.children_with(tag))
        .map(|child| Fact {
            tag: child.tag().clone(),
            date: text(child, &Tag::Date),
            place: text(child, &Tag::Place),
            age: text(child, &Tag::Age),
        })
        .collect()
}

fn individual(id: Pointer, node: &Node) -> Individual {
    let names = node
        .children_with(&Tag::Name)
        .map(|name| PersonalName {
            full: name.value_str().unwrap_or_default().to_string(),
            given: text(name, &Tag::Given),
            surname: text(name, &Tag::Surname),
        })
        .collect();

    Individual {
        id,
        names,
        gender: node.child_value(&Tag::Sex).map(Sex::from_code),
        facts: facts(node, INDIVIDUAL_FACTS),
        spouse_family_ids: references(node, &Tag::SpouseFamily),
        child_family_id: first_reference(node, &Tag::ChildFamily),
        note_ids: references(node, &Tag::Note),
    }
}

fn family(id: Pointer, node: &Node) -> Family {
    Family {
        id,
        husband_id: first_reference(node, &Tag::Husband),
        wife_id: first_reference(node, &Tag::Wife),
        child_ids: references(node, &Tag::Child),
        facts: facts(node, FAMILY_FACTS),
        note_ids: references(node, &Tag::Note),
    }
}

fn source(id: Pointer, node: &Node) -> Source {
    Source {
        id,
        title: text(node, &Tag::Title),
        author: text(node, &Tag::Author),
        publication: text(node, &Tag::Publication),
        repository_id: first_reference(node, &Tag::Repository),
    }
}

fn repository(id: Pointer, node: &Node) -> Repository {
    Repository {
        id,
        name: text(node, &Tag::Name),
        address: text(node, &Tag::Address),
    }
}

fn media(id: Pointer, node: &Node) -> Media {
    Media {
        id,
        file: text(node, &Tag::File),
        title: text(node, &Tag::Title),
        note_ids: references(node, &Tag::Note),
    }
}

fn note(id: Pointer, node: &Node) -> Note {
    let mut text = String::new();
    for child in node.children() {
        let value = child.value_str().unwrap_or_default();
        match child.tag() {
            Tag::Continued => {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(value);
            }
            Tag::Concatenated => text.push_str(value),
            _ => {}
        }
    }
    Note { id, text }
}

fn place(id: Pointer, node: &Node) -> Place {
    Place {
        id,
        name: text(node, &Tag::Name),
        phonetic: text(node, &Tag::Phonetic),
    }
}

fn citation(id: Pointer, node: &Node) -> Citation {
    Citation {
        id,
        source_id: first_reference(node, &Tag::Source),
        page: text(node, &Tag::Page),
        text: text(node, &Tag::Text),
    }
}
