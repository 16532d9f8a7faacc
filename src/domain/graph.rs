use std::collections::HashMap;

use super::records::{
    Citation, Family, Individual, Media, Note, Place, Record, Repository, Source,
};
use crate::gedcom::Pointer;

/// Records of one kind, keyed by their pointer, iterated in insertion order.
///
/// Inserting a record whose pointer is already present replaces the stored
/// record in place: the newer record wins, the older position is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMap<T> {
    records: Vec<T>,
    index: HashMap<Pointer, usize>,
}

impl<T> Default for RecordMap<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Record> RecordMap<T> {
    /// Inserts a record under its own pointer, returning the record it
    /// replaced.
    pub fn insert(&mut self, record: T) -> Option<T> {
        if let Some(&position) = self.index.get(record.id()) {
            return Some(std::mem::replace(&mut self.records[position], record));
        }
        self.index.insert(record.id().clone(), self.records.len());
        self.records.push(record);
        None
    }
}

impl<T> RecordMap<T> {
    /// Looks up a record by pointer.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// Whether a record with this pointer is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

impl<'a, T> IntoIterator for &'a RecordMap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<T: Record> FromIterator<T> for RecordMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = Self::default();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

/// Every record recovered from one GEDCOM document, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainGraph {
    /// `INDI` records.
    pub individuals: RecordMap<Individual>,
    /// `FAM` records.
    pub families: RecordMap<Family>,
    /// `SOUR` records.
    pub sources: RecordMap<Source>,
    /// `REPO` records.
    pub repositories: RecordMap<Repository>,
    /// `OBJE` records.
    pub media: RecordMap<Media>,
    /// `NOTE` records.
    pub notes: RecordMap<Note>,
    /// `PLAC` records.
    pub places: RecordMap<Place>,
    /// `CITN` records.
    pub citations: RecordMap<Citation>,
}

impl DomainGraph {
    /// The total number of records of every kind.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.individuals.len()
            + self.families.len()
            + self.sources.len()
            + self.repositories.len()
            + self.media.len()
            + self.notes.len()
            + self.places.len()
            + self.citations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.parse().unwrap(),
            text: text.to_string(),
        }
    }

    #[test]
    fn iterates_in_insertion_order() {
        let notes: RecordMap<Note> = [note("@N2@", "b"), note("@N1@", "a"), note("@N3@", "c")]
            .into_iter()
            .collect();

        let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["@N2@", "@N1@", "@N3@"]);
        assert_eq!(notes.get("@N1@").map(|n| n.text.as_str()), Some("a"));
        assert!(notes.get("@N4@").is_none());
    }

    #[test]
    fn duplicate_keeps_position_and_replaces_value() {
        let mut notes = RecordMap::default();
        assert!(notes.insert(note("@N1@", "first")).is_none());
        notes.insert(note("@N2@", "other"));

        let replaced = notes.insert(note("@N1@", "second"));

        assert_eq!(replaced.map(|n| n.text), Some("first".to_string()));
        assert_eq!(notes.len(), 2);
        let texts: Vec<_> = notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, ["second", "other"]);
    }

    #[test]
    fn record_count_spans_kinds() {
        let mut graph = DomainGraph::default();
        assert_eq!(graph.record_count(), 0);

        graph.notes.insert(note("@N1@", "x"));
        graph
            .individuals
            .insert(Individual::new(Pointer::individual(1)));
        assert_eq!(graph.record_count(), 2);
    }
}
