//! URIs of the interchange vocabulary and their GEDCOM counterparts.

use crate::gedcom::Tag;

/// Prefix shared by every type URI this crate writes.
pub const NAMESPACE: &str = "http://gedcomx.org/";

/// `http://gedcomx.org/Male`
pub const MALE: &str = "http://gedcomx.org/Male";

/// `http://gedcomx.org/Female`
pub const FEMALE: &str = "http://gedcomx.org/Female";

/// The part of a type URI after its last `/`.
///
/// A URI ending in `/` has an empty trailing segment. Text without any `/`
/// is its own trailing segment.
#[must_use]
pub fn trailing_segment(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

/// Event types understood in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactType {
    /// `Birth` / `BIRT`
    Birth,
    /// `Death` / `DEAT`
    Death,
    /// `Marriage` / `MARR`
    Marriage,
    /// `Burial` / `BURI`
    Burial,
    /// `Adoption` / `ADOP`
    Adoption,
    /// `Divorce` / `DIV`
    Divorce,
}

impl FactType {
    /// Reads the trailing segment of a fact type URI.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "Birth" => Some(Self::Birth),
            "Death" => Some(Self::Death),
            "Marriage" => Some(Self::Marriage),
            "Burial" => Some(Self::Burial),
            "Adoption" => Some(Self::Adoption),
            "Divorce" => Some(Self::Divorce),
            _ => None,
        }
    }

    /// The fact type for a GEDCOM event read from a document.
    ///
    /// Only births, deaths, marriages and divorces are carried from GEDCOM
    /// into the interchange form.
    #[must_use]
    pub const fn from_imported_tag(tag: &Tag) -> Option<Self> {
        match tag {
            Tag::Birth => Some(Self::Birth),
            Tag::Death => Some(Self::Death),
            Tag::Marriage => Some(Self::Marriage),
            Tag::Divorce => Some(Self::Divorce),
            _ => None,
        }
    }

    /// The trailing segment of the type URI.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Birth => "Birth",
            Self::Death => "Death",
            Self::Marriage => "Marriage",
            Self::Burial => "Burial",
            Self::Adoption => "Adoption",
            Self::Divorce => "Divorce",
        }
    }

    /// The full type URI.
    #[must_use]
    pub fn uri(self) -> String {
        format!("{NAMESPACE}{}", self.segment())
    }

    /// The GEDCOM tag written for this event.
    #[must_use]
    pub const fn tag(self) -> Tag {
        match self {
            Self::Birth => Tag::Birth,
            Self::Death => Tag::Death,
            Self::Marriage => Tag::Marriage,
            Self::Burial => Tag::Burial,
            Self::Adoption => Tag::Adoption,
            Self::Divorce => Tag::Divorce,
        }
    }
}

/// Relationship types this crate reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipType {
    /// Two partners, written as a family with both spouses.
    Couple,
    /// A parent and a child, written as a family with one parent.
    ParentChild,
    /// Two former partners.
    Divorce,
}

impl RelationshipType {
    /// Reads the trailing segment of a relationship type URI.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "Couple" => Some(Self::Couple),
            "ParentChild" => Some(Self::ParentChild),
            "Divorce" => Some(Self::Divorce),
            _ => None,
        }
    }

    /// The trailing segment of the type URI.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Couple => "Couple",
            Self::ParentChild => "ParentChild",
            Self::Divorce => "Divorce",
        }
    }

    /// The full type URI.
    #[must_use]
    pub fn uri(self) -> String {
        format!("{NAMESPACE}{}", self.segment())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("http://gedcomx.org/Birth", "Birth")]
    #[test_case("http://gedcomx.org/", ""; "trailing slash")]
    #[test_case("Couple", "Couple"; "no slash")]
    #[test_case("", ""; "empty")]
    fn trailing_segments(uri: &str, expected: &str) {
        assert_eq!(trailing_segment(uri), expected);
    }

    #[test]
    fn fact_type_round_trip() {
        for fact in [
            FactType::Birth,
            FactType::Death,
            FactType::Marriage,
            FactType::Burial,
            FactType::Adoption,
            FactType::Divorce,
        ] {
            assert_eq!(FactType::from_segment(trailing_segment(&fact.uri())), Some(fact));
        }
        assert_eq!(FactType::from_segment("Occupation"), None);
    }

    #[test]
    fn only_core_events_are_imported() {
        assert_eq!(FactType::from_imported_tag(&Tag::Divorce), Some(FactType::Divorce));
        assert_eq!(FactType::from_imported_tag(&Tag::Burial), None);
    }

    #[test]
    fn relationship_uris() {
        assert_eq!(RelationshipType::Couple.uri(), "http://gedcomx.org/Couple");
        assert_eq!(
            RelationshipType::from_segment("ParentChild"),
            Some(RelationshipType::ParentChild)
        );
        assert_eq!(RelationshipType::from_segment("Godparent"), None);
    }
}
