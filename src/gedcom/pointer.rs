use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};

/// A GEDCOM cross-reference identifier such as `@I1@`.
///
/// The text is fully wrapped in `@` delimiters and the interior is non-empty
/// and contains no further `@`. The delimiters are part of the stored value,
/// so a pointer renders exactly as it appears in a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pointer(String);

impl Pointer {
    /// Creates a pointer from its delimited text.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError`] if the text is not of the form `@...@` with a
    /// non-empty interior free of `@`.
    pub fn new(text: impl Into<String>) -> Result<Self, PointerError> {
        let text = text.into();
        if Self::is_pointer_shaped(&text) {
            Ok(Self(text))
        } else {
            Err(PointerError(text))
        }
    }

    /// The `n`th identifier in the individual space, `@I{n}@`.
    #[must_use]
    pub fn individual(n: usize) -> Self {
        Self(format!("@I{n}@"))
    }

    /// The `n`th identifier in the family space, `@F{n}@`.
    #[must_use]
    pub fn family(n: usize) -> Self {
        Self(format!("@F{n}@"))
    }

    /// Whether `text` would be accepted by [`Pointer::new`].
    #[must_use]
    pub fn is_pointer_shaped(text: &str) -> bool {
        text.strip_prefix('@')
            .and_then(|rest| rest.strip_suffix('@'))
            .is_some_and(|interior| !interior.is_empty() && !interior.contains('@'))
    }

    /// Returns the delimited text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Pointer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Pointer {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for Pointer {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Pointer {
    type Error = PointerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = PointerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Pointer> for String {
    fn from(pointer: Pointer) -> Self {
        pointer.0
    }
}

/// Error returned when text is not a valid `@...@` pointer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid pointer '{0}': must be wrapped in '@' with a non-empty interior")]
pub struct PointerError(String);

impl PointerError {
    /// Returns the rejected text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("@I1@"; "individual")]
    #[test_case("@F12@"; "family")]
    #[test_case("@N_NOTE 1@"; "interior may contain spaces")]
    fn accepts_delimited_text(text: &str) {
        let pointer = Pointer::new(text).unwrap();
        assert_eq!(pointer.as_str(), text);
    }

    #[test_case(""; "empty")]
    #[test_case("@@"; "empty interior")]
    #[test_case("@I1"; "missing closing delimiter")]
    #[test_case("I1@"; "missing opening delimiter")]
    #[test_case("@I@1@"; "nested delimiter")]
    #[test_case("john@example.com"; "email address")]
    fn rejects_other_text(text: &str) {
        assert_eq!(Pointer::new(text), Err(PointerError(text.to_string())));
    }

    #[test]
    fn synthesized_identifiers() {
        assert_eq!(Pointer::individual(3).as_str(), "@I3@");
        assert_eq!(Pointer::family(1).as_str(), "@F1@");
    }

    #[test]
    fn serializes_as_plain_string() {
        let pointer: Pointer = "@I7@".parse().unwrap();
        let json = serde_json::to_string(&pointer).unwrap();
        assert_eq!(json, "\"@I7@\"");

        let back: Pointer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pointer);
        assert!(serde_json::from_str::<Pointer>("\"I7\"").is_err());
    }

    #[test]
    fn error_display() {
        let error = Pointer::new("I1").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid pointer 'I1': must be wrapped in '@' with a non-empty interior"
        );
    }
}
