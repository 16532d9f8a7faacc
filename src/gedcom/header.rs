//! The `HEAD` metadata written by this crate and the empty-document skeleton
//! it produces when there is nothing to export.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::{Node, Tag};

/// Name of the producing system written under `HEAD.SOUR`.
pub const SOURCE_NAME: &str = "Kinship";

/// Version written under `HEAD.SOUR.VERS`.
pub const SOURCE_VERSION: &str = "1.0";

static EMPTY_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^0 HEAD\n1 SOUR {}\n2 VERS {}\n1 DATE \d{{2}} [A-Z]{{3}} \d{{4}}\n2 TIME \d{{6}}\n0 TRLR$",
        regex::escape(SOURCE_NAME),
        regex::escape(SOURCE_VERSION),
    ))
    .expect("empty-document pattern is a valid regex")
});

/// Formats a timestamp as a GEDCOM date, e.g. `01 JAN 2025`.
#[must_use]
pub fn format_date(now: &DateTime<Utc>) -> String {
    now.format("%d %b %Y").to_string().to_uppercase()
}

/// Formats a timestamp as a compact GEDCOM time, e.g. `123456`.
#[must_use]
pub fn format_time(now: &DateTime<Utc>) -> String {
    now.format("%H%M%S").to_string()
}

/// The `SOUR` and `DATE` children of `HEAD`, stamped with `now`.
pub(crate) fn metadata(now: &DateTime<Utc>) -> [Node; 2] {
    [
        Node::new(1, Tag::Source)
            .with_payload(SOURCE_NAME)
            .with_child(Node::new(2, Tag::Version).with_payload(SOURCE_VERSION)),
        Node::new(1, Tag::Date)
            .with_payload(format_date(now))
            .with_child(Node::new(2, Tag::Time).with_payload(format_time(now))),
    ]
}

/// Whether rendered text is a header and trailer with no records between.
pub(crate) fn is_empty_document(rendered: &str) -> bool {
    EMPTY_DOCUMENT.is_match(rendered)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 34, 56).unwrap()
    }

    #[test]
    fn date_and_time_formats() {
        assert_eq!(format_date(&now()), "01 JAN 2025");
        assert_eq!(format_time(&now()), "123456");

        let late = Utc.with_ymd_and_hms(1999, 12, 9, 7, 5, 3).unwrap();
        assert_eq!(format_date(&late), "09 DEC 1999");
        assert_eq!(format_time(&late), "070503");
    }

    #[test]
    fn skeleton_detection() {
        let skeleton = "0 HEAD\n1 SOUR Kinship\n2 VERS 1.0\n1 DATE 01 JAN 2025\n2 TIME 123456\n0 TRLR";
        assert!(is_empty_document(skeleton));

        let with_person = "0 HEAD\n1 SOUR Kinship\n2 VERS 1.0\n1 DATE 01 JAN 2025\n2 TIME 123456\n1 @I1@ INDI\n0 TRLR";
        assert!(!is_empty_document(with_person));

        let other_source = skeleton.replace("Kinship", "Other");
        assert!(!is_empty_document(&other_source));
    }
}
