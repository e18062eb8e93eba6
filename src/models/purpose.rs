use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason for a library visit, as offered at the check-in desk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Purpose {
    Study,
    Research,
    #[serde(rename = "Borrow Books")]
    BorrowBooks,
    #[serde(rename = "Used Computer")]
    UsedComputer,
    #[serde(rename = "Library Card Application")]
    LibraryCardApplication,
}

impl Purpose {
    pub const ALL: [Purpose; 5] = [
        Purpose::Study,
        Purpose::Research,
        Purpose::BorrowBooks,
        Purpose::UsedComputer,
        Purpose::LibraryCardApplication,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Purpose::Study => "Study",
            Purpose::Research => "Research",
            Purpose::BorrowBooks => "Borrow Books",
            Purpose::UsedComputer => "Used Computer",
            Purpose::LibraryCardApplication => "Library Card Application",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.to_db_str() == s)
    }

    /// Lenient parse for user input: case-insensitive, surrounding blanks ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = input.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.to_db_str().eq_ignore_ascii_case(wanted))
    }
}

impl Purpose {
    /// Canonical display string for a known purpose, `raw` otherwise.
    pub fn canonical_label(raw: &str) -> String {
        match Self::parse(raw) {
            Some(p) => p.to_db_str().to_string(),
            None => raw.to_string(),
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case_and_blanks() {
        assert_eq!(Purpose::parse("study"), Some(Purpose::Study));
        assert_eq!(Purpose::parse("  borrow BOOKS "), Some(Purpose::BorrowBooks));
        assert_eq!(Purpose::parse("Napping"), None);
        assert_eq!(Purpose::parse(""), None);
    }

    #[test]
    fn db_strings_are_stable() {
        for p in Purpose::ALL {
            assert_eq!(Purpose::from_db_str(p.to_db_str()), Some(p));
        }
        assert_eq!(Purpose::from_db_str("study"), None);
    }

    #[test]
    fn canonical_label_keeps_unknown_text() {
        assert_eq!(Purpose::canonical_label("borrow books"), "Borrow Books");
        assert_eq!(Purpose::canonical_label("Thesis defense"), "Thesis defense");
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Purpose::UsedComputer).unwrap();
        assert_eq!(json, "\"Used Computer\"");
    }
}
