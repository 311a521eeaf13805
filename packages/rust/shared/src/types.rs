//! Core domain types for the state reference documents.

use serde::{Deserialize, Serialize};

/// Placeholder for any detail field that could not be located on a page.
pub const UNKNOWN: &str = "unknown";

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// The three kinds of entity a document can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// A U.S. state (bare variant, no filename suffix).
    State,
    StateBoardOfEducation,
    StateDepartmentOfEducation,
}

impl DocumentKind {
    /// Type marker written into front matter, e.g. `state-board-of-education`.
    pub fn type_marker(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::StateBoardOfEducation => "state-board-of-education",
            Self::StateDepartmentOfEducation => "state-department-of-education",
        }
    }

    /// Suffix appended to the slug when naming the output file.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Self::State => "",
            Self::StateBoardOfEducation => "-state-board-of-education",
            Self::StateDepartmentOfEducation => "-state-department-of-education",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_marker())
    }
}

// ---------------------------------------------------------------------------
// Crawl records
// ---------------------------------------------------------------------------

/// One link discovered on the directory listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Trimmed link text, e.g. `Ohio`.
    pub display_name: String,
    /// Absolute URL of the entity's detail page.
    pub detail_url: String,
}

/// Contact fields scraped from one detail page.
///
/// Every field holds [`UNKNOWN`] when the page did not carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub full_name: String,
    /// `street, city, zip`, present only when all three parts were found.
    pub address: String,
    pub state_abbr: String,
    pub website: String,
    pub phone: String,
}

impl Default for DetailRecord {
    fn default() -> Self {
        Self {
            full_name: UNKNOWN.into(),
            address: UNKNOWN.into(),
            state_abbr: UNKNOWN.into(),
            website: UNKNOWN.into(),
            phone: UNKNOWN.into(),
        }
    }
}

/// A listing entry merged with its detail record.
///
/// Field order here is the column order of the consolidated CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEntity {
    pub full_name: String,
    pub address: String,
    pub state_abbr: String,
    pub website: String,
    pub phone: String,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_record_defaults_to_unknown() {
        let record = DetailRecord::default();
        assert_eq!(record.full_name, UNKNOWN);
        assert_eq!(record.address, UNKNOWN);
        assert_eq!(record.state_abbr, UNKNOWN);
        assert_eq!(record.website, UNKNOWN);
        assert_eq!(record.phone, UNKNOWN);
    }

    #[test]
    fn kind_markers_and_suffixes() {
        assert_eq!(DocumentKind::State.file_suffix(), "");
        assert_eq!(
            DocumentKind::StateBoardOfEducation.file_suffix(),
            "-state-board-of-education"
        );
        assert_eq!(
            DocumentKind::StateDepartmentOfEducation.to_string(),
            "state-department-of-education"
        );
    }
}
