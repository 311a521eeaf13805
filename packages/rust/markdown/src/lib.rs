//! Markdown document rendering for state reference entities.
//!
//! Every document is a front matter block followed by a single `#` heading
//! repeating the entity name. The front matter cross-references an author, a
//! template, and the entity itself with `[[wiki-link]]` values that are left
//! for the consuming vault to resolve.

mod stamp;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use statedocs_shared::DocumentKind;

pub use stamp::{Clock, FixedClock, IdSource, RandomIds, SequentialIds, SystemClock};

/// Front matter schema version for board and department documents.
const SCHEMA_VERSION: &str = "1.0";

/// Date format for `created` / `modified`.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The entity-specific values substituted into a template.
#[derive(Debug, Clone, Default)]
pub struct DocumentFields {
    /// Display name, used for the title, the self-reference, and the slug.
    pub name: String,
    pub state_abbr: String,
    /// Written verbatim after `website: `; `None` leaves the value empty.
    pub website: Option<String>,
    /// Only rendered for department documents.
    pub headquarters: Option<String>,
}

/// A fully rendered document, ready to be written as `file_name`.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub id: Uuid,
    pub created: NaiveDate,
    pub modified: NaiveDate,
    /// `<slug><suffix>.md`
    pub file_name: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders [`DocumentFields`] into markdown with fresh identifiers and dates.
pub struct DocumentRenderer {
    author: String,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
}

impl DocumentRenderer {
    /// A renderer stamping the local date and random v4 identifiers.
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            clock: Box::new(SystemClock),
            ids: Box::new(RandomIds),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_ids(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Render one document of the given kind.
    pub fn render(&self, kind: DocumentKind, fields: &DocumentFields) -> RenderedDocument {
        let id = self.ids.next_id();
        let today = self.clock.today();
        let date = today.format(DATE_FORMAT).to_string();

        let content = match kind {
            DocumentKind::State => self.state_document(id, &date, fields),
            _ => self.organization_document(kind, id, &date, fields),
        };

        let file_name = file_name(kind, &fields.name);
        debug!(%kind, %file_name, %id, "rendered document");

        RenderedDocument {
            id,
            created: today,
            modified: today,
            file_name,
            content,
        }
    }

    fn state_document(&self, id: Uuid, date: &str, fields: &DocumentFields) -> String {
        let name = escape_yaml_string(&fields.name);

        let mut fm = String::from("---\n");
        fm.push_str(&format!("uuid: \"{id}\"\n"));
        fm.push_str(&format!("author: \"[[{}]]\"\n", self.author));
        fm.push_str(&format!("created: \"[[{date}]]\"\n"));
        fm.push_str(&format!("modified: \"[[{date}]]\"\n"));
        fm.push_str(&format!("name: \"[[{name}]]\"\n"));
        fm.push_str(&format!(
            "state_abbr: \"{}\"\n",
            escape_yaml_string(&fields.state_abbr)
        ));
        fm.push_str("---\n");

        format!("{fm}\n# {}\n", fields.name)
    }

    fn organization_document(
        &self,
        kind: DocumentKind,
        id: Uuid,
        date: &str,
        fields: &DocumentFields,
    ) -> String {
        let marker = kind.type_marker();
        let name = escape_yaml_string(&fields.name);

        let mut fm = String::from("---\n");
        fm.push_str(&format!("version: {SCHEMA_VERSION}\n"));
        fm.push_str(&format!("type: {marker}\n"));
        fm.push_str(&format!("uuid: \"{id}\"\n"));
        fm.push_str(&format!("author: \"[[{}]]\"\n", self.author));
        fm.push_str(&format!("created: \"[[{date}]]\"\n"));
        fm.push_str(&format!("modified: \"[[{date}]]\"\n"));
        fm.push_str(&format!("template: \"[[template-{marker}]]\"\n"));
        fm.push_str(&format!("name: \"[[{name}]]\"\n"));
        fm.push_str(&format!(
            "website: {}\n",
            fields.website.as_deref().unwrap_or_default()
        ));
        if kind == DocumentKind::StateDepartmentOfEducation {
            fm.push_str(&format!(
                "headquarters: \"{}\"\n",
                escape_yaml_string(fields.headquarters.as_deref().unwrap_or_default())
            ));
        }
        fm.push_str(&format!(
            "state: \"{}\"\n",
            escape_yaml_string(&fields.state_abbr)
        ));
        fm.push_str("tags: \n");
        fm.push_str("- \"#organization\"\n");
        fm.push_str(&format!("- \"#organization/{marker}\"\n"));
        fm.push_str("---\n");

        format!("{fm}\n# {}\n", fields.name)
    }
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Lower-case the name and turn spaces and path separators into hyphens.
/// Nothing else changes.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace([' ', '/', '\\'], "-")
}

/// Output file name for an entity: `<slug><suffix>.md`.
pub fn file_name(kind: DocumentKind, name: &str) -> String {
    format!("{}{}.md", slugify(name), kind.file_suffix())
}

/// Escape special characters in a double-quoted YAML value.
fn escape_yaml_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
