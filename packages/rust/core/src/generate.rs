//! CSV-driven document generation (states and boards of education).
//!
//! Reads a local CSV, renders one document per row with a non-empty `state`,
//! and writes it into the output directory, replacing earlier runs.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use statedocs_markdown::{DocumentFields, DocumentRenderer};
use statedocs_shared::{DocumentKind, Result, StateDocsError};

use crate::assembler::{ensure_dir, write_document};

const STATE_COLUMN: &str = "state";
const ABBREVIATION_COLUMN: &str = "abbreviation";
const WEBSITE_COLUMN: &str = "boe_url";

/// Configuration for [`generate_from_csv`].
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// `State` or `StateBoardOfEducation`.
    pub kind: DocumentKind,
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

/// Result of a CSV generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Documents written. Skipped rows are not counted.
    pub created: usize,
    pub output_dir: PathBuf,
    pub elapsed: Duration,
}

/// One usable input row, values trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InputRow {
    state: String,
    abbreviation: String,
    website: Option<String>,
}

/// Render every row of the input CSV as a document of `config.kind`.
#[instrument(skip_all, fields(kind = %config.kind, input = %config.input.display()))]
pub fn generate_from_csv(
    config: &GenerateConfig,
    renderer: &DocumentRenderer,
) -> Result<GenerateReport> {
    let start = Instant::now();

    ensure_dir(&config.output_dir)?;
    let rows = read_rows(&config.input, config.kind)?;

    let mut created = 0;
    for row in &rows {
        let fields = DocumentFields {
            name: row.state.clone(),
            state_abbr: row.abbreviation.clone(),
            website: row.website.clone(),
            headquarters: None,
        };
        let doc = renderer.render(config.kind, &fields);
        write_document(&config.output_dir, &doc)?;
        created += 1;
    }

    info!(
        created,
        output_dir = %config.output_dir.display(),
        "generation complete"
    );

    Ok(GenerateReport {
        created,
        output_dir: config.output_dir.clone(),
        elapsed: start.elapsed(),
    })
}

/// Read the rows of `path` that carry a state name.
fn read_rows(path: &Path, kind: DocumentKind) -> Result<Vec<InputRow>> {
    let with_website = match kind {
        DocumentKind::State => false,
        DocumentKind::StateBoardOfEducation => true,
        DocumentKind::StateDepartmentOfEducation => {
            return Err(StateDocsError::validation(
                "department documents are built from the directory crawl, not a CSV",
            ));
        }
    };

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => StateDocsError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => StateDocsError::io(path, e),
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| StateDocsError::Csv(format!("{}: {e}", path.display())))?
        .clone();

    let column = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            StateDocsError::validation(format!(
                "{}: missing column '{name}'",
                path.display()
            ))
        })
    };

    let state_col = column(STATE_COLUMN)?;
    let abbreviation_col = column(ABBREVIATION_COLUMN)?;
    let website_col = if with_website {
        Some(column(WEBSITE_COLUMN)?)
    } else {
        None
    };

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| StateDocsError::Csv(format!("{}: {e}", path.display())))?;
        let cell = |idx: usize| record.get(idx).unwrap_or_default().trim().to_string();

        let state = cell(state_col);
        if state.is_empty() {
            debug!(line = line + 2, "row without state, skipping");
            continue;
        }

        rows.push(InputRow {
            state,
            abbreviation: cell(abbreviation_col),
            website: website_col.map(cell).filter(|w| !w.is_empty()),
        });
    }

    Ok(rows)
}
