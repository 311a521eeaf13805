//! Record assembly and document output.
//!
//! Merges a listing entry with its detail record, and writes rendered
//! documents into an output directory (overwriting earlier runs).

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use statedocs_markdown::{DocumentFields, RenderedDocument};
use statedocs_shared::{DetailRecord, ListingEntry, NormalizedEntity, Result, StateDocsError};

/// Merge a listing entry and its detail record. Both inputs are left untouched.
pub fn assemble(entry: &ListingEntry, detail: &DetailRecord) -> NormalizedEntity {
    NormalizedEntity {
        full_name: detail.full_name.clone(),
        address: detail.address.clone(),
        state_abbr: detail.state_abbr.clone(),
        website: detail.website.clone(),
        phone: detail.phone.clone(),
        display_name: entry.display_name.clone(),
    }
}

/// Renderer input for a department of education document.
pub fn department_fields(entity: &NormalizedEntity) -> DocumentFields {
    DocumentFields {
        name: entity.display_name.clone(),
        state_abbr: entity.state_abbr.clone(),
        website: Some(entity.website.clone()),
        headquarters: Some(entity.address.clone()),
    }
}

/// Create `dir` (and parents) unless it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        debug!(path = %dir.display(), "output directory exists");
        return Ok(());
    }

    std::fs::create_dir_all(dir).map_err(|e| StateDocsError::io(dir, e))?;
    info!(path = %dir.display(), "created directory");
    Ok(())
}

/// Write a rendered document as `<dir>/<file_name>`, replacing any existing file.
pub fn write_document(dir: &Path, doc: &RenderedDocument) -> Result<PathBuf> {
    let path = dir.join(&doc.file_name);
    std::fs::write(&path, &doc.content).map_err(|e| StateDocsError::io(&path, e))?;
    debug!(path = %path.display(), bytes = doc.content.len(), "wrote document");
    Ok(path)
}
