//! Consolidated CSV export of crawled entities.

use std::path::Path;

use tracing::info;

use statedocs_shared::{NormalizedEntity, Result, StateDocsError};

/// Write one row per entity, in the given order.
///
/// The header row comes from the [`NormalizedEntity`] field names. Nothing is
/// written (not even a header) when `entities` is empty; returns the number of
/// rows written.
pub fn write_export<'a>(
    path: &Path,
    entities: impl IntoIterator<Item = &'a NormalizedEntity>,
) -> Result<usize> {
    let mut entities = entities.into_iter().peekable();
    if entities.peek().is_none() {
        return Ok(0);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StateDocsError::io(parent, e))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| StateDocsError::Csv(format!("{}: {e}", path.display())))?;

    let mut rows = 0;
    for entity in entities {
        writer
            .serialize(entity)
            .map_err(|e| StateDocsError::Csv(format!("{}: {e}", path.display())))?;
        rows += 1;
    }

    writer.flush().map_err(|e| StateDocsError::io(path, e))?;
    info!(path = %path.display(), rows, "wrote export");

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, address: &str) -> NormalizedEntity {
        NormalizedEntity {
            full_name: format!("{name} Department of Education"),
            address: address.into(),
            state_abbr: "XX".into(),
            website: "https://example.gov".into(),
            phone: "555-0100".into(),
            display_name: name.into(),
        }
    }

    #[test]
    fn header_then_rows_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("export.csv");

        let rows = vec![
            entity("Ohio", "25 South Front Street, Columbus, 43215"),
            entity("Utah", "unknown"),
        ];
        assert_eq!(write_export(&path, &rows).unwrap(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "full_name,address,state_abbr,website,phone,display_name",
                "Ohio Department of Education,\"25 South Front Street, Columbus, 43215\",XX,https://example.gov,555-0100,Ohio",
                "Utah Department of Education,unknown,XX,https://example.gov,555-0100,Utah",
            ]
        );
    }

    #[test]
    fn empty_input_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("export.csv");

        assert_eq!(write_export(&path, &Vec::<NormalizedEntity>::new()).unwrap(), 0);
        assert!(!path.exists());
    }
}
