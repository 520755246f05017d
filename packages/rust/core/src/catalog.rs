//! Catalog snapshot loading.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, instrument, warn};

use contentflow_shared::{ContentFlowError, ContentItem, Result};

/// Load a catalog snapshot (a JSON array of entries) from disk.
///
/// Entries without an id are rejected. Duplicate ids are kept; lookups
/// resolve to the first entry with a given id.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_catalog(path: &Path) -> Result<Vec<ContentItem>> {
    let content = std::fs::read_to_string(path).map_err(|e| ContentFlowError::io(path, e))?;
    let entries = parse_catalog(&content)?;
    info!(entries = entries.len(), "catalog loaded");
    Ok(entries)
}

/// Parse and validate a catalog snapshot from JSON text.
pub fn parse_catalog(json: &str) -> Result<Vec<ContentItem>> {
    let entries: Vec<ContentItem> = serde_json::from_str(json)
        .map_err(|e| ContentFlowError::catalog(format!("invalid catalog JSON: {e}")))?;

    let mut seen = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        if entry.id.trim().is_empty() {
            return Err(ContentFlowError::catalog(format!(
                "entry {index} (\"{}\") has an empty id",
                entry.title
            )));
        }
        if !seen.insert(entry.id.as_str()) {
            warn!(id = %entry.id, index, "duplicate catalog id, later entry is unreachable");
        }
    }

    Ok(entries)
}
