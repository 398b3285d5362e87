//! Normalization of one extraction into a `FileRecord`.

use std::path::Path;

use crate::extract::Extraction;

use super::{FileRecord, ScanError};

/// Render `path` relative to `root` with `/` separators.
pub fn relative_path(path: &Path, root: &Path) -> Result<String, ScanError> {
    let rel = path.strip_prefix(root).map_err(|_| ScanError::Path {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    })?;

    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Build a record from an extraction. Performs no I/O.
pub fn summarize(extraction: Extraction, root: &Path, bytes: u64) -> Result<FileRecord, ScanError> {
    let path = relative_path(&extraction.file, root)?;
    Ok(FileRecord {
        path,
        language: extraction.language,
        bytes,
        outcome: extraction.outcome,
    })
}
