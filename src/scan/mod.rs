//! Repository scanning: walking, summarizing and aggregating.

mod summarize;
mod types;
mod walker;

use std::path::PathBuf;
use thiserror::Error;

pub use summarize::{relative_path, summarize};
pub use types::{
    AnalysisResult, Declarations, FileRecord, LargestFile, Outcome, RepositoryStats,
    LARGEST_FILES_COUNT,
};
pub use walker::Walker;

/// Errors raised by the scanner.
///
/// Only the root variants abort a walk; `Path` is turned
/// into a per-file error record by the walker.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("repository root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("repository root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot read repository root {}: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("path {} is not under repository root {}", .path.display(), .root.display())]
    Path { path: PathBuf, root: PathBuf },
}
