//! Core types for scan results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::language::Language;

/// Names declared in one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarations {
    #[serde(default)]
    pub functions: Vec<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub imports: Vec<String>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of names across all three kinds.
    pub fn len(&self) -> usize {
        self.functions.len() + self.classes.len() + self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What happened to a single file. Exactly one variant holds per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Declarations(Declarations),
    /// Not analyzed because of a resource limit.
    Skipped(String),
    /// Extraction, path or filesystem failure.
    Error(String),
}

impl Outcome {
    pub fn declarations(&self) -> Option<&Declarations> {
        match self {
            Outcome::Declarations(d) => Some(d),
            _ => None,
        }
    }

    pub fn skipped(&self) -> Option<&str> {
        match self {
            Outcome::Skipped(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_scanned(&self) -> bool {
        matches!(self, Outcome::Declarations(_))
    }
}

/// One analyzed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the repository root, `/`-separated.
    pub path: String,
    pub language: Language,
    /// Size on disk at scan time.
    pub bytes: u64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileRecord {
    /// Declarations, or an empty set for skipped and errored files.
    pub fn declarations(&self) -> Declarations {
        self.outcome.declarations().cloned().unwrap_or_default()
    }
}

/// A (path, size) entry of the largest-files table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargestFile {
    pub path: String,
    pub bytes: u64,
}

/// Aggregate statistics over one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryStats {
    pub total_considered: usize,
    pub scanned: usize,
    pub skipped: usize,
    pub errors: usize,
    pub by_language: BTreeMap<Language, usize>,
    pub largest_files: Vec<LargestFile>,
}

/// Number of entries kept in `RepositoryStats::largest_files`.
pub const LARGEST_FILES_COUNT: usize = 5;

impl RepositoryStats {
    /// Compute statistics for records in walk order.
    pub fn from_records(files: &[FileRecord]) -> Self {
        let mut stats = RepositoryStats {
            total_considered: files.len(),
            ..Default::default()
        };

        for record in files {
            match record.outcome {
                Outcome::Declarations(_) => stats.scanned += 1,
                Outcome::Skipped(_) => stats.skipped += 1,
                Outcome::Error(_) => stats.errors += 1,
            }
            *stats.by_language.entry(record.language).or_insert(0) += 1;
        }

        // sort_by is stable, so equal sizes keep walk order
        let mut candidates: Vec<LargestFile> = files
            .iter()
            .map(|r| LargestFile {
                path: r.path.clone(),
                bytes: r.bytes,
            })
            .collect();
        candidates.sort_by(|a, b| b.bytes.cmp(&a.bytes));
        candidates.truncate(LARGEST_FILES_COUNT);
        stats.largest_files = candidates;

        stats
    }

    /// Check the partition invariant.
    pub fn is_consistent(&self) -> bool {
        self.scanned + self.skipped + self.errors == self.total_considered
    }
}

/// Full output of one walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub repo_path: String,
    pub files: Vec<FileRecord>,
    pub stats: RepositoryStats,
    /// Set when the entry budget stopped the walk early.
    #[serde(default)]
    pub truncated: bool,
}

impl AnalysisResult {
    pub fn new(repo_path: String, files: Vec<FileRecord>, truncated: bool) -> Self {
        let stats = RepositoryStats::from_records(&files);
        Self {
            repo_path,
            files,
            stats,
            truncated,
        }
    }

    /// Records that were successfully scanned.
    pub fn scanned_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.outcome.is_scanned())
    }
}
