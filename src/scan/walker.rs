//! Repository walker that dispatches files to extractors and aggregates
//! the results.
//!
//! Traversal is depth-first with directory children sorted by file name, so
//! a walk over an unchanged tree always visits entries in the same order.
//! Every visited entry (directories included) counts against the budget.

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::extract::{self, extract_file};
use crate::language::{classify, is_supported, Language};
use crate::report::render_flat;

use super::{summarize, AnalysisResult, FileRecord, Outcome, ScanError};

/// A file selected during enumeration, not yet analyzed.
#[derive(Debug)]
enum Candidate {
    File {
        path: PathBuf,
        language: Language,
        bytes: u64,
    },
    Failed {
        path: PathBuf,
        language: Language,
        message: String,
    },
}

/// Walks a repository and produces an `AnalysisResult`.
pub struct Walker {
    root: PathBuf,
    config: Config,
    max_files: usize,
    parallel: bool,
}

impl Walker {
    /// Create a walker using the configured default budget.
    pub fn new<P: AsRef<Path>>(root: P, config: &Config) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config: config.clone(),
            max_files: config.effective_max_files(None),
            parallel: config.parallel,
        }
    }

    /// Request an entry budget. Values above the configured ceiling are clamped.
    pub fn max_files(mut self, requested: usize) -> Self {
        let effective = self.config.effective_max_files(Some(requested));
        if effective < requested {
            warn!(
                requested,
                limit = self.config.max_files_limit,
                "max_files above limit, clamping"
            );
        }
        self.max_files = effective;
        self
    }

    /// Run extraction on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The budget this walker will apply.
    pub fn budget(&self) -> usize {
        self.max_files
    }

    /// Walk the repository and return the structured result.
    pub fn scan(&self) -> Result<AnalysisResult, ScanError> {
        self.check_root()?;
        info!(
            root = %self.root.display(),
            max_files = self.max_files,
            parallel = self.parallel,
            "starting repository scan"
        );

        let (candidates, truncated) = self.enumerate();
        if truncated {
            warn!(max_files = self.max_files, "reached max_files limit, stopping scan");
        }

        // Collecting an indexed parallel iterator keeps enumeration order
        let files: Vec<FileRecord> = if self.parallel {
            candidates
                .par_iter()
                .filter_map(|c| self.process(c))
                .collect()
        } else {
            candidates.iter().filter_map(|c| self.process(c)).collect()
        };

        let result = AnalysisResult::new(self.root.display().to_string(), files, truncated);
        info!(
            scanned = result.stats.scanned,
            skipped = result.stats.skipped,
            errors = result.stats.errors,
            "repository scan completed"
        );
        Ok(result)
    }

    /// Walk the repository and render each record as a display block.
    pub fn scan_flat(&self) -> Result<Vec<String>, ScanError> {
        let result = self.scan()?;
        Ok(result.files.iter().map(render_flat).collect())
    }

    fn check_root(&self) -> Result<(), ScanError> {
        match fs::metadata(&self.root) {
            Ok(m) if m.is_dir() => Ok(()),
            Ok(_) => Err(ScanError::NotADirectory(self.root.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ScanError::RootNotFound(self.root.clone()))
            }
            Err(e) => Err(ScanError::RootUnreadable {
                path: self.root.clone(),
                source: e,
            }),
        }
    }

    /// Visit at most `max_files` entries and select files worth analyzing.
    fn enumerate(&self) -> (Vec<Candidate>, bool) {
        let mut entries = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        let mut candidates = Vec::new();
        let mut visited = 0;
        let mut truncated = false;

        loop {
            if visited >= self.max_files {
                truncated = entries.next().is_some();
                break;
            }
            let entry = match entries.next() {
                Some(entry) => entry,
                None => break,
            };
            visited += 1;

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(self.root.as_path()).to_path_buf();
                    warn!(path = %path.display(), error = %e, "cannot read entry");
                    candidates.push(Candidate::Failed {
                        language: classify(&path),
                        path,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let file_type = entry.file_type();
            if !(file_type.is_file() || file_type.is_symlink()) || !is_supported(entry.path()) {
                continue;
            }

            let language = classify(entry.path());
            if !language.has_extractor() {
                debug!(path = %entry.path().display(), %language, "no extractor, ignoring");
                continue;
            }

            // Symlinks count when they resolve to a regular file; directory
            // links are never descended into.
            let path = entry.path().to_path_buf();
            let metadata = if file_type.is_symlink() {
                fs::metadata(&path)
            } else {
                entry.metadata().map_err(io::Error::from)
            };
            match metadata {
                Ok(meta) if meta.is_file() => candidates.push(Candidate::File {
                    path,
                    language,
                    bytes: meta.len(),
                }),
                Ok(_) => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot stat file");
                    candidates.push(Candidate::Failed {
                        path,
                        language,
                        message: e.to_string(),
                    })
                }
            }
        }

        (candidates, truncated)
    }

    fn process(&self, candidate: &Candidate) -> Option<FileRecord> {
        let record = match candidate {
            Candidate::Failed {
                path,
                language,
                message,
            } => FileRecord {
                path: self.display_path(path),
                language: *language,
                bytes: 0,
                outcome: Outcome::Error(message.clone()),
            },
            Candidate::File {
                path,
                language,
                bytes,
            } => {
                let extractor = extract::for_language(*language)?;
                let extraction = extract_file(extractor, path, self.config.max_file_bytes);
                match summarize(extraction, &self.root, *bytes) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(error = %e, "cannot relativize path");
                        FileRecord {
                            path: path.display().to_string(),
                            language: *language,
                            bytes: *bytes,
                            outcome: Outcome::Error(e.to_string()),
                        }
                    }
                }
            }
        };

        match &record.outcome {
            Outcome::Declarations(d) => debug!(
                path = %record.path,
                functions = d.functions.len(),
                classes = d.classes.len(),
                "parsed file"
            ),
            Outcome::Skipped(reason) => debug!(path = %record.path, %reason, "skipped file"),
            Outcome::Error(message) => warn!(path = %record.path, %message, "error parsing file"),
        }

        Some(record)
    }

    /// Relative path for records that did not go through the summarizer.
    fn display_path(&self, path: &Path) -> String {
        match super::relative_path(path, &self.root) {
            Ok(rel) if rel.is_empty() => ".".to_string(),
            Ok(rel) => rel,
            Err(_) => path.display().to_string(),
        }
    }
}
