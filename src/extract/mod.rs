//! Per-language declaration extractors.
//!
//! Every extractor turns decoded source text into a `Declarations` set.
//! The shared file policy (read, size cap, lossy decode, failure capture)
//! lives in `extract_file` so that each variant only implements the
//! language-specific part.
//!
//! # Adding a New Language
//!
//! Add a module implementing `Extractor`, a static cell for it below, and an
//! arm in `for_language`. `Language::has_extractor` must agree.

mod java;
mod javascript;
mod python;

pub use java::JavaExtractor;
pub use javascript::JavaScriptExtractor;
pub use python::PythonExtractor;

use once_cell::sync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::language::Language;
use crate::scan::{Declarations, Outcome};

/// Language-specific declaration extraction.
pub trait Extractor: Send + Sync {
    /// The language tag stamped on results.
    fn language(&self) -> Language;

    /// Extract declarations from decoded source text.
    ///
    /// Any error is reported as a per-file diagnostic by `extract_file`.
    fn extract(&self, source: &str) -> anyhow::Result<Declarations>;
}

/// Result of running an extractor on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub language: Language,
    /// The absolute path that was read.
    pub file: PathBuf,
    pub outcome: Outcome,
}

/// Run `extractor` against the file at `path`.
///
/// Files larger than `max_file_bytes` are skipped before decoding. Read and
/// extraction failures become `Outcome::Error`; this function never fails.
pub fn extract_file(extractor: &dyn Extractor, path: &Path, max_file_bytes: u64) -> Extraction {
    let language = extractor.language();
    let outcome = match fs::read(path) {
        Err(e) => Outcome::Error(e.to_string()),
        Ok(data) if data.len() as u64 > max_file_bytes => {
            Outcome::Skipped(format!("file too large (>{})", format_byte_cap(max_file_bytes)))
        }
        Ok(data) => {
            let source = String::from_utf8_lossy(&data);
            match extractor.extract(&source) {
                Ok(declarations) => Outcome::Declarations(declarations),
                Err(e) => Outcome::Error(e.to_string()),
            }
        }
    };

    Extraction {
        language,
        file: path.to_path_buf(),
        outcome,
    }
}

/// Human form of a byte cap: `1MB`, `512KB`, or `1000 bytes`.
pub fn format_byte_cap(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Keep the first occurrence of each name.
pub(crate) fn dedup_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

static PYTHON_EXTRACTOR: OnceCell<PythonExtractor> = OnceCell::new();
static JAVASCRIPT_EXTRACTOR: OnceCell<JavaScriptExtractor> = OnceCell::new();
static TYPESCRIPT_EXTRACTOR: OnceCell<JavaScriptExtractor> = OnceCell::new();
static JAVA_EXTRACTOR: OnceCell<JavaExtractor> = OnceCell::new();

/// Get the extractor for a language.
///
/// Returns None for languages that are classified but not analyzed.
pub fn for_language(language: Language) -> Option<&'static dyn Extractor> {
    match language {
        Language::Python => Some(PYTHON_EXTRACTOR.get_or_init(PythonExtractor::new)),
        Language::JavaScript => {
            Some(JAVASCRIPT_EXTRACTOR.get_or_init(JavaScriptExtractor::javascript))
        }
        Language::TypeScript => {
            Some(TYPESCRIPT_EXTRACTOR.get_or_init(JavaScriptExtractor::typescript))
        }
        Language::Java => Some(JAVA_EXTRACTOR.get_or_init(JavaExtractor::new)),
        Language::Go
        | Language::Rust
        | Language::Cpp
        | Language::C
        | Language::CSharp
        | Language::Unknown => None,
    }
}
