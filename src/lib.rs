//! autodocx - repository analysis for documentation reports.
//!
//! autodocx walks an already-materialized source tree, extracts declarations
//! (functions, classes, imports) from each supported file, and aggregates
//! repository statistics that downstream report builders consume.
//!
//! # Architecture
//!
//! - `language`: extension-based language classification
//! - `extract`: per-language extractors (tree-sitter for Python, regex
//!   patterns for JavaScript/TypeScript and Java)
//! - `scan`: the walker, the per-file summarizer and the result types
//! - `config`: the immutable scanner configuration
//! - `manifest`: README and dependency manifest loading
//! - `report`: flat, pretty, JSON and Markdown renderers
//! - `tree`: indented tree preview
//!
//! # Example
//!
//! ```no_run
//! use autodocx::{Config, Walker};
//!
//! let config = Config::load(None)?;
//! let result = Walker::new("path/to/repo", &config).max_files(100).scan()?;
//! println!("{} files scanned", result.stats.scanned);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod extract;
pub mod language;
pub mod manifest;
pub mod report;
pub mod scan;
pub mod tree;

pub use config::{Config, ConfigError};
pub use extract::{extract_file, for_language, Extraction, Extractor};
pub use language::{classify, is_supported, Language, SUPPORTED_EXTENSIONS};
pub use scan::{
    AnalysisResult, Declarations, FileRecord, LargestFile, Outcome, RepositoryStats, ScanError,
    Walker,
};
