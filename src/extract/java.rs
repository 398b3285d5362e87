//! Java extraction by pattern matching.
//!
//! The method pattern accepts any `word word(...) {` shape, so control
//! statements such as `} else if (x) {` can be reported as methods, and
//! generic or array return types are missed.

use lazy_static::lazy_static;
use regex::Regex;

use super::javascript::collect_matches;
use super::Extractor;
use crate::language::Language;
use crate::scan::Declarations;

lazy_static! {
    static ref CLASS_PATTERNS: Vec<Regex> =
        vec![Regex::new(r"(?:public\s+)?class\s+(\w+)").unwrap()];
    static ref METHOD_PATTERNS: Vec<Regex> = vec![Regex::new(
        r"(?:public|private|protected)?\s*\w+\s+(\w+)\s*\([^)]*\)\s*\{"
    )
    .unwrap()];
    static ref IMPORT_PATTERNS: Vec<Regex> = vec![Regex::new(r"import\s+([\w.]+)").unwrap()];
}

#[derive(Default)]
pub struct JavaExtractor;

impl JavaExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for JavaExtractor {
    fn language(&self) -> Language {
        Language::Java
    }

    fn extract(&self, source: &str) -> anyhow::Result<Declarations> {
        Ok(Declarations {
            functions: collect_matches(&METHOD_PATTERNS, source),
            classes: collect_matches(&CLASS_PATTERNS, source),
            imports: collect_matches(&IMPORT_PATTERNS, source),
        })
    }
}
