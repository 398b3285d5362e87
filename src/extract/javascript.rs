//! JavaScript and TypeScript extraction by pattern matching.
//!
//! The patterns run over the whole source text. They approximate the
//! grammar: nested parentheses in parameter lists, or declarations inside
//! strings and comments, can cause misses and false positives.

use lazy_static::lazy_static;
use regex::Regex;

use super::{dedup_names, Extractor};
use crate::language::Language;
use crate::scan::Declarations;

lazy_static! {
    static ref FUNCTION_PATTERNS: Vec<Regex> = vec![
        // function name(
        Regex::new(r"function\s+(\w+)\s*\(").unwrap(),
        // const name = (...) => / const name = function
        Regex::new(r"const\s+(\w+)\s*=\s*(?:\([^)]*\)\s*=>|function)").unwrap(),
        // name: (...) => / name: function
        Regex::new(r"(\w+)\s*:\s*(?:\([^)]*\)\s*=>|function)").unwrap(),
    ];
    static ref CLASS_PATTERNS: Vec<Regex> =
        vec![Regex::new(r"(?:export\s+)?class\s+(\w+)").unwrap()];
    static ref IMPORT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r#"import\s+.*?\s+from\s+["']([^"']+)["']"#).unwrap(),
        Regex::new(r#"require\s*\(["']([^"']+)["']"#).unwrap(),
    ];
}

/// Collect capture group 1 of every pattern, in pattern order, deduplicated.
pub(crate) fn collect_matches(patterns: &[Regex], source: &str) -> Vec<String> {
    let names = patterns.iter().flat_map(|re| {
        re.captures_iter(source)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
    });
    dedup_names(names)
}

/// Pattern extractor shared by JavaScript and TypeScript.
pub struct JavaScriptExtractor {
    language: Language,
}

impl JavaScriptExtractor {
    pub fn javascript() -> Self {
        Self {
            language: Language::JavaScript,
        }
    }

    /// Same patterns as JavaScript, labelled as TypeScript.
    pub fn typescript() -> Self {
        Self {
            language: Language::TypeScript,
        }
    }
}

impl Extractor for JavaScriptExtractor {
    fn language(&self) -> Language {
        self.language
    }

    fn extract(&self, source: &str) -> anyhow::Result<Declarations> {
        Ok(Declarations {
            functions: collect_matches(&FUNCTION_PATTERNS, source),
            classes: collect_matches(&CLASS_PATTERNS, source),
            imports: collect_matches(&IMPORT_PATTERNS, source),
        })
    }
}
