//! Extension-based language classification.
//!
//! Classification never looks at file contents: the lowercased extension is
//! looked up in a static table and anything absent is `Unknown`.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Languages the classifier can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Go,
    Rust,
    Cpp,
    C,
    CSharp,
    Unknown,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::CSharp => "csharp",
            Language::Unknown => "unknown",
        }
    }

    /// Whether a declaration extractor exists for this language.
    pub fn has_extractor(&self) -> bool {
        matches!(
            self,
            Language::Python | Language::JavaScript | Language::TypeScript | Language::Java
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::JavaScript),
            "typescript" => Ok(Language::TypeScript),
            "java" => Ok(Language::Java),
            "go" => Ok(Language::Go),
            "rust" => Ok(Language::Rust),
            "cpp" => Ok(Language::Cpp),
            "c" => Ok(Language::C),
            "csharp" => Ok(Language::CSharp),
            "unknown" => Ok(Language::Unknown),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

/// Extension (with dot, lowercase) to language.
static LANGUAGE_MAP: phf::Map<&'static str, Language> = phf_map! {
    ".py" => Language::Python,
    ".js" => Language::JavaScript,
    ".jsx" => Language::JavaScript,
    ".ts" => Language::TypeScript,
    ".tsx" => Language::TypeScript,
    ".java" => Language::Java,
    ".go" => Language::Go,
    ".rs" => Language::Rust,
    ".cpp" => Language::Cpp,
    ".c" => Language::C,
    ".cs" => Language::CSharp,
};

/// Extensions the walker considers. Mirrors the keys of `LANGUAGE_MAP`.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".go", ".rs", ".cpp", ".c", ".cs",
];

/// Lowercased extension of `path` including the leading dot.
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

/// Classify a path by its extension.
pub fn classify<P: AsRef<Path>>(path: P) -> Language {
    dotted_extension(path.as_ref())
        .and_then(|ext| LANGUAGE_MAP.get(ext.as_str()).copied())
        .unwrap_or(Language::Unknown)
}

/// Whether the walker should consider this path at all.
pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
    dotted_extension(path.as_ref())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_extensions() {
        assert_eq!(classify("a.py"), Language::Python);
        assert_eq!(classify("src/app.jsx"), Language::JavaScript);
        assert_eq!(classify("src/app.tsx"), Language::TypeScript);
        assert_eq!(classify("Main.java"), Language::Java);
        assert_eq!(classify("main.go"), Language::Go);
        assert_eq!(classify("lib.rs"), Language::Rust);
        assert_eq!(classify("Program.cs"), Language::CSharp);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("SETUP.PY"), Language::Python);
        assert_eq!(classify("Index.Ts"), Language::TypeScript);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("README.md"), Language::Unknown);
        assert_eq!(classify("Makefile"), Language::Unknown);
        assert_eq!(classify(".py"), Language::Unknown);
    }

    #[test]
    fn test_supported_extensions_mirror_table() {
        assert_eq!(SUPPORTED_EXTENSIONS.len(), LANGUAGE_MAP.len());
        for ext in SUPPORTED_EXTENSIONS {
            assert!(LANGUAGE_MAP.contains_key(ext), "{} missing from table", ext);
        }
        for ext in LANGUAGE_MAP.keys() {
            assert!(SUPPORTED_EXTENSIONS.contains(ext));
        }
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported("x/y/z.c"));
        assert!(is_supported("Z.CPP"));
        assert!(!is_supported("notes.txt"));
        assert!(!is_supported("no_extension"));
    }

    #[test]
    fn test_extractor_coverage() {
        assert!(Language::Python.has_extractor());
        assert!(Language::TypeScript.has_extractor());
        assert!(!Language::Go.has_extractor());
        assert!(!Language::Unknown.has_extractor());
    }

    #[test]
    fn test_round_trip_name() {
        for lang in [Language::Python, Language::CSharp, Language::Unknown] {
            assert_eq!(lang.as_str().parse::<Language>().unwrap(), lang);
        }
    }
}
