//! Integration tests for repository scanning.
//!
//! These tests run the walker against the `testdata/sample_repo` fixture
//! and against generated trees to check the aggregate invariants.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use autodocx::{AnalysisResult, Config, Language, Outcome, Walker};
use tempfile::TempDir;

fn sample_repo() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("sample_repo")
}

fn write(dir: &Path, rel: &str, content: &[u8]) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn scan(root: &Path) -> AnalysisResult {
    Walker::new(root, &Config::default())
        .scan()
        .expect("scan should succeed")
}

fn paths(result: &AnalysisResult) -> Vec<&str> {
    result.files.iter().map(|f| f.path.as_str()).collect()
}

fn assert_invariants(result: &AnalysisResult) {
    let stats = &result.stats;
    assert_eq!(
        stats.scanned + stats.skipped + stats.errors,
        stats.total_considered
    );
    assert_eq!(stats.total_considered, result.files.len());
    assert_eq!(
        stats.largest_files.len(),
        stats.total_considered.min(5),
        "largest_files length"
    );
    assert!(stats
        .largest_files
        .windows(2)
        .all(|w| w[0].bytes >= w[1].bytes));
    assert_eq!(
        stats.by_language.values().sum::<usize>(),
        stats.total_considered
    );
}

// =============================================================================
// Sample Repository
// =============================================================================

#[test]
fn test_sample_repo_records() {
    let result = scan(&sample_repo());

    assert_eq!(
        paths(&result),
        vec![
            "api/app.py",
            "api/broken.py",
            "server/src/main/java/com/example/Inventory.java",
            "web/components/ItemList.jsx",
            "web/store.ts",
        ]
    );
    assert_invariants(&result);
    assert_eq!(result.stats.scanned, 4);
    assert_eq!(result.stats.errors, 1);
    assert_eq!(result.stats.skipped, 0);
    assert!(!result.truncated);

    assert_eq!(result.stats.by_language[&Language::Python], 2);
    assert_eq!(result.stats.by_language[&Language::Java], 1);
    assert_eq!(result.stats.by_language[&Language::JavaScript], 1);
    assert_eq!(result.stats.by_language[&Language::TypeScript], 1);
    // .go files are classified but have no extractor
    assert!(!result.stats.by_language.contains_key(&Language::Go));
}

#[test]
fn test_sample_repo_python() {
    let result = scan(&sample_repo());
    let app = &result.files[0];
    let decls = app.outcome.declarations().expect("app.py should parse");

    assert_eq!(decls.functions, vec!["__init__", "load", "load", "list_items"]);
    assert_eq!(decls.classes, vec!["InventoryStore"]);
    assert_eq!(decls.imports, vec!["os", "json"]);

    let broken = &result.files[1];
    assert!(broken.outcome.error().is_some());
    assert_eq!(broken.language, Language::Python);
}

#[test]
fn test_sample_repo_pattern_languages() {
    let result = scan(&sample_repo());

    let java = result.files[2].outcome.declarations().unwrap();
    assert_eq!(java.classes, vec!["Inventory"]);
    assert_eq!(java.functions, vec!["add", "size"]);
    assert_eq!(java.imports, vec!["java.util.ArrayList", "java.util.List"]);

    let jsx = &result.files[3];
    assert_eq!(jsx.language, Language::JavaScript);
    let jsx = jsx.outcome.declarations().unwrap();
    assert_eq!(jsx.functions, vec!["fetchItems", "renderItem", "onRefresh"]);
    assert_eq!(jsx.classes, vec!["ItemList"]);
    assert_eq!(jsx.imports, vec!["react", "axios"]);

    let ts = &result.files[4];
    assert_eq!(ts.language, Language::TypeScript);
    let ts = ts.outcome.declarations().unwrap();
    assert_eq!(ts.classes, vec!["Store"]);
    assert_eq!(ts.functions, vec!["createStore"]);
    assert_eq!(ts.imports, vec!["./types"]);
}

#[test]
fn test_sample_repo_budget() {
    // Entries: README.md, api/, api/app.py, api/broken.py, ...
    let result = Walker::new(sample_repo(), &Config::default())
        .max_files(4)
        .scan()
        .unwrap();
    assert_eq!(paths(&result), vec!["api/app.py", "api/broken.py"]);
    assert!(result.truncated);
    assert_invariants(&result);
}

#[test]
fn test_flat_and_structured_agree() {
    let walker = Walker::new(sample_repo(), &Config::default());
    let result = walker.scan().unwrap();
    let flat = walker.scan_flat().unwrap();

    assert_eq!(flat.len(), result.files.len());
    for (line, record) in flat.iter().zip(&result.files) {
        assert!(line.starts_with(&format!("{} | Language: {}", record.path, record.language)));
    }
    assert!(flat[1].contains("\n  Error: "));
}

#[test]
fn test_idempotent() {
    let first = scan(&sample_repo());
    let second = scan(&sample_repo());
    assert_eq!(first.stats.by_language, second.stats.by_language);
    let a: BTreeSet<&str> = paths(&first).into_iter().collect();
    let b: BTreeSet<&str> = paths(&second).into_iter().collect();
    assert_eq!(a, b);
}

// =============================================================================
// Generated Trees
// =============================================================================

#[test]
fn test_end_to_end_python_example() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "a.py",
        b"import os\n\ndef foo(): pass\n\nclass Bar: pass\n",
    );

    let result = scan(temp.path());
    assert_eq!(result.files.len(), 1);
    let rec = &result.files[0];
    assert_eq!(rec.language, Language::Python);
    let decls = rec.outcome.declarations().unwrap();
    assert_eq!(decls.functions, vec!["foo"]);
    assert_eq!(decls.classes, vec!["Bar"]);
    assert_eq!(decls.imports, vec!["os"]);

    let json = serde_json::to_value(&result.stats).unwrap();
    assert_eq!(json["total_considered"], 1);
    assert_eq!(json["scanned"], 1);
    assert_eq!(json["skipped"], 0);
    assert_eq!(json["errors"], 0);
    assert_eq!(json["by_language"], serde_json::json!({"python": 1}));
}

#[test]
fn test_end_to_end_oversized_file() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "huge.py", &vec![b'#'; 2 * 1024 * 1024]);

    let result = scan(temp.path());
    assert_eq!(
        result.files[0].outcome,
        Outcome::Skipped("file too large (>1MB)".to_string())
    );
    assert_eq!(result.files[0].bytes, 2 * 1024 * 1024);
    assert_eq!(result.stats.skipped, 1);
    assert_eq!(result.stats.by_language[&Language::Python], 1);
}

#[test]
fn test_end_to_end_duplicate_js_function() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "dup.js", b"function foo(){}\nfunction foo(){}\n");

    let result = scan(temp.path());
    let decls = result.files[0].outcome.declarations().unwrap();
    assert_eq!(decls.functions, vec!["foo"]);
}

#[test]
fn test_budget_respected() {
    let temp = TempDir::new().unwrap();
    for i in 0..30 {
        write(temp.path(), &format!("f{:02}.js", i), b"function f() {}");
    }

    for budget in [1, 7, 29] {
        let result = Walker::new(temp.path(), &Config::default())
            .max_files(budget)
            .scan()
            .unwrap();
        assert!(result.stats.total_considered <= budget);
        assert!(result.truncated);
        assert_invariants(&result);
    }
}

#[test]
fn test_custom_byte_cap() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a.ts", &vec![b' '; 4096]);
    write(temp.path(), "b.ts", b"export class B {}");

    let config = Config {
        max_file_bytes: 2048,
        ..Config::default()
    };
    let result = Walker::new(temp.path(), &config).scan().unwrap();
    assert_eq!(
        result.files[0].outcome.skipped(),
        Some("file too large (>2KB)")
    );
    assert!(result.files[1].outcome.is_scanned());
}

#[test]
fn test_exactly_one_outcome_per_record() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "ok.py", b"def ok():\n    pass\n");
    write(temp.path(), "bad.py", b"class (:\n");
    write(temp.path(), "big.java", &vec![b'x'; 64]);

    let config = Config {
        max_file_bytes: 32,
        ..Config::default()
    };
    let result = Walker::new(temp.path(), &config).scan().unwrap();
    for record in &result.files {
        let held = [
            record.outcome.declarations().is_some(),
            record.outcome.skipped().is_some(),
            record.outcome.error().is_some(),
        ];
        assert_eq!(held.iter().filter(|h| **h).count(), 1, "{}", record.path);
    }
    assert_eq!(result.stats.scanned, 1);
    assert_eq!(result.stats.skipped, 1);
    assert_eq!(result.stats.errors, 1);
}

#[test]
fn test_largest_files_ties_keep_walk_order() {
    let temp = TempDir::new().unwrap();
    for name in ["e.js", "d.js", "c.js", "b.js", "a.js", "f.js"] {
        write(temp.path(), name, b"0123456789");
    }
    write(temp.path(), "z.js", b"01234567890123456789");

    let result = scan(temp.path());
    let largest: Vec<&str> = result
        .stats
        .largest_files
        .iter()
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(largest, vec!["z.js", "a.js", "b.js", "c.js", "d.js"]);
}

#[test]
fn test_json_round_trip() {
    let result = scan(&sample_repo());
    let json = serde_json::to_string(&result).unwrap();
    let back: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
