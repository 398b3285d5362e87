//! Indented repository tree preview.

use std::path::Path;
use walkdir::WalkDir;

const TRUNCATED: &str = "... (truncated)";
const EMPTY: &str = "(empty or invalid repository)";

/// List the tree under `root`, two spaces of indent per level, directories
/// shown as `- name/`. Once `max_entries` entries are listed the marker
/// line is appended, whether or not anything remains.
pub fn list_repo_tree(root: &Path, max_entries: usize) -> Vec<String> {
    let mut out = Vec::new();

    // Files before subdirectories within a directory, each group by name
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by(|a, b| {
            let a_dir = a.file_type().is_dir();
            let b_dir = b.file_type().is_dir();
            a_dir.cmp(&b_dir).then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_map(|e| e.ok());

    for entry in walker {
        let indent = "  ".repeat(entry.depth() - 1);
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() {
            out.push(format!("{}- {}/", indent, name));
        } else {
            out.push(format!("{}{}", indent, name));
        }
        if out.len() >= max_entries {
            out.push(TRUNCATED.to_string());
            return out;
        }
    }

    if out.is_empty() {
        out.push(EMPTY.to_string());
    }
    out
}
