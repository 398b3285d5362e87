//! Output formatting for scan results.
//!
//! Supports four renderings of one `AnalysisResult`:
//! - Flat: one display block per file, for quick previews
//! - Pretty: colored terminal summary
//! - JSON: the structured result for programmatic consumption
//! - Markdown: the templated documentation report

use chrono::{DateTime, Local};
use colored::*;
use std::fmt::Write as _;

use crate::manifest::ProjectManifests;
use crate::scan::{AnalysisResult, FileRecord, Outcome, RepositoryStats};

/// Names shown per declaration kind in flat output.
pub const FLAT_DISPLAY_LIMIT: usize = 10;

/// Names shown per declaration kind in the markdown report.
const MARKDOWN_DISPLAY_LIMIT: usize = 5;
/// Files listed under "Key Files and Structure".
const MARKDOWN_KEY_FILES: usize = 30;
/// README lines copied into the overview.
const README_LINES: usize = 50;
const NODE_DEPENDENCIES: usize = 20;
const PYTHON_REQUIREMENTS: usize = 30;

fn join_limited(names: &[String], limit: usize) -> String {
    names
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn kilobytes(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 10.0).round() / 10.0
}

// =============================================================================
// Flat Format
// =============================================================================

/// Render one record as `"<path> | Language: <lang>"` plus indented detail lines.
pub fn render_flat(record: &FileRecord) -> String {
    let mut out = format!("{} | Language: {}", record.path, record.language);

    match &record.outcome {
        Outcome::Skipped(reason) => {
            let _ = write!(out, "\n  Skipped: {}", reason);
        }
        Outcome::Error(message) => {
            let _ = write!(out, "\n  Error: {}", message);
        }
        Outcome::Declarations(d) => {
            for (label, names) in [
                ("Functions", &d.functions),
                ("Classes", &d.classes),
                ("Imports", &d.imports),
            ] {
                if !names.is_empty() {
                    let _ = write!(
                        out,
                        "\n  {}: {}",
                        label,
                        join_limited(names, FLAT_DISPLAY_LIMIT)
                    );
                }
            }
        }
    }

    out
}

// =============================================================================
// JSON Format
// =============================================================================

/// Serialize the result as pretty JSON.
pub fn to_json(result: &AnalysisResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Write the result as pretty JSON to stdout.
pub fn write_json(result: &AnalysisResult) -> anyhow::Result<()> {
    println!("{}", to_json(result)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write a colored summary to stdout.
pub fn write_pretty(result: &AnalysisResult) {
    println!();
    print!("  ");
    print!("{}", "autodocx".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", result.repo_path);
    println!();

    write_counts(&result.stats, result.truncated);
    println!();

    if !result.stats.by_language.is_empty() {
        println!("  {}", "Languages".bold());
        for (lang, count) in &result.stats.by_language {
            println!("    {:<12} {}", lang.to_string(), count);
        }
        println!();
    }

    if !result.stats.largest_files.is_empty() {
        println!("  {}", "Largest files".bold());
        for f in &result.stats.largest_files {
            println!("    {:>8.1} KB  {}", kilobytes(f.bytes), f.path);
        }
        println!();
    }

    let problems: Vec<&FileRecord> = result
        .files
        .iter()
        .filter(|f| !f.outcome.is_scanned())
        .collect();
    if !problems.is_empty() {
        println!("  {}", "Not analyzed".bold());
        for f in problems {
            match &f.outcome {
                Outcome::Skipped(reason) => {
                    println!("    {} {}  {}", "skipped".yellow(), f.path, reason.dimmed())
                }
                Outcome::Error(message) => {
                    println!("    {}   {}  {}", "error".red(), f.path, message.dimmed())
                }
                Outcome::Declarations(_) => {}
            }
        }
        println!();
    }
}

fn write_counts(stats: &RepositoryStats, truncated: bool) {
    print!("  {} files", stats.total_considered.to_string().bold());
    print!("  {} scanned", stats.scanned.to_string().green());
    print!("  {} skipped", stats.skipped.to_string().yellow());
    if stats.errors > 0 {
        print!("  {} errors", stats.errors.to_string().red());
    } else {
        print!("  {} errors", stats.errors);
    }
    if truncated {
        print!("  {}", "(file limit reached)".dimmed());
    }
    println!();
}

// =============================================================================
// Markdown Format
// =============================================================================

/// Build the templated documentation report.
pub fn render_markdown(
    result: &AnalysisResult,
    manifests: &ProjectManifests,
    generated_at: DateTime<Local>,
) -> String {
    let stats = &result.stats;
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Project Documentation".to_string());
    lines.push(format!(
        "\n*Generated on {}*\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    lines.push("## Project Overview".to_string());
    match &manifests.readme {
        Some(readme) => {
            let head: Vec<&str> = readme.lines().take(README_LINES).collect();
            lines.push(format!("\n{}", head.join("\n")));
        }
        None => lines.push(
            "\n*No README found. Documentation generated from code analysis.*".to_string(),
        ),
    }

    lines.push("\n## Project Statistics".to_string());
    lines.push(format!("- **Total Files Analyzed:** {}", stats.total_considered));
    lines.push(format!("- **Successfully Scanned:** {}", stats.scanned));
    lines.push(format!("- **Skipped:** {}", stats.skipped));
    lines.push(format!("- **Errors:** {}", stats.errors));
    if result.truncated {
        lines.push("- *File limit reached; the repository was only partially scanned.*".to_string());
    }

    if !stats.by_language.is_empty() {
        lines.push("\n### Language Distribution".to_string());
        for (lang, count) in &stats.by_language {
            lines.push(format!("- **{}:** {} files", lang, count));
        }
    }

    if !stats.largest_files.is_empty() {
        lines.push("\n### Largest Files".to_string());
        for f in &stats.largest_files {
            lines.push(format!("- `{}` ({:.1} KB)", f.path, kilobytes(f.bytes)));
        }
    }

    lines.push("\n## Technology Stack".to_string());
    if !stats.by_language.is_empty() {
        let languages: Vec<String> = stats.by_language.keys().map(|l| l.to_string()).collect();
        lines.push(format!("**Languages:** {}", languages.join(", ")));
    }

    if let Some(pkg) = &manifests.package_json {
        lines.push("\n### Node.js Dependencies".to_string());
        let deps: Vec<&str> = pkg
            .dependency_names()
            .into_iter()
            .take(NODE_DEPENDENCIES)
            .collect();
        if !deps.is_empty() {
            lines.push(deps.join(", "));
        }
    }

    if !manifests.requirements.is_empty() {
        lines.push("\n### Python Dependencies".to_string());
        for req in manifests.requirements.iter().take(PYTHON_REQUIREMENTS) {
            lines.push(format!("- {}", req));
        }
    }

    if manifests.pom_xml.is_some() {
        lines.push("\n### Java Build".to_string());
        lines.push("Maven project (`pom.xml`).".to_string());
    }

    lines.push("\n## Key Files and Structure".to_string());
    for file in result.scanned_files().take(MARKDOWN_KEY_FILES) {
        let decls = file.declarations();
        lines.push(format!("\n### `{}`", file.path));
        lines.push(format!("- **Language:** {}", file.language));
        if !decls.classes.is_empty() {
            lines.push(format!(
                "- **Classes:** {}",
                join_limited(&decls.classes, MARKDOWN_DISPLAY_LIMIT)
            ));
        }
        if !decls.functions.is_empty() {
            lines.push(format!(
                "- **Functions:** {}",
                join_limited(&decls.functions, MARKDOWN_DISPLAY_LIMIT)
            ));
        }
    }

    lines.push("\n## Setup Instructions".to_string());
    lines.push(
        "\n*Setup instructions would be extracted from README or inferred from project structure.*"
            .to_string(),
    );

    lines.push("\n---\n*This report was automatically generated by autodocx.*".to_string());

    lines.join("\n")
}
