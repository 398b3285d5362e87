//! Command-line interface for autodocx.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::error;

use crate::config::Config;
use crate::manifest::ProjectManifests;
use crate::report;
use crate::scan::{AnalysisResult, Walker};
use crate::tree::list_repo_tree;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Repository analyzer - extract declarations across languages and build
/// documentation reports.
///
/// autodocx walks a source tree, extracts functions, classes and imports
/// from Python, JavaScript, TypeScript and Java files, and renders the
/// result as a terminal summary, JSON, a flat listing or a Markdown report.
#[derive(Parser)]
#[command(name = "autodocx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a repository and print the results
    #[command(visible_alias = "analyze")]
    Scan(ScanArgs),
    /// Print an indented listing of a repository
    Tree(TreeArgs),
}

/// Output formats for the scan command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
    Flat,
    Markdown,
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Repository root directory
    pub path: PathBuf,

    /// Maximum number of entries to visit (capped by max_files_limit)
    #[arg(short, long)]
    pub max_files: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    pub format: Format,

    /// Path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extract files in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Write the rendered output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit non-zero when any file failed to parse
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the tree command.
#[derive(Parser)]
pub struct TreeArgs {
    /// Repository root directory
    pub path: PathBuf,

    /// Maximum number of entries to list
    #[arg(short = 'n', long, default_value_t = 500)]
    pub max_entries: usize,
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("invalid configuration: {}", e);
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let mut walker = Walker::new(&args.path, &config);
    if let Some(n) = args.max_files {
        walker = walker.max_files(n);
    }
    if args.parallel {
        walker = walker.parallel(true);
    }

    let result = match walker.scan() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    match (args.format, &args.output) {
        (Format::Pretty, None) => report::write_pretty(&result),
        (Format::Json, None) => report::write_json(&result)?,
        (format, output) => {
            let rendered = render(format, &result)?;
            match output {
                Some(path) => std::fs::write(path, rendered)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", rendered),
            }
        }
    }

    if args.strict && result.stats.errors > 0 {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Render a result as text for the given format.
fn render(format: Format, result: &AnalysisResult) -> anyhow::Result<String> {
    Ok(match format {
        Format::Json => report::to_json(result)?,
        Format::Flat => result
            .files
            .iter()
            .map(report::render_flat)
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Markdown => {
            let manifests = ProjectManifests::load(std::path::Path::new(&result.repo_path));
            report::render_markdown(result, &manifests, chrono::Local::now())
        }
        // Pretty output is colored and only makes sense on a terminal;
        // fall back to the flat listing for files.
        Format::Pretty => render(Format::Flat, result)?,
    })
}

/// Run the tree command.
pub fn run_tree(args: &TreeArgs) -> anyhow::Result<i32> {
    for line in list_repo_tree(&args.path, args.max_entries) {
        println!("{}", line);
    }
    Ok(EXIT_SUCCESS)
}
