use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

// Import from prlint-core
use prlint_core::{FsContentReader, OutputFormat, ReviewConfig, ReviewContext, RuleEngine};

// Import CLI utilities
use prlint_cli::{init_logging, load_manifest_diff, read_change_list, ManifestSources};

/// Exit status for unusable input, distinct from "review found failures"
const EXIT_INPUT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "prlint")]
#[command(about = "Review a pull request's changed files against changelog, test and SemVer rules")]
struct Args {
    /// Changed files, appended after any --files list
    paths: Vec<String>,

    /// Changed-file list: one path per line or `git diff --name-status` output.
    /// Use `-` for stdin (the default when no paths are given)
    #[arg(short = 'l', long)]
    files: Option<String>,

    /// Repository checkout that test files and Jest results are read from
    #[arg(short, long, default_value = ".")]
    root: String,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Manifest (package.json) as it was before the change
    #[arg(long, requires = "manifest_after")]
    manifest_before: Option<String>,

    /// Manifest (package.json) as it is after the change
    #[arg(long, requires = "manifest_before")]
    manifest_after: Option<String>,

    /// Pre-computed manifest diff: {"version": {"before": ..., "after": ...}}
    #[arg(long, conflicts_with_all = ["manifest_before", "manifest_after"])]
    manifest_diff: Option<String>,

    /// Jest `--json` results file, relative to --root; enables Jest reporting
    #[arg(long)]
    jest_results: Option<String>,

    /// Output format: text, markdown, or json
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<String>,

    /// Print the effective config as YAML and exit
    #[arg(long)]
    show_config: bool,

    /// Log rule decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("❌ prlint failed: {e:#}");
            std::process::exit(EXIT_INPUT_ERROR);
        }
    }
}

fn run(args: &Args) -> Result<i32> {
    let config = ReviewConfig::load_with_fallback(args.config.as_deref());

    if args.show_config {
        print!("{}", config.to_yaml()?);
        return Ok(0);
    }

    let engine = RuleEngine::new(config);

    let entries = read_change_list(args.files.as_deref(), &args.paths)?;
    let changes = engine.change_set(entries);
    tracing::info!("reviewing {} changed files", changes.len());

    let manifest_diff = load_manifest_diff(
        &changes,
        &ManifestSources {
            before: args.manifest_before.as_deref(),
            after: args.manifest_after.as_deref(),
            diff: args.manifest_diff.as_deref(),
        },
    )?;

    // Jest reports absolute paths; a canonical root lets them be shortened
    let root = fs::canonicalize(&args.root).unwrap_or_else(|_| PathBuf::from(&args.root));
    let mut ctx = ReviewContext::new(changes, Box::new(FsContentReader::new(root)))
        .with_manifest_diff(manifest_diff);
    if let Some(path) = &args.jest_results {
        ctx = ctx.with_jest_results(path.clone());
    }

    let report = engine.evaluate(&ctx);
    let rendered = report.render(args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("failed to write {path}"))?;
            tracing::info!("report saved to {path}");
        }
        None => print!("{rendered}"),
    }

    Ok(report.exit_code())
}
