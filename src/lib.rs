// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod filter;
pub mod fs;
pub mod git;
pub mod logging;
pub mod output;
pub mod types;

use std::io;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{
    load_and_validate, parse_and_validate, resolve_revisions, EventContext, FilterConfig,
    RevisionInputs,
};
use crate::errors::{PathFilterError, Result};
use crate::filter::{classify_with, compile, ClassifyOptions, CompiledFilters};
use crate::fs::{FileSystem, RealFileSystem};
use crate::git::{ChangeSource, ProcessGitRunner, RevisionResolver};
use crate::output::{format, FileOutputSink, OutputPair, OutputSink, WriterOutputSink};
use crate::types::ListFilesMode;

/// Knobs that shape classification and formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub list_files: ListFilesMode,
    pub ignore_deletions: bool,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - filter loading + validation
/// - CI event -> base/head resolution
/// - the classification pipeline against the real `git`
/// - the output sink (`--output-file` / `$GITHUB_OUTPUT`, else stdout)
pub async fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;
    let cfg = load_filter_config(&fs, &args)?;

    let event = EventContext::load(
        &fs,
        args.event_name.clone(),
        args.event_path.as_deref(),
        args.sha.clone(),
    )?;
    let revisions = resolve_revisions(
        RevisionInputs::new(args.base.clone(), args.head_ref.clone()),
        &event,
    );

    if args.dry_run {
        let compiled = compile(cfg.filters())?;
        print_dry_run(&compiled, &revisions, &args);
        return Ok(());
    }

    let options = PipelineOptions {
        list_files: args.list_files,
        ignore_deletions: args.ignore_deletions,
    };

    let resolver = RevisionResolver::new(ProcessGitRunner::new(&args.working_directory));
    let outputs = run_pipeline(&resolver, &cfg, &revisions, options).await?;

    match args.output_file.as_deref() {
        Some(path) => FileOutputSink::new(&fs, path).write_outputs(&outputs)?,
        None => WriterOutputSink::new(io::stdout().lock()).write_outputs(&outputs)?,
    }

    Ok(())
}

/// Compile, resolve, classify, format.
///
/// Patterns are compiled before git is consulted, so a malformed glob fails
/// the run without touching the repository. Nothing is returned unless every
/// stage succeeds.
pub async fn run_pipeline(
    source: &dyn ChangeSource,
    cfg: &FilterConfig,
    revisions: &RevisionInputs,
    options: PipelineOptions,
) -> Result<Vec<OutputPair>> {
    let matchers = compile(cfg.filters())?;
    debug!(filters = matchers.len(), "compiled filters");

    let changes = source.changed_files(revisions).await?;

    let report = classify_with(
        &changes,
        &matchers,
        ClassifyOptions {
            ignore_deletions: options.ignore_deletions,
        },
    );
    info!(
        files = changes.len(),
        filters = report.results().len(),
        changes = ?report.changes(),
        "classification complete"
    );

    Ok(format(&report, options.list_files))
}

fn load_filter_config(fs: &dyn FileSystem, args: &CliArgs) -> Result<FilterConfig> {
    match (&args.filters, &args.filters_file) {
        (Some(_), Some(_)) => Err(PathFilterError::ConfigError(
            "--filters and --filters-file are mutually exclusive".to_string(),
        )),
        (Some(text), None) => parse_and_validate(text),
        (None, Some(path)) => load_and_validate(fs, path),
        (None, None) => Err(PathFilterError::ConfigError(
            "filters are required (--filters, --filters-file or INPUT_FILTERS)".to_string(),
        )),
    }
}

/// Simple dry-run output: print revisions and compiled filters.
fn print_dry_run(compiled: &CompiledFilters, revisions: &RevisionInputs, args: &CliArgs) {
    println!("pathfilter dry-run");
    println!("  working_directory = {}", args.working_directory.display());
    println!(
        "  base = {}",
        revisions.base.as_deref().unwrap_or("<none>")
    );
    println!(
        "  head = {}",
        revisions.head.as_deref().unwrap_or("<none>")
    );
    println!("  list_files = {:?}", args.list_files);
    println!("  ignore_deletions = {}", args.ignore_deletions);
    println!();

    println!("filters ({}):", compiled.len());
    for matcher in compiled.iter() {
        println!("  - {}", matcher.name());
        if matcher.rules().is_empty() {
            println!("      (no patterns; never matches)");
        }
        for rule in matcher.rules() {
            if rule.negate {
                println!("      exclude: {}", rule.glob);
            } else {
                println!("      include: {}", rule.glob);
            }
        }
    }

    debug!("dry-run complete (git not invoked)");
}
