// src/filter/classify.rs

//! Classification Engine: evaluate every changed file against every filter.

use indexmap::IndexMap;
use tracing::debug;

use crate::config::FilterName;
use crate::filter::patterns::CompiledFilters;
use crate::types::{ChangedFile, FileStatus};

/// Per-filter outcome.
///
/// `count()` and `matched()` are derived from `files()`, so they can never
/// disagree with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    name: FilterName,
    files: Vec<String>,
}

impl FilterResult {
    pub fn new(name: impl Into<FilterName>, files: Vec<String>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Matched paths, in changed-file order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn count(&self) -> usize {
        self.files.len()
    }

    pub fn matched(&self) -> bool {
        !self.files.is_empty()
    }
}

/// The full, deterministic result of one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationReport {
    changes: Vec<FilterName>,
    results: IndexMap<FilterName, FilterResult>,
}

impl ClassificationReport {
    /// Names of filters with at least one match, in declaration order.
    pub fn changes(&self) -> &[FilterName] {
        &self.changes
    }

    /// Filter name -> result, in declaration order.
    pub fn results(&self) -> &IndexMap<FilterName, FilterResult> {
        &self.results
    }

    pub fn get(&self, name: &str) -> Option<&FilterResult> {
        self.results.get(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Strip deleted files before matching.
    pub ignore_deletions: bool,
}

/// Classify `changes` against every filter in `matchers`.
///
/// Deleted files take part like any other; use [`classify_with`] to drop
/// them first.
pub fn classify(changes: &[ChangedFile], matchers: &CompiledFilters) -> ClassificationReport {
    let mut results = IndexMap::with_capacity(matchers.len());
    let mut matched_names = Vec::new();

    for matcher in matchers.iter() {
        let files: Vec<String> = changes
            .iter()
            .filter(|file| matcher.matches(&file.path))
            .map(|file| file.path.clone())
            .collect();

        debug!(filter = matcher.name(), count = files.len(), "classified filter");

        if !files.is_empty() {
            matched_names.push(matcher.name().to_string());
        }
        results.insert(
            matcher.name().to_string(),
            FilterResult::new(matcher.name(), files),
        );
    }

    ClassificationReport {
        changes: matched_names,
        results,
    }
}

pub fn classify_with(
    changes: &[ChangedFile],
    matchers: &CompiledFilters,
    options: ClassifyOptions,
) -> ClassificationReport {
    if options.ignore_deletions {
        let kept = without_deletions(changes);
        debug!(
            dropped = changes.len() - kept.len(),
            "ignoring deleted files"
        );
        classify(&kept, matchers)
    } else {
        classify(changes, matchers)
    }
}

/// The changed files minus those with status `Deleted`, order preserved.
pub fn without_deletions(changes: &[ChangedFile]) -> Vec<ChangedFile> {
    changes
        .iter()
        .filter(|file| file.status != FileStatus::Deleted)
        .cloned()
        .collect()
}
