// src/filter/mod.rs

//! Pattern compilation and change classification.
//!
//! This module is pure: no I/O, no processes. It turns raw pattern lists
//! into per-filter matchers and evaluates a changed-file list against them.

pub mod classify;
pub mod patterns;

pub use classify::{
    classify, classify_with, without_deletions, ClassificationReport, ClassifyOptions,
    FilterResult,
};
pub use patterns::{compile, compile_filter, CompiledFilters, CompiledMatcher, FilterSpec, PatternRule};
