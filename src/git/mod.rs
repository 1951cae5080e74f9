// src/git/mod.rs

//! Changed-file resolution via the `git` binary.
//!
//! - `runner.rs`: the `GitRunner` process seam and its `tokio::process`
//!   implementation.
//! - `parse.rs`: `git diff --name-status` output parsing.
//! - `resolver.rs`: merge-base / diff orchestration behind `ChangeSource`.

pub mod parse;
pub mod resolver;
pub mod runner;

pub use parse::{parse_name_status, unquote_path};
pub use resolver::{ChangeSource, ChangesFuture, RevisionResolver, EMPTY_TREE};
pub use runner::{GitFuture, GitOutput, GitRunner, ProcessGitRunner};
