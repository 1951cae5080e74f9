// src/git/runner.rs

//! Pluggable git process abstraction.
//!
//! The resolver talks to a `GitRunner` instead of spawning processes
//! directly, so tests can script git's answers without a repository.

use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, trace};

use crate::errors::{PathFilterError, Result};

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

pub type GitFuture<'a> = Pin<Box<dyn Future<Output = Result<GitOutput>> + Send + 'a>>;

/// Trait abstracting how git commands are executed.
///
/// A non-zero exit status is *not* an error at this layer; callers decide
/// what a failing command means. Only a failure to run git at all is.
pub trait GitRunner: Send + Sync {
    fn run(&self, args: Vec<String>) -> GitFuture<'_>;
}

/// Runs the real `git` binary inside a repository directory.
#[derive(Debug, Clone)]
pub struct ProcessGitRunner {
    program: PathBuf,
    repo_dir: PathBuf,
}

impl ProcessGitRunner {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("git"),
            repo_dir: repo_dir.into(),
        }
    }
}

impl GitRunner for ProcessGitRunner {
    fn run(&self, args: Vec<String>) -> GitFuture<'_> {
        Box::pin(async move {
            debug!(repo = ?self.repo_dir, args = ?args, "running git");

            let mut cmd = Command::new(&self.program);
            cmd.arg("-C")
                .arg(&self.repo_dir)
                .args(["--no-optional-locks", "-c", "core.quotepath=off"])
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let output = cmd.output().await.map_err(|e| match e.kind() {
                ErrorKind::NotFound => PathFilterError::RevisionResolution(format!(
                    "git executable {:?} not found",
                    self.program
                )),
                _ => PathFilterError::RevisionResolution(format!("running git: {e}")),
            })?;

            let result = GitOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            };
            trace!(code = ?result.code, stderr = %result.stderr.trim(), "git exited");
            Ok(result)
        })
    }
}
