// src/git/resolver.rs

//! Revision Resolver: turn two optional revision references into the list of
//! files changed on the head side.
//!
//! | base | head | compared range |
//! |------|------|----------------|
//! | set  | any  | `merge-base(base, head or HEAD)` .. head |
//! | –    | set  | `head^` .. head (empty tree for a root commit) |
//! | –    | –    | working tree and index vs `HEAD` |

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, info};

use crate::config::RevisionInputs;
use crate::errors::{PathFilterError, Result};
use crate::git::parse::parse_name_status;
use crate::git::runner::{GitOutput, GitRunner};
use crate::types::ChangedFile;

/// Git's well-known id of the tree with no entries.
pub const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

pub type ChangesFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<ChangedFile>>> + Send + 'a>>;

/// Anything that can answer "which files changed between these revisions".
///
/// Production code uses [`RevisionResolver`]; tests can hand the pipeline a
/// fixed list instead.
pub trait ChangeSource: Send + Sync {
    fn changed_files<'a>(&'a self, revisions: &'a RevisionInputs) -> ChangesFuture<'a>;
}

pub struct RevisionResolver<R> {
    runner: R,
}

impl<R: GitRunner> RevisionResolver<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Resolve the changed files for `base` / `head`; see the module table
    /// for which range is compared. Paths are unique and in git's order.
    pub async fn resolve_changes(
        &self,
        base: Option<&str>,
        head: Option<&str>,
    ) -> Result<Vec<ChangedFile>> {
        self.ensure_repository().await?;

        let files = match (base, head) {
            (Some(base), head) => {
                let head = head.unwrap_or("HEAD");
                let base_sha = self.verify_commit(base).await?;
                let head_sha = self.verify_commit(head).await?;
                let merge_base = self.merge_base(&base_sha, &head_sha).await?;
                info!(%base, %head, %merge_base, "comparing head against merge-base");
                self.diff(&[merge_base.as_str(), head_sha.as_str()]).await?
            }
            (None, Some(head)) => {
                let head_sha = self.verify_commit(head).await?;
                let parent = self.try_verify_commit(&format!("{head_sha}^")).await?;
                match parent {
                    Some(parent) => {
                        info!(%head, %parent, "comparing head against its parent");
                        self.diff(&[parent.as_str(), head_sha.as_str()]).await?
                    }
                    None => {
                        info!(%head, "head is a root commit; comparing against the empty tree");
                        self.diff(&[EMPTY_TREE, head_sha.as_str()]).await?
                    }
                }
            }
            (None, None) => match self.try_verify_commit("HEAD").await? {
                Some(_) => {
                    info!("no revisions given; comparing working tree against HEAD");
                    self.diff(&["HEAD"]).await?
                }
                None => {
                    info!("no revisions given and HEAD is unborn; listing staged files");
                    self.diff(&["--cached", EMPTY_TREE]).await?
                }
            },
        };

        info!(count = files.len(), "resolved changed files");
        Ok(files)
    }

    async fn run(&self, args: &[&str]) -> Result<GitOutput> {
        self.runner
            .run(args.iter().map(|s| s.to_string()).collect())
            .await
    }

    async fn ensure_repository(&self) -> Result<()> {
        let out = self.run(&["rev-parse", "--is-inside-work-tree"]).await?;
        if out.is_success() && out.stdout.trim() == "true" {
            return Ok(());
        }
        Err(PathFilterError::RevisionResolution(format!(
            "not a git working tree: {}",
            out.stderr.trim()
        )))
    }

    async fn try_verify_commit(&self, rev: &str) -> Result<Option<String>> {
        let spec = format!("{rev}^{{commit}}");
        let out = self.run(&["rev-parse", "--verify", "--quiet", &spec]).await?;
        let sha = out.stdout.trim();
        if out.is_success() && !sha.is_empty() {
            Ok(Some(sha.to_string()))
        } else {
            Ok(None)
        }
    }

    async fn verify_commit(&self, rev: &str) -> Result<String> {
        self.try_verify_commit(rev).await?.ok_or_else(|| {
            PathFilterError::RevisionResolution(format!(
                "unknown revision '{rev}' (does it exist, and is enough history fetched?)"
            ))
        })
    }

    async fn merge_base(&self, base: &str, head: &str) -> Result<String> {
        let out = self.run(&["merge-base", base, head]).await?;
        let sha = out.stdout.trim();
        match out.code {
            Some(0) if !sha.is_empty() => Ok(sha.to_string()),
            // Exit status 1 with no output: the commits share no ancestor.
            Some(0) | Some(1) => Err(PathFilterError::RevisionResolution(format!(
                "no common ancestor between '{base}' and '{head}'"
            ))),
            code => Err(PathFilterError::RevisionResolution(format!(
                "git merge-base {base} {head} failed (exit {:?}): {}",
                code,
                out.stderr.trim()
            ))),
        }
    }

    async fn diff(&self, range: &[&str]) -> Result<Vec<ChangedFile>> {
        let mut args = vec!["diff", "--name-status", "--no-color", "--find-renames"];
        args.extend_from_slice(range);

        let out = self.run(&args).await?;
        if !out.is_success() {
            return Err(PathFilterError::RevisionResolution(format!(
                "git {} failed (exit {:?}): {}",
                args.join(" "),
                out.code,
                out.stderr.trim()
            )));
        }

        let files = parse_name_status(&out.stdout)?;
        debug!(count = files.len(), "parsed diff output");
        Ok(files)
    }
}

impl<R: GitRunner> ChangeSource for RevisionResolver<R> {
    fn changed_files<'a>(&'a self, revisions: &'a RevisionInputs) -> ChangesFuture<'a> {
        Box::pin(self.resolve_changes(revisions.base.as_deref(), revisions.head.as_deref()))
    }
}
