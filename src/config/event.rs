// src/config/event.rs

//! Derive base/head revisions from the CI event that triggered the run.
//!
//! Explicit inputs are used as-is unless the event carries better
//! information:
//! - `pull_request` / `pull_request_target`: the PR's base and head SHAs win.
//! - `push`: a missing base falls back to the payload's `before` SHA (unless
//!   the branch was just created); a missing head falls back to `GITHUB_SHA`.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::{PathFilterError, Result};
use crate::fs::FileSystem;

/// `before` SHA reported for the first push of a new branch.
pub const NULL_SHA: &str = "0000000000000000000000000000000000000000";

/// The two optional revision references handed to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionInputs {
    pub base: Option<String>,
    pub head: Option<String>,
}

impl RevisionInputs {
    pub fn new(base: Option<String>, head: Option<String>) -> Self {
        Self { base, head }
    }
}

/// Subset of the event payload we care about; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub pull_request: Option<PullRequestPayload>,
    #[serde(default)]
    pub before: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestPayload {
    #[serde(default)]
    pub base: Option<CommitRef>,
    #[serde(default)]
    pub head: Option<CommitRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitRef {
    #[serde(default)]
    pub sha: Option<String>,
}

/// Everything known about the triggering event.
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    pub name: Option<String>,
    pub payload: EventPayload,
    /// Commit that triggered the run (`GITHUB_SHA`).
    pub sha: Option<String>,
}

impl EventContext {
    /// Build the context, reading the payload from `payload_path` if it
    /// exists. A missing file yields an empty payload; a file that exists but
    /// does not parse is a configuration error.
    pub fn load(
        fs: &dyn FileSystem,
        name: Option<String>,
        payload_path: Option<&Path>,
        sha: Option<String>,
    ) -> Result<Self> {
        let payload = match payload_path {
            Some(path) if fs.is_file(path) => {
                let text = fs.read_to_string(path).map_err(|e| {
                    PathFilterError::ConfigError(format!(
                        "reading event payload {:?}: {e}",
                        path
                    ))
                })?;
                serde_json::from_str(&text).map_err(|e| {
                    PathFilterError::ConfigError(format!(
                        "parsing event payload {:?}: {e}",
                        path
                    ))
                })?
            }
            Some(path) => {
                debug!(?path, "event payload not found; using empty payload");
                EventPayload::default()
            }
            None => EventPayload::default(),
        };

        Ok(Self { name, payload, sha })
    }
}

/// Combine explicit inputs with what the event says.
pub fn resolve_revisions(inputs: RevisionInputs, event: &EventContext) -> RevisionInputs {
    let resolved = match event.name.as_deref() {
        Some("pull_request") | Some("pull_request_target") => {
            let pr = event.payload.pull_request.as_ref();
            let pr_base = pr.and_then(|p| p.base.as_ref()).and_then(|c| c.sha.clone());
            let pr_head = pr.and_then(|p| p.head.as_ref()).and_then(|c| c.sha.clone());
            debug!(?pr_base, ?pr_head, "pull request event; using PR base/head");
            RevisionInputs {
                base: pr_base.or(inputs.base),
                head: pr_head.or(inputs.head),
            }
        }
        Some("push") => {
            let base = inputs.base.or_else(|| {
                event
                    .payload
                    .before
                    .clone()
                    .filter(|before| !before.is_empty() && before != NULL_SHA)
            });
            let head = inputs.head.or_else(|| event.sha.clone());
            debug!(?base, ?head, "push event");
            RevisionInputs { base, head }
        }
        _ => inputs,
    };

    info!(
        event = event.name.as_deref().unwrap_or("<none>"),
        base = resolved.base.as_deref().unwrap_or("<none>"),
        head = resolved.head.as_deref().unwrap_or("<none>"),
        "resolved revision inputs"
    );
    resolved
}
