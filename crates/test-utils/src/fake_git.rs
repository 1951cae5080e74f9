use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pathfilter::config::RevisionInputs;
use pathfilter::errors::PathFilterError;
use pathfilter::git::{ChangeSource, ChangesFuture, GitFuture, GitOutput, GitRunner};
use pathfilter::types::ChangedFile;

/// A git runner that answers from a script instead of spawning processes.
///
/// - every invocation is recorded (in order)
/// - commands without a scripted answer exit 128 like an unknown revision
#[derive(Clone, Default)]
pub struct ScriptedGitRunner {
    responses: Arc<Mutex<HashMap<Vec<String>, GitOutput>>>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ScriptedGitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, args: &[&str], output: GitOutput) -> Self {
        {
            let mut guard = self.responses.lock().unwrap();
            guard.insert(args.iter().map(|s| s.to_string()).collect(), output);
        }
        self
    }

    /// Script `rev-parse --is-inside-work-tree` to succeed.
    pub fn in_repository(self) -> Self {
        self.respond(
            &["rev-parse", "--is-inside-work-tree"],
            GitOutput::success("true\n"),
        )
    }

    /// Script `rev-parse --verify --quiet <rev>^{commit}` to print `sha`.
    pub fn commit(self, rev: &str, sha: &str) -> Self {
        let spec = format!("{rev}^{{commit}}");
        self.respond(
            &["rev-parse", "--verify", "--quiet", &spec],
            GitOutput::success(format!("{sha}\n")),
        )
    }

    /// Script the resolver's diff invocation for the given range.
    pub fn diff(self, range: &[&str], name_status: &str) -> Self {
        let mut args = vec!["diff", "--name-status", "--no-color", "--find-renames"];
        args.extend_from_slice(range);
        self.respond(&args, GitOutput::success(name_status))
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// First word after `git` of every recorded call.
    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.first().cloned())
            .collect()
    }
}

impl GitRunner for ScriptedGitRunner {
    fn run(&self, args: Vec<String>) -> GitFuture<'_> {
        let responses = Arc::clone(&self.responses);
        let calls = Arc::clone(&self.calls);

        Box::pin(async move {
            calls.lock().unwrap().push(args.clone());
            let guard = responses.lock().unwrap();
            Ok(guard
                .get(&args)
                .cloned()
                .unwrap_or_else(|| GitOutput::failure(128, format!("unscripted: {:?}", args))))
        })
    }
}

/// A change source that returns a fixed list and records what it was asked.
#[derive(Clone, Default)]
pub struct StaticChangeSource {
    files: Vec<ChangedFile>,
    requests: Arc<Mutex<Vec<RevisionInputs>>>,
}

impl StaticChangeSource {
    pub fn new(files: Vec<ChangedFile>) -> Self {
        Self {
            files,
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<RevisionInputs> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChangeSource for StaticChangeSource {
    fn changed_files<'a>(&'a self, revisions: &'a RevisionInputs) -> ChangesFuture<'a> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(revisions.clone());
            Ok(self.files.clone())
        })
    }
}

/// A change source that always fails, for fail-closed tests.
#[derive(Clone, Default)]
pub struct FailingChangeSource {
    requests: Arc<Mutex<usize>>,
}

impl FailingChangeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_count(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

impl ChangeSource for FailingChangeSource {
    fn changed_files<'a>(&'a self, _revisions: &'a RevisionInputs) -> ChangesFuture<'a> {
        Box::pin(async move {
            *self.requests.lock().unwrap() += 1;
            Err::<Vec<ChangedFile>, _>(PathFilterError::RevisionResolution(
                "unknown revision 'missing'".to_string(),
            ))
        })
    }
}

