#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Whether a usable `git` binary is on `PATH`. Git-backed tests return early
/// when it isn't.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A throwaway git repository in a temporary directory.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_buf(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Run git in the repository and return trimmed stdout; panics on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.dir.path())
            .args([
                "-c",
                "user.name=Test User",
                "-c",
                "user.email=test@example.com",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "init.defaultBranch=main",
            ])
            .args(args)
            .output()
            .expect("spawn git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn write(&self, rel_path: &str, contents: &str) {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, contents).expect("write file");
    }

    pub fn remove(&self, rel_path: &str) {
        self.git(&["rm", "-q", rel_path]);
    }

    /// Stage everything and commit; returns the new commit's SHA.
    pub fn commit(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
        self.head()
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Create and switch to `name`, starting at `start` (or the current HEAD).
    pub fn checkout_new_branch(&self, name: &str, start: Option<&str>) {
        match start {
            Some(start) => self.git(&["checkout", "-q", "-b", name, start]),
            None => self.git(&["checkout", "-q", "-b", name]),
        };
    }

    /// Switch to a new branch with no history and an empty index.
    pub fn checkout_orphan(&self, name: &str) {
        self.git(&["checkout", "-q", "--orphan", name]);
        self.git(&["rm", "-rfq", "--ignore-unmatch", "."]);
    }
}
