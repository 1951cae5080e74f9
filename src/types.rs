use std::str::FromStr;

use serde::Deserialize;

/// How git classified a single changed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
}

impl FileStatus {
    /// Map a `git diff --name-status` status field (e.g. `M`, `R100`) to a
    /// status. Type changes and unmerged entries count as modifications.
    pub fn from_status_field(field: &str) -> Option<Self> {
        match field.chars().next()? {
            'A' => Some(FileStatus::Added),
            'M' | 'T' | 'U' => Some(FileStatus::Modified),
            'D' => Some(FileStatus::Deleted),
            'R' => Some(FileStatus::Renamed),
            'C' => Some(FileStatus::Copied),
            _ => None,
        }
    }
}

/// A repo-relative, forward-slash separated path reported by the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub status: FileStatus,
}

impl ChangedFile {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// Encoding used for the `<name>_files` outputs.
///
/// - `None`: no file lists are emitted (default).
/// - `Csv`: comma-joined raw paths.
/// - `Json`: JSON array of path strings.
/// - `Shell`: space-joined, each path single-quoted.
/// - `Escape`: space-joined, shell metacharacters backslash-escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilesMode {
    #[default]
    None,
    Csv,
    Json,
    Shell,
    Escape,
}

impl FromStr for ListFilesMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(ListFilesMode::None),
            "csv" => Ok(ListFilesMode::Csv),
            "json" => Ok(ListFilesMode::Json),
            "shell" => Ok(ListFilesMode::Shell),
            "escape" => Ok(ListFilesMode::Escape),
            other => Err(format!(
                "invalid list-files mode: {other} (expected none, csv, json, shell or escape)"
            )),
        }
    }
}
