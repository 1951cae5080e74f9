// src/output/format.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::filter::ClassificationReport;
use crate::types::ListFilesMode;

/// Key of the global list of matched filter names.
pub const CHANGES_KEY: &str = "changes";

pub type OutputPair = (String, String);

/// Everything outside this set gets a backslash in `escape` mode.
static SHELL_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9,._+:@%/-]").expect("static regex is valid"));

/// Project a report onto ordered output pairs.
///
/// Per filter, in declaration order: `<name>`, `<name>_count`, and (unless
/// `mode` is `None`) `<name>_files`. Then `changes` once, as a JSON array.
pub fn format(report: &ClassificationReport, mode: ListFilesMode) -> Vec<OutputPair> {
    let mut outputs = Vec::with_capacity(report.results().len() * 3 + 1);

    for (name, result) in report.results().iter() {
        outputs.push((name.clone(), result.matched().to_string()));
        outputs.push((format!("{name}_count"), result.count().to_string()));
        if let Some(encoded) = encode_file_list(result.files(), mode) {
            outputs.push((format!("{name}_files"), encoded));
        }
    }

    outputs.push((CHANGES_KEY.to_string(), json_array(report.changes())));
    outputs
}

/// Encode a file list for `mode`; `None` for [`ListFilesMode::None`].
pub fn encode_file_list(files: &[String], mode: ListFilesMode) -> Option<String> {
    let encoded = match mode {
        ListFilesMode::None => return None,
        ListFilesMode::Csv => files.join(","),
        ListFilesMode::Json => json_array(files),
        ListFilesMode::Shell => files
            .iter()
            .map(|f| shell_quote(f))
            .collect::<Vec<_>>()
            .join(" "),
        ListFilesMode::Escape => files
            .iter()
            .map(|f| shell_escape(f))
            .collect::<Vec<_>>()
            .join(" "),
    };
    Some(encoded)
}

fn json_array(items: &[String]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}

/// `it's here` -> `'it'\''s here'`
fn shell_quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}

/// `my file(1).txt` -> `my\ file\(1\).txt`
fn shell_escape(path: &str) -> String {
    SHELL_UNSAFE.replace_all(path, r"\$0").into_owned()
}

/// A `::error::` workflow command carrying `message`, so the failure shows up
/// as an annotation in the CI run. `%`, CR and LF are percent-encoded.
pub fn error_annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}
