// src/git/parse.rs

use std::collections::HashSet;

use crate::errors::{PathFilterError, Result};
use crate::types::{ChangedFile, FileStatus};

/// Parse `git diff --name-status` output.
///
/// Each line is `<status>\t<path>`, or `<status>\t<old>\t<new>` for renames
/// and copies, in which case the new path is reported. Order follows git's
/// output; a path reported twice is kept at its first position.
pub fn parse_name_status(output: &str) -> Result<Vec<ChangedFile>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for line in output.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let status_field = fields.next().unwrap_or_default();
        let status = FileStatus::from_status_field(status_field).ok_or_else(|| {
            PathFilterError::RevisionResolution(format!(
                "unrecognised diff status {:?} in line {:?}",
                status_field, line
            ))
        })?;

        let path = fields.last().ok_or_else(|| {
            PathFilterError::RevisionResolution(format!("diff line without a path: {:?}", line))
        })?;
        let path = unquote_path(path);

        if seen.insert(path.clone()) {
            files.push(ChangedFile { path, status });
        }
    }

    Ok(files)
}

/// Decode a path that git wrapped in double quotes with C-style escapes.
/// Unquoted paths are returned unchanged.
pub fn unquote_path(raw: &str) -> String {
    let inner = match raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner,
        None => return raw.to_string(),
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => bytes.push(b'\n'),
            Some('t') => bytes.push(b'\t'),
            Some('r') => bytes.push(b'\r'),
            Some('a') => bytes.push(0x07),
            Some('b') => bytes.push(0x08),
            Some('f') => bytes.push(0x0c),
            Some('v') => bytes.push(0x0b),
            Some(d @ '0'..='7') => {
                let mut value = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                bytes.push(value as u8);
            }
            Some(other) => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => bytes.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
