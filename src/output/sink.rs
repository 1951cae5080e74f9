// src/output/sink.rs

//! Where the formatted outputs go.
//!
//! Outputs are rendered to one string and handed to the sink in a single
//! write, so a failure earlier in the pipeline leaves the destination
//! untouched.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::output::format::OutputPair;

const HEREDOC_DELIMITER: &str = "PATHFILTER_EOF";

/// Destination for the rendered `key=value` outputs.
pub trait OutputSink {
    fn write_outputs(&mut self, outputs: &[OutputPair]) -> Result<()>;
}

/// Appends to a GitHub-style output file (`$GITHUB_OUTPUT`).
pub struct FileOutputSink<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> FileOutputSink<'a> {
    pub fn new(fs: &'a dyn FileSystem, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }
}

impl OutputSink for FileOutputSink<'_> {
    fn write_outputs(&mut self, outputs: &[OutputPair]) -> Result<()> {
        let rendered = render_outputs(outputs);
        self.fs
            .append(&self.path, rendered.as_bytes())
            .with_context(|| format!("writing outputs to {:?}", self.path))?;
        info!(path = ?self.path, keys = outputs.len(), "wrote outputs");
        Ok(())
    }
}

/// Writes rendered outputs to any `Write`, typically stdout.
pub struct WriterOutputSink<W> {
    writer: W,
}

impl<W: Write> WriterOutputSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterOutputSink<W> {
    fn write_outputs(&mut self, outputs: &[OutputPair]) -> Result<()> {
        let rendered = render_outputs(outputs);
        self.writer.write_all(rendered.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Render outputs as `key=value` lines.
///
/// A value containing a newline uses the heredoc form instead:
///
/// ```text
/// key<<PATHFILTER_EOF
/// first line
/// second line
/// PATHFILTER_EOF
/// ```
pub fn render_outputs(outputs: &[OutputPair]) -> String {
    let mut out = String::new();
    for (key, value) in outputs {
        if value.contains('\n') || value.contains('\r') {
            let delimiter = heredoc_delimiter(value);
            out.push_str(&format!("{key}<<{delimiter}\n{value}\n{delimiter}\n"));
        } else {
            out.push_str(&format!("{key}={value}\n"));
        }
    }
    out
}

/// Smallest `PATHFILTER_EOF[_n]` that is not a line of `value`.
fn heredoc_delimiter(value: &str) -> String {
    let mut n = 0usize;
    loop {
        let candidate = if n == 0 {
            HEREDOC_DELIMITER.to_string()
        } else {
            format!("{HEREDOC_DELIMITER}_{n}")
        };
        if !value.lines().any(|line| line.trim_end_matches('\r') == candidate) {
            return candidate;
        }
        n += 1;
    }
}
