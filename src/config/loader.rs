// src/config/loader.rs

use std::path::Path;

use anyhow::Context;

use crate::config::model::{FilterConfig, RawFilterConfig};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Text formats accepted for filter definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFormat {
    Json,
    Yaml,
    Toml,
}

impl FilterFormat {
    /// JSON if the first non-blank character opens an object, YAML otherwise.
    pub fn detect(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            FilterFormat::Json
        } else {
            FilterFormat::Yaml
        }
    }

    /// Format implied by a file extension, if it is one we know.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(FilterFormat::Json),
            "yml" | "yaml" => Some(FilterFormat::Yaml),
            "toml" => Some(FilterFormat::Toml),
            _ => None,
        }
    }
}

/// Parse inline filter text, sniffing JSON vs YAML.
///
/// This only performs deserialization; use [`parse_and_validate`] to also
/// run the semantic checks.
pub fn parse_filters(text: &str) -> Result<RawFilterConfig> {
    parse_filters_as(text, FilterFormat::detect(text))
}

pub fn parse_filters_as(text: &str, format: FilterFormat) -> Result<RawFilterConfig> {
    let raw = match format {
        FilterFormat::Json => serde_json::from_str(text)?,
        FilterFormat::Yaml => serde_yaml::from_str(text)?,
        FilterFormat::Toml => toml::from_str(text)?,
    };
    Ok(raw)
}

/// Load filter definitions from a file. The extension picks the parser;
/// unknown extensions fall back to content sniffing.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawFilterConfig> {
    let path = path.as_ref();
    let contents = fs
        .read_to_string(path)
        .with_context(|| format!("reading filters file at {:?}", path))?;

    let format = FilterFormat::from_path(path).unwrap_or_else(|| FilterFormat::detect(&contents));
    parse_filters_as(&contents, format)
}

/// Parse inline filter text and validate it.
pub fn parse_and_validate(text: &str) -> Result<FilterConfig> {
    let raw = parse_filters(text)?;
    FilterConfig::try_from(raw)
}

/// Load a filters file and validate it.
///
/// This is the recommended entry point when filters live in the repository:
///
/// - Reads the file through the given [`FileSystem`].
/// - Parses by extension (or sniffs the content).
/// - Checks for an empty map, duplicate names and output-key collisions.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<FilterConfig> {
    let raw = load_from_path(fs, path)?;
    FilterConfig::try_from(raw)
}
