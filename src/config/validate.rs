// src/config/validate.rs

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::config::model::{FilterConfig, RawFilterConfig};
use crate::errors::{PathFilterError, Result};
use crate::output::CHANGES_KEY;

impl TryFrom<RawFilterConfig> for FilterConfig {
    type Error = PathFilterError;

    fn try_from(raw: RawFilterConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        let filters: IndexMap<_, _> = raw
            .entries
            .into_iter()
            .map(|(name, patterns)| (name, patterns.into_vec()))
            .collect();
        Ok(FilterConfig::new_unchecked(filters))
    }
}

fn validate_raw_config(cfg: &RawFilterConfig) -> Result<()> {
    ensure_has_filters(cfg)?;
    validate_names(cfg)?;
    ensure_unique_names(cfg)?;
    ensure_output_keys_unique(cfg)?;
    Ok(())
}

fn ensure_has_filters(cfg: &RawFilterConfig) -> Result<()> {
    if cfg.entries.is_empty() {
        return Err(PathFilterError::ConfigError(
            "filters must define at least one named filter".to_string(),
        ));
    }
    Ok(())
}

fn validate_names(cfg: &RawFilterConfig) -> Result<()> {
    for (name, _) in cfg.entries.iter() {
        if name.is_empty() {
            return Err(PathFilterError::ConfigError(
                "filter names must not be empty".to_string(),
            ));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| *c == '=' || c.is_whitespace() || c.is_control())
        {
            return Err(PathFilterError::ConfigError(format!(
                "filter name '{}' contains {:?}, which cannot appear in an output key",
                name.escape_debug(),
                bad
            )));
        }
        // `key<<DELIM` opens a multi-line value in the output file.
        if name.contains("<<") {
            return Err(PathFilterError::ConfigError(format!(
                "filter name '{}' contains '<<', which cannot appear in an output key",
                name
            )));
        }
    }
    Ok(())
}

fn ensure_unique_names(cfg: &RawFilterConfig) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (idx, (name, _)) in cfg.entries.iter().enumerate() {
        if let Some(first) = seen.insert(name.as_str(), idx) {
            return Err(PathFilterError::ConfigError(format!(
                "duplicate filter name '{}' (entries {} and {})",
                name,
                first + 1,
                idx + 1
            )));
        }
    }
    Ok(())
}

/// Every filter owns `<name>`, `<name>_count` and `<name>_files`; the global
/// `changes` key is owned by nobody. No two owners may share a key.
fn ensure_output_keys_unique(cfg: &RawFilterConfig) -> Result<()> {
    let mut owners: HashMap<String, Option<&str>> = HashMap::new();
    owners.insert(CHANGES_KEY.to_string(), None);

    for (name, _) in cfg.entries.iter() {
        for key in [name.clone(), format!("{name}_count"), format!("{name}_files")] {
            if let Some(owner) = owners.get(&key) {
                let msg = match owner {
                    None => format!(
                        "filter '{}' would write output key '{}', which is reserved",
                        name, key
                    ),
                    Some(other) => format!(
                        "filters '{}' and '{}' both write output key '{}'",
                        other, name, key
                    ),
                };
                return Err(PathFilterError::ConfigError(msg));
            }
            owners.insert(key, Some(name.as_str()));
        }
    }
    Ok(())
}
