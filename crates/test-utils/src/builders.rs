#![allow(dead_code)]

use pathfilter::config::{FilterConfig, PatternList, RawFilterConfig};
use pathfilter::filter::{compile, CompiledFilters};
use pathfilter::types::{ChangedFile, FileStatus};

/// Builder for `FilterConfig` to simplify test setup.
pub struct FilterConfigBuilder {
    raw: RawFilterConfig,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawFilterConfig::default(),
        }
    }

    pub fn with_filter(mut self, name: &str, patterns: &[&str]) -> Self {
        self.raw.entries.push((
            name.to_string(),
            PatternList::Many(patterns.iter().map(|p| p.to_string()).collect()),
        ));
        self
    }

    pub fn raw(self) -> RawFilterConfig {
        self.raw
    }

    pub fn build(self) -> FilterConfig {
        FilterConfig::try_from(self.raw).expect("Failed to build valid filters from builder")
    }

    pub fn compile(self) -> CompiledFilters {
        let cfg = self.build();
        compile(cfg.filters()).expect("Failed to compile filters from builder")
    }
}

impl Default for FilterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn added(path: &str) -> ChangedFile {
    ChangedFile::new(path, FileStatus::Added)
}

pub fn modified(path: &str) -> ChangedFile {
    ChangedFile::new(path, FileStatus::Modified)
}

pub fn deleted(path: &str) -> ChangedFile {
    ChangedFile::new(path, FileStatus::Deleted)
}

/// All paths as `Modified`, in the given order.
pub fn modified_all(paths: &[&str]) -> Vec<ChangedFile> {
    paths.iter().map(|p| modified(p)).collect()
}
