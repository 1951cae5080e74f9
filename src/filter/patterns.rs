// src/filter/patterns.rs

use std::fmt;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;

use crate::config::FilterName;
use crate::errors::{PathFilterError, Result};

/// One entry of a filter's pattern list.
///
/// `"!src/generated/**"` parses to `{ glob: "src/generated/**", negate: true }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pub glob: String,
    pub negate: bool,
}

impl PatternRule {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('!') {
            Some(rest) => Self {
                glob: rest.to_string(),
                negate: true,
            },
            None => Self {
                glob: raw.to_string(),
                negate: false,
            },
        }
    }
}

/// A named, ordered list of pattern rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: FilterName,
    pub patterns: Vec<PatternRule>,
}

impl FilterSpec {
    pub fn new<N: Into<FilterName>>(name: N, raw_patterns: &[String]) -> Self {
        Self {
            name: name.into(),
            patterns: raw_patterns.iter().map(|p| PatternRule::parse(p)).collect(),
        }
    }
}

/// Compiled rules for a single filter.
///
/// All rules live in one `GlobSet`; the index of a glob in the set is the
/// index of its rule, so the highest matching index is the last rule in
/// declaration order that applies to a path.
#[derive(Clone)]
pub struct CompiledMatcher {
    name: FilterName,
    rules: Vec<PatternRule>,
    set: GlobSet,
}

impl fmt::Debug for CompiledMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledMatcher")
            .field("name", &self.name)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl CompiledMatcher {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Sign of the last rule that matches `path`, or `None` if no rule does.
    pub fn verdict(&self, path: &str) -> Option<bool> {
        self.set
            .matches(path)
            .into_iter()
            .max()
            .map(|idx| !self.rules[idx].negate)
    }

    /// Whether `path` (repo-relative, forward slashes) is included.
    pub fn matches(&self, path: &str) -> bool {
        self.verdict(path).unwrap_or(false)
    }
}

/// All compiled filters, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    matchers: IndexMap<FilterName, CompiledMatcher>,
}

impl CompiledFilters {
    pub fn iter(&self) -> impl Iterator<Item = &CompiledMatcher> {
        self.matchers.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.matchers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// Compile every filter. Fails on the first malformed glob, naming the
/// filter and the offending pattern text.
pub fn compile(filters: &IndexMap<FilterName, Vec<String>>) -> Result<CompiledFilters> {
    let mut matchers = IndexMap::with_capacity(filters.len());
    for (name, patterns) in filters.iter() {
        let spec = FilterSpec::new(name.clone(), patterns);
        matchers.insert(name.clone(), compile_filter(&spec)?);
    }
    Ok(CompiledFilters { matchers })
}

pub fn compile_filter(spec: &FilterSpec) -> Result<CompiledMatcher> {
    let mut builder = GlobSetBuilder::new();
    for rule in spec.patterns.iter() {
        builder.add(build_glob(&spec.name, rule)?);
    }

    let set = builder.build().map_err(|e| PathFilterError::InvalidPattern {
        filter: spec.name.clone(),
        pattern: spec
            .patterns
            .iter()
            .map(rule_text)
            .collect::<Vec<_>>()
            .join(", "),
        reason: e.to_string(),
    })?;

    Ok(CompiledMatcher {
        name: spec.name.clone(),
        rules: spec.patterns.clone(),
        set,
    })
}

fn build_glob(filter: &str, rule: &PatternRule) -> Result<Glob> {
    let invalid = |reason: String| PathFilterError::InvalidPattern {
        filter: filter.to_string(),
        pattern: rule_text(rule),
        reason,
    };

    let normalized = normalize_glob(&rule.glob).ok_or_else(|| invalid("empty glob".to_string()))?;

    GlobBuilder::new(&normalized)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map_err(|e| invalid(e.kind().to_string()))
}

/// Apply the anchoring rules to a glob:
///
/// - no `/` anywhere: match the basename at any depth (`*.md` -> `**/*.md`)
/// - otherwise anchored at the repository root; a leading `./` or `/` is
///   dropped and a trailing `/` means everything below that directory.
///
/// Returns `None` for a glob with nothing left to match.
fn normalize_glob(glob: &str) -> Option<String> {
    if glob.is_empty() {
        return None;
    }

    if !glob.contains('/') {
        if glob == "**" {
            return Some(glob.to_string());
        }
        return Some(format!("**/{glob}"));
    }

    let mut anchored = glob.strip_prefix("./").unwrap_or(glob);
    anchored = anchored.trim_start_matches('/');
    if anchored.is_empty() {
        return None;
    }

    if anchored.ends_with('/') {
        Some(format!("{anchored}**"))
    } else {
        Some(anchored.to_string())
    }
}

fn rule_text(rule: &PatternRule) -> String {
    if rule.negate {
        format!("!{}", rule.glob)
    } else {
        rule.glob.clone()
    }
}
