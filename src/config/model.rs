// src/config/model.rs

use std::fmt;

use indexmap::IndexMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

pub type FilterName = String;

/// The value side of a filter definition.
///
/// Both of these are accepted:
///
/// ```yaml
/// docs: "docs/**"
/// src:
///   - "src/**"
///   - "!src/generated/**"
/// ```
///
/// A bare key (`tests:` with no value) is an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    One(String),
    Many(Vec<String>),
    Empty(()),
}

impl PatternList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            PatternList::One(p) => vec![p],
            PatternList::Many(list) => list,
            PatternList::Empty(()) => Vec::new(),
        }
    }
}

/// Filter definitions exactly as parsed, in declaration order.
///
/// Duplicate names are kept here so that validation can reject them; the
/// YAML/JSON parsers would otherwise silently keep only the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFilterConfig {
    pub entries: Vec<(FilterName, PatternList)>,
}

impl<'de> Deserialize<'de> for RawFilterConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawFilterConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of filter names to glob patterns")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, patterns)) = map.next_entry::<String, PatternList>()? {
                    entries.push((name, patterns));
                }
                Ok(RawFilterConfig { entries })
            }

            // An empty YAML document.
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(RawFilterConfig::default())
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Validated filter definitions: non-empty, unique names, declaration order
/// preserved.
///
/// Construct via `FilterConfig::try_from(raw)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    filters: IndexMap<FilterName, Vec<String>>,
}

impl FilterConfig {
    pub(crate) fn new_unchecked(filters: IndexMap<FilterName, Vec<String>>) -> Self {
        Self { filters }
    }

    /// Filter name -> raw pattern strings, in declaration order.
    pub fn filters(&self) -> &IndexMap<FilterName, Vec<String>> {
        &self.filters
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
