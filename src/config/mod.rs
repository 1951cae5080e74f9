// src/config/mod.rs

//! Filter configuration loading and validation.
//!
//! Responsibilities:
//! - Define the ordered filter data model (`model.rs`).
//! - Parse YAML / JSON / TOML filter definitions (`loader.rs`).
//! - Validate names and output-key uniqueness (`validate.rs`).
//! - Derive base/head revisions from a CI event payload (`event.rs`).

pub mod event;
pub mod loader;
pub mod model;
pub mod validate;

pub use event::{resolve_revisions, EventContext, EventPayload, RevisionInputs};
pub use loader::{load_and_validate, load_from_path, parse_and_validate, parse_filters, FilterFormat};
pub use model::{FilterConfig, FilterName, PatternList, RawFilterConfig};
