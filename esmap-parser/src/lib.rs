//! Parser library for search-index configuration documents.
//!
//! The entry point is [`index::parse::parse_input`], which accepts either a
//! raw JSON object or an API-command line (`PUT my-index { ... }`) and
//! produces an [`index::model::IndexConfig`]. The model is rebuilt wholesale
//! on every edit; nothing in this crate patches an existing tree.

pub mod index;

pub use index::model::{FieldSpec, FieldType, IndexConfig, Mappings, OrderedMap, Settings};
pub use index::parse::{parse_input, ParsedInput};
