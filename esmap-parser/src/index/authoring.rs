//! Field authoring: turning a dropped palette block into a document edit.
//!
//! The palette carries [`MappingBlock`] payloads serialized as JSON (the
//! drag-data channel format). On drop, the consumer prompts for a field
//! name and calls [`insert_field`], which mutates the raw JSON value of the
//! live buffer — preserving key order and any content the typed model does
//! not know about — and re-serializes the whole document with 2-space
//! indentation.

use super::error::AuthoringError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A draggable mapping block: a type tag plus the properties inserted into
/// the document when the block is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: Map<String, Value>,
}

impl MappingBlock {
    /// A block whose properties are just `{"type": <kind>}`.
    pub fn simple(kind: &str) -> Self {
        let mut properties = Map::new();
        properties.insert("type".to_string(), json!(kind));
        MappingBlock {
            kind: kind.to_string(),
            properties,
        }
    }

    /// Serialize this block for the drag-data channel.
    pub fn to_payload(&self) -> String {
        serde_json::to_string(self).expect("mapping block serializes")
    }

    /// Deserialize a block from the drag-data channel.
    pub fn from_payload(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// The built-in palette, mirroring the sidebar block list: the scalar field
/// types plus the three containers, with join carrying a default relation.
pub fn builtin_palette() -> Vec<MappingBlock> {
    let scalar = [
        "text", "keyword", "long", "integer", "short", "byte", "double", "float", "date",
        "boolean", "object", "nested",
    ];

    let mut blocks: Vec<MappingBlock> = scalar.iter().map(|kind| MappingBlock::simple(kind)).collect();

    let mut join_properties = Map::new();
    join_properties.insert("type".to_string(), json!("join"));
    join_properties.insert("relations".to_string(), json!({ "parent": ["child"] }));
    blocks.push(MappingBlock {
        kind: "join".to_string(),
        properties: join_properties,
    });

    blocks
}

/// Insert a dropped block under `mappings.properties[field_name]` in the
/// live buffer and return the re-serialized document.
///
/// The buffer must be a plain JSON document; dropping onto an API-command
/// buffer is a recoverable error, not a mutation. Missing `mappings` /
/// `mappings.properties` objects are created; the block's `type` defaults
/// to `"text"` when absent or empty.
pub fn insert_field(
    text: &str,
    field_name: &str,
    block: &MappingBlock,
) -> Result<String, AuthoringError> {
    if field_name.is_empty() {
        return Err(AuthoringError::EmptyFieldName);
    }

    let mut document: Value = serde_json::from_str(text).map_err(AuthoringError::Parse)?;
    let root = document.as_object_mut().ok_or(AuthoringError::NotAnObject)?;

    let mappings = root
        .entry("mappings".to_string())
        .or_insert_with(|| json!({ "properties": {} }));
    let mappings = mappings
        .as_object_mut()
        .ok_or(AuthoringError::MalformedMappings)?;

    let properties = mappings
        .entry("properties".to_string())
        .or_insert_with(|| json!({}));
    let properties = properties
        .as_object_mut()
        .ok_or(AuthoringError::MalformedMappings)?;

    let mut field = block.properties.clone();
    let has_type = field
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| !t.is_empty());
    if !has_type {
        field.insert("type".to_string(), json!("text"));
    }

    properties.insert(field_name.to_string(), Value::Object(field));

    serde_json::to_string_pretty(&document).map_err(AuthoringError::Serialize)
}
