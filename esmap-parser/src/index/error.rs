//! Error types for document parsing and authoring.

use std::fmt;

/// Errors that can occur while parsing editor input.
///
/// None of these are fatal to the application: callers retain the previous
/// document model and keep rendering it.
#[derive(Debug)]
pub enum ParseError {
    /// The input matched the API-command form but its JSON body is invalid.
    ApiBody {
        index_name: String,
        source: serde_json::Error,
    },
    /// The input is not valid JSON.
    Json(serde_json::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ApiBody { index_name, source } => {
                write!(f, "invalid JSON body for index '{}': {}", index_name, source)
            }
            ParseError::Json(source) => write!(f, "invalid JSON document: {}", source),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::ApiBody { source, .. } => Some(source),
            ParseError::Json(source) => Some(source),
        }
    }
}

/// Errors that can occur when a palette block is dropped into the document.
#[derive(Debug)]
pub enum AuthoringError {
    /// The live buffer is not a plain JSON document.
    Parse(serde_json::Error),
    /// The buffer parsed, but its root is not a JSON object.
    NotAnObject,
    /// An existing `mappings` or `mappings.properties` entry is not an object.
    MalformedMappings,
    /// The field-name prompt was submitted empty.
    EmptyFieldName,
    /// Re-serializing the mutated document failed.
    Serialize(serde_json::Error),
}

impl fmt::Display for AuthoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthoringError::Parse(source) => {
                write!(f, "cannot insert field, buffer is not valid JSON: {}", source)
            }
            AuthoringError::NotAnObject => {
                write!(f, "cannot insert field, document root is not an object")
            }
            AuthoringError::MalformedMappings => {
                write!(f, "cannot insert field, 'mappings.properties' is not an object")
            }
            AuthoringError::EmptyFieldName => write!(f, "field name must not be empty"),
            AuthoringError::Serialize(source) => {
                write!(f, "failed to re-serialize document: {}", source)
            }
        }
    }
}

impl std::error::Error for AuthoringError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthoringError::Parse(source) | AuthoringError::Serialize(source) => Some(source),
            _ => None,
        }
    }
}
