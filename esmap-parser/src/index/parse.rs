//! Editor-input parsing.
//!
//! Two strategies are tried in order: the API-command form
//! `<PUT|POST> <index-name> <json-body>` (method case-insensitive, index
//! name a whitespace-free token), then plain JSON. Either produces an
//! [`IndexConfig`]; the API form additionally yields the index name for the
//! editor title. When both fail the caller keeps the previous model — parse
//! errors never clear existing visualizations.

use super::error::ParseError;
use super::model::IndexConfig;
use once_cell::sync::Lazy;
use regex::Regex;

/// `PUT my-index { ... }` — the body runs to the end of the input.
static API_COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?si)^(PUT|POST)\s+([^\s{]+)\s*(\{.*\})$").expect("valid regex"));

/// A successfully parsed editor buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    pub config: IndexConfig,
    /// Present only for the API-command form.
    pub index_name: Option<String>,
}

/// Parse raw editor input into an [`IndexConfig`].
pub fn parse_input(input: &str) -> Result<ParsedInput, ParseError> {
    let trimmed = input.trim();

    if let Some(captures) = API_COMMAND.captures(trimmed) {
        let index_name = captures[2].to_string();
        let body = &captures[3];
        let config = serde_json::from_str(body).map_err(|source| ParseError::ApiBody {
            index_name: index_name.clone(),
            source,
        })?;
        return Ok(ParsedInput {
            config,
            index_name: Some(index_name),
        });
    }

    let config = serde_json::from_str(trimmed).map_err(ParseError::Json)?;
    Ok(ParsedInput {
        config,
        index_name: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_has_no_index_name() {
        let parsed = parse_input(r#"{"mappings": {"properties": {}}}"#).unwrap();
        assert_eq!(parsed.index_name, None);
        assert!(parsed.config.properties().unwrap().is_empty());
    }

    #[test]
    fn api_command_extracts_index_name() {
        let parsed = parse_input(r#"PUT my-index {"mappings":{"properties":{}}}"#).unwrap();
        assert_eq!(parsed.index_name.as_deref(), Some("my-index"));
        assert!(parsed.config.properties().unwrap().is_empty());
    }

    #[test]
    fn api_method_is_case_insensitive() {
        let parsed = parse_input(r#"post logs-2024 {"settings":{"number_of_shards":3}}"#).unwrap();
        assert_eq!(parsed.index_name.as_deref(), Some("logs-2024"));
        assert_eq!(parsed.config.shard_count(), 3);
    }

    #[test]
    fn api_body_may_span_lines() {
        let input = "PUT my-index {\n  \"mappings\": {\n    \"properties\": {}\n  }\n}";
        let parsed = parse_input(input).unwrap();
        assert_eq!(parsed.index_name.as_deref(), Some("my-index"));
    }

    #[test]
    fn api_command_with_bad_body_does_not_fall_back() {
        let err = parse_input("PUT my-index {not json}").unwrap_err();
        match err {
            ParseError::ApiBody { index_name, .. } => assert_eq!(index_name, "my-index"),
            other => panic!("expected ApiBody error, got {:?}", other),
        }
    }

    #[test]
    fn garbage_input_is_a_json_error() {
        assert!(matches!(parse_input("DELETE my-index"), Err(ParseError::Json(_))));
        assert!(matches!(parse_input(""), Err(ParseError::Json(_))));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let parsed = parse_input("  \n {\"settings\": {}} \n ").unwrap();
        assert_eq!(parsed.index_name, None);
        assert!(parsed.config.settings.is_some());
    }
}
