//! Pure application state for the viewer.
//!
//! The model owns the raw text buffer and the last-good parse of it, plus
//! the derived structures every panel reads (alias edges, field view-model,
//! expand state). Re-parsing happens wholesale on every edit; a failed
//! parse keeps the previous model visible and only flips a flag, so the
//! visualization never goes blank while the user is mid-edit.

use esmap_analysis::alias::{alias_diagnostics, resolve_aliases, AliasEdge};
use esmap_analysis::shards::ShardLayout;
use esmap_analysis::tree::{build_tree, flatten, ExpandState, FieldNode, FlatField};
use esmap_parser::index::parse::parse_input;
use esmap_parser::IndexConfig;

pub struct Model {
    text: String,
    config: IndexConfig,
    index_name: Option<String>,
    edges: Vec<AliasEdge>,
    tree: Vec<FieldNode>,
    expand: ExpandState,
    parse_ok: bool,
}

#[allow(dead_code)]
impl Model {
    pub fn new(text: String) -> Self {
        let mut model = Model {
            text,
            config: IndexConfig::default(),
            index_name: None,
            edges: Vec::new(),
            tree: Vec::new(),
            expand: ExpandState::new(),
            parse_ok: false,
        };
        model.reparse();
        model
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the buffer and re-parse. The previous model survives a
    /// failed parse.
    pub fn replace_text(&mut self, text: String) {
        self.text = text;
        self.reparse();
    }

    fn reparse(&mut self) {
        match parse_input(&self.text) {
            Ok(parsed) => {
                self.config = parsed.config;
                self.index_name = parsed.index_name;
                self.parse_ok = true;
                self.rebuild_derived();
            }
            Err(error) => {
                tracing::warn!(%error, "input did not parse; keeping previous model");
                self.parse_ok = false;
            }
        }
    }

    fn rebuild_derived(&mut self) {
        match &self.config.mappings {
            Some(mappings) => {
                self.edges = resolve_aliases(mappings);
                self.tree = build_tree(mappings, &self.edges);
                for diagnostic in alias_diagnostics(&self.edges) {
                    tracing::warn!(%diagnostic, "alias resolution");
                }
            }
            None => {
                self.edges.clear();
                self.tree.clear();
            }
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn edges(&self) -> &[AliasEdge] {
        &self.edges
    }

    /// Whether the current buffer contents parsed.
    pub fn parse_ok(&self) -> bool {
        self.parse_ok
    }

    pub fn has_mappings(&self) -> bool {
        self.config
            .properties()
            .map(|props| !props.is_empty())
            .unwrap_or(false)
    }

    pub fn shard_layout(&self) -> ShardLayout {
        ShardLayout::new(self.config.shard_count(), self.config.replica_count())
    }

    /// The field rows currently visible, honoring the expand state.
    pub fn flattened_fields(&self) -> Vec<FlatField> {
        flatten(&self.tree, &self.expand)
    }

    pub fn toggle_expansion(&mut self, path: &str) {
        self.expand.toggle(path);
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expand.is_expanded(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::sample::SAMPLE_DOCUMENT;

    #[test]
    fn sample_document_parses_and_derives() {
        let model = Model::new(SAMPLE_DOCUMENT.to_string());
        assert!(model.parse_ok());
        assert_eq!(model.index_name(), None);
        assert!(model.has_mappings());
        assert_eq!(model.shard_layout().total(), 15);
        assert_eq!(model.edges().len(), 1);
        assert!(model.edges()[0].valid);
    }

    #[test]
    fn failed_parse_keeps_the_previous_model() {
        let mut model = Model::new(SAMPLE_DOCUMENT.to_string());
        let fields_before = model.flattened_fields().len();

        model.replace_text("{ not json".to_string());
        assert!(!model.parse_ok());
        // Derived views still reflect the last good document.
        assert_eq!(model.flattened_fields().len(), fields_before);
        assert_eq!(model.shard_layout().total(), 15);

        model.replace_text(r#"{"mappings":{"properties":{"a":{"type":"text"}}}}"#.to_string());
        assert!(model.parse_ok());
        assert_eq!(model.flattened_fields().len(), 1);
    }

    #[test]
    fn expansion_survives_reparse() {
        let mut model = Model::new(SAMPLE_DOCUMENT.to_string());
        model.toggle_expansion("user");
        let collapsed = model.flattened_fields().len();

        model.replace_text(SAMPLE_DOCUMENT.to_string());
        assert_eq!(model.flattened_fields().len(), collapsed);
        assert!(!model.is_expanded("user"));
    }

    #[test]
    fn api_command_input_exposes_the_index_name() {
        let model = Model::new(format!("PUT my-index {}", SAMPLE_DOCUMENT));
        assert_eq!(model.index_name(), Some("my-index"));
    }

    #[test]
    fn empty_document_has_no_mappings() {
        let model = Model::new("{}".to_string());
        assert!(model.parse_ok());
        assert!(!model.has_mappings());
        assert!(model.flattened_fields().is_empty());
        // Defaults still drive the shard panel.
        assert_eq!(model.shard_layout().total(), 2);
    }
}
