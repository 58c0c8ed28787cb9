//! Mapping-tree view-model.
//!
//! [`build_tree`] turns the parsed mapping tree plus the resolved alias
//! edges into nested [`FieldNode`] values; [`flatten`] applies an explicit
//! expand/collapse state and yields the depth-first list a renderer walks.
//! Both are pure: the expand state is keyed by full field path and lives
//! outside the nodes, so the visible tree is always a function of
//! (document, ui-state) and nothing else.

use crate::alias::AliasEdge;
use esmap_parser::index::model::{FieldSpec, FieldType, Mappings, OrderedMap};
use esmap_parser::index::path::join_path;
use std::collections::HashSet;

/// Display summary of one multi-field sub-definition.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiFieldSummary {
    pub name: String,
    pub kind: Option<String>,
    pub analyzer: Option<String>,
}

/// Alias annotation on a field block.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasStatus {
    pub path: String,
    pub resolved: bool,
}

/// One node of the field-structure view.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub name: String,
    /// Dot-joined path from the root properties down to this field.
    pub path: String,
    pub type_label: String,
    /// Containers (object/nested/join) render children and a toggle.
    pub is_compound: bool,
    pub analyzer: Option<String>,
    pub multi_fields: Vec<MultiFieldSummary>,
    /// Join relations as (parent, joined child list) display pairs.
    pub relations: Vec<(String, String)>,
    pub alias: Option<AliasStatus>,
    pub children: Vec<FieldNode>,
}

/// Build the nested view-model for a document's mappings.
pub fn build_tree(mappings: &Mappings, edges: &[AliasEdge]) -> Vec<FieldNode> {
    match &mappings.properties {
        Some(root) => build_nodes(root, "", edges),
        None => Vec::new(),
    }
}

fn build_nodes(
    fields: &OrderedMap<FieldSpec>,
    prefix: &str,
    edges: &[AliasEdge],
) -> Vec<FieldNode> {
    fields
        .iter()
        .map(|(name, spec)| build_node(name, spec, prefix, edges))
        .collect()
}

fn build_node(name: &str, spec: &FieldSpec, prefix: &str, edges: &[AliasEdge]) -> FieldNode {
    let path = join_path(prefix, name);
    let display = spec.display_type();

    let alias = if spec.is_alias() {
        spec.path.clone().map(|target| AliasStatus {
            resolved: edges.iter().any(|e| e.alias == path && e.valid),
            path: target,
        })
    } else {
        None
    };

    let relations = if display == FieldType::Join {
        spec.relations
            .as_ref()
            .map(|rel| {
                rel.iter()
                    .map(|(parent, children)| (parent.to_string(), children.joined()))
                    .collect()
            })
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    let multi_fields = spec
        .fields
        .as_ref()
        .map(|fields| {
            fields
                .iter()
                .map(|(sub_name, sub)| MultiFieldSummary {
                    name: sub_name.to_string(),
                    kind: sub.kind.clone(),
                    analyzer: sub.analyzer.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    let children = spec
        .properties
        .as_ref()
        .map(|props| build_nodes(props, &path, edges))
        .unwrap_or_default();

    FieldNode {
        name: name.to_string(),
        path,
        type_label: display.name().to_string(),
        is_compound: display.is_compound(),
        analyzer: spec.analyzer.clone(),
        multi_fields,
        relations,
        alias,
        children,
    }
}

/// Expand/collapse state, keyed by full field path.
///
/// Every node defaults to expanded, so only collapsed paths are stored; the
/// state survives re-parses because field paths are stable names.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    collapsed: HashSet<String>,
}

impl ExpandState {
    pub fn new() -> Self {
        ExpandState::default()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        !self.collapsed.contains(path)
    }

    pub fn toggle(&mut self, path: &str) {
        if !self.collapsed.remove(path) {
            self.collapsed.insert(path.to_string());
        }
    }

    pub fn collapse(&mut self, path: &str) {
        self.collapsed.insert(path.to_string());
    }

    pub fn expand(&mut self, path: &str) {
        self.collapsed.remove(path);
    }
}

/// One row of the flattened field list.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatField {
    pub depth: usize,
    pub name: String,
    pub path: String,
    pub type_label: String,
    pub is_compound: bool,
    pub analyzer: Option<String>,
    pub multi_fields: Vec<MultiFieldSummary>,
    pub relations: Vec<(String, String)>,
    pub alias: Option<AliasStatus>,
    pub has_children: bool,
    pub is_expanded: bool,
}

/// Flatten the view-model depth-first, honoring the expand state.
///
/// Collapsing a node hides only that node's own children; siblings are
/// unaffected. Children render only under compound nodes, matching the
/// block display.
pub fn flatten(nodes: &[FieldNode], expand: &ExpandState) -> Vec<FlatField> {
    let mut rows = Vec::new();
    flatten_into(nodes, expand, 0, &mut rows);
    rows
}

fn flatten_into(
    nodes: &[FieldNode],
    expand: &ExpandState,
    depth: usize,
    rows: &mut Vec<FlatField>,
) {
    for node in nodes {
        let is_expanded = expand.is_expanded(&node.path);
        rows.push(FlatField {
            depth,
            name: node.name.clone(),
            path: node.path.clone(),
            type_label: node.type_label.clone(),
            is_compound: node.is_compound,
            analyzer: node.analyzer.clone(),
            multi_fields: node.multi_fields.clone(),
            relations: node.relations.clone(),
            alias: node.alias.clone(),
            has_children: !node.children.is_empty(),
            is_expanded,
        });

        if node.is_compound && is_expanded {
            flatten_into(&node.children, expand, depth + 1, rows);
        }
    }
}
