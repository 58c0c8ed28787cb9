//! Alias-edge collection and resolution.
//!
//! Walks the mapping tree in pre-order and, for every alias-typed field,
//! resolves its `path` from the root of the same tree. Resolution only
//! follows nested `properties`; a target nested under `fields`
//! (multi-fields) deliberately does not resolve. A failed resolution is a
//! display state, never a parse error.

use crate::diagnostics::Diagnostic;
use esmap_parser::index::model::{FieldSpec, Mappings, OrderedMap};
use esmap_parser::index::path::{find_field, join_path};

/// One alias edge: the alias field's full path, the target path it names,
/// and whether the target resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEdge {
    pub alias: String,
    pub target: String,
    pub valid: bool,
}

/// Collect all alias edges in document order (pre-order depth-first).
///
/// Recursion continues into every field's own `properties` regardless of its
/// declared type; the structure is tree-shaped JSON, so no cycle guard is
/// needed.
pub fn resolve_aliases(mappings: &Mappings) -> Vec<AliasEdge> {
    let mut edges = Vec::new();
    if let Some(root) = &mappings.properties {
        collect_edges(root, "", root, &mut edges);
    }
    edges
}

fn collect_edges(
    fields: &OrderedMap<FieldSpec>,
    prefix: &str,
    root: &OrderedMap<FieldSpec>,
    edges: &mut Vec<AliasEdge>,
) {
    for (name, spec) in fields.iter() {
        let full_path = join_path(prefix, name);

        if spec.is_alias() {
            if let Some(target) = spec.path.as_deref().filter(|p| !p.is_empty()) {
                edges.push(AliasEdge {
                    alias: full_path.clone(),
                    target: target.to_string(),
                    valid: find_field(root, target).is_some(),
                });
            }
        }

        if let Some(children) = &spec.properties {
            collect_edges(children, &full_path, root, edges);
        }
    }
}

/// Map unresolved edges to warnings for the diagnostics surface.
pub fn alias_diagnostics(edges: &[AliasEdge]) -> Vec<Diagnostic> {
    edges
        .iter()
        .filter(|edge| !edge.valid)
        .map(|edge| {
            Diagnostic::warning(
                edge.alias.clone(),
                format!("alias target not found: '{}'", edge.target),
            )
            .with_code("broken-alias-target")
        })
        .collect()
}
