//! Full-path computation and dot-path lookup over the mapping tree.
//!
//! A field's full path is the dot-joined chain of keys from the root
//! `properties` down to the field, across nested `properties` only.
//! Multi-field definitions under `fields` are leaves for path purposes and
//! are never traversed, so a path such as `content.keyword` naming a
//! multi-field does not resolve.

use super::model::{FieldSpec, OrderedMap};

/// Join a parent prefix and a field name into a full path.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Resolve a dot-separated path against a properties tree.
///
/// Every intermediate segment must name a field with nested `properties`;
/// the final segment may resolve to any field. Returns `None` when any
/// segment is missing or an intermediate field has no children.
pub fn find_field<'a>(root: &'a OrderedMap<FieldSpec>, path: &str) -> Option<&'a FieldSpec> {
    let mut current = root;
    let segments: Vec<&str> = path.split('.').collect();

    for (index, segment) in segments.iter().enumerate() {
        let spec = current.get(segment)?;

        if index == segments.len() - 1 {
            return Some(spec);
        }

        current = spec.properties.as_ref()?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(raw: &str) -> OrderedMap<FieldSpec> {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn join_path_handles_root_prefix() {
        assert_eq!(join_path("", "title"), "title");
        assert_eq!(join_path("user", "id"), "user.id");
    }

    #[test]
    fn finds_top_level_field() {
        let root = tree(r#"{"title": {"type": "text"}}"#);
        assert!(find_field(&root, "title").is_some());
        assert!(find_field(&root, "missing").is_none());
    }

    #[test]
    fn finds_nested_field_through_properties() {
        let root = tree(
            r#"{"user": {"type": "nested", "properties": {"id": {"type": "keyword"}}}}"#,
        );
        let id = find_field(&root, "user.id").unwrap();
        assert_eq!(id.kind.as_deref(), Some("keyword"));
    }

    #[test]
    fn intermediate_segment_may_resolve_to_a_container() {
        let root = tree(
            r#"{"user": {"type": "object", "properties": {"name": {"type": "text"}}}}"#,
        );
        // The final segment may be any field, including the container itself.
        assert!(find_field(&root, "user").is_some());
    }

    #[test]
    fn intermediate_without_properties_fails() {
        let root = tree(r#"{"title": {"type": "text"}}"#);
        assert!(find_field(&root, "title.keyword").is_none());
    }

    #[test]
    fn multi_fields_are_not_traversed() {
        let root = tree(
            r#"{"content": {"type": "text", "fields": {"keyword": {"type": "keyword"}}}}"#,
        );
        assert!(find_field(&root, "content").is_some());
        assert!(find_field(&root, "content.keyword").is_none());
    }

    #[test]
    fn empty_path_does_not_resolve() {
        let root = tree(r#"{"title": {"type": "text"}}"#);
        assert!(find_field(&root, "").is_none());
    }
}
