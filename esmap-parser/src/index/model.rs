//! In-memory representation of an index configuration.
//!
//! The model is deliberately lenient: every section is optional, unknown
//! keys are retained as raw JSON values, and nothing is validated against a
//! real search engine. A document with no `mappings.properties` is a valid
//! (empty) configuration; the viewer renders whatever subset is present.
//!
//! Mapping field order is display order, so all name-keyed collections use
//! [`OrderedMap`], which preserves the order of keys in the source document.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// A map from name to entry that preserves document order.
///
/// `serde_json` is built with `preserve_order`, so raw values already keep
/// their key order; this type extends the same guarantee to the typed model.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        OrderedMap(Vec::new())
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap::new()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        OrderedMap(iter.into_iter().collect())
    }
}

impl<'de, V> Deserialize<'de> for OrderedMap<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for OrderedMapVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of named entries")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// One value or a list of values, as JSON allows for join relations and
/// analyzer filter chains (`"filter": "lowercase"` vs `"filter": [...]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(s) => std::slice::from_ref(s),
            OneOrMany::Many(v) => v,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.as_slice().iter().map(String::as_str)
    }

    /// Comma-joined rendering used by the component blocks.
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(", ")
    }
}

/// Root entity, rebuilt from text on every edit.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub settings: Option<Settings>,
    pub mappings: Option<Mappings>,
}

impl IndexConfig {
    /// Primary shard count; a missing value defaults to 1.
    pub fn shard_count(&self) -> u32 {
        self.settings
            .as_ref()
            .and_then(|s| s.number_of_shards)
            .unwrap_or(1)
    }

    /// Replica count per primary; a missing value defaults to 1.
    pub fn replica_count(&self) -> u32 {
        self.settings
            .as_ref()
            .and_then(|s| s.number_of_replicas)
            .unwrap_or(1)
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.settings.as_ref().and_then(|s| s.analysis.as_ref())
    }

    /// Top-level mapping fields, if the document declares any.
    pub fn properties(&self) -> Option<&OrderedMap<FieldSpec>> {
        self.mappings.as_ref().and_then(|m| m.properties.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub number_of_shards: Option<u32>,
    pub number_of_replicas: Option<u32>,
    pub analysis: Option<Analysis>,
}

/// Named text-analysis components declared under `settings.analysis`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub analyzer: Option<OrderedMap<ComponentConfig>>,
    pub tokenizer: Option<OrderedMap<ComponentConfig>>,
    pub filter: Option<OrderedMap<ComponentConfig>>,
}

/// Configuration of a single analyzer, tokenizer or filter.
///
/// Only the keys the panels name explicitly are typed; everything else is an
/// engine-specific parameter and stays a raw value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub tokenizer: Option<String>,
    pub filter: Option<OneOrMany>,
    #[serde(flatten)]
    pub params: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Mappings {
    pub properties: Option<OrderedMap<FieldSpec>>,
}

/// A single field mapping; recursive through `properties`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub analyzer: Option<String>,
    /// Multi-field sub-definitions. Leaves for path purposes: the resolver
    /// and the full-path computation never descend into them.
    pub fields: Option<OrderedMap<FieldSpec>>,
    /// Nested fields; present on object/nested/join containers.
    pub properties: Option<OrderedMap<FieldSpec>>,
    /// Join relations, parent name to child name(s). Purely descriptive.
    pub relations: Option<OrderedMap<OneOrMany>>,
    /// Alias target, a dot-separated path within the same properties tree.
    pub path: Option<String>,
    #[serde(flatten)]
    pub params: serde_json::Map<String, Value>,
}

impl FieldSpec {
    /// The declared type, if any.
    pub fn field_type(&self) -> Option<FieldType> {
        self.kind.as_deref().map(FieldType::parse)
    }

    /// The label shown for this field: the declared type, `object` when the
    /// field has nested properties but no type, `unknown` otherwise.
    pub fn display_type(&self) -> FieldType {
        match (&self.kind, &self.properties) {
            (Some(kind), _) => FieldType::parse(kind),
            (None, Some(_)) => FieldType::Object,
            (None, None) => FieldType::Other("unknown".to_string()),
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.field_type(), Some(FieldType::Alias))
    }

    pub fn has_multi_fields(&self) -> bool {
        self.fields.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// The fixed field-type vocabulary, with a carrier for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Keyword,
    Long,
    Integer,
    Short,
    Byte,
    Double,
    Float,
    Date,
    Boolean,
    Object,
    Nested,
    Join,
    Alias,
    Other(String),
}

impl FieldType {
    pub fn parse(name: &str) -> FieldType {
        match name {
            "text" => FieldType::Text,
            "keyword" => FieldType::Keyword,
            "long" => FieldType::Long,
            "integer" => FieldType::Integer,
            "short" => FieldType::Short,
            "byte" => FieldType::Byte,
            "double" => FieldType::Double,
            "float" => FieldType::Float,
            "date" => FieldType::Date,
            "boolean" => FieldType::Boolean,
            "object" => FieldType::Object,
            "nested" => FieldType::Nested,
            "join" => FieldType::Join,
            "alias" => FieldType::Alias,
            other => FieldType::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Keyword => "keyword",
            FieldType::Long => "long",
            FieldType::Integer => "integer",
            FieldType::Short => "short",
            FieldType::Byte => "byte",
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Nested => "nested",
            FieldType::Join => "join",
            FieldType::Alias => "alias",
            FieldType::Other(name) => name,
        }
    }

    /// Containers whose children render as nested blocks.
    pub fn is_compound(&self) -> bool {
        matches!(self, FieldType::Object | FieldType::Nested | FieldType::Join)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
