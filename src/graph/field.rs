use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field key -> descriptor, as found under `field_schema.properties`, in
/// document order.
pub type FieldMap = IndexMap<String, FieldDescriptor>;

/// The object schema describing a form's input fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(default)]
    pub properties: FieldMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// The JSON-schema `type` of a field.
///
/// Unknown tags are kept in `Other`; non-string values (e.g. `["string", "null"]`)
/// are kept as-is in `Raw`. A property without a `type` is `Untyped`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Other(String),
    Raw(serde_json::Value),
    #[default]
    Untyped,
}

/// Describes a single mappable field. Attributes the crate does not interpret
/// (items, uniqueItems, vendor extensions) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type", default, skip_serializing_if = "FieldKind::is_untyped")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            title: None,
            format: None,
            enum_values: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// The label shown when browsing fields: the title, or the key when untitled.
    pub fn display_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(key)
    }
}

impl FieldKind {
    /// The string tag, when the schema used one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            FieldKind::String => Some("string"),
            FieldKind::Number => Some("number"),
            FieldKind::Integer => Some("integer"),
            FieldKind::Boolean => Some("boolean"),
            FieldKind::Array => Some("array"),
            FieldKind::Object => Some("object"),
            FieldKind::Other(tag) => Some(tag),
            FieldKind::Raw(_) | FieldKind::Untyped => None,
        }
    }

    pub fn is_untyped(&self) -> bool {
        matches!(self, FieldKind::Untyped)
    }
}

impl From<serde_json::Value> for FieldKind {
    fn from(value: serde_json::Value) -> Self {
        let tag = match value {
            serde_json::Value::String(tag) => tag,
            other => return FieldKind::Raw(other),
        };
        match tag.as_str() {
            "string" => FieldKind::String,
            "number" => FieldKind::Number,
            "integer" => FieldKind::Integer,
            "boolean" => FieldKind::Boolean,
            "array" => FieldKind::Array,
            "object" => FieldKind::Object,
            _ => FieldKind::Other(tag),
        }
    }
}

impl From<FieldKind> for serde_json::Value {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Raw(value) => value,
            FieldKind::Untyped => serde_json::Value::Null,
            tagged => serde_json::Value::String(tagged.tag().unwrap_or_default().to_string()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Raw(value) => write!(f, "{}", value),
            FieldKind::Untyped => f.write_str("any"),
            tagged => f.write_str(tagged.tag().unwrap_or_default()),
        }
    }
}
