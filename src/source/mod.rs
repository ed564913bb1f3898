pub mod global;

pub use global::*;

use crate::graph::{FieldDescriptor, FieldMap, GraphForm, GraphNode};
use serde::{Deserialize, Serialize};

/// Where a data source comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// Supplied externally, static for the session.
    Global,
    /// Derived from an upstream form node.
    Form,
}

/// A named, addressable set of fields available for prefill mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DataSourceKind,
    #[serde(default)]
    pub fields: FieldMap,
}

impl DataSource {
    pub fn global(id: &str, name: &str, fields: FieldMap) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: DataSourceKind::Global,
            fields,
        }
    }

    /// Builds the source for an upstream form node. The identity is the node id,
    /// so two nodes placed from the same reusable form stay distinct.
    pub fn from_form_node(node: &GraphNode, form: &GraphForm) -> Self {
        Self {
            id: node.id.clone(),
            name: node.display_name().to_string(),
            kind: DataSourceKind::Form,
            fields: form.field_schema.properties.clone(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.get(key)
    }
}
