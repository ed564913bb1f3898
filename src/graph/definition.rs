use super::field::FieldSchema;
use serde::{Deserialize, Serialize};

/// The `component_type` tag carried by nodes that are backed by a form.
pub const FORM_COMPONENT: &str = "form";

/// The complete workflow definition as delivered by the blueprint graph endpoint.
///
/// This is a passive container: loading never validates references, and every
/// field defaults so that partial documents still load. Dangling edges or
/// unknown form ids simply produce smaller results downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    #[serde(default)]
    pub forms: Vec<GraphForm>,
}

/// A position in the workflow graph, optionally backed by a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub data: NodeData,
}

/// Node payload. Only the component discriminator, the backing component id and
/// the display name are interpreted; everything else is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub component_type: String,
    #[serde(default)]
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A directed connection `source -> target` between two node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// A schema-defined set of input fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphForm {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub field_schema: FieldSchema,
}

impl Graph {
    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn form(&self, form_id: &str) -> Option<&GraphForm> {
        self.forms.iter().find(|f| f.id == form_id)
    }

    /// The first node whose backing component is `form_id`.
    pub fn node_for_form(&self, form_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.data.component_id == form_id)
    }

    /// The form backing `node`, if the node is a form node and the form exists.
    pub fn form_of(&self, node: &GraphNode) -> Option<&GraphForm> {
        if node.is_form() {
            self.form(&node.data.component_id)
        } else {
            None
        }
    }

    /// Iterates form nodes together with their backing form, skipping nodes
    /// whose form is missing from the document.
    pub fn form_nodes(&self) -> impl Iterator<Item = (&GraphNode, &GraphForm)> {
        self.nodes
            .iter()
            .filter_map(|node| self.form_of(node).map(|form| (node, form)))
    }
}

impl GraphNode {
    pub fn is_form(&self) -> bool {
        self.data.component_type == FORM_COMPONENT
    }

    /// Display name, falling back to the node id.
    pub fn display_name(&self) -> &str {
        self.data.name.as_deref().unwrap_or(&self.id)
    }
}
