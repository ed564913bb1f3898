//! Common test utilities for building graphs and stores.
use prefill::prelude::*;

pub const TWO_FORMS_JSON: &str = include_str!("fixtures/two_forms.json");

/// The two-form blueprint: `node-2` (Form Two) feeds `node-1` (Form One).
#[allow(dead_code)]
pub fn load_two_forms() -> Graph {
    serde_json::from_str(TWO_FORMS_JSON).expect("fixture graph should parse")
}

/// A node backed by `form_id`.
#[allow(dead_code)]
pub fn form_node(id: &str, form_id: &str) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        node_type: "form".to_string(),
        data: NodeData {
            component_type: "form".to_string(),
            component_id: form_id.to_string(),
            name: Some(format!("{} Node", id)),
            ..Default::default()
        },
    }
}

/// A non-form node (task, branch, ...).
#[allow(dead_code)]
pub fn task_node(id: &str) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        node_type: "task".to_string(),
        data: NodeData {
            component_type: "task".to_string(),
            component_id: format!("task-{}", id),
            name: Some(format!("{} Task", id)),
            ..Default::default()
        },
    }
}

/// A form with string fields named after `fields`.
#[allow(dead_code)]
pub fn form(id: &str, fields: &[&str]) -> GraphForm {
    GraphForm {
        id: id.to_string(),
        name: id.to_string(),
        field_schema: FieldSchema {
            properties: fields
                .iter()
                .map(|key| (key.to_string(), FieldDescriptor::new(FieldKind::String)))
                .collect(),
            required: vec![],
        },
    }
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> GraphEdge {
    GraphEdge {
        source: source.to_string(),
        target: target.to_string(),
    }
}

#[allow(dead_code)]
pub fn build_graph(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>, forms: Vec<GraphForm>) -> Graph {
    Graph {
        nodes,
        edges,
        forms,
        ..Default::default()
    }
}

/// Chain `a -> b -> c` where `a` and `c` are forms and `b` is a task.
#[allow(dead_code)]
pub fn create_chain_graph() -> Graph {
    build_graph(
        vec![form_node("a", "form-a"), task_node("b"), form_node("c", "form-c")],
        vec![edge("a", "b"), edge("b", "c")],
        vec![form("form-a", &["name"]), form("form-c", &["copy"])],
    )
}

#[allow(dead_code)]
pub fn ids(sources: &[DataSource]) -> Vec<&str> {
    sources.iter().map(|s| s.id.as_str()).collect()
}

/// A medium whose writes always fail, as when storage quota is exhausted.
#[allow(dead_code)]
#[derive(Default)]
pub struct FullMedium {
    pub inner: MemoryMedium,
}

impl KeyValueMedium for FullMedium {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, MediumError> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, _value: &str) -> std::result::Result<(), MediumError> {
        Err(MediumError::Write {
            key: key.to_string(),
            message: "quota exceeded".to_string(),
        })
    }
}
