//! Unit tests for the graph model, data sources and error types.
mod common;
use common::*;
use prefill::prelude::*;

#[test]
fn test_graph_lookups() {
    let graph = load_two_forms();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges, vec![edge("node-2", "node-1")]);

    let node = graph.node_for_form("form-2").unwrap();
    assert_eq!(node.id, "node-2");
    assert!(node.is_form());
    assert_eq!(graph.form_of(node).unwrap().name, "Form Two");
    assert!(graph.node("missing").is_none());
    assert!(graph.form("missing").is_none());

    // Uninterpreted node attributes are kept.
    assert_eq!(
        node.data.extra.get("component_key"),
        Some(&serde_json::json!("form_two"))
    );
}

#[test]
fn test_partial_graph_document_loads() {
    let graph: Graph = serde_json::from_str(
        r#"{"nodes":[{"id":"n","data":{"component_type":"form"}}],"edges":[{"source":"n","target":"x"}]}"#,
    )
    .unwrap();

    assert!(graph.forms.is_empty());
    let node = graph.node("n").unwrap();
    assert_eq!(node.data.component_id, "");
    assert_eq!(node.display_name(), "n");
    assert!(graph.form_nodes().next().is_none());
    assert!(resolve_data_sources(&graph, "").is_empty());
}

#[test]
fn test_field_descriptor_keeps_schema_metadata() {
    let json = serde_json::json!({
        "type": "array",
        "title": "Tags",
        "items": { "type": "string", "enum": ["a", "b"] },
        "uniqueItems": true,
        "enum": null
    });
    let field: FieldDescriptor = serde_json::from_value(json).unwrap();

    assert_eq!(field.kind, FieldKind::Array);
    assert_eq!(field.title.as_deref(), Some("Tags"));
    assert!(field.enum_values.is_none());
    assert_eq!(field.extra.get("uniqueItems"), Some(&serde_json::json!(true)));
    assert!(field.extra.contains_key("items"));
}

#[test]
fn test_unknown_field_kind_is_preserved() {
    let field: FieldDescriptor =
        serde_json::from_value(serde_json::json!({ "type": "object-enum" })).unwrap();
    assert_eq!(field.kind, FieldKind::Other("object-enum".to_string()));
    assert_eq!(field.kind.to_string(), "object-enum");
    assert_eq!(
        serde_json::to_value(&field).unwrap(),
        serde_json::json!({ "type": "object-enum" })
    );
}

#[test]
fn test_untyped_and_union_typed_fields_load() {
    let doc = r#"{
        "nodes": [
            { "id": "notes", "data": { "component_type": "form", "component_id": "form-notes" } },
            { "id": "review", "data": { "component_type": "form", "component_id": "form-review" } }
        ],
        "edges": [{ "source": "notes", "target": "review" }],
        "forms": [
            {
                "id": "form-notes",
                "field_schema": {
                    "properties": {
                        "note": { "title": "Note" },
                        "nickname": { "type": ["string", "null"] }
                    }
                }
            },
            { "id": "form-review", "field_schema": { "properties": {} } }
        ]
    }"#;

    let graph = prefill::fetch::graph_from_response("http://x/graph", 200, doc)
        .expect("lenient field types should load");
    let sources = resolve_data_sources(&graph, "form-review");
    assert_eq!(ids(&sources), vec!["notes"]);

    let note = &sources[0].fields["note"];
    assert_eq!(note.kind, FieldKind::Untyped);
    assert_eq!(note.display_label("note"), "Note");

    let nickname = &sources[0].fields["nickname"];
    assert_eq!(
        nickname.kind,
        FieldKind::Raw(serde_json::json!(["string", "null"]))
    );
    assert_eq!(nickname.kind.tag(), None);

    // Both serialize back as they were read.
    assert_eq!(
        serde_json::to_value(note).unwrap(),
        serde_json::json!({ "title": "Note" })
    );
    assert_eq!(
        serde_json::to_value(nickname).unwrap(),
        serde_json::json!({ "type": ["string", "null"] })
    );
}

#[test]
fn test_data_source_serialization() {
    let source = DataSource::global("g", "Globals", Default::default());
    assert_eq!(
        serde_json::to_value(&source).unwrap(),
        serde_json::json!({ "id": "g", "name": "Globals", "type": "global", "fields": {} })
    );
}

#[test]
fn test_default_global_sources() {
    let globals = block_on_fetch();
    assert_eq!(ids(&globals), vec!["global_action_props", "global_client_org_props"]);
    assert!(globals.iter().all(|s| s.kind == DataSourceKind::Global));

    let action = &globals[0];
    assert_eq!(action.name, "Action Properties");
    assert_eq!(
        action.fields["created_at"].format.as_deref(),
        Some("date-time")
    );
    assert_eq!(globals[1].fields["employee_count"].kind, FieldKind::Number);
}

fn block_on_fetch() -> Vec<DataSource> {
    tokio_test::block_on(StaticGlobalSources::default().fetch()).unwrap()
}

#[test]
fn test_error_display() {
    let err = FetchError::Http {
        url: "http://localhost:3000/graph".to_string(),
        status: 500,
        body: Some(FetchBody::Text("boom".to_string())),
    };
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("http://localhost:3000/graph"));

    let medium_err = MediumError::Write {
        key: "prefillMappings".to_string(),
        message: "quota exceeded".to_string(),
    };
    assert!(medium_err.to_string().contains("prefillMappings"));
    assert!(medium_err.to_string().contains("quota exceeded"));
}
