//! Integration tests for prefill
//!
//! End-to-end tests covering graph loading, resolution, selection and persistence together.
//!
mod common;
use common::*;
use prefill::fetch::graph_from_response;
use prefill::prelude::*;
use tokio_test::block_on;

/// Serves a fixed graph, or a fixed failure.
struct StubGraphSource {
    outcome: std::result::Result<Graph, FetchError>,
}

impl GraphSource for StubGraphSource {
    async fn fetch(
        &self,
        _tenant_id: &str,
        _workflow_id: &str,
    ) -> std::result::Result<Graph, FetchError> {
        self.outcome.clone()
    }
}

fn loaded_session() -> Session {
    let mut session = Session::default();
    block_on(session.load_globals(&StaticGlobalSources::default())).expect("static globals");
    let source = StubGraphSource {
        outcome: Ok(load_two_forms()),
    };
    block_on(session.refresh(&source, "tenant-1", "bp-1")).expect("stub fetch");
    session
}

#[test]
fn test_upstream_form_fields_are_offered() {
    let session = loaded_session();
    let catalog = session.catalog_for_node("node-1");

    let upstream = catalog.get("node-2").expect("node-2 should be upstream");
    assert_eq!(upstream.kind, DataSourceKind::Form);
    assert_eq!(
        upstream.fields.keys().collect::<Vec<_>>(),
        vec!["company_name", "employee_count"]
    );
}

#[test]
fn test_global_selection_is_persisted_and_labelled() {
    let session = loaded_session();
    let mut store = PrefillStore::in_memory();
    let catalog = session.catalog_for_node("node-1");

    let mut picker = Picker::new();
    picker.toggle("global_action_props");
    picker.choose("global_action_props", "action_id");
    let selected = picker.confirm(&catalog).expect("valid choice");
    store.apply("node-1", "first_name", &selected);

    let mapping = store.get_for_form("node-1");
    let mut expected = FieldPrefillMapping::new();
    expected.insert(
        "first_name".to_string(),
        PrefillSelection::new("global_action_props", "action_id"),
    );
    assert_eq!(mapping, expected);
    assert_eq!(
        catalog.label("first_name", &mapping["first_name"]),
        "first_name: Action Properties.action_id"
    );
}

#[test]
fn test_chain_through_task_node() {
    let mut session = Session::default();
    let ticket = session.begin_load();
    assert!(session.finish_load(ticket, Ok(create_chain_graph())).unwrap());

    let catalog = session.catalog_for_node("c");
    assert_eq!(ids(catalog.sources()), vec!["a"]);
    assert!(catalog.get("b").is_none());
}

#[test]
fn test_form_views_show_mapped_labels() {
    let session = loaded_session();
    let mut store = PrefillStore::in_memory();
    store.set(
        "node-1",
        "email",
        &PrefillSelection::new("node-2", "company_name"),
    );

    let views = session.form_views(&store);
    assert_eq!(views.len(), 2);

    let form_one = views.iter().find(|v| v.node_id == "node-1").unwrap();
    assert_eq!(form_one.node_name, "Form One");
    assert_eq!(form_one.form_id, "form-1");
    assert_eq!(
        form_one.fields,
        vec![
            FieldView {
                key: "first_name".to_string(),
                mapping_label: None,
            },
            FieldView {
                key: "email".to_string(),
                mapping_label: Some("email: Form Two.company_name".to_string()),
            },
        ]
    );
}

#[test]
fn test_stale_load_is_discarded() {
    let mut session = Session::default();
    let stale = session.begin_load();
    let current = session.begin_load();

    assert!(!session.finish_load(stale, Ok(create_chain_graph())).unwrap());
    assert!(session.graph().is_none());

    // A stale failure is discarded as well.
    let failure = FetchError::Transport {
        url: "http://localhost:3000".to_string(),
        message: "connection reset".to_string(),
    };
    assert!(!session.finish_load(stale, Err(failure)).unwrap());

    assert!(session.finish_load(current, Ok(load_two_forms())).unwrap());
    assert_eq!(session.graph().unwrap().id, "bp-1");

    session.invalidate();
    assert!(!session.finish_load(current, Ok(create_chain_graph())).unwrap());
    assert_eq!(session.graph().unwrap().id, "bp-1");
}

#[test]
fn test_refresh_supersedes_outstanding_tickets() {
    let mut session = Session::default();
    let outstanding = session.begin_load();

    let source = StubGraphSource {
        outcome: Ok(load_two_forms()),
    };
    block_on(session.refresh(&source, "tenant-1", "bp-1")).unwrap();

    assert!(!session.finish_load(outstanding, Ok(create_chain_graph())).unwrap());
    assert_eq!(session.graph().unwrap().id, "bp-1");
}

#[test]
fn test_fetch_failure_is_surfaced() {
    let mut session = loaded_session();
    let url = "http://localhost:3000/api/v1/t/actions/blueprints/w/graph";
    let source = StubGraphSource {
        outcome: graph_from_response(url, 404, r#"{"title":"Not Found"}"#),
    };

    let err = block_on(session.refresh(&source, "t", "w")).unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err {
        FetchError::Http { body, .. } => assert_eq!(
            body,
            Some(FetchBody::Json(serde_json::json!({"title": "Not Found"})))
        ),
        other => panic!("Expected Http error, got {:?}", other),
    }

    // The previously loaded graph stays in place.
    assert_eq!(session.graph().unwrap().id, "bp-1");
}

#[test]
fn test_unparseable_success_body_is_a_parse_error() {
    let err = graph_from_response("http://x/graph", 200, "<html>").unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }));
    assert_eq!(err.status(), None);

    let raw = graph_from_response("http://x/graph", 502, "Bad Gateway").unwrap_err();
    assert!(raw.to_string().contains("502"));
}

#[test]
fn test_mappings_survive_graph_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = loaded_session();
    {
        let mut store = PrefillStore::open(dir.path());
        let catalog = session.catalog_for_node("node-1");
        let selected = catalog.select("node-2", "company_name").unwrap();
        store.apply("node-1", "email", &selected);
    }

    let source = StubGraphSource {
        outcome: Ok(load_two_forms()),
    };
    block_on(session.refresh(&source, "tenant-1", "bp-1")).unwrap();

    let store = PrefillStore::open(dir.path());
    let catalog = session.catalog_for_node("node-1");
    assert_eq!(
        catalog.labels(&store.get_for_form("node-1")),
        vec!["email: Form Two.company_name".to_string()]
    );
}
