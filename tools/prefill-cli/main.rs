use clap::{Args, Parser, Subcommand};
use prefill::fetch::{DEFAULT_BASE_URL, HttpGraphClient};
use prefill::prelude::*;
use prefill::resolver::DEFAULT_MAX_DEPTH;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Map workflow form fields to upstream data sources
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    input: GraphArgs,

    /// Directory holding the persisted prefill mappings
    #[arg(long, env = "PREFILL_STORE_DIR", default_value = ".prefill", global = true)]
    store_dir: String,

    /// Maximum number of indirect expansion rounds when resolving upstream sources
    #[arg(long, env = "PREFILL_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GraphArgs {
    /// Path to a blueprint graph JSON document
    #[arg(long, global = true, conflicts_with_all = ["tenant", "workflow"])]
    graph: Option<String>,

    /// Tenant id used when fetching the graph
    #[arg(long, global = true, requires = "workflow")]
    tenant: Option<String>,

    /// Workflow (blueprint) id used when fetching the graph
    #[arg(long, global = true, requires = "tenant")]
    workflow: Option<String>,

    /// Base URL of the graph API
    #[arg(long, env = "PREFILL_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List form nodes, their fields and current mappings
    Forms,
    /// List the data sources available to a node
    Sources {
        #[arg(long)]
        node: String,
    },
    /// Map a field of a node to a data source field
    Map {
        #[arg(long)]
        node: String,
        #[arg(long)]
        field: String,
        #[arg(long)]
        source: String,
        #[arg(long)]
        source_field: String,
    },
    /// Remove a field mapping
    Unmap {
        #[arg(long)]
        node: String,
        #[arg(long)]
        field: String,
    },
    /// Remove every stored mapping
    Clear,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = PrefillStore::open(&cli.store_dir);
    if !store.is_durable() {
        eprintln!(
            "Warning: '{}' is not usable; mappings will not be saved",
            cli.store_dir
        );
    }

    match cli.command {
        Command::Clear => {
            store.clear();
            println!("Cleared all prefill mappings.");
        }
        Command::Forms => {
            let session = open_session(&cli.input, cli.max_depth).await;
            print_forms(&session, &store);
        }
        Command::Sources { node } => {
            let session = open_session(&cli.input, cli.max_depth).await;
            print_sources(&session, &node);
        }
        Command::Map {
            node,
            field,
            source,
            source_field,
        } => {
            let session = open_session(&cli.input, cli.max_depth).await;
            ensure_field(&session, &node, &field);
            let catalog = session.catalog_for_node(&node);
            let selected = catalog.select(&source, &source_field).unwrap_or_else(|| {
                exit_with_error(&format!(
                    "'{}.{}' is not available to node '{}'",
                    source, source_field, node
                ))
            });
            store.apply(&node, &field, &selected);
            println!("{}", catalog.label(&field, &selected.selection));
        }
        Command::Unmap { node, field } => {
            store.remove(&node, &field);
            println!("Removed mapping for '{}' on node '{}'", field, node);
        }
    }
}

async fn open_session(args: &GraphArgs, max_depth: usize) -> Session {
    let resolver = Resolver::builder().with_max_depth(max_depth).build();
    let mut session = Session::new(resolver);
    session.set_globals(StaticGlobalSources::default().sources().to_vec());
    load_graph(&mut session, args).await;
    session
}

async fn load_graph(session: &mut Session, args: &GraphArgs) {
    match (&args.graph, &args.tenant, &args.workflow) {
        (Some(path), _, _) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read graph file '{}': {}", path, e))
            });
            let graph: Graph = serde_json::from_str(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));
            let ticket = session.begin_load();
            if let Err(e) = session.finish_load(ticket, Ok(graph)) {
                exit_with_error(&e.to_string());
            }
        }
        (None, Some(tenant), Some(workflow)) => {
            let client = HttpGraphClient::new(&args.base_url);
            if let Err(e) = session.refresh(&client, tenant, workflow).await {
                match &e {
                    FetchError::Http {
                        body: Some(body), ..
                    } => exit_with_error(&format!("{}\n{}", e, render_body(body))),
                    _ => exit_with_error(&e.to_string()),
                }
            }
        }
        _ => exit_with_error("Provide either --graph <file> or --tenant and --workflow"),
    }
}

fn ensure_field(session: &Session, node_id: &str, field: &str) {
    let known = session
        .graph()
        .and_then(|g| g.node(node_id).and_then(|n| g.form_of(n)))
        .is_some_and(|form| form.field_schema.properties.contains_key(field));
    if !known {
        exit_with_error(&format!(
            "Node '{}' has no form field named '{}'",
            node_id, field
        ));
    }
}

fn print_forms(session: &Session, store: &PrefillStore) {
    let views = session.form_views(store);
    if views.is_empty() {
        println!("No form nodes in this graph.");
        return;
    }
    for view in views {
        println!("{} [{}] (form {})", view.node_name, view.node_id, view.form_id);
        if view.fields.is_empty() {
            println!("  No fields defined for this form.");
        }
        for field in view.fields {
            match field.mapping_label {
                Some(label) => println!("  * {}", label),
                None => println!("  - {}", field.key),
            }
        }
    }
}

fn print_sources(session: &Session, node_id: &str) {
    let catalog = session.catalog_for_node(node_id);
    for source in catalog.sources() {
        let kind = match source.kind {
            DataSourceKind::Global => "global",
            DataSourceKind::Form => "form",
        };
        println!("{} [{}] ({})", source.name, source.id, kind);
        if source.fields.is_empty() {
            println!("  No fields available");
        }
        for (key, field) in &source.fields {
            println!("  {} - {} ({})", key, field.display_label(key), field.kind);
        }
    }
}

fn render_body(body: &FetchBody) -> String {
    match body {
        FetchBody::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        FetchBody::Text(text) => text.clone(),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
