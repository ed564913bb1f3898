//! Wires a loaded graph, the global sources and the resolver together.

use crate::error::FetchError;
use crate::fetch::GraphSource;
use crate::graph::Graph;
use crate::resolver::Resolver;
use crate::selection::Catalog;
use crate::source::{DataSource, GlobalSources};
use crate::store::PrefillStore;
use tracing::{debug, info};

/// Identifies one graph load. Only the most recently issued ticket may apply
/// its result; older ones are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// A form node as presented for mapping, with the labels of its mapped fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub node_id: String,
    pub node_name: String,
    pub form_id: String,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub key: String,
    /// `None` when the field is unmapped.
    pub mapping_label: Option<String>,
}

/// Read-only session state: the current graph snapshot and global sources.
///
/// Catalogs are recomputed on every request, so a refreshed graph is picked up
/// without any explicit invalidation.
#[derive(Debug, Default)]
pub struct Session {
    resolver: Resolver,
    globals: Vec<DataSource>,
    graph: Option<Graph>,
    generation: u64,
}

impl Session {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            ..Default::default()
        }
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn globals(&self) -> &[DataSource] {
        &self.globals
    }

    pub fn set_globals(&mut self, globals: Vec<DataSource>) {
        self.globals = globals;
    }

    pub async fn load_globals(&mut self, source: &impl GlobalSources) -> Result<(), FetchError> {
        self.globals = source.fetch().await?;
        Ok(())
    }

    /// Starts a new graph load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Drops interest in every outstanding load.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Applies the outcome of the load identified by `ticket`.
    ///
    /// Returns `Ok(false)` without touching state when the ticket is stale,
    /// whatever the outcome was. Fetch failures of the current load are
    /// returned unchanged.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Graph, FetchError>,
    ) -> Result<bool, FetchError> {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "discarding stale graph load");
            return Ok(false);
        }
        let graph = outcome?;
        info!(
            graph = %graph.id,
            nodes = graph.nodes.len(),
            forms = graph.forms.len(),
            "graph loaded"
        );
        self.graph = Some(graph);
        Ok(true)
    }

    /// Fetches and installs the graph of a workflow.
    ///
    /// The session is borrowed mutably for the whole fetch, so nothing can
    /// supersede this load and its result is always applied. Starting it
    /// invalidates every outstanding [`LoadTicket`]. Callers that need to
    /// overlap or abandon loads drive [`begin_load`](Self::begin_load) and
    /// [`finish_load`](Self::finish_load) themselves.
    pub async fn refresh(
        &mut self,
        source: &impl GraphSource,
        tenant_id: &str,
        workflow_id: &str,
    ) -> Result<(), FetchError> {
        let ticket = self.begin_load();
        let outcome = source.fetch(tenant_id, workflow_id).await;
        self.finish_load(ticket, outcome).map(|_| ())
    }

    /// Globals followed by the sources upstream of `node_id`.
    pub fn catalog_for_node(&self, node_id: &str) -> Catalog {
        let resolved = self
            .graph
            .as_ref()
            .map(|graph| self.resolver.resolve_for_node(graph, node_id))
            .unwrap_or_default();
        Catalog::new(self.globals.clone(), resolved)
    }

    /// Every form node with its fields, labelled from the mappings in `store`.
    pub fn form_views(&self, store: &PrefillStore) -> Vec<FormView> {
        let Some(graph) = &self.graph else {
            return Vec::new();
        };
        let all = store.get_all();

        graph
            .form_nodes()
            .map(|(node, form)| {
                let mapping = all.get(&node.id);
                let catalog = match mapping {
                    Some(m) if !m.is_empty() => self.catalog_for_node(&node.id),
                    _ => Catalog::default(),
                };
                let fields = form
                    .field_schema
                    .properties
                    .keys()
                    .map(|key| FieldView {
                        key: key.clone(),
                        mapping_label: mapping
                            .and_then(|m| m.get(key))
                            .map(|selection| catalog.label(key, selection)),
                    })
                    .collect();
                FormView {
                    node_id: node.id.clone(),
                    node_name: node.display_name().to_string(),
                    form_id: form.id.clone(),
                    fields,
                }
            })
            .collect()
    }
}
