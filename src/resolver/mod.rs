use crate::graph::{Graph, GraphNode};
use crate::source::DataSource;
use tracing::debug;

mod traversal;

use traversal::{PredecessorIndex, walk_upstream};

/// Default number of breadth-first expansion rounds past the direct predecessors.
pub const DEFAULT_MAX_DEPTH: usize = 30;

/// Computes the form-backed data sources upstream of a target node.
///
/// Resolution never fails. A target that has no node, no predecessors, or only
/// non-form predecessors yields an empty result.
#[derive(Debug, Clone)]
pub struct Resolver {
    max_depth: usize,
}

pub struct ResolverBuilder {
    max_depth: usize,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Caps the indirect traversal at `max_depth` expansion rounds. Zero limits
    /// the result to direct predecessors.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Resolver {
        Resolver {
            max_depth: self.max_depth,
        }
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        ResolverBuilder::new().build()
    }
}

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolves the upstream sources of the first node backed by `form_id`.
    pub fn resolve(&self, graph: &Graph, form_id: &str) -> Vec<DataSource> {
        match graph.node_for_form(form_id) {
            Some(node) => self.resolve_from(graph, node),
            None => {
                debug!(form_id, "no node references form; nothing upstream");
                Vec::new()
            }
        }
    }

    /// Resolves the upstream sources of the node `node_id`.
    pub fn resolve_for_node(&self, graph: &Graph, node_id: &str) -> Vec<DataSource> {
        match graph.node(node_id) {
            Some(node) => self.resolve_from(graph, node),
            None => {
                debug!(node_id, "unknown node; nothing upstream");
                Vec::new()
            }
        }
    }

    /// Direct sources come first in discovery order, followed by the indirect
    /// sources that are not already present among them.
    fn resolve_from(&self, graph: &Graph, target: &GraphNode) -> Vec<DataSource> {
        let index = PredecessorIndex::new(graph);
        let upstream = walk_upstream(&index, &target.id, self.max_depth);

        let direct = Self::form_sources(graph, &upstream.direct);
        let indirect: Vec<DataSource> = Self::form_sources(graph, &upstream.indirect)
            .into_iter()
            .filter(|source| !direct.iter().any(|d| d.id == source.id))
            .collect();

        debug!(
            target = %target.id,
            direct = direct.len(),
            indirect = indirect.len(),
            rounds = upstream.rounds,
            "resolved upstream data sources"
        );

        let mut sources = direct;
        sources.extend(indirect);
        sources
    }

    fn form_sources(graph: &Graph, node_ids: &[&str]) -> Vec<DataSource> {
        node_ids
            .iter()
            .filter_map(|id| graph.node(id))
            .filter_map(|node| {
                graph
                    .form_of(node)
                    .map(|form| DataSource::from_form_node(node, form))
            })
            .collect()
    }
}

/// Resolves upstream sources for `form_id` with the default depth cap.
pub fn resolve_data_sources(graph: &Graph, form_id: &str) -> Vec<DataSource> {
    Resolver::default().resolve(graph, form_id)
}
