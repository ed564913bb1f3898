use crate::graph::Graph;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// Immediate predecessors of every node, built once per resolution.
///
/// Edges whose endpoints are not nodes of the graph are dropped here, so the
/// traversal never walks through dangling references. Duplicate edges between
/// the same pair collapse to a single predecessor.
pub(super) struct PredecessorIndex<'a> {
    predecessors: AHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> PredecessorIndex<'a> {
    pub(super) fn new(graph: &'a Graph) -> Self {
        let known: AHashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

        let mut predecessors: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for (source, target) in graph
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .filter(|(source, target)| known.contains(source) && known.contains(target))
            .unique()
        {
            predecessors.entry(target).or_default().push(source);
        }

        Self { predecessors }
    }

    pub(super) fn of(&self, node_id: &str) -> &[&'a str] {
        self.predecessors
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// The result of walking predecessor edges from a target node.
#[derive(Debug, Default)]
pub(super) struct Upstream<'a> {
    pub direct: Vec<&'a str>,
    pub indirect: Vec<&'a str>,
    pub rounds: usize,
}

/// Collects direct predecessors of `target`, then expands breadth-first from that
/// frontier for at most `max_depth` rounds.
///
/// Every node is recorded once, on first discovery, and never re-expanded. The
/// target itself is never reported as its own upstream.
pub(super) fn walk_upstream<'a>(
    index: &PredecessorIndex<'a>,
    target: &'a str,
    max_depth: usize,
) -> Upstream<'a> {
    let mut visited: AHashSet<&str> = AHashSet::new();
    visited.insert(target);

    let direct: Vec<&str> = index
        .of(target)
        .iter()
        .copied()
        .filter(|id| visited.insert(*id))
        .collect();

    let mut indirect = Vec::new();
    let mut frontier = direct.clone();
    let mut rounds = 0;

    while !frontier.is_empty() && rounds < max_depth {
        let mut next = Vec::new();
        for node_id in &frontier {
            for &pred in index.of(node_id) {
                if visited.insert(pred) {
                    next.push(pred);
                }
            }
        }
        indirect.extend(next.iter().copied());
        frontier = next;
        rounds += 1;
    }

    Upstream {
        direct,
        indirect,
        rounds,
    }
}
