//! Explosion health metric

use std::collections::HashSet;
use zeroseed_domain::{EdgeId, EdgeKind, NodeId};
use zeroseed_graph::GraphStore;

/// Read-only snapshot of the graph's contradiction load
///
/// `explosion_risk` is the fraction of nodes touched by a contradicts
/// edge. `suspect_edges` lists non-contradicts edges leaving a
/// contradicting node; they signal places where a contradiction could
/// propagate, but nothing is blocked on their account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplosionReport {
    /// Number of contradicts edges in the graph
    pub contradiction_count: usize,
    /// Nodes untouched by any contradicts edge
    pub clean_count: usize,
    /// Nodes touched by at least one contradicts edge
    pub contradicting_count: usize,
    /// `contradicting_count / total_nodes`, 0.0 for an empty graph
    pub explosion_risk: f64,
    /// Non-contradicts edges that originate from a contradicting node
    pub suspect_edges: Vec<EdgeId>,
}

impl ExplosionReport {
    /// Compute the metric over the current graph state
    pub fn compute(graph: &GraphStore) -> Self {
        let contradiction_edges = graph.edges_of_kind(EdgeKind::Contradicts);
        let mut contradicting: HashSet<NodeId> = HashSet::new();
        for edge in &contradiction_edges {
            contradicting.insert(edge.source);
            contradicting.insert(edge.target);
        }

        let total = graph.node_count();
        let contradicting_count = contradicting.len();
        let explosion_risk = if total == 0 {
            0.0
        } else {
            contradicting_count as f64 / total as f64
        };

        let suspect_edges: Vec<EdgeId> = graph
            .edges()
            .filter(|e| e.kind != EdgeKind::Contradicts && contradicting.contains(&e.source))
            .map(|e| e.id)
            .collect();

        Self {
            contradiction_count: contradiction_edges.len(),
            clean_count: total - contradicting_count,
            contradicting_count,
            explosion_risk,
            suspect_edges,
        }
    }

    /// Human-readable summary of the metric
    pub fn summary(&self) -> String {
        format!(
            "Explosion: {} contradictions touching {} nodes ({} clean, risk {:.2}), {} suspect edges",
            self.contradiction_count,
            self.contradicting_count,
            self.clean_count,
            self.explosion_risk,
            self.suspect_edges.len()
        )
    }
}
