//! Contradiction lifecycle: truth, partitioning, resolution

use std::sync::Arc;
use zeroseed_domain::{
    ConstitutionScorer, EdgeId, EdgeKind, Mark, NodeId, PartitionMap, UmweltSnapshot, ZeroEdge,
    ZeroNode, DEFAULT_PARTITION_THRESHOLD,
};
use zeroseed_graph::{GraphError, GraphStore};
use zeroseed_witness::{Archive, WitnessBatcher, WitnessOutcome};

use crate::error::ParadoxError;
use crate::explosion::ExplosionReport;
use crate::truth::TruthValue;

/// Everything produced by resolving one contradiction
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The contradiction edge, now resolved
    pub edge: ZeroEdge,
    /// Synthesis edges added, one per distinct endpoint
    pub synthesis_edges: Vec<ZeroEdge>,
    /// The audit record describing the resolution
    pub mark: Mark,
    /// How the witness pipeline handled the mark
    pub witness: WitnessOutcome,
}

/// Judge of where contradictions may live and when they end
///
/// Owns the constitutional scorer and the partition threshold, and
/// routes every resolution through the witness pipeline so the audit
/// trail records who ended which dispute and on what grounds. The
/// graph itself is passed into each call; the manager holds no
/// topology of its own.
pub struct ContradictionManager<A: Archive> {
    scorer: Box<dyn ConstitutionScorer + Send + Sync>,
    threshold: f64,
    batcher: Arc<WitnessBatcher<A>>,
}

impl<A: Archive> ContradictionManager<A> {
    /// Create a manager with the default partition threshold
    pub fn new(
        scorer: impl ConstitutionScorer + Send + Sync + 'static,
        batcher: Arc<WitnessBatcher<A>>,
    ) -> Self {
        Self {
            scorer: Box::new(scorer),
            threshold: DEFAULT_PARTITION_THRESHOLD,
            batcher,
        }
    }

    /// Override the partition threshold (builder style)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// The active partition threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluate a node's three-valued truth
    ///
    /// A node with no contradicts edges is true. A foundational axiom
    /// stays true even while contradicted; the node standing in
    /// unresolved contradiction *with* a foundational axiom is false.
    /// Otherwise: true once every contradiction is resolved, unknown
    /// while any stands open.
    pub fn truth_value(&self, graph: &GraphStore, node: NodeId) -> Result<TruthValue, ParadoxError> {
        let subject = graph
            .get_node(node)
            .ok_or(GraphError::UnknownNode(node))?;
        let contradictions = graph.edges_touching(node, Some(EdgeKind::Contradicts));

        if contradictions.is_empty() {
            return Ok(TruthValue::True);
        }
        if subject.is_foundational_axiom() {
            return Ok(TruthValue::True);
        }

        for edge in &contradictions {
            if edge.is_resolved {
                continue;
            }
            let against_axiom = edge
                .other_endpoint(node)
                .and_then(|id| graph.get_node(id))
                .is_some_and(ZeroNode::is_foundational_axiom);
            if against_axiom {
                return Ok(TruthValue::False);
            }
        }

        if contradictions.iter().all(|e| e.is_resolved) {
            Ok(TruthValue::True)
        } else {
            Ok(TruthValue::Unknown)
        }
    }

    /// Partition nodes by their constitutional scores
    pub fn partition_by_constitution<'a, I>(&self, nodes: I) -> PartitionMap
    where
        I: IntoIterator<Item = &'a ZeroNode>,
    {
        let mut map = PartitionMap::new(self.threshold);
        for node in nodes {
            let score = self.scorer.evaluate(node);
            map.assign(node.id, score.total);
        }
        map
    }

    /// Introduce a contradicts edge under partition enforcement
    ///
    /// Computes a fresh partition map over the whole graph and
    /// validates against it in the same mutable call, so a node's
    /// score cannot shift between validation and commit.
    pub fn add_contradiction(
        &self,
        graph: &mut GraphStore,
        source: NodeId,
        target: NodeId,
        context: impl Into<String>,
    ) -> Result<ZeroEdge, ParadoxError> {
        let partitions = self.partition_by_constitution(graph.nodes());
        let edge = ZeroEdge::new(source, target, EdgeKind::Contradicts).with_context(context);
        let stored = edge.clone();
        graph.add_edge(edge, &partitions)?;

        tracing::info!(edge = %stored.id, source = %source, target = %target, "contradiction recorded");
        Ok(stored)
    }

    /// Compute the explosion health metric
    pub fn check_explosion(&self, graph: &GraphStore) -> ExplosionReport {
        let report = ExplosionReport::compute(graph);
        tracing::debug!(
            risk = report.explosion_risk,
            suspects = report.suspect_edges.len(),
            "explosion check"
        );
        report
    }

    /// Resolve a contradiction through a synthesis node
    ///
    /// Marks the edge resolved, adds a synthesizes edge from each
    /// distinct endpoint to the resolution node, and witnesses a mark
    /// describing the resolution (carrying the resolution node's proof
    /// when it has one). Preconditions are checked before the first
    /// mutation, so a rejected resolution leaves the graph untouched.
    pub async fn resolve_contradiction(
        &self,
        graph: &mut GraphStore,
        edge_id: EdgeId,
        resolution_id: NodeId,
        origin: &str,
        umwelt: UmweltSnapshot,
    ) -> Result<Resolution, ParadoxError> {
        let edge = graph
            .get_edge(edge_id)
            .cloned()
            .ok_or(GraphError::UnknownEdge(edge_id))?;
        if edge.kind != EdgeKind::Contradicts {
            return Err(ParadoxError::NotAContradiction {
                edge: edge_id,
                kind: edge.kind,
            });
        }
        if edge.is_resolved {
            return Err(ParadoxError::AlreadyResolved { edge: edge_id });
        }
        let resolution_node = graph
            .get_node(resolution_id)
            .cloned()
            .ok_or(GraphError::UnknownNode(resolution_id))?;

        let mut endpoints = vec![edge.source];
        if edge.target != edge.source {
            endpoints.push(edge.target);
        }
        for endpoint in &endpoints {
            if graph.has_edge(*endpoint, resolution_id, EdgeKind::Synthesizes) {
                return Err(GraphError::DuplicateEdge {
                    source: *endpoint,
                    target: resolution_id,
                    kind: EdgeKind::Synthesizes,
                }
                .into());
            }
        }

        let resolved = graph.set_edge_resolution(edge_id, resolution_id)?;

        // Synthesis edges are not adversarial, so no partition lookup applies
        let partitions = PartitionMap::default();
        let mut synthesis_edges = Vec::with_capacity(endpoints.len());
        for endpoint in &endpoints {
            let synth = ZeroEdge::new(*endpoint, resolution_id, EdgeKind::Synthesizes)
                .with_context(format!("Resolves contradiction {}", edge_id));
            let stored = synth.clone();
            graph.add_edge(synth, &partitions)?;
            synthesis_edges.push(stored);
        }

        let stimulus = format!("resolve contradiction {} via node {}", edge_id, resolution_id);
        let response = format!(
            "contradiction between {} and {} resolved by {}",
            edge.source, edge.target, resolution_id
        );
        let mut mark = Mark::new(origin, stimulus, response, umwelt);
        for endpoint in &endpoints {
            mark = mark.with_link(*endpoint);
        }
        mark = mark.with_link(resolution_id).with_tag("resolution");
        if let Some(proof) = resolution_node.proof.clone() {
            mark = mark.with_proof(proof);
        }

        let witness = self.batcher.witness(mark.clone()).await?;
        tracing::info!(edge = %edge_id, resolution = %resolution_id, "contradiction resolved");

        Ok(Resolution {
            edge: resolved,
            synthesis_edges,
            mark,
            witness,
        })
    }
}
