//! The mutation pipeline facade

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use zeroseed_domain::{
    BatchMark, ConstitutionScorer, EdgeId, EdgeKind, Mark, NodeDelta, NodeId, Observer,
    PartitionMap, ZeroEdge, ZeroNode,
};
use zeroseed_graph::{GraphError, GraphStore};
use zeroseed_paradox::{ContradictionManager, ExplosionReport, Resolution, TruthValue};
use zeroseed_toulmin::ProofValidator;
use zeroseed_witness::{Archive, WitnessBatcher, WitnessMetrics, WitnessWorker};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::receipt::{CommitReceipt, EdgeReceipt, Justification};

/// One graph, one validator, one witness pipeline, one resolution judge
///
/// Every mutation follows the same path: apply the change, judge its
/// justification, persist the node through the archive, then witness a
/// mark. Justification findings never block a commit; they ride in the
/// receipt. Edges are made durable by embedding their serialized form
/// in the mark that witnessed them.
///
/// All methods take `&self`; an internal `RwLock` serializes graph
/// mutations, and the batcher serializes witness traffic, so one
/// engine instance may be shared across tasks behind an `Arc`.
pub struct SeedEngine<A: Archive> {
    config: EngineConfig,
    graph: RwLock<GraphStore>,
    validator: ProofValidator,
    batcher: Arc<WitnessBatcher<A>>,
    manager: ContradictionManager<A>,
    observer: Box<dyn Observer + Send + Sync>,
    archive: Arc<A>,
    worker_cancel: CancellationToken,
    worker_handle: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Archive + 'static> SeedEngine<A> {
    /// Create an engine over the given archive
    pub fn new(
        archive: Arc<A>,
        config: EngineConfig,
        scorer: impl ConstitutionScorer + Send + Sync + 'static,
        observer: impl Observer + Send + Sync + 'static,
    ) -> Self {
        let batcher = Arc::new(WitnessBatcher::new(archive.clone(), config.witness.clone()));
        let manager = ContradictionManager::new(scorer, batcher.clone())
            .with_threshold(config.partition_threshold);

        Self {
            config,
            graph: RwLock::new(GraphStore::new()),
            validator: ProofValidator::default_config(),
            batcher,
            manager,
            observer: Box::new(observer),
            archive,
            worker_cancel: CancellationToken::new(),
            worker_handle: Mutex::new(None),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Commit a new node
    ///
    /// The node is persisted and inserted whatever its justification
    /// says; the receipt carries the verdict.
    pub async fn create_node(&self, node: ZeroNode) -> Result<CommitReceipt, EngineError> {
        let justification = self.justify(&node);

        self.archive
            .save_node(&node)
            .await
            .map_err(|e| EngineError::Storage(e.to_string()))?;
        self.graph.write().await.insert_node(node.clone());

        let stimulus = format!(
            "create {} \"{}\" at layer {}",
            node.kind, node.title, node.layer
        );
        let response = format!("node {} created", node.id);
        let mark = self.mark_for(&node, stimulus, response, "create");
        let witness = self.batcher.witness(mark).await?;

        tracing::debug!(
            node = %node.id,
            authoritative = justification.is_authoritative(),
            "node committed"
        );
        Ok(CommitReceipt {
            node,
            justification,
            witness,
        })
    }

    /// Apply a delta to an existing node and commit the new version
    pub async fn modify_node(
        &self,
        id: NodeId,
        delta: &NodeDelta,
    ) -> Result<CommitReceipt, EngineError> {
        // Write lock held across persistence: no interleaved
        // read-modify-write on the same node
        let mut graph = self.graph.write().await;
        let current = graph
            .get_node(id)
            .cloned()
            .ok_or(GraphError::UnknownNode(id))?;
        let updated = GraphStore::modify_node(&current, delta);
        let justification = self.justify(&updated);

        self.archive
            .save_node(&updated)
            .await
            .map_err(|e| EngineError::Storage(e.to_string()))?;
        graph.insert_node(updated.clone());
        drop(graph);

        let stimulus = format!("delta: {}", delta.summary());
        let response = format!("node {} modified", id);
        let mark = self.mark_for(&updated, stimulus, response, "modify");
        let witness = self.batcher.witness(mark).await?;

        Ok(CommitReceipt {
            node: updated,
            justification,
            witness,
        })
    }

    /// Commit a new edge between two nodes
    ///
    /// The partition map is computed fresh and validated against in
    /// the same exclusive section, so contradicts edges cannot slip
    /// past a score change. The mark's stimulus carries the serialized
    /// edge; the audit trail is what makes edges durable.
    pub async fn connect(
        &self,
        source: NodeId,
        target: NodeId,
        kind: EdgeKind,
        context: impl Into<String>,
    ) -> Result<EdgeReceipt, EngineError> {
        let mut graph = self.graph.write().await;
        let partitions = self.manager.partition_by_constitution(graph.nodes());
        let edge = ZeroEdge::new(source, target, kind).with_context(context);
        let stored = edge.clone();
        graph.add_edge(edge, &partitions)?;
        drop(graph);

        let stimulus = serde_json::to_string(&stored)?;
        let response = format!("{} edge {} -> {}", stored.kind, stored.source, stored.target);
        let mut mark = Mark::new(
            self.observer.origin(),
            stimulus,
            response,
            self.observer.umwelt_snapshot(),
        )
        .with_link(stored.source)
        .with_tag("connect");
        if stored.target != stored.source {
            mark = mark.with_link(stored.target);
        }
        let witness = self.batcher.witness(mark).await?;

        tracing::debug!(edge = %stored.id, kind = %stored.kind, "edge committed");
        Ok(EdgeReceipt {
            edge: stored,
            witness,
        })
    }

    /// Resolve a contradiction through a synthesis node
    pub async fn resolve_contradiction(
        &self,
        edge: EdgeId,
        resolution: NodeId,
    ) -> Result<Resolution, EngineError> {
        let mut graph = self.graph.write().await;
        let result = self
            .manager
            .resolve_contradiction(
                &mut graph,
                edge,
                resolution,
                &self.observer.origin(),
                self.observer.umwelt_snapshot(),
            )
            .await?;
        Ok(result)
    }

    /// Evaluate a node's three-valued truth
    pub async fn truth_of(&self, node: NodeId) -> Result<TruthValue, EngineError> {
        let graph = self.graph.read().await;
        Ok(self.manager.truth_value(&graph, node)?)
    }

    /// Compute the explosion health metric
    pub async fn explosion_report(&self) -> ExplosionReport {
        let graph = self.graph.read().await;
        self.manager.check_explosion(&graph)
    }

    /// Current constitutional partitioning of all nodes
    pub async fn partitions(&self) -> PartitionMap {
        let graph = self.graph.read().await;
        self.manager.partition_by_constitution(graph.nodes())
    }

    /// Get a node by id
    pub async fn get_node(&self, id: NodeId) -> Option<ZeroNode> {
        self.graph.read().await.get_node(id).cloned()
    }

    /// Get an edge by id
    pub async fn get_edge(&self, id: EdgeId) -> Option<ZeroEdge> {
        self.graph.read().await.get_edge(id).cloned()
    }

    /// Number of nodes in the graph
    pub async fn node_count(&self) -> usize {
        self.graph.read().await.node_count()
    }

    /// Number of edges in the graph
    pub async fn edge_count(&self) -> usize {
        self.graph.read().await.edge_count()
    }

    /// Flush buffered marks now
    pub async fn force_flush(&self) -> Result<Option<BatchMark>, EngineError> {
        Ok(self.batcher.force_flush().await?)
    }

    /// Number of marks waiting in the witness buffer
    pub async fn pending_marks(&self) -> usize {
        self.batcher.pending_count().await
    }

    /// Snapshot of witness activity counters
    pub async fn witness_metrics(&self) -> WitnessMetrics {
        self.batcher.metrics().await
    }

    /// Start the background flush worker
    ///
    /// Idempotent: a second call while the worker runs does nothing.
    pub async fn spawn_worker(&self) {
        let mut handle = self.worker_handle.lock().await;
        if handle.is_some() {
            tracing::debug!("witness worker already running");
            return;
        }
        let worker = WitnessWorker::new(
            self.batcher.clone(),
            self.config.witness.flush_interval(),
            self.worker_cancel.clone(),
        );
        *handle = Some(tokio::spawn(worker.run()));
        tracing::info!("witness worker spawned");
    }

    /// Stop the worker and drain the witness buffer
    ///
    /// Safe to call more than once; later calls find nothing to drain.
    pub async fn shutdown(&self) -> Result<Option<BatchMark>, EngineError> {
        self.worker_cancel.cancel();
        if let Some(handle) = self.worker_handle.lock().await.take() {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "witness worker task failed");
            }
        }

        // The worker drains on cancellation; this catches marks that
        // arrived after its final flush, and the no-worker case
        let drained = self.batcher.force_flush().await?;
        let metrics = self.batcher.metrics().await;
        tracing::info!(summary = %metrics.summary(), "engine shut down");
        Ok(drained)
    }

    fn justify(&self, node: &ZeroNode) -> Justification {
        match &node.proof {
            Some(proof) => Justification::Validated(self.validator.validate(proof, node)),
            None if node.requires_proof() => Justification::Missing,
            None => Justification::NotRequired,
        }
    }

    fn mark_for(&self, node: &ZeroNode, stimulus: String, response: String, tag: &str) -> Mark {
        let mut mark = Mark::new(
            self.observer.origin(),
            stimulus,
            response,
            self.observer.umwelt_snapshot(),
        )
        .with_link(node.id)
        .with_tag(tag);
        if let Some(proof) = node.proof.clone() {
            mark = mark.with_proof(proof);
        }
        mark
    }
}
