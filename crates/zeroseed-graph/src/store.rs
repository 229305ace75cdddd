//! In-memory node and edge tables with structural enforcement

use crate::error::GraphError;
use std::collections::{BTreeMap, HashSet};
use zeroseed_domain::{
    EdgeId, EdgeKind, NodeDelta, NodeId, NodeKind, PartitionMap, ZeroEdge, ZeroNode,
};

/// The graph's node and edge tables
///
/// The store is deliberately dumb about content: nodes are upserted
/// without validation, and the only rules it enforces are structural
/// ones: endpoints must exist, edge keys must be unique, and a
/// contradicts edge may not span constitutional partitions. Everything semantic
/// (proof validity, truth values, resolution preconditions) lives with
/// the components that own those judgments.
///
/// Tables are keyed by UUIDv7 ids, so iteration order is creation
/// order.
///
/// # Thread Safety
///
/// The store is plain owned data. Callers that share one across tasks
/// wrap it in a lock; mutation methods take `&mut self`.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: BTreeMap<NodeId, ZeroNode>,
    edges: BTreeMap<EdgeId, ZeroEdge>,
    edge_keys: HashSet<(NodeId, NodeId, EdgeKind)>,
}

impl GraphStore {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node, without validation
    ///
    /// The store is total for node content: an unjustified node is
    /// accepted here and flagged by the validator, never rejected.
    pub fn insert_node(&mut self, node: ZeroNode) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Get a node by id
    pub fn get_node(&self, id: NodeId) -> Option<&ZeroNode> {
        self.nodes.get(&id)
    }

    /// Get an edge by id
    pub fn get_edge(&self, id: EdgeId) -> Option<&ZeroEdge> {
        self.edges.get(&id)
    }

    /// Whether an edge with this source, target, and kind exists
    pub fn has_edge(&self, source: NodeId, target: NodeId, kind: EdgeKind) -> bool {
        self.edge_keys.contains(&(source, target, kind))
    }

    /// Add an edge, enforcing the structural rules
    ///
    /// Fails with [`GraphError::MissingEndpoint`] when either endpoint
    /// is absent, [`GraphError::DuplicateEdge`] when an edge with the
    /// same source, target, and kind exists, and
    /// [`GraphError::InvalidContradictionEdge`] when a contradicts edge
    /// spans partitions. The partition map is supplied by the caller so
    /// the map validated against is exactly the map the caller computed
    /// for this mutation.
    pub fn add_edge(
        &mut self,
        edge: ZeroEdge,
        partitions: &PartitionMap,
    ) -> Result<EdgeId, GraphError> {
        if !self.nodes.contains_key(&edge.source) {
            return Err(GraphError::MissingEndpoint(edge.source));
        }
        if !self.nodes.contains_key(&edge.target) {
            return Err(GraphError::MissingEndpoint(edge.target));
        }
        if self.edge_keys.contains(&edge.key()) {
            return Err(GraphError::DuplicateEdge {
                source: edge.source,
                target: edge.target,
                kind: edge.kind,
            });
        }
        if edge.kind.is_adversarial() && !partitions.same_partition(edge.source, edge.target) {
            return Err(GraphError::InvalidContradictionEdge {
                source: edge.source,
                source_partition: partitions.partition_of(edge.source),
                target: edge.target,
                target_partition: partitions.partition_of(edge.target),
            });
        }

        let id = edge.id;
        self.edge_keys.insert(edge.key());
        self.edges.insert(id, edge);
        Ok(id)
    }

    /// Mark an edge resolved by the given node
    ///
    /// A dumb field update: sets `is_resolved` and `resolution` and
    /// returns the updated copy. Whether the edge *should* be resolved
    /// (kind, prior state) is the contradiction manager's judgment, not
    /// the store's.
    pub fn set_edge_resolution(
        &mut self,
        id: EdgeId,
        resolution: NodeId,
    ) -> Result<ZeroEdge, GraphError> {
        let edge = self.edges.get_mut(&id).ok_or(GraphError::UnknownEdge(id))?;
        edge.is_resolved = true;
        edge.resolution = Some(resolution);
        Ok(edge.clone())
    }

    /// Edges leaving a node, optionally filtered by kind
    pub fn edges_from(&self, id: NodeId, kind: Option<EdgeKind>) -> Vec<&ZeroEdge> {
        self.edges
            .values()
            .filter(|e| e.source == id && kind.map_or(true, |k| e.kind == k))
            .collect()
    }

    /// Edges arriving at a node, optionally filtered by kind
    pub fn edges_to(&self, id: NodeId, kind: Option<EdgeKind>) -> Vec<&ZeroEdge> {
        self.edges
            .values()
            .filter(|e| e.target == id && kind.map_or(true, |k| e.kind == k))
            .collect()
    }

    /// Edges touching a node at either end, optionally filtered by kind
    ///
    /// A self-loop is reported once.
    pub fn edges_touching(&self, id: NodeId, kind: Option<EdgeKind>) -> Vec<&ZeroEdge> {
        self.edges
            .values()
            .filter(|e| e.touches(id) && kind.map_or(true, |k| e.kind == k))
            .collect()
    }

    /// All edges of a given kind
    pub fn edges_of_kind(&self, kind: EdgeKind) -> Vec<&ZeroEdge> {
        self.edges.values().filter(|e| e.kind == kind).collect()
    }

    /// All nodes of a given kind
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&ZeroNode> {
        self.nodes.values().filter(|n| n.kind == kind).collect()
    }

    /// Iterate over all nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &ZeroNode> {
        self.nodes.values()
    }

    /// Iterate over all edges in creation order
    pub fn edges(&self) -> impl Iterator<Item = &ZeroEdge> {
        self.edges.values()
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Apply a delta to a node, producing the new version
    ///
    /// Pure: the store is untouched, and the caller decides whether to
    /// persist the result via [`GraphStore::insert_node`].
    pub fn modify_node(node: &ZeroNode, delta: &NodeDelta) -> ZeroNode {
        delta.apply(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeroseed_domain::{Layer, NodeKind, Partition};

    fn node(layer: u8) -> ZeroNode {
        ZeroNode::new(
            Layer::new(layer).unwrap(),
            NodeKind::Claim,
            "title",
            "body",
        )
    }

    #[test]
    fn test_insert_is_upsert() {
        let mut graph = GraphStore::new();
        let original = node(4);
        let id = graph.insert_node(original.clone());

        let mut replacement = original.clone();
        replacement.title = "replaced".to_string();
        graph.insert_node(replacement);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.get_node(id).unwrap().title, "replaced");
    }

    #[test]
    fn test_add_edge_requires_endpoints() {
        let mut graph = GraphStore::new();
        let a = graph.insert_node(node(3));
        let ghost = NodeId::new();

        let err = graph
            .add_edge(
                ZeroEdge::new(a, ghost, EdgeKind::Supports),
                &PartitionMap::default(),
            )
            .unwrap_err();
        assert_eq!(err, GraphError::MissingEndpoint(ghost));
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut graph = GraphStore::new();
        let a = graph.insert_node(node(3));
        let b = graph.insert_node(node(4));
        let partitions = PartitionMap::default();

        graph
            .add_edge(ZeroEdge::new(a, b, EdgeKind::Supports), &partitions)
            .unwrap();

        let err = graph
            .add_edge(ZeroEdge::new(a, b, EdgeKind::Supports), &partitions)
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateEdge { .. }));

        // Same endpoints, different kind, is a different edge
        graph
            .add_edge(ZeroEdge::new(a, b, EdgeKind::References), &partitions)
            .unwrap();
        assert_eq!(graph.edge_count(), 2);

        assert!(graph.has_edge(a, b, EdgeKind::Supports));
        assert!(!graph.has_edge(b, a, EdgeKind::Supports));
        assert!(!graph.has_edge(a, b, EdgeKind::Derives));
    }

    #[test]
    fn test_contradiction_must_stay_within_partition() {
        let mut graph = GraphStore::new();
        let a = graph.insert_node(node(4));
        let b = graph.insert_node(node(4));

        let mut partitions = PartitionMap::default();
        partitions.assign(a, 0.9); // dominant
        partitions.assign(b, 0.1); // recessive

        let err = graph
            .add_edge(ZeroEdge::new(a, b, EdgeKind::Contradicts), &partitions)
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidContradictionEdge {
                source: a,
                source_partition: Partition::Dominant,
                target: b,
                target_partition: Partition::Recessive,
            }
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_contradiction_within_partition_allowed() {
        let mut graph = GraphStore::new();
        let a = graph.insert_node(node(4));
        let b = graph.insert_node(node(4));

        let mut partitions = PartitionMap::default();
        partitions.assign(a, 0.8);
        partitions.assign(b, 0.7);

        let id = graph
            .add_edge(ZeroEdge::new(a, b, EdgeKind::Contradicts), &partitions)
            .unwrap();
        assert!(graph.get_edge(id).unwrap().is_open_contradiction());
    }

    #[test]
    fn test_non_adversarial_edges_ignore_partitions() {
        let mut graph = GraphStore::new();
        let a = graph.insert_node(node(4));
        let b = graph.insert_node(node(4));

        let mut partitions = PartitionMap::default();
        partitions.assign(a, 0.9);
        partitions.assign(b, 0.1);

        // Supports across partitions is fine
        graph
            .add_edge(ZeroEdge::new(a, b, EdgeKind::Supports), &partitions)
            .unwrap();
    }

    #[test]
    fn test_set_edge_resolution() {
        let mut graph = GraphStore::new();
        let a = graph.insert_node(node(4));
        let b = graph.insert_node(node(4));
        let resolution = graph.insert_node(node(5));

        let id = graph
            .add_edge(
                ZeroEdge::new(a, b, EdgeKind::Contradicts),
                &PartitionMap::default(),
            )
            .unwrap();

        let updated = graph.set_edge_resolution(id, resolution).unwrap();
        assert!(updated.is_resolved);
        assert_eq!(updated.resolution, Some(resolution));
        assert!(!graph.get_edge(id).unwrap().is_open_contradiction());

        let missing = graph.set_edge_resolution(EdgeId::new(), resolution);
        assert!(matches!(missing, Err(GraphError::UnknownEdge(_))));
    }

    #[test]
    fn test_directional_queries() {
        let mut graph = GraphStore::new();
        let a = graph.insert_node(node(3));
        let b = graph.insert_node(node(4));
        let c = graph.insert_node(node(5));
        let partitions = PartitionMap::default();

        graph
            .add_edge(ZeroEdge::new(a, b, EdgeKind::Supports), &partitions)
            .unwrap();
        graph
            .add_edge(ZeroEdge::new(a, c, EdgeKind::Derives), &partitions)
            .unwrap();
        graph
            .add_edge(ZeroEdge::new(c, b, EdgeKind::Supports), &partitions)
            .unwrap();

        assert_eq!(graph.edges_from(a, None).len(), 2);
        assert_eq!(graph.edges_from(a, Some(EdgeKind::Supports)).len(), 1);
        assert_eq!(graph.edges_to(b, None).len(), 2);
        assert_eq!(graph.edges_to(b, Some(EdgeKind::Derives)).len(), 0);
        assert_eq!(graph.edges_of_kind(EdgeKind::Supports).len(), 2);
        assert_eq!(graph.edges_touching(c, None).len(), 2);
    }

    #[test]
    fn test_self_loop_reported_once() {
        let mut graph = GraphStore::new();
        let a = graph.insert_node(node(4));

        graph
            .add_edge(
                ZeroEdge::new(a, a, EdgeKind::References),
                &PartitionMap::default(),
            )
            .unwrap();

        assert_eq!(graph.edges_touching(a, None).len(), 1);
    }

    #[test]
    fn test_modify_node_is_pure() {
        let mut graph = GraphStore::new();
        let original = node(4);
        let id = graph.insert_node(original.clone());

        let delta = NodeDelta::default().set_title("new title");
        let updated = GraphStore::modify_node(graph.get_node(id).unwrap(), &delta);

        // Store still holds the old version until the caller persists
        assert_eq!(graph.get_node(id).unwrap().title, "title");

        graph.insert_node(updated);
        assert_eq!(graph.get_node(id).unwrap().title, "new title");
    }

    #[test]
    fn test_nodes_of_kind() {
        let mut graph = GraphStore::new();
        graph.insert_node(ZeroNode::new(
            Layer::new(1).unwrap(),
            NodeKind::Axiom,
            "a",
            "b",
        ));
        graph.insert_node(node(4));
        graph.insert_node(node(4));

        assert_eq!(graph.nodes_of_kind(NodeKind::Axiom).len(), 1);
        assert_eq!(graph.nodes_of_kind(NodeKind::Claim).len(), 2);
        assert_eq!(graph.nodes_of_kind(NodeKind::Decision).len(), 0);
    }
}
