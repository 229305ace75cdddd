//! Graph store error types

use std::fmt;
use zeroseed_domain::{EdgeId, EdgeKind, NodeId, Partition};

/// Structural violations rejected by the graph store
///
/// Each variant carries enough context to act on the rejection without
/// re-querying the store.
///
/// `Display` and `Error` are implemented by hand: the `source` fields
/// here are edge endpoints, and a derived `Error` impl would treat any
/// field with that name as an error-chain source.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge with the same source, target, and kind already exists
    DuplicateEdge {
        /// Source endpoint of the rejected edge
        source: NodeId,
        /// Target endpoint of the rejected edge
        target: NodeId,
        /// Kind of the rejected edge
        kind: EdgeKind,
    },

    /// A contradicts edge tried to span constitutional partitions
    InvalidContradictionEdge {
        /// Source endpoint of the rejected edge
        source: NodeId,
        /// Partition the source falls in
        source_partition: Partition,
        /// Target endpoint of the rejected edge
        target: NodeId,
        /// Partition the target falls in
        target_partition: Partition,
    },

    /// An edge referenced a node the store does not hold
    MissingEndpoint(NodeId),

    /// A lookup referenced a node the store does not hold
    UnknownNode(NodeId),

    /// A lookup referenced an edge the store does not hold
    UnknownEdge(EdgeId),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateEdge {
                source,
                target,
                kind,
            } => write!(
                f,
                "Duplicate edge: {kind} from {source} to {target} already exists"
            ),
            GraphError::InvalidContradictionEdge {
                source,
                source_partition,
                target,
                target_partition,
            } => write!(
                f,
                "Contradiction spans partitions: {source} is {source_partition}, \
                 {target} is {target_partition}"
            ),
            GraphError::MissingEndpoint(id) => {
                write!(f, "Edge endpoint missing from graph: {id}")
            }
            GraphError::UnknownNode(id) => write!(f, "Unknown node: {id}"),
            GraphError::UnknownEdge(id) => write!(f, "Unknown edge: {id}"),
        }
    }
}

impl std::error::Error for GraphError {}
