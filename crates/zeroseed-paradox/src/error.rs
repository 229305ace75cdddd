//! Error types for contradiction management

use thiserror::Error;
use zeroseed_domain::{EdgeId, EdgeKind};
use zeroseed_graph::GraphError;
use zeroseed_witness::WitnessError;

/// Errors from contradiction operations
#[derive(Error, Debug)]
pub enum ParadoxError {
    /// Resolution was attempted on an edge of the wrong kind
    #[error("Edge {edge} is a {kind} edge, not a contradiction")]
    NotAContradiction {
        /// The edge that was targeted
        edge: EdgeId,
        /// Its actual kind
        kind: EdgeKind,
    },

    /// Resolution was attempted on an already-resolved contradiction
    #[error("Contradiction {edge} is already resolved")]
    AlreadyResolved {
        /// The edge that was targeted
        edge: EdgeId,
    },

    /// A structural rule in the graph store rejected the operation
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// The witness pipeline failed to record the operation
    #[error("Witness error: {0}")]
    Witness(#[from] WitnessError),
}
