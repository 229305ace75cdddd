//! Error types for the engine facade

use thiserror::Error;
use zeroseed_graph::GraphError;
use zeroseed_paradox::ParadoxError;
use zeroseed_witness::WitnessError;

/// Errors from engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// The persistence backend rejected a save
    #[error("Storage error: {0}")]
    Storage(String),

    /// A persisted shape failed to serialize
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A structural rule in the graph store rejected the operation
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// The witness pipeline failed
    #[error("Witness error: {0}")]
    Witness(#[from] WitnessError),

    /// Contradiction management rejected the operation
    #[error("Contradiction error: {0}")]
    Paradox(#[from] ParadoxError),
}
