//! Facade tying the graph, proof validation, witnessing, and
//! contradiction handling into one mutation pipeline
//!
//! Every write goes through the same sequence: judge the node's
//! justification, persist it to the archive, update the in-memory
//! graph, then witness a mark describing what happened. Receipts
//! carry the justification verdict and the witness outcome back to
//! the caller; a missing or failing proof flags the commit without
//! blocking it.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod engine;
mod error;
mod observer;
mod receipt;

pub use config::EngineConfig;
pub use engine::SeedEngine;
pub use error::EngineError;
pub use observer::SystemObserver;
pub use receipt::{CommitReceipt, EdgeReceipt, Justification};
