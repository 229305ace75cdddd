//! Zero Seed Graph Store
//!
//! In-memory node and edge tables for the witnessed knowledge graph.
//! The store enforces structure only: endpoints must exist, edge keys
//! are unique, and contradicts edges may not span constitutional
//! partitions. Content validation, truth evaluation, and persistence
//! belong to other layers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod store;

pub use error::GraphError;
pub use store::GraphStore;
