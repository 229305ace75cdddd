//! Zero Seed Domain Layer
//!
//! This crate contains the core data model for the witnessed knowledge
//! graph. It defines the fundamental value objects and the trait
//! interfaces that all other layers depend upon; component logic and
//! persistence live in other crates.
//!
//! ## Key Concepts
//!
//! - **ZeroNode**: A statement placed on an epistemic layer (1-7); from
//!   layer 3 upward it must carry a Toulmin proof
//! - **ZeroEdge**: A typed, directed relation (supports, contradicts,
//!   synthesizes, derives, references)
//! - **Proof**: Toulmin justification (data, warrant, claim, backing,
//!   qualifier, rebuttals, evidence tier)
//! - **Mark**: The immutable audit record of one mutation; **BatchMark**
//!   aggregates buffered Marks losslessly
//! - **Partition**: Constitutional grouping that bounds which nodes may
//!   contradict each other
//!
//! ## Architecture
//!
//! - Pure data and pure functions only
//! - No async, no I/O, no component logic
//! - Persisted shapes derive serde; they are the storage contract
//! - Trait definitions for the judgment and identity seams

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod edge;
pub mod id;
pub mod mark;
pub mod node;
pub mod partition;
pub mod proof;
pub mod traits;

// Re-exports for convenience
pub use confidence::ConfidenceInterval;
pub use edge::{EdgeKind, ZeroEdge};
pub use id::{BatchId, EdgeId, MarkId, NodeId};
pub use mark::{BatchMark, Mark, UmweltSnapshot};
pub use node::{Layer, NodeDelta, NodeKind, ZeroNode};
pub use partition::{Partition, PartitionMap, DEFAULT_PARTITION_THRESHOLD};
pub use proof::{EvidenceTier, Proof, Qualifier};
pub use traits::{ConstitutionScore, ConstitutionScorer, Observer};

/// Current wall-clock time as Unix milliseconds
pub fn current_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
