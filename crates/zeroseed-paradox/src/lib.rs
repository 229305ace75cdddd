//! Paraconsistent contradiction management
//!
//! Contradictions are first-class, not failures: two claims may stand
//! in open dispute while the rest of the graph keeps functioning. This
//! crate bounds where those disputes may live (constitutional
//! partitioning), reports their weight ([`ExplosionReport`]), evaluates
//! three-valued truth over contested nodes ([`TruthValue`]), and drives
//! resolution through synthesis, with every resolution witnessed in
//! the audit trail.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod explosion;
mod manager;
mod truth;

pub use error::ParadoxError;
pub use explosion::ExplosionReport;
pub use manager::{ContradictionManager, Resolution};
pub use truth::TruthValue;
