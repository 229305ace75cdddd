//! Zero Seed Toulmin Validator
//!
//! Judges the structure and coherence of Toulmin proofs before nodes
//! carrying them are treated as justified.
//!
//! The validator provides:
//! - Structural checks (mandatory fields, qualifier/rebuttal conflicts)
//! - Evidence tier appropriateness per layer
//! - Coherence scoring with a per-dimension breakdown
//!
//! Validation is total: every outcome, including a hopeless proof, is
//! data in a [`ProofReport`], never an error.
//!
//! # Examples
//!
//! ```
//! use zeroseed_toulmin::{ProofValidator, ValidatorConfig};
//! use zeroseed_domain::{EvidenceTier, Layer, NodeKind, Proof, Qualifier, ZeroNode};
//!
//! let validator = ProofValidator::new(ValidatorConfig::default());
//! let node = ZeroNode::new(Layer::new(4).unwrap(), NodeKind::Claim, "t", "b");
//! let proof = Proof::new("evidence", "warrant", "claim",
//!     Qualifier::Possibly, EvidenceTier::Empirical);
//!
//! let report = validator.validate(&proof, &node);
//! assert!(report.is_valid);
//! ```

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidatorConfig;
pub use validator::{
    CoherenceBreakdown, ProofReport, ProofValidator, Severity, ValidationIssue,
};
