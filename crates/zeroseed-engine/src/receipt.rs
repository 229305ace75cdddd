//! Receipts returned by committed mutations

use zeroseed_domain::{ZeroEdge, ZeroNode};
use zeroseed_toulmin::ProofReport;
use zeroseed_witness::WitnessOutcome;

/// How a node's justification stood at commit time
///
/// Justification never blocks a commit; it rides in the receipt so the
/// caller can decide whether an unjustified node is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub enum Justification {
    /// The node's layer does not demand a proof and none was given
    NotRequired,
    /// The layer demands a proof and the node has none
    Missing,
    /// A proof was present and judged
    Validated(ProofReport),
}

impl Justification {
    /// Whether the node may be treated as authoritative
    ///
    /// False for a missing proof or a proof with structural errors.
    pub fn is_authoritative(&self) -> bool {
        match self {
            Justification::NotRequired => true,
            Justification::Missing => false,
            Justification::Validated(report) => report.is_valid,
        }
    }

    /// The validation report, when a proof was judged
    pub fn report(&self) -> Option<&ProofReport> {
        match self {
            Justification::Validated(report) => Some(report),
            _ => None,
        }
    }
}

/// Result of committing a node creation or modification
#[derive(Debug, Clone)]
pub struct CommitReceipt {
    /// The node as committed
    pub node: ZeroNode,
    /// How its justification stood
    pub justification: Justification,
    /// How the witness pipeline handled the mutation's mark
    pub witness: WitnessOutcome,
}

/// Result of committing a new edge
#[derive(Debug, Clone)]
pub struct EdgeReceipt {
    /// The edge as committed
    pub edge: ZeroEdge,
    /// How the witness pipeline handled the mutation's mark
    pub witness: WitnessOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeroseed_toulmin::CoherenceBreakdown;

    fn report(is_valid: bool) -> ProofReport {
        let breakdown = CoherenceBreakdown {
            data_richness: 1.0,
            warrant_presence: 1.0,
            backing_support: 0.5,
            qualifier_weight: 0.8,
            rebuttal_coverage: 1.0,
        };
        ProofReport {
            is_valid,
            coherence: breakdown.mean(),
            issues: Vec::new(),
            breakdown,
        }
    }

    #[test]
    fn test_authoritativeness() {
        assert!(Justification::NotRequired.is_authoritative());
        assert!(!Justification::Missing.is_authoritative());
        assert!(Justification::Validated(report(true)).is_authoritative());
        assert!(!Justification::Validated(report(false)).is_authoritative());
    }

    #[test]
    fn test_report_access() {
        assert!(Justification::NotRequired.report().is_none());
        assert!(Justification::Missing.report().is_none());

        let validated = Justification::Validated(report(true));
        assert!(validated.report().unwrap().is_valid);
    }
}
