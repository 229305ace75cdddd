//! Proof validation logic

use crate::ValidatorConfig;
use std::fmt;
use zeroseed_domain::{EvidenceTier, Proof, ZeroNode};

/// Result of proof validation
///
/// Validation is total: a hopeless proof produces a report full of
/// issues, never an error. Callers decide what to do with invalid
/// proofs; this component only judges.
#[derive(Debug, Clone, PartialEq)]
pub struct ProofReport {
    /// Whether the proof is structurally sound (no Error-severity issues)
    pub is_valid: bool,

    /// Overall coherence in [0, 1]
    pub coherence: f64,

    /// Everything found worth reporting
    pub issues: Vec<ValidationIssue>,

    /// The sub-scores behind `coherence`
    pub breakdown: CoherenceBreakdown,
}

impl ProofReport {
    /// Issues at Error severity
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
    }

    /// Issues at Warning severity
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
    }
}

/// How serious a validation issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Structural defect; the proof is not valid while it stands
    Error,
    /// Noted weakness; validity is unaffected
    Warning,
}

/// A single finding about a proof
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// The `data` field is empty
    MissingData,

    /// The `warrant` field is empty
    MissingWarrant,

    /// The `claim` field is empty
    MissingClaim,

    /// Qualifier "definitely" carried alongside open rebuttals
    QualifierConflict {
        /// How many rebuttals are on record
        rebuttal_count: usize,
    },

    /// Somatic evidence offered for a structural layer
    WeakEvidence {
        /// Layer of the node being justified
        layer: u8,
        /// The tier that triggered the finding
        tier: EvidenceTier,
    },
}

impl ValidationIssue {
    /// The severity of this issue
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::MissingData
            | ValidationIssue::MissingWarrant
            | ValidationIssue::MissingClaim
            | ValidationIssue::QualifierConflict { .. } => Severity::Error,
            ValidationIssue::WeakEvidence { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingData => write!(f, "proof has no data (evidence)"),
            ValidationIssue::MissingWarrant => write!(f, "proof has no warrant"),
            ValidationIssue::MissingClaim => write!(f, "proof has no claim"),
            ValidationIssue::QualifierConflict { rebuttal_count } => write!(
                f,
                "qualifier 'definitely' is incompatible with {} open rebuttal(s)",
                rebuttal_count
            ),
            ValidationIssue::WeakEvidence { layer, tier } => write!(
                f,
                "{} evidence is weak support for a layer-{} node",
                tier, layer
            ),
        }
    }
}

/// The five sub-scores behind a coherence value
///
/// Exposed so callers can see *why* a proof scored as it did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoherenceBreakdown {
    /// How much evidence the proof carries, against the richness target
    pub data_richness: f64,
    /// Whether a warrant is present at all
    pub warrant_presence: f64,
    /// Backing length against target; neutral 0.5 when absent
    pub backing_support: f64,
    /// The qualifier's fixed weight
    pub qualifier_weight: f64,
    /// Rebuttal coverage; strong qualifiers are expected to list defeaters
    pub rebuttal_coverage: f64,
}

impl CoherenceBreakdown {
    /// Unweighted mean of the five sub-scores
    pub fn mean(&self) -> f64 {
        (self.data_richness
            + self.warrant_presence
            + self.backing_support
            + self.qualifier_weight
            + self.rebuttal_coverage)
            / 5.0
    }
}

/// Validates Toulmin proofs against structural rules and scores coherence
pub struct ProofValidator {
    config: ValidatorConfig,
}

impl ProofValidator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Create a validator with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidatorConfig::default())
    }

    /// Validate a proof offered for a node
    ///
    /// # Arguments
    ///
    /// * `proof` - The proof to judge
    /// * `node` - The node the proof justifies (its layer shapes the rules)
    ///
    /// # Returns
    ///
    /// A report with validity, coherence, and every issue found. This
    /// operation never fails.
    pub fn validate(&self, proof: &Proof, node: &ZeroNode) -> ProofReport {
        let mut issues = Vec::new();

        // 1. Mandatory Toulmin fields
        if proof.data.trim().is_empty() {
            issues.push(ValidationIssue::MissingData);
        }
        if proof.warrant.trim().is_empty() {
            issues.push(ValidationIssue::MissingWarrant);
        }
        if proof.claim.trim().is_empty() {
            issues.push(ValidationIssue::MissingClaim);
        }

        // 2. Qualifier vs rebuttals
        if proof.has_qualifier_conflict() {
            issues.push(ValidationIssue::QualifierConflict {
                rebuttal_count: proof.rebuttals.len(),
            });
        }

        // 3. Evidence tier appropriateness for structural layers
        if node.layer.value() <= 4 && proof.tier == EvidenceTier::Somatic {
            issues.push(ValidationIssue::WeakEvidence {
                layer: node.layer.value(),
                tier: proof.tier,
            });
        }

        let is_valid = !issues.iter().any(|i| i.severity() == Severity::Error);
        let breakdown = self.coherence_breakdown(proof);
        let coherence = breakdown.mean();

        tracing::debug!(
            node = %node.id,
            coherence,
            is_valid,
            issue_count = issues.len(),
            "proof validated"
        );

        ProofReport {
            is_valid,
            coherence,
            issues,
            breakdown,
        }
    }

    /// Score the five coherence dimensions
    fn coherence_breakdown(&self, proof: &Proof) -> CoherenceBreakdown {
        let data_richness = ratio(proof.data.trim().len(), self.config.data_richness_target);

        let warrant_presence = if proof.warrant.trim().is_empty() {
            0.0
        } else {
            1.0
        };

        let backing_support = match &proof.backing {
            Some(backing) => ratio(backing.trim().len(), self.config.backing_target),
            None => 0.5,
        };

        let qualifier_weight = proof.qualifier.weight();

        // Strong qualifiers owe the reader a survey of defeaters; weak
        // qualifiers already concede, so coverage is moot
        let rebuttal_coverage = if proof.qualifier.is_strong() {
            ratio(proof.rebuttals.len(), self.config.rebuttal_coverage_target)
        } else {
            1.0
        };

        CoherenceBreakdown {
            data_richness,
            warrant_presence,
            backing_support,
            qualifier_weight,
            rebuttal_coverage,
        }
    }
}

/// `min(1, value / target)`, safe for a zero target
fn ratio(value: usize, target: usize) -> f64 {
    if target == 0 {
        return 1.0;
    }
    (value as f64 / target as f64).min(1.0)
}
