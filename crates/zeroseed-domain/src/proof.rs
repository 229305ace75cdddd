//! Toulmin-structured justifications attached to nodes

use crate::confidence::ConfidenceInterval;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hedging strength of a proof's claim
///
/// Each qualifier maps to a fixed confidence band, so downstream scoring
/// never interprets free-text hedges.
///
/// # Examples
///
/// ```
/// use zeroseed_domain::Qualifier;
///
/// let q = Qualifier::Probably;
/// assert!(q.band().contains(0.8));
/// assert_eq!(q.weight(), 0.8);
/// assert!(q.is_strong());
///
/// assert_eq!(Qualifier::from_confidence(0.5), Qualifier::Possibly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Qualifier {
    /// Near-certain; incompatible with open rebuttals
    Definitely,
    /// Strong confidence with residual doubt
    Probably,
    /// More likely than not
    Possibly,
    /// Live hypothesis, weakly held
    Uncertain,
    /// No stance on likelihood
    Unknown,
}

impl Qualifier {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Qualifier::Definitely => "definitely",
            Qualifier::Probably => "probably",
            Qualifier::Possibly => "possibly",
            Qualifier::Uncertain => "uncertain",
            Qualifier::Unknown => "unknown",
        }
    }

    /// Parse from a string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "definitely" => Some(Qualifier::Definitely),
            "probably" => Some(Qualifier::Probably),
            "possibly" => Some(Qualifier::Possibly),
            "uncertain" => Some(Qualifier::Uncertain),
            "unknown" => Some(Qualifier::Unknown),
            _ => None,
        }
    }

    /// The confidence band this qualifier asserts
    pub fn band(&self) -> ConfidenceInterval {
        match self {
            Qualifier::Definitely => ConfidenceInterval::new(0.9, 1.0),
            Qualifier::Probably => ConfidenceInterval::new(0.7, 0.9),
            Qualifier::Possibly => ConfidenceInterval::new(0.4, 0.7),
            Qualifier::Uncertain => ConfidenceInterval::new(0.2, 0.4),
            Qualifier::Unknown => ConfidenceInterval::new(0.0, 0.2),
        }
    }

    /// Scalar weight used by coherence scoring
    pub fn weight(&self) -> f64 {
        match self {
            Qualifier::Definitely => 1.0,
            Qualifier::Probably => 0.8,
            Qualifier::Possibly => 0.6,
            Qualifier::Uncertain => 0.4,
            Qualifier::Unknown => 0.2,
        }
    }

    /// Classify a scalar confidence into its band
    ///
    /// Values outside [0, 1] are clamped.
    pub fn from_confidence(confidence: f64) -> Self {
        let c = confidence.clamp(0.0, 1.0);
        if c >= 0.9 {
            Qualifier::Definitely
        } else if c >= 0.7 {
            Qualifier::Probably
        } else if c >= 0.4 {
            Qualifier::Possibly
        } else if c >= 0.2 {
            Qualifier::Uncertain
        } else {
            Qualifier::Unknown
        }
    }

    /// Whether this qualifier makes a strong commitment
    ///
    /// Strong qualifiers are expected to have surveyed their rebuttals.
    pub fn is_strong(&self) -> bool {
        matches!(self, Qualifier::Definitely | Qualifier::Probably)
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Qualifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid qualifier: {}", s))
    }
}

/// Classification of the evidence backing a proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceTier {
    /// Logical or definitional necessity
    Categorical,
    /// Direct observation or measurement
    Empirical,
    /// Quality or fit judgment
    Aesthetic,
    /// Felt sense, not yet articulable
    Somatic,
    /// Second-hand report
    Testimonial,
}

impl EvidenceTier {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceTier::Categorical => "categorical",
            EvidenceTier::Empirical => "empirical",
            EvidenceTier::Aesthetic => "aesthetic",
            EvidenceTier::Somatic => "somatic",
            EvidenceTier::Testimonial => "testimonial",
        }
    }

    /// Parse from a string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "categorical" => Some(EvidenceTier::Categorical),
            "empirical" => Some(EvidenceTier::Empirical),
            "aesthetic" => Some(EvidenceTier::Aesthetic),
            "somatic" => Some(EvidenceTier::Somatic),
            "testimonial" => Some(EvidenceTier::Testimonial),
            _ => None,
        }
    }
}

impl fmt::Display for EvidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EvidenceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid evidence tier: {}", s))
    }
}

/// A Toulmin-structured justification
///
/// Evidence (`data`) is connected to a `claim` through a `warrant`,
/// optionally supported by `backing`, hedged by a [`Qualifier`], and
/// defeasible through ordered `rebuttals`. The structure is plain data:
/// scoring and validity judgments live in the validator, so an
/// ill-formed proof can always be represented, inspected, and reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    /// Evidence the argument rests on
    pub data: String,
    /// Inference rule connecting data to claim
    pub warrant: String,
    /// The statement being justified
    pub claim: String,
    /// Support for the warrant itself
    pub backing: Option<String>,
    /// Hedging strength of the claim
    pub qualifier: Qualifier,
    /// Known defeaters, in the order they were raised
    pub rebuttals: Vec<String>,
    /// What kind of evidence `data` is
    pub tier: EvidenceTier,
    /// Identifiers of governing principles this proof leans on
    pub principles: Vec<String>,
}

impl Proof {
    /// Create a proof from the three mandatory Toulmin fields
    pub fn new(
        data: impl Into<String>,
        warrant: impl Into<String>,
        claim: impl Into<String>,
        qualifier: Qualifier,
        tier: EvidenceTier,
    ) -> Self {
        Self {
            data: data.into(),
            warrant: warrant.into(),
            claim: claim.into(),
            backing: None,
            qualifier,
            rebuttals: Vec::new(),
            tier,
            principles: Vec::new(),
        }
    }

    /// Attach backing for the warrant (builder style)
    pub fn with_backing(mut self, backing: impl Into<String>) -> Self {
        self.backing = Some(backing.into());
        self
    }

    /// Append a rebuttal (builder style)
    pub fn with_rebuttal(mut self, rebuttal: impl Into<String>) -> Self {
        self.rebuttals.push(rebuttal.into());
        self
    }

    /// Replace the rebuttal list (builder style)
    pub fn with_rebuttals(mut self, rebuttals: Vec<String>) -> Self {
        self.rebuttals = rebuttals;
        self
    }

    /// Append a governing-principle reference (builder style)
    pub fn with_principle(mut self, principle: impl Into<String>) -> Self {
        self.principles.push(principle.into());
        self
    }

    /// Whether the qualifier contradicts the rebuttal set
    ///
    /// "Definitely" asserts no live defeaters, so carrying rebuttals
    /// alongside it is a structural conflict.
    pub fn has_qualifier_conflict(&self) -> bool {
        self.qualifier == Qualifier::Definitely && !self.rebuttals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_bands_cover_unit_interval() {
        // Band lower bounds step down; every confidence lands in exactly
        // the band from_confidence picks
        for &(c, expected) in &[
            (1.0, Qualifier::Definitely),
            (0.9, Qualifier::Definitely),
            (0.89, Qualifier::Probably),
            (0.7, Qualifier::Probably),
            (0.5, Qualifier::Possibly),
            (0.4, Qualifier::Possibly),
            (0.3, Qualifier::Uncertain),
            (0.2, Qualifier::Uncertain),
            (0.1, Qualifier::Unknown),
            (0.0, Qualifier::Unknown),
        ] {
            assert_eq!(Qualifier::from_confidence(c), expected, "confidence {}", c);
            assert!(expected.band().contains(c), "band of {:?} should contain {}", expected, c);
        }
    }

    #[test]
    fn test_from_confidence_clamps() {
        assert_eq!(Qualifier::from_confidence(1.5), Qualifier::Definitely);
        assert_eq!(Qualifier::from_confidence(-0.5), Qualifier::Unknown);
    }

    #[test]
    fn test_qualifier_weights_descend() {
        let weights: Vec<f64> = [
            Qualifier::Definitely,
            Qualifier::Probably,
            Qualifier::Possibly,
            Qualifier::Uncertain,
            Qualifier::Unknown,
        ]
        .iter()
        .map(|q| q.weight())
        .collect();

        for pair in weights.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_qualifier_strength() {
        assert!(Qualifier::Definitely.is_strong());
        assert!(Qualifier::Probably.is_strong());
        assert!(!Qualifier::Possibly.is_strong());
        assert!(!Qualifier::Uncertain.is_strong());
        assert!(!Qualifier::Unknown.is_strong());
    }

    #[test]
    fn test_qualifier_roundtrip() {
        for q in [
            Qualifier::Definitely,
            Qualifier::Probably,
            Qualifier::Possibly,
            Qualifier::Uncertain,
            Qualifier::Unknown,
        ] {
            assert_eq!(Qualifier::parse(q.as_str()), Some(q));
        }
        assert_eq!(Qualifier::parse("certainly"), None);
    }

    #[test]
    fn test_tier_roundtrip() {
        for tier in [
            EvidenceTier::Categorical,
            EvidenceTier::Empirical,
            EvidenceTier::Aesthetic,
            EvidenceTier::Somatic,
            EvidenceTier::Testimonial,
        ] {
            assert_eq!(EvidenceTier::parse(tier.as_str()), Some(tier));
        }
        assert_eq!(EvidenceTier::parse("anecdotal"), None);
    }

    #[test]
    fn test_proof_builders() {
        let proof = Proof::new(
            "Benchmarks show 40% fewer allocations",
            "Fewer allocations reduce tail latency",
            "The arena allocator should ship",
            Qualifier::Probably,
            EvidenceTier::Empirical,
        )
        .with_backing("Matches the allocator vendor's published numbers")
        .with_rebuttal("Fragmentation under sustained load is unmeasured")
        .with_principle("perf-before-features");

        assert!(proof.backing.is_some());
        assert_eq!(proof.rebuttals.len(), 1);
        assert_eq!(proof.principles, vec!["perf-before-features".to_string()]);
        assert!(!proof.has_qualifier_conflict());
    }

    #[test]
    fn test_definitely_with_rebuttals_conflicts() {
        let proof = Proof::new(
            "d",
            "w",
            "c",
            Qualifier::Definitely,
            EvidenceTier::Categorical,
        )
        .with_rebuttal("unless the axiom is wrong");

        assert!(proof.has_qualifier_conflict());

        let clean = Proof::new("d", "w", "c", Qualifier::Definitely, EvidenceTier::Categorical);
        assert!(!clean.has_qualifier_conflict());
    }

    #[test]
    fn test_rebuttal_order_preserved() {
        let proof = Proof::new("d", "w", "c", Qualifier::Possibly, EvidenceTier::Empirical)
            .with_rebuttal("first")
            .with_rebuttal("second")
            .with_rebuttal("third");

        assert_eq!(proof.rebuttals, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_proof_serde_roundtrip() {
        let proof = Proof::new(
            "data",
            "warrant",
            "claim",
            Qualifier::Uncertain,
            EvidenceTier::Somatic,
        )
        .with_rebuttal("it may be noise");

        let json = serde_json::to_string(&proof).unwrap();
        assert!(json.contains("\"uncertain\""));
        assert!(json.contains("\"somatic\""));

        let back: Proof = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
    }
}
