//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and the
//! environment supplying judgment and identity. Implementations live
//! with the callers that own those concerns.

use crate::mark::UmweltSnapshot;
use crate::node::ZeroNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node's alignment with the governing principles
///
/// `total` is the scalar used for partitioning; `components` optionally
/// break it down per principle for explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstitutionScore {
    /// Overall alignment in [0, 1]
    pub total: f64,
    /// Per-principle contributions, keyed by principle identifier
    pub components: BTreeMap<String, f64>,
}

impl ConstitutionScore {
    /// Create a score, clamping the total into [0, 1]
    pub fn of(total: f64) -> Self {
        Self {
            total: total.clamp(0.0, 1.0),
            components: BTreeMap::new(),
        }
    }

    /// Record a per-principle contribution (builder style)
    pub fn with_component(mut self, principle: impl Into<String>, value: f64) -> Self {
        self.components.insert(principle.into(), value);
        self
    }
}

/// Trait for judging a node's constitutional alignment
///
/// Implemented by the caller; the graph core only consumes the scores.
pub trait ConstitutionScorer {
    /// Score a node against the governing principles
    fn evaluate(&self, node: &ZeroNode) -> ConstitutionScore;
}

/// Trait for identifying the acting observer
///
/// Supplies the origin and context snapshot stamped onto every Mark.
pub trait Observer {
    /// Stable name of the actor performing mutations
    fn origin(&self) -> String;

    /// Context snapshot at the moment of mutation, embedded verbatim
    fn umwelt_snapshot(&self) -> UmweltSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Layer, NodeKind};

    struct LayerWeightScorer;

    impl ConstitutionScorer for LayerWeightScorer {
        fn evaluate(&self, node: &ZeroNode) -> ConstitutionScore {
            // Deeper layers score lower in this toy scorer
            ConstitutionScore::of(1.0 - f64::from(node.layer.value()) / 10.0)
        }
    }

    #[test]
    fn test_score_clamping() {
        assert_eq!(ConstitutionScore::of(1.5).total, 1.0);
        assert_eq!(ConstitutionScore::of(-0.2).total, 0.0);
        assert_eq!(ConstitutionScore::of(0.42).total, 0.42);
    }

    #[test]
    fn test_score_components() {
        let score = ConstitutionScore::of(0.8)
            .with_component("consent", 0.9)
            .with_component("clarity", 0.7);

        assert_eq!(score.components.len(), 2);
        assert_eq!(score.components["consent"], 0.9);
    }

    #[test]
    fn test_scorer_trait_usable_via_generic() {
        fn score_with<S: ConstitutionScorer>(scorer: &S, node: &ZeroNode) -> f64 {
            scorer.evaluate(node).total
        }

        let node = ZeroNode::new(Layer::new(2).unwrap(), NodeKind::Principle, "t", "b");
        let total = score_with(&LayerWeightScorer, &node);
        assert!((total - 0.8).abs() < 1e-9);
    }
}
