//! Voting strategies over reviewer labels
//!
//! None of these strategies guess on a tie: when the top two candidates are
//! level, they return `None` and wait for more votes.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::trace;

use super::AggregationStrategy;
use crate::config::{LabelWeights, DEFAULT_MIN_VOTES};
use crate::state::Label;

/// Pick the highest-scoring label if it strictly beats the runner-up
///
/// Shared by the count and weight based strategies. Weights are validated
/// finite and non-negative, so scores always compare.
fn strict_winner<S: PartialOrd + Copy>(scores: HashMap<Label, S>) -> Option<Label> {
    let mut ranked: Vec<(Label, S)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    match ranked.as_slice() {
        [] => None,
        [(only, _)] => Some(*only),
        [(first, top), (_, second), ..] => (top > second).then_some(*first),
    }
}

/// Strict plurality of raw vote counts
#[derive(Debug, Clone, Copy)]
pub struct MajorityVote {
    min_votes: usize,
}

impl MajorityVote {
    pub fn new(min_votes: usize) -> Self {
        Self { min_votes }
    }

    pub fn min_votes(&self) -> usize {
        self.min_votes
    }
}

impl Default for MajorityVote {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VOTES)
    }
}

impl AggregationStrategy for MajorityVote {
    fn aggregate(&self, votes: &[Label]) -> Option<Label> {
        if votes.len() < self.min_votes {
            return None;
        }

        let mut counts: HashMap<Label, usize> = HashMap::new();
        for label in votes {
            *counts.entry(*label).or_insert(0) += 1;
        }
        trace!(?counts, "Majority tally");

        strict_winner(counts)
    }

    fn name(&self) -> &'static str {
        "majority"
    }
}

/// Strict plurality where each vote counts with its label's weight
#[derive(Debug, Clone, Copy)]
pub struct WeightedVote {
    min_votes: usize,
    weights: LabelWeights,
}

impl WeightedVote {
    pub fn new(min_votes: usize, weights: LabelWeights) -> Self {
        Self { min_votes, weights }
    }
}

impl AggregationStrategy for WeightedVote {
    fn aggregate(&self, votes: &[Label]) -> Option<Label> {
        if votes.len() < self.min_votes {
            return None;
        }

        let mut scores: HashMap<Label, f32> = HashMap::new();
        for label in votes {
            *scores.entry(*label).or_insert(0.0) += self.weights.weight(*label);
        }
        trace!(?scores, "Weighted tally");

        strict_winner(scores)
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}

/// Resolve only when every vote carries the same label
#[derive(Debug, Clone, Copy)]
pub struct UnanimousVote {
    min_votes: usize,
}

impl UnanimousVote {
    pub fn new(min_votes: usize) -> Self {
        Self { min_votes }
    }
}

impl AggregationStrategy for UnanimousVote {
    fn aggregate(&self, votes: &[Label]) -> Option<Label> {
        if votes.len() < self.min_votes {
            return None;
        }

        let (first, rest) = votes.split_first()?;
        rest.iter().all(|label| label == first).then_some(*first)
    }

    fn name(&self) -> &'static str {
        "unanimous"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Label::*;

    #[test]
    fn test_majority_resolves_plurality() {
        let strategy = MajorityVote::new(3);
        assert_eq!(strategy.aggregate(&[Positive, Negative, Positive]), Some(Positive));
    }

    #[test]
    fn test_majority_three_way_tie() {
        let strategy = MajorityVote::new(3);
        assert_eq!(strategy.aggregate(&[Positive, Negative, Neutral]), None);
        assert_eq!(MajorityVote::new(1).aggregate(&[Positive, Negative, Neutral]), None);
    }

    #[test]
    fn test_majority_below_min_votes() {
        let strategy = MajorityVote::default();
        assert_eq!(strategy.min_votes(), 3);
        assert_eq!(strategy.aggregate(&[Positive, Positive]), None);
        assert_eq!(strategy.aggregate(&[]), None);
    }

    #[test]
    fn test_majority_top_two_tie_defers() {
        let strategy = MajorityVote::new(3);
        assert_eq!(
            strategy.aggregate(&[Positive, Negative, Positive, Negative]),
            None
        );
        assert_eq!(
            strategy.aggregate(&[Positive, Negative, Positive, Negative, Neutral]),
            None
        );
    }

    #[test]
    fn test_majority_single_label() {
        assert_eq!(MajorityVote::new(1).aggregate(&[Neutral]), Some(Neutral));
        assert_eq!(
            MajorityVote::new(3).aggregate(&[Negative, Negative, Negative]),
            Some(Negative)
        );
    }

    #[test]
    fn test_majority_is_idempotent() {
        let strategy = MajorityVote::new(3);
        let votes = [Positive, Negative, Positive, Neutral];
        assert_eq!(strategy.aggregate(&votes), strategy.aggregate(&votes));
        assert_eq!(strategy.aggregate(&votes), Some(Positive));
    }

    #[test]
    fn test_majority_recomputes_as_votes_grow() {
        let strategy = MajorityVote::new(3);
        let mut votes = vec![Positive, Negative, Positive];
        assert_eq!(strategy.aggregate(&votes), Some(Positive));

        // A later vote can bring the tally back to a tie
        votes.push(Negative);
        assert_eq!(strategy.aggregate(&votes), None);
    }

    #[test]
    fn test_weighted_discounts_neutral() {
        let strategy = WeightedVote::new(3, LabelWeights::default());

        // 2 neutral (1.0) vs 1 positive (1.0): tie
        assert_eq!(strategy.aggregate(&[Neutral, Positive, Neutral]), None);
        // 3 neutral (1.5) vs 1 negative (1.0)
        assert_eq!(
            strategy.aggregate(&[Neutral, Neutral, Negative, Neutral]),
            Some(Neutral)
        );
        assert_eq!(strategy.aggregate(&[Negative, Neutral, Neutral]), None);
    }

    #[test]
    fn test_weighted_custom_weights() {
        let weights = LabelWeights {
            positive: 2.0,
            negative: 1.0,
            neutral: 1.0,
        };
        let strategy = WeightedVote::new(3, weights);
        assert_eq!(
            strategy.aggregate(&[Positive, Negative, Negative]),
            None
        );
        assert_eq!(
            strategy.aggregate(&[Positive, Negative, Neutral]),
            Some(Positive)
        );
    }

    #[test]
    fn test_weighted_below_min_votes() {
        let strategy = WeightedVote::new(3, LabelWeights::default());
        assert_eq!(strategy.aggregate(&[Positive, Positive]), None);
    }

    #[test]
    fn test_unanimous() {
        let strategy = UnanimousVote::new(3);
        assert_eq!(strategy.aggregate(&[Positive, Positive]), None);
        assert_eq!(
            strategy.aggregate(&[Positive, Positive, Positive]),
            Some(Positive)
        );
        assert_eq!(strategy.aggregate(&[Positive, Negative, Positive]), None);
    }

    #[test]
    fn test_strict_winner_counts_and_weights() {
        let counts = HashMap::from([(Positive, 2usize), (Negative, 2)]);
        assert_eq!(strict_winner(counts), None);

        let counts = HashMap::from([(Positive, 3usize), (Negative, 2)]);
        assert_eq!(strict_winner(counts), Some(Positive));

        let scores = HashMap::from([(Neutral, 1.5f32), (Negative, 1.0)]);
        assert_eq!(strict_winner(scores), Some(Neutral));

        assert_eq!(strict_winner(HashMap::<Label, f32>::new()), None);
    }

    #[test]
    fn test_strategies_are_interchangeable() {
        let strategies: Vec<Box<dyn AggregationStrategy>> = vec![
            Box::new(MajorityVote::new(3)),
            Box::new(WeightedVote::new(3, LabelWeights::default())),
            Box::new(UnanimousVote::new(3)),
        ];

        for strategy in &strategies {
            assert_eq!(
                strategy.aggregate(&[Negative, Negative, Negative]),
                Some(Negative),
                "{} should resolve a unanimous vote",
                strategy.name()
            );
        }
    }
}
