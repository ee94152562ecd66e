//! Vote aggregation for human review tasks
//!
//! An [`AggregationStrategy`] turns the votes cast so far into an optional
//! resolved label. Strategies are pure: they recompute from the full vote
//! list on every call and keep no state beyond their configuration.
//!
//! # Strategies
//!
//! - **MajorityVote**: strict plurality once `min_votes` is reached
//! - **WeightedVote**: strict plurality over per-label weights
//! - **UnanimousVote**: every vote must agree once `min_votes` is reached
//!
//! The coordinator only depends on the trait, so strategies are swapped at
//! construction time via [`VotingStrategy::build`].

pub mod voting;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, RoutingConfig};
use crate::state::Label;

pub use voting::{MajorityVote, UnanimousVote, WeightedVote};

/// Resolve a final label from reviewer votes
pub trait AggregationStrategy: Send + Sync {
    /// Returns `None` while the votes do not (yet) determine a winner
    fn aggregate(&self, votes: &[Label]) -> Option<Label>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Named aggregation strategy, as selected in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingStrategy {
    /// Strict plurality of raw vote counts
    #[default]
    Majority,
    /// Strict plurality of per-label weights
    Weighted,
    /// All votes must agree
    Unanimous,
}

impl VotingStrategy {
    /// Construct the strategy described by `config`
    pub fn build(&self, config: &RoutingConfig) -> Box<dyn AggregationStrategy> {
        match self {
            VotingStrategy::Majority => Box::new(MajorityVote::new(config.min_votes)),
            VotingStrategy::Weighted => {
                Box::new(WeightedVote::new(config.min_votes, config.label_weights))
            }
            VotingStrategy::Unanimous => Box::new(UnanimousVote::new(config.min_votes)),
        }
    }
}

impl std::fmt::Display for VotingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingStrategy::Majority => write!(f, "majority"),
            VotingStrategy::Weighted => write!(f, "weighted"),
            VotingStrategy::Unanimous => write!(f, "unanimous"),
        }
    }
}

impl FromStr for VotingStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "majority" => Ok(VotingStrategy::Majority),
            "weighted" => Ok(VotingStrategy::Weighted),
            "unanimous" => Ok(VotingStrategy::Unanimous),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}
