//! Command-line arguments and coordinator construction

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hitl_coordination::{
    EventBus, KeywordSentimentModel, ReviewCoordinator, RoutingConfig, TaskStore, VotingStrategy,
};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML file with routing configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Auto-accept threshold (overrides HITL_CONFIDENCE_THRESHOLD)
    #[arg(long, global = true)]
    pub threshold: Option<f32>,

    /// Votes required before a task can resolve (overrides HITL_MIN_VOTES)
    #[arg(long, global = true)]
    pub min_votes: Option<usize>,

    /// Aggregation strategy: majority, weighted or unanimous
    #[arg(long, global = true)]
    pub strategy: Option<VotingStrategy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Serve JSON requests from stdin, one per line
    Serve,
    /// Classify a single text and print the outcome
    Classify {
        /// Text to classify
        text: String,
    },
}

impl Args {
    /// Resolve configuration: file, then environment, then flags
    pub fn routing_config(&self) -> Result<RoutingConfig> {
        let mut config = RoutingConfig::load(self.config.as_deref())
            .context("Failed to load routing configuration")?;

        if let Some(threshold) = self.threshold {
            config.confidence_threshold = threshold;
        }
        if let Some(min_votes) = self.min_votes {
            config.min_votes = min_votes;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Build a coordinator with a fresh store and the keyword model
pub fn build_coordinator(config: RoutingConfig) -> Result<ReviewCoordinator> {
    let store = TaskStore::new().shared();
    let bus = EventBus::new().shared();

    ReviewCoordinator::new(store, Arc::new(KeywordSentimentModel::new()), bus, config)
        .context("Failed to create review coordinator")
}
