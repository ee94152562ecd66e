//! Human-in-the-loop classification routing
//!
//! This library provides:
//! - A confidence gate that accepts confident model answers directly
//! - An in-memory task store for requests escalated to human reviewers
//! - Pluggable vote aggregation (majority, weighted, unanimous)
//! - Lifecycle events over a Tokio broadcast bus
//!
//! # Task lifecycle
//!
//! ```text
//! classify ─┬─ confidence > threshold ──▶ completed (no task)
//!           └─ otherwise ──▶ waiting_for_humans ──[votes resolve]──▶ completed
//! ```
//!
//! # Configuration
//!
//! - `HITL_CONFIDENCE_THRESHOLD`: auto-accept threshold (default 0.9)
//! - `HITL_MIN_VOTES`: votes required before resolving (default 3)
//! - `HITL_VOTING_STRATEGY`: `majority`, `weighted` or `unanimous`

#![allow(clippy::uninlined_format_args)]

pub mod aggregation;
pub mod config;
pub mod events;
pub mod model;
pub mod routing;
pub mod state;
pub mod validation;

// Re-export key aggregation types
pub use aggregation::{
    AggregationStrategy, MajorityVote, UnanimousVote, VotingStrategy, WeightedVote,
};

// Re-export configuration types
pub use config::{ConfigError, LabelWeights, RoutingConfig};

// Re-export key event types
pub use events::{EventBus, RoutingEvent, SharedEventBus};

// Re-export model types
pub use model::{Classifier, KeywordSentimentModel, ModelError, ModelResult, Prediction};

// Re-export routing types
pub use routing::{
    ClassifyOutcome, CoordinatorError, CoordinatorResult, ReviewCoordinator,
    SharedReviewCoordinator, TaskView,
};

// Re-export key state types
pub use state::{
    HumanLabelEntry, Label, ReviewTask, SharedTaskStore, StoreError, TaskId, TaskStatus,
    TaskStore,
};

pub use validation::ValidationError;
