//! Confidence-gated routing and human review orchestration
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   ReviewCoordinator                        │
//! │  • classify: confidence gate (strict `>` threshold)       │
//! │  • submit_label: vote → aggregate → finalize (atomic)     │
//! │  • get_task / list_tasks / list_pending                   │
//! └─────────────────────────┬─────────────────────────────────┘
//!                           │
//!           ┌───────────────┼───────────────┬───────────────┐
//!           ▼               ▼               ▼               ▼
//!     ┌───────────┐   ┌───────────┐   ┌───────────┐   ┌───────────┐
//!     │Classifier │   │ TaskStore │   │Aggregation│   │ EventBus  │
//!     └───────────┘   └───────────┘   └───────────┘   └───────────┘
//! ```
//!
//! # Workflow
//!
//! 1. `classify(text)` asks the classifier for a prediction
//! 2. Confidence above the threshold returns the model answer directly
//! 3. Otherwise a task is created and its id returned
//! 4. Reviewers call `submit_label`; after every vote the aggregator runs
//!    over all votes and the first resolved label finalizes the task
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use hitl_coordination::{
//!     EventBus, KeywordSentimentModel, Label, ReviewCoordinator, RoutingConfig, TaskStore,
//! };
//!
//! let coordinator = ReviewCoordinator::new(
//!     TaskStore::new().shared(),
//!     Arc::new(KeywordSentimentModel::new()),
//!     EventBus::new().shared(),
//!     RoutingConfig::default(),
//! )?;
//!
//! let outcome = coordinator.classify("okay").await?;
//! if let Some(task_id) = outcome.task_id {
//!     coordinator.submit_label(&task_id, Label::Positive, Some("alice".into()))?;
//! }
//! ```

pub mod coordinator;
pub mod view;

// Re-export core types
pub use coordinator::{
    CoordinatorError, CoordinatorResult, ReviewCoordinator, SharedReviewCoordinator,
};
pub use view::{ClassifyOutcome, TaskView};
