//! Review coordinator - confidence gate and vote orchestration
//!
//! The coordinator owns the routing decision for every classify request and
//! drives escalated tasks to completion as reviewer votes arrive.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::aggregation::{AggregationStrategy, VotingStrategy};
use crate::config::{ConfigError, RoutingConfig};
use crate::events::{preview, RoutingEvent, SharedEventBus};
use crate::model::{Classifier, ModelError};
use crate::state::{Label, SharedTaskStore, StoreError};
use crate::validation::{validate_text, ValidationError};

use super::view::{ClassifyOutcome, TaskView};

/// Error type for coordinator operations
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for coordinator operations
pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

/// Shared reference to ReviewCoordinator
pub type SharedReviewCoordinator = Arc<ReviewCoordinator>;

/// Routes classify requests and aggregates reviewer votes
pub struct ReviewCoordinator {
    store: SharedTaskStore,
    classifier: Arc<dyn Classifier>,
    aggregator: Box<dyn AggregationStrategy>,
    event_bus: SharedEventBus,
    config: RoutingConfig,
}

impl ReviewCoordinator {
    /// Create a coordinator using the strategy named in `config`
    pub fn new(
        store: SharedTaskStore,
        classifier: Arc<dyn Classifier>,
        event_bus: SharedEventBus,
        config: RoutingConfig,
    ) -> CoordinatorResult<Self> {
        config.validate()?;

        let aggregator = config.strategy.build(&config);

        info!(
            strategy = aggregator.name(),
            threshold = config.confidence_threshold,
            min_votes = config.min_votes,
            "Review coordinator ready"
        );

        Ok(Self {
            store,
            classifier,
            aggregator,
            event_bus,
            config,
        })
    }

    /// Replace the aggregation strategy
    ///
    /// The override is recorded in [`Self::config`] when it names a built-in
    /// strategy. [`Self::strategy_name`] always reports the running one.
    pub fn with_aggregator(mut self, aggregator: Box<dyn AggregationStrategy>) -> Self {
        match aggregator.name().parse::<VotingStrategy>() {
            Ok(strategy) => self.config.strategy = strategy,
            Err(_) => debug!(
                strategy = aggregator.name(),
                "Custom aggregator has no configured counterpart"
            ),
        }
        self.aggregator = aggregator;
        self
    }

    /// Create a shared reference to this coordinator
    pub fn shared(self) -> SharedReviewCoordinator {
        Arc::new(self)
    }

    // =========================================================================
    // Routing
    // =========================================================================

    /// Classify `text`, escalating to human review when the model is not
    /// confident enough
    pub async fn classify(&self, text: &str) -> CoordinatorResult<ClassifyOutcome> {
        validate_text(text)?;

        let prediction = self
            .classifier
            .predict(text)
            .await
            .inspect_err(|e| warn!("Prediction failed: {}", e))?
            .validate()?;

        if prediction.confidence > self.config.confidence_threshold {
            debug!(
                label = %prediction.label,
                confidence = prediction.confidence,
                "Auto-resolved"
            );

            self.event_bus.publish(RoutingEvent::AutoResolved {
                label: prediction.label,
                confidence: prediction.confidence,
                text_preview: preview(text),
                timestamp: Utc::now(),
            });

            return Ok(ClassifyOutcome::auto_resolved(
                prediction.label,
                prediction.confidence,
            ));
        }

        let task = self
            .store
            .create(text.to_string(), prediction.label, prediction.confidence)?;

        info!(
            task_id = %task.task_id,
            model_label = %prediction.label,
            confidence = prediction.confidence,
            "Task escalated to human review"
        );

        self.event_bus.publish(RoutingEvent::TaskEscalated {
            task_id: task.task_id.clone(),
            model_label: prediction.label,
            model_confidence: prediction.confidence,
            text_preview: preview(text),
            timestamp: Utc::now(),
        });

        Ok(ClassifyOutcome::escalated(task.task_id))
    }

    // =========================================================================
    // Task access
    // =========================================================================

    /// Get a task with all votes recorded so far
    pub fn get_task(&self, task_id: &str) -> CoordinatorResult<TaskView> {
        self.store
            .get(task_id)?
            .map(TaskView::from)
            .ok_or_else(|| CoordinatorError::TaskNotFound(task_id.to_string()))
    }

    /// All tasks (order not meaningful)
    pub fn list_tasks(&self) -> CoordinatorResult<Vec<TaskView>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .map(TaskView::from)
            .collect())
    }

    /// Tasks still waiting for reviewers, oldest first
    pub fn list_pending(&self) -> CoordinatorResult<Vec<TaskView>> {
        Ok(self
            .store
            .list_pending()?
            .into_iter()
            .map(TaskView::from)
            .collect())
    }

    // =========================================================================
    // Voting
    // =========================================================================

    /// Record a reviewer vote and finalize the task if the votes resolve
    ///
    /// Vote, aggregation, finalize and event publication run under a single
    /// store lock, so a task's events arrive in vote order. Votes on a
    /// completed task are recorded but never change its final label.
    pub fn submit_label(
        &self,
        task_id: &str,
        label: Label,
        worker_id: Option<String>,
    ) -> CoordinatorResult<TaskView> {
        let aggregator = self.aggregator.as_ref();
        let event_bus = &self.event_bus;

        let (task, finalized) = self
            .store
            .update(task_id, |task| {
                task.push_vote(label, worker_id.clone());

                let finalized = match aggregator.aggregate(&task.labels()) {
                    Some(resolved) => task.finalize(resolved),
                    None => false,
                };

                event_bus.publish(RoutingEvent::VoteRecorded {
                    task_id: task.task_id.clone(),
                    label,
                    worker_id,
                    vote_count: task.vote_count(),
                    timestamp: Utc::now(),
                });

                if let (true, Some(final_label)) = (finalized, task.final_label) {
                    event_bus.publish(RoutingEvent::TaskFinalized {
                        task_id: task.task_id.clone(),
                        final_label,
                        vote_count: task.vote_count(),
                        strategy: aggregator.name().to_string(),
                        timestamp: Utc::now(),
                    });
                }

                (task.clone(), finalized)
            })?
            .ok_or_else(|| CoordinatorError::TaskNotFound(task_id.to_string()))?;

        let vote_count = task.vote_count();
        debug!(task_id, label = %label, vote_count, "Vote recorded");

        if finalized {
            info!(
                task_id,
                final_label = ?task.final_label,
                vote_count,
                strategy = aggregator.name(),
                "Task finalized"
            );
        }

        Ok(task.into())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Name of the aggregation strategy in use
    pub fn strategy_name(&self) -> &'static str {
        self.aggregator.name()
    }

    pub fn store(&self) -> &SharedTaskStore {
        &self.store
    }

    pub fn event_bus(&self) -> &SharedEventBus {
        &self.event_bus
    }
}
