//! Event types for review routing
//!
//! One event per lifecycle step of a classification request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Label, TaskId};

/// All routing lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutingEvent {
    /// The model was confident enough; no task was created
    AutoResolved {
        label: Label,
        confidence: f32,
        text_preview: String,
        timestamp: DateTime<Utc>,
    },

    /// The request was escalated to human reviewers
    TaskEscalated {
        task_id: TaskId,
        model_label: Label,
        model_confidence: f32,
        text_preview: String,
        timestamp: DateTime<Utc>,
    },

    /// A reviewer vote was recorded
    VoteRecorded {
        task_id: TaskId,
        label: Label,
        worker_id: Option<String>,
        vote_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Aggregation resolved a final label
    TaskFinalized {
        task_id: TaskId,
        final_label: Label,
        vote_count: usize,
        strategy: String,
        timestamp: DateTime<Utc>,
    },
}

impl RoutingEvent {
    /// Get the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            RoutingEvent::AutoResolved { timestamp, .. } => *timestamp,
            RoutingEvent::TaskEscalated { timestamp, .. } => *timestamp,
            RoutingEvent::VoteRecorded { timestamp, .. } => *timestamp,
            RoutingEvent::TaskFinalized { timestamp, .. } => *timestamp,
        }
    }

    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            RoutingEvent::AutoResolved { .. } => "auto_resolved",
            RoutingEvent::TaskEscalated { .. } => "task_escalated",
            RoutingEvent::VoteRecorded { .. } => "vote_recorded",
            RoutingEvent::TaskFinalized { .. } => "task_finalized",
        }
    }

    /// Get the task ID if this event is task-scoped
    pub fn task_id(&self) -> Option<&str> {
        match self {
            RoutingEvent::TaskEscalated { task_id, .. } => Some(task_id),
            RoutingEvent::VoteRecorded { task_id, .. } => Some(task_id),
            RoutingEvent::TaskFinalized { task_id, .. } => Some(task_id),
            RoutingEvent::AutoResolved { .. } => None,
        }
    }
}

/// Truncate text for event payloads
pub fn preview(text: &str) -> String {
    const MAX_PREVIEW_CHARS: usize = 100;

    if text.chars().count() > MAX_PREVIEW_CHARS {
        let head: String = text.chars().take(MAX_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
