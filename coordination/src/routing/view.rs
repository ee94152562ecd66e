//! Read-only projections returned by the coordinator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{HumanLabelEntry, Label, ReviewTask, TaskId, TaskStatus};

/// Result of a classify request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyOutcome {
    pub status: TaskStatus,
    /// Set on the fast path only
    pub label: Option<Label>,
    /// Set on the fast path only
    pub confidence: Option<f32>,
    /// Set when the request was escalated
    pub task_id: Option<TaskId>,
}

impl ClassifyOutcome {
    /// Model answer accepted without human review
    pub fn auto_resolved(label: Label, confidence: f32) -> Self {
        Self {
            status: TaskStatus::Completed,
            label: Some(label),
            confidence: Some(confidence),
            task_id: None,
        }
    }

    /// Request escalated to reviewers
    pub fn escalated(task_id: TaskId) -> Self {
        Self {
            status: TaskStatus::WaitingForHumans,
            label: None,
            confidence: None,
            task_id: Some(task_id),
        }
    }

    pub fn is_escalated(&self) -> bool {
        self.task_id.is_some()
    }
}

/// Snapshot of a review task including every vote recorded so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    pub task_id: TaskId,
    pub text: String,
    pub status: TaskStatus,
    pub model_label: Label,
    pub model_confidence: f32,
    pub human_labels: Vec<HumanLabelEntry>,
    pub final_label: Option<Label>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<ReviewTask> for TaskView {
    fn from(task: ReviewTask) -> Self {
        Self {
            task_id: task.task_id,
            text: task.text,
            status: task.status,
            model_label: task.model_label,
            model_confidence: task.model_confidence,
            human_labels: task.human_labels,
            final_label: task.final_label,
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}
