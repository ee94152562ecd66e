//! Core types for review task state
//!
//! These types live in the in-memory task store and describe the lifecycle
//! of a classification request that was escalated to human reviewers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::validation::ValidationError;

/// Unique identifier for review tasks
pub type TaskId = String;

/// Sentiment label produced by the model or cast by a reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    /// All labels, in declaration order
    pub fn all() -> &'static [Label] {
        &[Label::Positive, Label::Negative, Label::Neutral]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = ValidationError;

    /// Exact, case-sensitive match on the wire names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Label::Positive),
            "negative" => Ok(Label::Negative),
            "neutral" => Ok(Label::Neutral),
            _ => Err(ValidationError::UnknownLabel(s.to_string())),
        }
    }
}

/// Status of a review task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Escalated, collecting reviewer votes
    WaitingForHumans,
    /// A final label has been resolved (terminal)
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::WaitingForHumans => write!(f, "waiting_for_humans"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A single reviewer vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanLabelEntry {
    pub label: Label,

    /// Free-form attribution; not validated or deduplicated
    pub worker_id: Option<String>,
}

impl HumanLabelEntry {
    pub fn new(label: Label, worker_id: Option<String>) -> Self {
        Self { label, worker_id }
    }
}

/// A classification request awaiting (or having received) human review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewTask {
    /// Unique task identifier
    pub task_id: TaskId,

    /// The original input text
    pub text: String,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// The model's sub-threshold prediction, kept for audit
    pub model_label: Label,

    pub model_confidence: f32,

    /// Votes in arrival order
    pub human_labels: Vec<HumanLabelEntry>,

    /// Resolved label, set exactly once
    pub final_label: Option<Label>,

    /// Task creation timestamp
    pub created_at: DateTime<Utc>,

    /// Set together with `final_label`
    pub completed_at: Option<DateTime<Utc>>,
}

impl ReviewTask {
    /// Create a new task waiting for human votes
    pub fn new(task_id: TaskId, text: String, model_label: Label, model_confidence: f32) -> Self {
        Self {
            task_id,
            text,
            status: TaskStatus::WaitingForHumans,
            model_label,
            model_confidence,
            human_labels: Vec::new(),
            final_label: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Append a vote. Votes are recorded even after completion.
    pub fn push_vote(&mut self, label: Label, worker_id: Option<String>) {
        self.human_labels.push(HumanLabelEntry::new(label, worker_id));
    }

    /// Labels of all votes so far, in arrival order
    pub fn labels(&self) -> Vec<Label> {
        self.human_labels.iter().map(|entry| entry.label).collect()
    }

    /// Resolve the task. The first call wins; returns `false` if the task was
    /// already completed and nothing changed.
    pub fn finalize(&mut self, label: Label) -> bool {
        if self.is_completed() {
            return false;
        }
        self.final_label = Some(label);
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
        true
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn vote_count(&self) -> usize {
        self.human_labels.len()
    }
}
