//! Task state module for human review escalation
//!
//! This module provides the volatile, in-memory task store and the
//! vocabulary shared by every other component:
//! - `Label` and `TaskStatus` closed enumerations
//! - `ReviewTask`, the aggregate root with its append-only vote list
//! - `TaskStore`, the single shared mutable resource in the system
//!
//! # Lifecycle
//!
//! ```text
//! create ──▶ waiting_for_humans ──[aggregator resolves]──▶ completed
//! ```
//!
//! `completed` is terminal. Votes arriving after completion are still
//! recorded but never change the resolved label.
//!
//! # Usage
//!
//! ```ignore
//! use hitl_coordination::state::{Label, TaskStore};
//!
//! let store = TaskStore::new().shared();
//! let task = store.create("okay".to_string(), Label::Neutral, 0.55)?;
//! store.append_vote(&task.task_id, Label::Positive, None)?;
//! ```

pub mod store;
pub mod types;

// Re-export core types
pub use store::{SharedTaskStore, StoreError, StoreResult, TaskStore};
pub use types::{HumanLabelEntry, Label, ReviewTask, TaskId, TaskStatus};
