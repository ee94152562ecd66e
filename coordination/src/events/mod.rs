//! Lifecycle events for review routing
//!
//! The coordinator publishes one event per routing step. Subscribers are
//! optional; the bus is in-process only and keeps no history. Events for a
//! single task arrive in vote order.
//!
//! # Event Flow
//!
//! ```text
//! classify ──▶ AutoResolved
//!          └─▶ TaskEscalated ──▶ VoteRecorded* ──▶ TaskFinalized
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use hitl_coordination::events::EventBus;
//!
//! let bus = EventBus::new().shared();
//! let mut receiver = bus.subscribe_task(&task_id);
//! let event = receiver.recv().await?;
//! ```

pub mod bus;
pub mod types;

// Re-export core types
pub use bus::{EventBus, SharedEventBus, TaskReceiver};
pub use types::{preview, RoutingEvent};
