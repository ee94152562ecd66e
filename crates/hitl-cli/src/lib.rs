//! Command-line front end for the human-in-the-loop router
//!
//! Hosts a [`ReviewCoordinator`](hitl_coordination::ReviewCoordinator) behind
//! a line-delimited JSON protocol on stdin/stdout.

pub mod cli;
pub mod protocol;
