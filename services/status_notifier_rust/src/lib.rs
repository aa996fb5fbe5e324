//! Homework Status Notifier
//!
//! Polls the homework review API and reports status changes to a Telegram chat.
//! The modules are exposed as a library so the polling loop can be tested with
//! in-memory collaborators.

pub mod config;
pub mod formatters;
pub mod logging;
pub mod scheduler;
pub mod tracker;

// Re-export commonly used types
pub use config::{check_tokens, Config, Credentials};
pub use scheduler::{Sleeper, TokioSleeper};
pub use tracker::{CycleOutcome, LastSeenState, StatusTracker};
