//! Homework notifier core.
//!
//! This crate provides:
//! - Practicum homework statuses API client
//! - Telegram `sendMessage` client
//! - Structural validation of API answers
//! - Review status model and verdict texts
//! - Classified errors with de-duplication fingerprints

pub mod clients;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{ErrorFingerprint, NotifierError};
pub use models::{HomeworkBatch, HomeworkRecord, HomeworkStatus};
pub use validation::check_response;
