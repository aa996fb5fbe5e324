//! HTTP clients for the homework API and the chat transport
//!
//! The polling loop only talks to these through [`HomeworkSource`] and
//! [`MessageSink`], so it can be driven by in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod practicum;
pub mod telegram;

// Re-export commonly used types
pub use practicum::PracticumClient;
pub use telegram::TelegramClient;

/// Source of homework status answers
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch submissions updated since `from_date`.
    ///
    /// The answer is returned unvalidated.
    async fn get_api_answer(&self, from_date: i64) -> Result<Value>;
}

/// Destination for chat notifications
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<()>;
}
