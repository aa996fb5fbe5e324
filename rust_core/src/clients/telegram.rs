use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::MessageSink;
use crate::error::{NotifierError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(base_url: String, token: String, chat_id: String, timeout: Duration) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            token,
            chat_id,
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.token
        )
    }
}

#[async_trait]
impl MessageSink for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<()> {
        let body = SendRequest {
            chat_id: &self.chat_id,
            text,
        };

        // The URL embeds the bot token; keep it out of error texts.
        let resp = self
            .http
            .post(self.send_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifierError::Delivery {
                reason: e.without_url().to_string(),
            })?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(NotifierError::Delivery {
                reason: format!("Telegram API non-2xx: {status} body={text}"),
            });
        }

        match serde_json::from_str::<SendResponse>(&text) {
            Ok(SendResponse { ok: true, .. }) => Ok(()),
            Ok(SendResponse { description, .. }) => Err(NotifierError::Delivery {
                reason: format!(
                    "Telegram API rejected message: {}",
                    description.unwrap_or_else(|| "no description".to_string())
                ),
            }),
            Err(e) => Err(NotifierError::Delivery {
                reason: format!("Telegram API returned unreadable body: {e}"),
            }),
        }
    }
}
