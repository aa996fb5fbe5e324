//! Practicum homework statuses API client
//!
//! `GET <endpoint>?from_date=<unix ts>` with `Authorization: OAuth <token>`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::HomeworkSource;
use crate::error::{NotifierError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: String, token: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint,
            token,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn get_api_answer(&self, from_date: i64) -> Result<Value> {
        debug!("Requesting {} with from_date={}", self.endpoint, from_date);

        let resp = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| NotifierError::Transport {
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(NotifierError::EndpointUnavailable {
                endpoint: self.endpoint.clone(),
                params: format!("from_date={from_date}"),
                status: status.as_u16(),
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| NotifierError::InvalidJson {
                reason: e.to_string(),
            })
    }
}
