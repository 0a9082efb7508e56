// src/review.rs
//! Client for the homework review status endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::error::PollError;

/// One homework as reported by the review API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub homework_name: String,
    pub status: String,
}

/// Successful reply: submissions changed since `from_date`, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    #[serde(default)]
    pub homeworks: Vec<SubmissionRecord>,
    #[serde(default)]
    pub current_date: Option<u64>,
}

/// Wire shape: entries stay raw so a broken older record cannot spoil the newest one.
#[derive(Deserialize)]
struct RawStatusResponse {
    #[serde(default)]
    homeworks: Vec<Json>,
    #[serde(default)]
    current_date: Option<u64>,
}

#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, from_date: u64) -> Result<StatusResponse, PollError>;
}

pub struct ReviewClient {
    http: Client,
    url: String,
    token: String,
    timeout: Duration,
}

impl ReviewClient {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn payload_error(&self, from_date: u64, value: String, message: String) -> PollError {
        PollError::ApiPayload {
            url: self.url.clone(),
            from_date,
            value,
            message,
        }
    }

    /// Classify a decoded body: error keys win over everything else.
    fn interpret(
        &self,
        from_date: u64,
        status: reqwest::StatusCode,
        body: Json,
    ) -> Result<StatusResponse, PollError> {
        for key in ["code", "error"] {
            if let Some(value) = body.get(key) {
                let message = body
                    .get("message")
                    .and_then(Json::as_str)
                    .unwrap_or("no message")
                    .to_string();
                return Err(self.payload_error(from_date, json_text(value), message));
            }
        }

        if !status.is_success() {
            return Err(self.payload_error(
                from_date,
                status.as_u16().to_string(),
                format!("unexpected HTTP status {status}"),
            ));
        }

        let malformed = |what: &str, e: serde_json::Error| {
            self.payload_error(
                from_date,
                "malformed".into(),
                format!("{what} does not match the expected shape: {e}"),
            )
        };

        let raw: RawStatusResponse =
            serde_json::from_value(body).map_err(|e| malformed("response", e))?;

        // Only the newest record has to be well-formed; older ones are never announced.
        let mut entries = raw.homeworks.into_iter();
        let mut homeworks = Vec::with_capacity(entries.len());
        if let Some(newest) = entries.next() {
            let record: SubmissionRecord =
                serde_json::from_value(newest).map_err(|e| malformed("newest homework", e))?;
            homeworks.push(record);
        }
        for (idx, entry) in entries.enumerate() {
            match serde_json::from_value::<SubmissionRecord>(entry) {
                Ok(record) => homeworks.push(record),
                Err(e) => {
                    tracing::debug!(index = idx + 1, error = %e, "skipping malformed older homework")
                }
            }
        }

        Ok(StatusResponse {
            homeworks,
            current_date: raw.current_date,
        })
    }
}

#[async_trait]
impl StatusSource for ReviewClient {
    async fn fetch(&self, from_date: u64) -> Result<StatusResponse, PollError> {
        let transport = |e: reqwest::Error| PollError::Transport {
            url: self.url.clone(),
            from_date,
            source: Box::new(e),
        };

        tracing::info!(url = %self.url, from_date, "requesting homework statuses");
        let rsp = self
            .http
            .get(&self.url)
            .query(&[("from_date", from_date)])
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport)?;

        let status = rsp.status();
        let text = rsp.text().await.map_err(transport)?;
        let body: Json = serde_json::from_str(text.trim()).map_err(|e| {
            self.payload_error(
                from_date,
                status.as_u16().to_string(),
                format!("response body is not JSON: {e}"),
            )
        })?;

        self.interpret(from_date, status, body)
    }
}

fn json_text(v: &Json) -> String {
    match v {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}
