use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Notifier;
use crate::error::PollError;

#[derive(Clone)]
pub struct TelegramNotifier {
    api_base: String,
    token: String,
    chat_id: String,
    client: Client,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            api_base: crate::config::DEFAULT_BOT_API_URL.to_string(),
            token,
            chat_id,
            client: Client::new(),
            timeout: Duration::from_secs(crate::config::DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Point at a different Bot API host (self-hosted server, tests).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    fn delivery_error(&self, reason: impl Into<String>) -> PollError {
        PollError::Delivery {
            chat_id: self.chat_id.clone(),
            reason: reason.into(),
        }
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct BotReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<(), PollError> {
        if message.trim().is_empty() {
            return Err(self.delivery_error("refusing to send an empty message"));
        }

        tracing::info!(chat_id = %self.chat_id, message, "sending message");

        // The token is part of the path, so reqwest errors lose their URL before logging.
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let rsp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text: message,
            })
            .send()
            .await
            .map_err(|e| self.delivery_error(format!("request failed: {}", e.without_url())))?;

        let status = rsp.status();
        let reply: Option<BotReply> = rsp.json().await.ok();
        match reply {
            Some(BotReply { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotReply { description, .. }) => Err(self.delivery_error(format!(
                "bot API rejected the message ({status}): {}",
                description.as_deref().unwrap_or("no description")
            ))),
            None => Err(self.delivery_error(format!(
                "bot API returned an unreadable reply ({status})"
            ))),
        }
    }
}
