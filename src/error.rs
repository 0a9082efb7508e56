// src/error.rs
//! Classified errors for the poll cycle and for startup configuration.

use thiserror::Error;

/// Boxed cause carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong inside one poll cycle. All variants are recoverable:
/// the poller logs them and retries after the backoff interval.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("review API request failed: url={url}, from_date={from_date}: {source}")]
    Transport {
        url: String,
        from_date: u64,
        #[source]
        source: BoxError,
    },

    #[error("review API returned an error: {message} (value={value}, url={url}, from_date={from_date})")]
    ApiPayload {
        url: String,
        from_date: u64,
        value: String,
        message: String,
    },

    #[error("submission {name:?} has unknown status {status:?}")]
    UnknownStatus { name: String, status: String },

    #[error("failed to deliver message to chat {chat_id}: {reason}")]
    Delivery { chat_id: String, reason: String },
}

impl PollError {
    /// Stable label for logs and metric series.
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Transport { .. } => "transport",
            PollError::ApiPayload { .. } => "api_payload",
            PollError::UnknownStatus { .. } => "unknown_status",
            PollError::Delivery { .. } => "delivery",
        }
    }
}

/// Fatal startup errors. Never produced once the loop is running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_are_stable() {
        let err = PollError::UnknownStatus {
            name: "hw".into(),
            status: "pending".into(),
        };
        assert_eq!(err.kind(), "unknown_status");

        let err = PollError::Delivery {
            chat_id: "42".into(),
            reason: "chat not found".into(),
        };
        assert_eq!(err.kind(), "delivery");
    }

    #[test]
    fn transport_message_carries_request_context() {
        let err = PollError::Transport {
            url: "http://api.test/statuses".into(),
            from_date: 1700,
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "refused",
            )),
        };
        let text = err.to_string();
        assert!(text.contains("http://api.test/statuses"));
        assert!(text.contains("from_date=1700"));
        assert!(text.contains("refused"));
    }
}
