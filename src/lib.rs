// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod config;
pub mod error;
pub mod notify;
pub mod poller;
pub mod review;
pub mod telemetry;
pub mod verdict;

pub use crate::config::Config;
pub use crate::error::{ConfigError, PollError};
pub use crate::notify::{Notifier, TelegramNotifier};
pub use crate::poller::{CycleOutcome, Intervals, Poller};
pub use crate::review::{ReviewClient, StatusResponse, StatusSource, SubmissionRecord};

/// Build the production poller from a loaded config, starting at `initial_cursor`.
pub fn build_poller(cfg: &Config, initial_cursor: u64) -> Poller {
    let source = ReviewClient::new(cfg.review_url.clone(), cfg.review_token.clone())
        .with_timeout(cfg.request_timeout);
    let notifier = TelegramNotifier::new(cfg.bot_token.clone(), cfg.chat_id.clone())
        .with_api_base(cfg.bot_api_url.clone())
        .with_timeout(cfg.request_timeout);
    let intervals = Intervals {
        steady: cfg.poll_interval,
        backoff: cfg.retry_interval,
    };
    Poller::new(Box::new(source), Box::new(notifier), intervals, initial_cursor)
}
