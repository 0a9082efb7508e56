pub mod telegram;

pub use telegram::TelegramNotifier;

use crate::error::PollError;

/// Delivers a ready-made message to the configured destination.
/// Implementations make exactly one attempt; retrying is the poller's job.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> Result<(), PollError>;
}
