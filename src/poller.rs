// src/poller.rs
//! Poll loop: fetch → translate → notify → advance cursor → sleep, forever.

use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;

use crate::config::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_RETRY_INTERVAL_SECS};
use crate::error::PollError;
use crate::notify::Notifier;
use crate::review::StatusSource;
use crate::verdict;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("poll_cycles_total", "Poll cycles attempted.");
        describe_counter!(
            "poll_failures_total",
            "Poll cycles that ended in a classified error, by kind."
        );
        describe_counter!(
            "poll_notifications_total",
            "Status messages delivered to the chat."
        );
        describe_gauge!("poll_cursor", "Current from_date cursor (unix seconds).");
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intervals {
    /// Sleep after a successful cycle.
    pub steady: Duration,
    /// Sleep after a failed cycle; shorter than `steady`.
    pub backoff: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            steady: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            backoff: Duration::from_secs(DEFAULT_RETRY_INTERVAL_SECS),
        }
    }
}

/// Result of a cycle that completed without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleOutcome {
    pub notified: bool,
    pub cursor: u64,
}

pub struct Poller {
    source: Box<dyn StatusSource>,
    notifier: Box<dyn Notifier>,
    intervals: Intervals,
    cursor: u64,
}

impl Poller {
    pub fn new(
        source: Box<dyn StatusSource>,
        notifier: Box<dyn Notifier>,
        intervals: Intervals,
        initial_cursor: u64,
    ) -> Self {
        ensure_metrics_described();
        gauge!("poll_cursor").set(initial_cursor as f64);
        Self {
            source,
            notifier,
            intervals,
            cursor: initial_cursor,
        }
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn intervals(&self) -> Intervals {
        self.intervals
    }

    /// Run one cycle. The cursor only moves when every phase succeeded.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, PollError> {
        let rsp = self.source.fetch(self.cursor).await?;
        tracing::info!(
            homeworks = rsp.homeworks.len(),
            current_date = ?rsp.current_date,
            "review API responded"
        );

        // Newest first; older entries in the same window are not announced.
        let notified = match rsp.homeworks.first() {
            Some(record) => {
                let message = verdict::translate(record)?;
                self.notifier.send(&message).await?;
                counter!("poll_notifications_total").increment(1);
                tracing::info!(homework = %record.homework_name, "message sent");
                true
            }
            None => false,
        };

        if let Some(next) = rsp.current_date {
            let advanced = next.max(self.cursor);
            if advanced != self.cursor {
                tracing::info!(from = self.cursor, to = advanced, "cursor advanced");
            }
            self.cursor = advanced;
            gauge!("poll_cursor").set(self.cursor as f64);
        }

        Ok(CycleOutcome {
            notified,
            cursor: self.cursor,
        })
    }

    /// Run one cycle and pick how long to sleep before the next.
    pub async fn step(&mut self) -> Duration {
        counter!("poll_cycles_total").increment(1);
        match self.run_cycle().await {
            Ok(_) => self.intervals.steady,
            Err(e) => {
                counter!("poll_failures_total", "kind" => e.kind()).increment(1);
                tracing::error!(kind = e.kind(), cursor = self.cursor, error = %e, "poll cycle failed");
                self.intervals.backoff
            }
        }
    }

    /// Poll until the process is killed.
    pub async fn run(mut self) {
        tracing::info!(
            cursor = self.cursor,
            steady_secs = self.intervals.steady.as_secs(),
            backoff_secs = self.intervals.backoff.as_secs(),
            "poller started"
        );
        loop {
            let pause = self.step().await;
            tracing::debug!(?pause, "sleeping until next cycle");
            tokio::time::sleep(pause).await;
        }
    }
}
