//! Homework status bot: binary entrypoint.
//! Loads `.env`, validates configuration, then polls until the process is killed.

use std::path::PathBuf;

use anyhow::Context;
use homework_status_bot::{build_poller, config::ENV_LOG_FILE, telemetry, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();

    let log_file = std::env::var_os(ENV_LOG_FILE).map(PathBuf::from);
    telemetry::init(log_file.as_deref())?;

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "configuration error, not starting");
            return Err(e).context("loading configuration");
        }
    };
    tracing::info!(config = ?cfg, "configuration loaded");

    // Start from "now": history before startup is not replayed.
    let initial_cursor = chrono::Utc::now().timestamp().max(0) as u64;
    build_poller(&cfg, initial_cursor).run().await;
    Ok(())
}
