//! Sends one test message to the configured chat, to check the bot token and chat id.

use anyhow::Context;
use homework_status_bot::{Config, Notifier, TelegramNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = Config::from_env()?;
    let notifier = TelegramNotifier::new(cfg.bot_token, cfg.chat_id)
        .with_api_base(cfg.bot_api_url)
        .with_timeout(cfg.request_timeout);

    let text = format!(
        "Homework status bot is connected ({}).",
        chrono::Utc::now().to_rfc3339()
    );
    notifier
        .send(&text)
        .await
        .context("sending test message")?;
    println!("notify-probe: delivered to chat {}", notifier.chat_id());
    Ok(())
}
