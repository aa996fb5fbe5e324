use anyhow::Result;
use chrono::Utc;
use dotenv::dotenv;
use homework_rust_core::clients::{PracticumClient, TelegramClient};
use homework_rust_core::models::initial_cursor;
use log::{error, info, warn};
use status_notifier_rust::{
    check_tokens, logging, Config, Credentials, StatusTracker, TokioSleeper,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init();

    if !check_tokens(&Credentials::from_env()) {
        error!("CRITICAL: stopping, required environment variables are missing");
        std::process::exit(1);
    }

    let cfg = Config::from_env()?;
    info!(
        "Config: endpoint={} retry_period={}s http_timeout={}s",
        cfg.practicum_endpoint,
        cfg.retry_period.as_secs(),
        cfg.http_timeout.as_secs(),
    );

    let source = PracticumClient::new(
        cfg.practicum_endpoint.clone(),
        cfg.practicum_token.clone(),
        cfg.http_timeout,
    );
    let sink = TelegramClient::new(
        cfg.telegram_api_base_url.clone(),
        cfg.telegram_token.clone(),
        cfg.telegram_chat_id.clone(),
        cfg.http_timeout,
    );

    let mut tracker = StatusTracker::new(
        Box::new(source),
        Box::new(sink),
        initial_cursor(Utc::now()),
        cfg.retry_period,
    );

    info!("Bot started (from_date={})", tracker.cursor());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    tracker.run(&TokioSleeper, shutdown).await;

    info!("Bot stopped");
    Ok(())
}
