// src/main.rs
use crate::config::AppConfig;
use crate::connectors::binance::BinanceClient;
use crate::connectors::telegram::TelegramClient;
use crate::core::engine::SignalEngine;
use crate::core::notifier::SignalNotifier;
use crate::strategies::sma_cross::SmaCross;
use anyhow::Context;
use dotenvy::dotenv;
use tokio::sync::watch;
use tracing::{error, info, warn};

mod config;
mod connectors;
mod core;
mod error;
mod logger;
mod server;
mod strategies;
mod types;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Load Configuration
    let config = AppConfig::new().context("failed to load configuration")?;
    let _log_guards = logger::setup_logger(config.log_dir.as_deref());

    info!("========================================");
    info!("       SMA SIGNAL BOT - v{}", env!("CARGO_PKG_VERSION"));
    info!("========================================");
    info!("Pair:      {}", config.strategy.pair);
    info!("Timeframe: {}", config.strategy.timeframe);
    info!("Quota:     {} signals / day", config.strategy.daily_max_signals);
    info!("========================================");

    for var in config.missing_secrets() {
        warn!("{} is not set; calls that need it will fail", var);
    }

    // 2. Liveness listener first; a failed bind is the only fatal error
    let listener = server::bind(&config.server.host, config.server.port).await?;

    // 3. Shutdown channel, flipped on Ctrl+C
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl+C received, shutting down");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                // Dropping the sender would stop everything; hold it instead.
                warn!("Cannot listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });

    // 4. Signal loop in the background
    let engine_handle = tokio::spawn(run_signal_loop(config, shutdown_rx.clone()));

    // 5. Liveness endpoint in the foreground
    server::serve(listener, shutdown_rx).await?;

    engine_handle.await.context("signal loop panicked")?;
    Ok(())
}

async fn run_signal_loop(config: AppConfig, shutdown: watch::Receiver<bool>) {
    let engine = match build_engine(&config).await {
        Ok(engine) => engine,
        Err(e) => {
            error!("Signal loop not started: {}", e);
            return;
        }
    };
    engine.run(shutdown).await;
}

async fn build_engine(config: &AppConfig) -> error::Result<SignalEngine<SmaCross>> {
    let market_data = BinanceClient::new(config.binance_api_key.clone(), config.http_timeout())?;
    if let Err(e) = market_data.ping().await {
        warn!("Startup connectivity check failed: {}", e);
    }

    let telegram = TelegramClient::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_id.clone(),
        config.http_timeout(),
    )?;
    let notifier = SignalNotifier::new(Box::new(telegram), config.strategy.clone());

    Ok(SignalEngine::new(
        config.strategy.clone(),
        config.schedule.clone(),
        Box::new(market_data),
        SmaCross::new(config.strategy.sma_window),
        notifier,
    ))
}
