// src/config.rs

use crate::error::BotError;
use config::{Config, ConfigError, Environment, Map};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Credentials are read verbatim from these variables (no prefix).
const SECRET_VARS: [&str; 4] = [
    "BINANCE_API_KEY",
    "BINANCE_SECRET_KEY",
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_CHAT_ID",
];

#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    pub pair: String,
    pub timeframe: String,
    pub lookback: usize,
    pub sma_window: usize,
    pub reward_pct: Decimal,
    pub risk_pct: Decimal,
    pub price_tick: Decimal,
    pub daily_max_signals: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
    pub poll_interval_secs: u64,
    pub cooldown_secs: u64,
}

impl ScheduleConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// No Debug: holds credentials.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub binance_api_key: String,
    pub binance_secret_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub http_timeout_secs: u64,
    pub log_dir: Option<String>,
    pub strategy: StrategyConfig,
    pub schedule: ScheduleConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Reads the process environment. Call after `dotenvy::dotenv()`.
    pub fn new() -> Result<Self, BotError> {
        Ok(Self::load(None)?)
    }

    /// `vars` replaces the process environment when given.
    fn load(vars: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("binance_api_key", "")?
            .set_default("binance_secret_key", "")?
            .set_default("telegram_bot_token", "")?
            .set_default("telegram_chat_id", "")?
            .set_default("http_timeout_secs", 10)?
            .set_default("strategy.pair", "ETH/USDT")?
            .set_default("strategy.timeframe", "15m")?
            .set_default("strategy.lookback", 100)?
            .set_default("strategy.sma_window", 20)?
            .set_default("strategy.reward_pct", "0.035")?
            .set_default("strategy.risk_pct", "0.01")?
            .set_default("strategy.price_tick", "0.01")?
            .set_default("strategy.daily_max_signals", 4)?
            .set_default("schedule.poll_interval_secs", 3600)?
            .set_default("schedule.cooldown_secs", 86_400)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?;

        for var in SECRET_VARS {
            let value = match &vars {
                Some(map) => map.get(var).cloned(),
                None => std::env::var(var).ok(),
            };
            builder = builder.set_override_option(var.to_lowercase(), value)?;
        }

        let config = builder
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;
        config.try_deserialize()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Names of credential variables that are unset or empty.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let values = [
            &self.binance_api_key,
            &self.binance_secret_key,
            &self.telegram_bot_token,
            &self.telegram_chat_id,
        ];
        SECRET_VARS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}
