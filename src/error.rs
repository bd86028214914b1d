// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    /// Market data could not be fetched or parsed. Recovered by the signal loop.
    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    /// A notification could not be delivered. Recovered by the notifier.
    #[error("notification dispatch failed: {0}")]
    DispatchFailure(String),

    #[error("failed to bind liveness listener on {addr}: {source}")]
    ListenerBind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("liveness server stopped: {0}")]
    Server(#[source] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, BotError>;
