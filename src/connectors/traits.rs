use crate::error::Result;
use crate::types::Candle;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Last `limit` candles for `pair` (e.g. "ETH/USDT"), oldest first.
    /// Fails with `DataUnavailable`; never returns a partial series.
    async fn fetch_candles(&self, pair: &str, timeframe: &str, limit: usize)
        -> Result<Vec<Candle>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers a Markdown-formatted message to the configured destination.
    async fn send_message(&self, text: &str) -> Result<()>;
}
