// src/connectors/binance.rs
use crate::connectors::messages::{BinanceErrorBody, BinanceKline};
use crate::connectors::traits::MarketDataSource;
use crate::error::{BotError, Result};
use crate::types::Candle;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const KLINE_INTERVALS: [&str; 16] = [
    "1s", "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w",
    "1M",
];
const MAX_KLINE_LIMIT: usize = 1000;

pub struct BinanceClient {
    api_key: String,
    http_client: Client,
    base_rest_url: String,
}

impl BinanceClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::DataUnavailable(format!("http client: {}", e)))?;

        Ok(Self {
            api_key,
            http_client,
            base_rest_url: "https://api.binance.com".to_string(),
        })
    }

    /// Connectivity probe against /api/v3/ping.
    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}/api/v3/ping", self.base_rest_url);
        self.http_client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BotError::DataUnavailable(format!("ping failed: {}", e)))?;
        info!("Binance REST reachable at {}", self.base_rest_url);
        Ok(())
    }

    fn klines_url(&self, pair: &str, timeframe: &str, limit: usize) -> Result<Url> {
        if !KLINE_INTERVALS.contains(&timeframe) {
            return Err(BotError::DataUnavailable(format!(
                "unsupported timeframe '{}'",
                timeframe
            )));
        }
        if limit == 0 || limit > MAX_KLINE_LIMIT {
            return Err(BotError::DataUnavailable(format!(
                "lookback {} outside 1..={}",
                limit, MAX_KLINE_LIMIT
            )));
        }

        let symbol = exchange_symbol(pair)?;
        Url::parse_with_params(
            &format!("{}/api/v3/klines", self.base_rest_url),
            &[
                ("symbol", symbol),
                ("interval", timeframe.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .map_err(|e| BotError::DataUnavailable(format!("bad klines url: {}", e)))
    }
}

/// "ETH/USDT" -> "ETHUSDT". Symbols already in exchange form pass through.
pub fn exchange_symbol(pair: &str) -> Result<String> {
    let symbol: String = pair
        .chars()
        .filter(|c| *c != '/')
        .collect::<String>()
        .to_uppercase();

    let well_formed = pair.matches('/').count() <= 1
        && !symbol.is_empty()
        && symbol.chars().all(|c| c.is_ascii_alphanumeric());
    if !well_formed {
        return Err(BotError::DataUnavailable(format!(
            "unsupported pair '{}'",
            pair
        )));
    }
    Ok(symbol)
}

/// Parses a klines response body. Any malformed row rejects the whole series.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>> {
    let rows: Vec<BinanceKline> = serde_json::from_str(body)
        .map_err(|e| BotError::DataUnavailable(format!("malformed klines response: {}", e)))?;

    rows.into_iter()
        .map(|row| {
            let open_time = row.0;
            row.into_candle().ok_or_else(|| {
                BotError::DataUnavailable(format!("kline open time {} out of range", open_time))
            })
        })
        .collect()
}

#[async_trait]
impl MarketDataSource for BinanceClient {
    async fn fetch_candles(
        &self,
        pair: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let url = self.klines_url(pair, timeframe, limit)?;

        let mut request = self.http_client.get(url);
        if !self.api_key.is_empty() {
            request = request.header("X-MBX-APIKEY", &self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BotError::DataUnavailable(format!("klines request failed: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::DataUnavailable(format!("klines body unreadable: {}", e)))?;

        if !status.is_success() {
            let reason = match serde_json::from_str::<BinanceErrorBody>(&body) {
                Ok(err) => format!("{} (code {})", err.msg, err.code),
                Err(_) => body,
            };
            return Err(BotError::DataUnavailable(format!(
                "klines HTTP {}: {}",
                status, reason
            )));
        }

        let candles = parse_klines(&body)?;
        debug!("Fetched {} {} candles for {}", candles.len(), timeframe, pair);
        Ok(candles)
    }
}
