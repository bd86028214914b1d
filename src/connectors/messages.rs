// src/connectors/messages.rs
use crate::types::Candle;
use chrono::DateTime;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::Deserialize;

/// One row of GET /api/v3/klines. Binance sends klines as positional arrays:
/// [open_time, open, high, low, close, volume, close_time, quote_volume,
///  trades, taker_buy_base, taker_buy_quote, ignore]
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct BinanceKline(
    pub i64,     // open time (ms)
    pub Decimal, // open
    pub Decimal, // high
    pub Decimal, // low
    pub Decimal, // close
    pub Decimal, // volume
    pub IgnoredAny,
    pub IgnoredAny,
    pub IgnoredAny,
    pub IgnoredAny,
    pub IgnoredAny,
    pub IgnoredAny,
);

impl BinanceKline {
    pub fn into_candle(self) -> Option<Candle> {
        Some(Candle {
            open_time: DateTime::from_timestamp_millis(self.0)?,
            open: self.1,
            high: self.2,
            low: self.3,
            close: self.4,
            volume: self.5,
        })
    }
}

/// Error body returned by Binance on 4xx, e.g. {"code":-1121,"msg":"Invalid symbol."}
#[derive(Debug, Deserialize)]
pub struct BinanceErrorBody {
    pub code: i64,
    pub msg: String,
}

/// Envelope of every Telegram Bot API response.
#[derive(Debug, Deserialize)]
pub struct TelegramResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}
