// src/types.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// One kline: a fixed-duration OHLCV window of a trading pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Long,
    Short,
    None,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::Long => "LONG",
            Signal::Short => "SHORT",
            Signal::None => "No Signal",
        };
        f.write_str(label)
    }
}

/// Entry/target/stop levels announced for a single signal.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeNotification {
    pub pair: String,
    pub signal: Signal,
    pub entry_price: Decimal,
    pub take_profit: Decimal,
    pub stop_loss: Decimal,
}

/// Signals emitted since the last reset. Private to the signal loop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QuotaState {
    trades_emitted_today: u32,
}

impl QuotaState {
    pub fn emitted(&self) -> u32 {
        self.trades_emitted_today
    }

    pub fn has_capacity(&self, daily_max: u32) -> bool {
        self.trades_emitted_today < daily_max
    }

    pub fn record(&mut self) {
        self.trades_emitted_today += 1;
    }

    pub fn is_exhausted(&self, daily_max: u32) -> bool {
        self.trades_emitted_today >= daily_max
    }

    pub fn reset(&mut self) {
        self.trades_emitted_today = 0;
    }
}
