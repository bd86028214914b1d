// src/strategies/traits.rs
use crate::types::{Candle, Signal};

pub trait Strategy: Send + Sync {
    fn name(&self) -> String;

    // Pure function of the series (oldest first); no internal state changes.
    fn evaluate(&self, candles: &[Candle]) -> Signal;
}
