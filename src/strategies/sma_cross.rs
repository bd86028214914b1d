use crate::strategies::traits::Strategy;
use crate::types::{Candle, Signal};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Compares the latest close against the simple moving average of the
/// trailing `window` closes.
pub struct SmaCross {
    window: usize,
}

impl SmaCross {
    /// Creates a new SmaCross strategy.
    ///
    /// # Arguments
    /// * `window` - Number of trailing closes in the moving average (e.g., 20).
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Mean of the last `window` closes, or None if the series is shorter.
    pub fn rolling_mean(&self, candles: &[Candle]) -> Option<Decimal> {
        if self.window == 0 || candles.len() < self.window {
            return None;
        }
        let tail = &candles[candles.len() - self.window..];
        let sum: Decimal = tail.iter().map(|c| c.close).sum();
        Some(sum / Decimal::from(self.window))
    }
}

impl Strategy for SmaCross {
    fn name(&self) -> String {
        format!("SMA{} cross", self.window)
    }

    fn evaluate(&self, candles: &[Candle]) -> Signal {
        // A short window would not be the configured average at all.
        let (Some(mean), Some(latest)) = (self.rolling_mean(candles), candles.last()) else {
            return Signal::None;
        };

        match latest.close.cmp(&mean) {
            Ordering::Greater => Signal::Long,
            Ordering::Less => Signal::Short,
            Ordering::Equal => Signal::None,
        }
    }
}
