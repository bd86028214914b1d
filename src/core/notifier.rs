// src/core/notifier.rs
use crate::config::StrategyConfig;
use crate::connectors::traits::NotificationSink;
use crate::types::{Signal, TradeNotification};
use crate::utils::precision::offset_price;
use rust_decimal::Decimal;
use tracing::{error, info};

/// Builds the entry/target/stop levels for a directional signal.
/// Returns None for `Signal::None`.
pub fn compose(
    pair: &str,
    signal: Signal,
    entry_price: Decimal,
    reward_pct: Decimal,
    risk_pct: Decimal,
    tick_size: Decimal,
) -> Option<TradeNotification> {
    let stop_pct = match signal {
        Signal::Long => -risk_pct,
        Signal::Short => risk_pct,
        Signal::None => return None,
    };

    // Target is entry * (1 + reward) for both directions.
    Some(TradeNotification {
        pair: pair.to_string(),
        signal,
        entry_price,
        take_profit: offset_price(entry_price, reward_pct, tick_size),
        stop_loss: offset_price(entry_price, stop_pct, tick_size),
    })
}

/// Telegram Markdown body for a notification.
pub fn render(n: &TradeNotification) -> String {
    let hashtag: String = n
        .pair
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!(
        "📢 *New Trade Signal!*\n\
         🔹 Pair: {}\n\
         🔹 Type: {}\n\
         🔹 Entry: {}\n\
         🔹 Take Profit: {}\n\
         🔹 Stop Loss: {}\n\
         #{} #AutoSignal",
        n.pair,
        n.signal,
        n.entry_price.normalize(),
        n.take_profit,
        n.stop_loss,
        hashtag.to_uppercase(),
    )
}

pub struct SignalNotifier {
    sink: Box<dyn NotificationSink>,
    config: StrategyConfig,
}

impl SignalNotifier {
    pub fn new(sink: Box<dyn NotificationSink>, config: StrategyConfig) -> Self {
        Self { sink, config }
    }

    /// Composes and dispatches one notification. Delivery failures are
    /// logged and dropped; nothing is retried.
    pub async fn notify(&self, signal: Signal, entry_price: Decimal) {
        let Some(notification) = compose(
            &self.config.pair,
            signal,
            entry_price,
            self.config.reward_pct,
            self.config.risk_pct,
            self.config.price_tick,
        ) else {
            return;
        };

        match self.sink.send_message(&render(&notification)).await {
            Ok(()) => info!(
                "📢 Sent {} {} @ {} (TP {} / SL {})",
                notification.signal,
                notification.pair,
                notification.entry_price,
                notification.take_profit,
                notification.stop_loss
            ),
            Err(e) => error!("Error sending signal to Telegram: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::traits::MockNotificationSink;
    use crate::error::BotError;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn strategy_config() -> StrategyConfig {
        StrategyConfig {
            pair: "ETH/USDT".to_string(),
            timeframe: "15m".to_string(),
            lookback: 100,
            sma_window: 20,
            reward_pct: d("0.035"),
            risk_pct: d("0.01"),
            price_tick: d("0.01"),
            daily_max_signals: 4,
        }
    }

    /// Levels at the default 3.5% reward, 1% risk, 0.01 tick.
    fn levels(signal: Signal, entry: &str) -> Option<TradeNotification> {
        compose("ETH/USDT", signal, d(entry), d("0.035"), d("0.01"), d("0.01"))
    }

    #[test]
    fn long_levels() {
        let n = levels(Signal::Long, "2000").unwrap();
        assert_eq!(n.take_profit, d("2070.00"));
        assert_eq!(n.stop_loss, d("1980.00"));
    }

    #[test]
    fn short_levels() {
        let n = levels(Signal::Short, "2000").unwrap();
        assert_eq!(n.take_profit, d("2070.00"));
        assert_eq!(n.stop_loss, d("2020.00"));
    }

    #[test]
    fn levels_are_rounded_to_cents() {
        let n = levels(Signal::Long, "1234.567").unwrap();
        assert_eq!(n.take_profit, d("1277.78"));
        assert_eq!(n.stop_loss, d("1222.22"));
    }

    #[test]
    fn no_signal_composes_nothing() {
        assert!(levels(Signal::None, "2000").is_none());
    }

    #[test]
    fn rendered_message_embeds_all_levels() {
        let text = render(&levels(Signal::Short, "2000.00000000").unwrap());

        assert!(text.contains("Pair: ETH/USDT"));
        assert!(text.contains("Type: SHORT"));
        assert!(text.contains("Entry: 2000\n"));
        assert!(text.contains("Take Profit: 2070.00"));
        assert!(text.contains("Stop Loss: 2020.00"));
        assert!(text.ends_with("#ETHUSDT #AutoSignal"));
    }

    #[tokio::test]
    async fn no_signal_dispatches_nothing() {
        let mut sink = MockNotificationSink::new();
        sink.expect_send_message().never();

        let notifier = SignalNotifier::new(Box::new(sink), strategy_config());
        notifier.notify(Signal::None, d("2000")).await;
    }

    #[tokio::test]
    async fn dispatches_rendered_message_once() {
        let mut sink = MockNotificationSink::new();
        sink.expect_send_message()
            .withf(|text: &str| text.contains("Type: LONG") && text.contains("Stop Loss: 1980.00"))
            .times(1)
            .returning(|_| Ok(()));

        let notifier = SignalNotifier::new(Box::new(sink), strategy_config());
        notifier.notify(Signal::Long, d("2000")).await;
    }

    #[tokio::test]
    async fn dispatch_failure_is_swallowed() {
        let mut sink = MockNotificationSink::new();
        sink.expect_send_message()
            .times(1)
            .returning(|_| Err(BotError::DispatchFailure("timeout".into())));

        let notifier = SignalNotifier::new(Box::new(sink), strategy_config());
        notifier.notify(Signal::Short, d("2000")).await;
    }
}
