// src/core/engine.rs
use crate::config::{ScheduleConfig, StrategyConfig};
use crate::connectors::traits::MarketDataSource;
use crate::core::notifier::SignalNotifier;
use crate::strategies::traits::Strategy;
use crate::types::{QuotaState, Signal};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct SignalEngine<S> {
    config: StrategyConfig,
    schedule: ScheduleConfig,
    market_data: Box<dyn MarketDataSource>,
    strategy: S,
    notifier: SignalNotifier,
    quota: QuotaState,
}

impl<S> SignalEngine<S>
where
    S: Strategy,
{
    pub fn new(
        config: StrategyConfig,
        schedule: ScheduleConfig,
        market_data: Box<dyn MarketDataSource>,
        strategy: S,
        notifier: SignalNotifier,
    ) -> Self {
        Self {
            config,
            schedule,
            market_data,
            strategy,
            notifier,
            quota: QuotaState::default(),
        }
    }

    pub fn quota(&self) -> &QuotaState {
        &self.quota
    }

    /// Runs until `shutdown` flips to true (or its sender is dropped).
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Signal loop starting: {} on {} {} (max {} signals per day)",
            self.strategy.name(),
            self.config.pair,
            self.config.timeframe,
            self.config.daily_max_signals
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let delay = self.tick().await;

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => {}
            }
            if shutdown.has_changed().is_err() {
                break;
            }
        }

        info!("Signal loop stopped");
    }

    /// One POLLING iteration. Returns how long to sleep before the next one.
    pub async fn tick(&mut self) -> Duration {
        let candles = match self
            .market_data
            .fetch_candles(
                &self.config.pair,
                &self.config.timeframe,
                self.config.lookback,
            )
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                warn!("Error fetching market data: {}", e);
                return self.schedule.poll_interval();
            }
        };

        let signal = self.strategy.evaluate(&candles);
        debug!(
            "Evaluated {} candles: {} ({}/{} signals today)",
            candles.len(),
            signal,
            self.quota.emitted(),
            self.config.daily_max_signals
        );

        if signal != Signal::None && self.quota.has_capacity(self.config.daily_max_signals) {
            if let Some(latest) = candles.last() {
                self.notifier.notify(signal, latest.close).await;
                // Counts the attempt, delivered or not.
                self.quota.record();
            }
        }

        if self.quota.is_exhausted(self.config.daily_max_signals) {
            self.quota.reset();
            info!(
                "Daily quota of {} signals reached, cooling down for {:?}",
                self.config.daily_max_signals,
                self.schedule.cooldown()
            );
            self.schedule.cooldown()
        } else {
            self.schedule.poll_interval()
        }
    }
}
