//! Strategy runner
//!
//! Host-side tick loop: forwards fills, ticks the strategy, logs a periodic
//! status line and stops the strategy on shutdown.

use crate::application::strategies::Strategy;
use crate::domain::FillEvent;
use crate::infrastructure::{Heartbeat, RunnerConfig, ShutdownManager};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Source of fills for the markets a strategy trades
pub trait FillFeed: Send + Sync {
    /// Fills that happened up to `now`
    fn poll_fills(&self, now: f64) -> Vec<FillEvent>;

    /// One-line status for heartbeat logging
    fn status(&self) -> String;
}

/// Counters kept across the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerStats {
    pub ticks: u64,
    pub fills: u64,
    pub tick_errors: u64,
}

impl std::fmt::Display for RunnerStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ticks: {}, fills: {}, tick errors: {}",
            self.ticks, self.fills, self.tick_errors
        )
    }
}

pub struct StrategyRunner {
    strategy: Box<dyn Strategy>,
    feed: Arc<dyn FillFeed>,
    heartbeat: Heartbeat,
    tick_interval: Duration,
    stats: RunnerStats,
}

impl StrategyRunner {
    pub fn new(
        strategy: Box<dyn Strategy>,
        feed: Arc<dyn FillFeed>,
        config: &RunnerConfig,
    ) -> Self {
        Self {
            strategy,
            feed,
            heartbeat: Heartbeat::new(config.heartbeat_interval_secs),
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            stats: RunnerStats::default(),
        }
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    pub fn stats(&self) -> RunnerStats {
        self.stats
    }

    /// Run one scheduler step at `now`: fills first, then the strategy tick
    pub fn step(&mut self, now: f64) {
        for fill in self.feed.poll_fills(now) {
            self.stats.fills += 1;
            self.strategy.did_fill_order(&fill);
        }

        self.stats.ticks += 1;
        if let Err(e) = self.strategy.on_tick(now) {
            self.stats.tick_errors += 1;
            error!("{} tick failed: {}", self.strategy.name(), e);
        }

        if self.heartbeat.should_beat(now) {
            info!("[{}] {}", self.strategy.name(), self.feed.status());
            self.heartbeat.beat(now);
        }
    }

    /// Tick until shutdown is requested, then stop the strategy
    pub async fn run(&mut self, shutdown: &ShutdownManager) -> RunnerStats {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while shutdown.is_running() {
            interval.tick().await;
            if !shutdown.is_running() {
                break;
            }
            self.step(unix_now());
        }

        info!("Stopping strategy: {}", self.strategy.name());
        if let Err(e) = self.strategy.stop() {
            error!("Strategy stop failed: {}", e);
        }
        self.stats
    }
}

/// Wall clock in seconds since the unix epoch
pub fn unix_now() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
