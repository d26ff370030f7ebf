//! Logging initialization and the tracing-backed event sink

use crate::application::strategies::EventSink;
use tracing::{debug, error, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;

/// Initialize tracing at `level`; `RUST_LOG` takes precedence when set
pub fn init_tracing_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .try_init();
}

/// Target used for user-facing notifications
pub const NOTIFY_TARGET: &str = "notify";

/// Sends strategy logs and notifications through `tracing`
#[derive(Debug, Clone)]
pub struct TracingEventSink {
    strategy: String,
}

impl TracingEventSink {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
        }
    }
}

impl EventSink for TracingEventSink {
    fn log(&self, level: Level, message: &str) {
        let strategy = self.strategy.as_str();
        match level {
            Level::ERROR => error!(strategy = %strategy, "{}", message),
            Level::WARN => warn!(strategy = %strategy, "{}", message),
            Level::INFO => info!(strategy = %strategy, "{}", message),
            Level::DEBUG => debug!(strategy = %strategy, "{}", message),
            _ => trace!(strategy = %strategy, "{}", message),
        }
    }

    fn notify(&self, message: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        info!(target: NOTIFY_TARGET, "({}) {}", timestamp, message);
    }
}
