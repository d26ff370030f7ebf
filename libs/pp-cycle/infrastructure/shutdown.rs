//! Graceful shutdown management

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

/// Shared running flag, cleared on Ctrl+C or by `trigger`
#[derive(Debug, Clone)]
pub struct ShutdownManager {
    running: Arc<AtomicBool>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Spawn a Ctrl+C signal handler that triggers shutdown
    pub fn spawn_signal_handler(&self) {
        let manager = self.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("");
                info!("Received shutdown signal (Ctrl+C)");
                info!("Shutting down gracefully...");
                manager.trigger();
            }
        });
    }

    /// Request shutdown
    pub fn trigger(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Check if the process should continue running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}
