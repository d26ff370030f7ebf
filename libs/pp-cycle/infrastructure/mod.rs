//! Infrastructure Layer
//!
//! Contains implementations of external interfaces (configuration, logging,
//! connectors). Connectors implement the collaborator traits declared by the
//! application layer.

pub mod config;
pub mod heartbeat;
pub mod logging;
pub mod paper;
pub mod shutdown;

// Re-export config types
pub use config::{ConfigError, PPCycleConfig, PaperTradeConfig, RunnerConfig, StrategiesConfig};

// Re-export infrastructure services
pub use heartbeat::Heartbeat;
pub use logging::{init_tracing_with_level, TracingEventSink};
pub use paper::{is_paper_trade_exchange, PaperExchange, PaperTradeError};
pub use shutdown::ShutdownManager;
