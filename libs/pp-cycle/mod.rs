//! Price Point Cycle Strategy
//!
//! A maker strategy that keeps one buy and one sell order at fixed levels
//! around a configured base price, re-quoting on a fixed interval.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use application::{
    BudgetChecker, EventSink, FillFeed, OrderGateway, PPCycleStrategy, Strategy,
    StrategyContext, StrategyError, StrategyResult, StrategyRunner,
};
pub use domain::{
    ActiveOrder, FillEvent, MarketsConfig, OrderCandidate, OrderType, PricePoints, Side,
};
pub use infrastructure::{
    init_tracing_with_level, PPCycleConfig, PaperExchange, ShutdownManager, StrategiesConfig,
    TracingEventSink,
};
