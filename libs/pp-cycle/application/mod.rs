//! Application Layer
//!
//! Contains use cases and application services.
//! This layer depends on domain and infrastructure layers.

pub mod runner;
pub mod strategies;

pub use runner::{unix_now, FillFeed, RunnerStats, StrategyRunner};
pub use strategies::{
    BudgetChecker, EventSink, OrderGateway, PPCycleStrategy, Strategy, StrategyContext,
    StrategyError, StrategyResult,
};
