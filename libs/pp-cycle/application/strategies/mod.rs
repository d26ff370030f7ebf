//! Strategies Module
//!
//! Strategy contract, collaborator traits and the strategies themselves.

pub mod pp_cycle;
pub mod traits;

// Re-exports
pub use pp_cycle::PPCycleStrategy;
pub use traits::{
    BudgetChecker, EventSink, OrderGateway, Strategy, StrategyContext, StrategyError,
    StrategyResult,
};
