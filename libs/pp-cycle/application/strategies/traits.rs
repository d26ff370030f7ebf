//! Strategy trait definition
//!
//! Defines the contract that all strategies must implement, plus the
//! collaborator traits through which a strategy reaches its host.

use crate::domain::{ActiveOrder, FillEvent, OrderCandidate, OrderType};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::Level;

/// Result type for strategy operations
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Errors that can occur in strategy execution
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Connector error: {0}")]
    Connector(String),

    #[error("Budget check failed: {0}")]
    Budget(String),

    #[error("Strategy error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Order lifecycle operations offered by a connector
pub trait OrderGateway: Send + Sync {
    /// Orders this strategy has resting on `market`
    fn active_orders(&self, market: &str) -> StrategyResult<Vec<ActiveOrder>>;

    fn cancel(&self, market: &str, trading_pair: &str, client_order_id: &str) -> StrategyResult<()>;

    /// Place a buy order, returning its client order id
    fn buy(
        &self,
        market: &str,
        trading_pair: &str,
        amount: Decimal,
        order_type: OrderType,
        price: Decimal,
    ) -> StrategyResult<String>;

    /// Place a sell order, returning its client order id
    fn sell(
        &self,
        market: &str,
        trading_pair: &str,
        amount: Decimal,
        order_type: OrderType,
        price: Decimal,
    ) -> StrategyResult<String>;
}

/// Shrinks a batch of candidates to what the available balance supports.
///
/// Implementations never add candidates and never return one that was not
/// offered. With `all_or_none` the result is either the full batch or empty.
pub trait BudgetChecker: Send + Sync {
    fn adjust_candidates(
        &self,
        candidates: Vec<OrderCandidate>,
        all_or_none: bool,
    ) -> StrategyResult<Vec<OrderCandidate>>;
}

/// Log and user notification sinks
pub trait EventSink: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn notify(&self, message: &str);
}

/// Collaborators handed to a strategy at construction
#[derive(Clone)]
pub struct StrategyContext {
    /// Order placement, cancellation and listing
    pub orders: Arc<dyn OrderGateway>,
    /// Balance checks for proposed orders
    pub budget: Arc<dyn BudgetChecker>,
    /// Strategy log and user notifications
    pub events: Arc<dyn EventSink>,
}

impl StrategyContext {
    pub fn new(
        orders: Arc<dyn OrderGateway>,
        budget: Arc<dyn BudgetChecker>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            orders,
            budget,
            events,
        }
    }
}

/// Trait that all strategies must implement
///
/// The host calls every method from a single task; a call runs to completion
/// before the next one starts.
pub trait Strategy: Send {
    /// Get the strategy name for logging and identification
    fn name(&self) -> &str;

    /// Get a description of what this strategy does
    fn description(&self) -> &str;

    /// Called on every scheduler tick with the current time in seconds
    fn on_tick(&mut self, now: f64) -> StrategyResult<()>;

    /// Called once per fill reported by the connector
    fn did_fill_order(&mut self, _event: &FillEvent) {}

    /// Called when the host stops. The default implementation does nothing.
    fn stop(&mut self) -> StrategyResult<()> {
        Ok(())
    }
}
