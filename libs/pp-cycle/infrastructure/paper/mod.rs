//! Paper trade connector
//!
//! Backs `*_paper_trade` exchanges so strategies can run without a live venue.

mod exchange;

pub use exchange::PaperExchange;

use crate::application::strategies::StrategyError;
use crate::domain::OrderType;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaperTradeError {
    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    #[error("Unknown trading pair: {0}")]
    UnknownTradingPair(String),

    #[error("Unknown order: {0}")]
    UnknownOrder(String),

    #[error("Order type {0} is not supported by the paper exchange")]
    UnsupportedOrderType(OrderType),

    #[error("Invalid order: amount {amount}, price {price}")]
    InvalidOrder { amount: Decimal, price: Decimal },

    #[error("Insufficient {asset} balance: required {required}, available {available}")]
    InsufficientBalance {
        asset: String,
        required: Decimal,
        available: Decimal,
    },
}

impl From<PaperTradeError> for StrategyError {
    fn from(err: PaperTradeError) -> Self {
        StrategyError::Connector(err.to_string())
    }
}

/// True for exchange names served by the paper connector
pub fn is_paper_trade_exchange(exchange: &str) -> bool {
    exchange.ends_with("_paper_trade")
}
