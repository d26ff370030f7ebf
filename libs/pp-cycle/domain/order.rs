//! Order domain types
//!
//! Plain data shared by the strategy and whatever connector executes it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type accepted by connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
        }
    }
}

/// An order the strategy would like to place, before budget checks
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCandidate {
    pub trading_pair: String,
    pub is_maker: bool,
    pub order_type: OrderType,
    pub side: Side,
    pub amount: Decimal,
    pub price: Decimal,
}

impl OrderCandidate {
    /// Maker limit order at a fixed price
    pub fn maker_limit(
        trading_pair: impl Into<String>,
        side: Side,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            trading_pair: trading_pair.into(),
            is_maker: true,
            order_type: OrderType::Limit,
            side,
            amount,
            price,
        }
    }

    /// Quote-asset value of the order
    pub fn notional(&self) -> Decimal {
        self.amount * self.price
    }
}

/// An order resting on a market
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveOrder {
    pub client_order_id: String,
    pub trading_pair: String,
    pub side: Side,
    pub order_type: OrderType,
    pub price: Decimal,
    pub amount: Decimal,
    /// Timestamp (seconds) the order was accepted
    pub created_at: f64,
}

/// Notification that an order matched, fully or partially
#[derive(Debug, Clone, PartialEq)]
pub struct FillEvent {
    pub timestamp: f64,
    pub client_order_id: String,
    pub trading_pair: String,
    pub trade_type: Side,
    pub order_type: OrderType,
    pub price: Decimal,
    pub amount: Decimal,
}

/// Split a `BASE-QUOTE` trading pair into its assets
pub fn split_trading_pair(trading_pair: &str) -> Option<(&str, &str)> {
    let (base, quote) = trading_pair.split_once('-')?;
    if base.is_empty() || quote.is_empty() || quote.contains('-') {
        return None;
    }
    Some((base, quote))
}
