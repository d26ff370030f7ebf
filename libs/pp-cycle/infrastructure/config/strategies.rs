//! Strategy configuration
//!
//! Options for the price point cycle strategy.

use super::{ConfigError, Result};
use crate::domain::split_trading_pair;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration for the price point cycle strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PPCycleConfig {
    /// Exchange where the bot will trade
    #[serde(default = "default_exchange")]
    pub exchange: String,

    /// Trading pair in which the bot will place orders
    #[serde(default = "default_trading_pair")]
    pub trading_pair: String,

    /// Base price the two levels are centred on (8 decimal places)
    #[serde(default = "default_base_ask_price")]
    pub base_ask_price: Decimal,

    /// Total spread between buy and sell orders (8 decimal places)
    #[serde(default = "default_total_spread")]
    pub total_spread: Decimal,

    /// Order amount denominated in base asset (8 decimal places)
    #[serde(default = "default_order_amount")]
    pub order_amount: Decimal,

    /// Order refresh time in seconds
    #[serde(default = "default_order_refresh_time")]
    pub order_refresh_time: u64,
}

fn default_exchange() -> String {
    "binance_paper_trade".to_string()
}

fn default_trading_pair() -> String {
    "ETH-USDT".to_string()
}

fn default_base_ask_price() -> Decimal {
    Decimal::new(200_000_000_000, 8) // 2000.00000000
}

fn default_total_spread() -> Decimal {
    Decimal::new(10_000_000_000, 8) // 100.00000000
}

fn default_order_amount() -> Decimal {
    Decimal::new(10_000_000, 8) // 0.10000000
}

fn default_order_refresh_time() -> u64 {
    15
}

impl Default for PPCycleConfig {
    fn default() -> Self {
        Self {
            exchange: default_exchange(),
            trading_pair: default_trading_pair(),
            base_ask_price: default_base_ask_price(),
            total_spread: default_total_spread(),
            order_amount: default_order_amount(),
            order_refresh_time: default_order_refresh_time(),
        }
    }
}

impl PPCycleConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.exchange.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "pp_cycle.exchange must not be empty".to_string(),
            ));
        }

        if split_trading_pair(&self.trading_pair).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "pp_cycle.trading_pair must look like BASE-QUOTE, got '{}'",
                self.trading_pair
            )));
        }

        if self.base_ask_price <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "pp_cycle.base_ask_price must be greater than 0".to_string(),
            ));
        }

        if self.order_amount <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "pp_cycle.order_amount must be greater than 0".to_string(),
            ));
        }

        if self.order_refresh_time == 0 {
            return Err(ConfigError::ValidationError(
                "pp_cycle.order_refresh_time must be greater than 0".to_string(),
            ));
        }

        // Degenerate spreads are allowed through, the strategy quotes them as-is
        if self.total_spread <= Decimal::ZERO {
            warn!(
                "pp_cycle.total_spread is {}: buy and sell levels will be equal or inverted",
                self.total_spread
            );
        }

        Ok(())
    }

    pub(super) fn log(&self) {
        info!("PP Cycle Strategy:");
        info!("  Exchange: {}", self.exchange);
        info!("  Trading pair: {}", self.trading_pair);
        info!("  Base ask price: {:.8}", self.base_ask_price);
        info!("  Total spread: {:.8}", self.total_spread);
        info!("  Order amount: {:.8}", self.order_amount);
        info!("  Order refresh time: {} seconds", self.order_refresh_time);
    }
}
