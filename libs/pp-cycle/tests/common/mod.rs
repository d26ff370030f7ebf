//! Common test utilities for pp-cycle integration tests

use parking_lot::Mutex;
use pp_cycle::domain::MarketsConfig;
use pp_cycle::infrastructure::PaperTradeConfig;
use pp_cycle::{EventSink, PaperExchange};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::Level;

pub const EXCHANGE: &str = "binance_paper_trade";
pub const PAIR: &str = "ETH-USDT";

/// Event sink that keeps every message
#[derive(Default)]
pub struct CapturingSink {
    pub logs: Mutex<Vec<(Level, String)>>,
    pub notifications: Mutex<Vec<String>>,
}

impl EventSink for CapturingSink {
    fn log(&self, level: Level, message: &str) {
        self.logs.lock().push((level, message.to_string()));
    }

    fn notify(&self, message: &str) {
        self.notifications.lock().push(message.to_string());
    }
}

/// Paper exchange for ETH-USDT with a flat price feed
pub fn paper_exchange(eth: Decimal, usdt: Decimal) -> PaperExchange {
    let markets = MarketsConfig::new().with_market(EXCHANGE, PAIR);
    let config = PaperTradeConfig {
        initial_balances: BTreeMap::from([("ETH".to_string(), eth), ("USDT".to_string(), usdt)]),
        start_price: Decimal::new(2000, 0),
        volatility: 0.0,
        seed: Some(1),
    };
    PaperExchange::new(EXCHANGE, &markets, &config)
}
