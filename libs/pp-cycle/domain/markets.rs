//! Markets a strategy trades on, keyed by exchange name

use std::collections::{BTreeMap, BTreeSet};

/// Exchange name -> trading pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketsConfig {
    markets: BTreeMap<String, BTreeSet<String>>,
}

impl MarketsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_market(
        mut self,
        exchange: impl Into<String>,
        trading_pair: impl Into<String>,
    ) -> Self {
        self.insert(exchange, trading_pair);
        self
    }

    pub fn insert(&mut self, exchange: impl Into<String>, trading_pair: impl Into<String>) {
        self.markets
            .entry(exchange.into())
            .or_default()
            .insert(trading_pair.into());
    }

    pub fn contains(&self, exchange: &str, trading_pair: &str) -> bool {
        self.markets
            .get(exchange)
            .map(|pairs| pairs.contains(trading_pair))
            .unwrap_or(false)
    }

    pub fn has_exchange(&self, exchange: &str) -> bool {
        self.markets.contains_key(exchange)
    }

    pub fn exchanges(&self) -> impl Iterator<Item = &str> {
        self.markets.keys().map(String::as_str)
    }

    pub fn trading_pairs(&self, exchange: &str) -> impl Iterator<Item = &str> {
        self.markets
            .get(exchange)
            .into_iter()
            .flat_map(|pairs| pairs.iter().map(String::as_str))
    }
}
