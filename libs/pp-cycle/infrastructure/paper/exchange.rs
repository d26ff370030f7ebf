//! In-memory paper trade exchange
//!
//! Holds balances, resting limit orders and a random-walk mid price per
//! trading pair. Buys fill once the mid trades at or below their price, sells
//! once it trades at or above.

use super::PaperTradeError;
use crate::application::runner::FillFeed;
use crate::application::strategies::{BudgetChecker, OrderGateway, StrategyError, StrategyResult};
use crate::domain::{
    round8, split_trading_pair, ActiveOrder, FillEvent, MarketsConfig, OrderCandidate, OrderType,
    Side,
};
use crate::infrastructure::config::PaperTradeConfig;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info};

struct PaperState {
    balances: BTreeMap<String, Decimal>,
    orders: BTreeMap<String, ActiveOrder>,
    mid_prices: BTreeMap<String, Decimal>,
    next_nonce: u64,
    clock: f64,
    fill_count: u64,
    rng: StdRng,
}

impl PaperState {
    /// Balance not locked by resting orders
    fn available(&self, asset: &str) -> Decimal {
        let total = self.balances.get(asset).copied().unwrap_or_default();
        let reserved: Decimal = self
            .orders
            .values()
            .filter_map(|order| {
                let (required_asset, required) = requirement(
                    &order.trading_pair,
                    order.side,
                    order.amount,
                    order.price,
                )?;
                (required_asset == asset).then_some(required)
            })
            .sum();
        total - reserved
    }

    fn credit(&mut self, asset: &str, amount: Decimal) {
        *self.balances.entry(asset.to_string()).or_default() += amount;
    }
}

/// Asset and quantity an order locks: quote notional for buys, base amount for sells
fn requirement(
    trading_pair: &str,
    side: Side,
    amount: Decimal,
    price: Decimal,
) -> Option<(&str, Decimal)> {
    let (base, quote) = split_trading_pair(trading_pair)?;
    Some(match side {
        Side::Buy => (quote, amount * price),
        Side::Sell => (base, amount),
    })
}

pub struct PaperExchange {
    name: String,
    markets: MarketsConfig,
    volatility: f64,
    state: Mutex<PaperState>,
}

impl PaperExchange {
    /// Build an exchange named `name` serving the pairs `markets` lists for it
    pub fn new(
        name: impl Into<String>,
        markets: &MarketsConfig,
        config: &PaperTradeConfig,
    ) -> Self {
        let name = name.into();
        let mid_prices = markets
            .trading_pairs(&name)
            .map(|pair| (pair.to_string(), config.start_price))
            .collect();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "Paper exchange '{}' ready: {} pair(s), start price {}",
            name,
            markets.trading_pairs(&name).count(),
            config.start_price
        );

        Self {
            markets: markets.clone(),
            volatility: config.volatility,
            state: Mutex::new(PaperState {
                balances: config.initial_balances.clone(),
                orders: BTreeMap::new(),
                mid_prices,
                next_nonce: 1,
                clock: 0.0,
                fill_count: 0,
                rng,
            }),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self, asset: &str) -> Decimal {
        self.state.lock().balances.get(asset).copied().unwrap_or_default()
    }

    pub fn available_balance(&self, asset: &str) -> Decimal {
        self.state.lock().available(asset)
    }

    pub fn mid_price(&self, trading_pair: &str) -> Option<Decimal> {
        self.state.lock().mid_prices.get(trading_pair).copied()
    }

    pub fn set_mid_price(&self, trading_pair: &str, price: Decimal) -> Result<(), PaperTradeError> {
        let mut state = self.state.lock();
        let mid = state
            .mid_prices
            .get_mut(trading_pair)
            .ok_or_else(|| PaperTradeError::UnknownTradingPair(trading_pair.to_string()))?;
        *mid = price;
        Ok(())
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().orders.len()
    }

    pub fn fill_count(&self) -> u64 {
        self.state.lock().fill_count
    }

    /// Timestamp stamped on newly accepted orders and fills
    pub fn set_clock(&self, now: f64) {
        self.state.lock().clock = now;
    }

    /// Move every mid price by a uniform step within +/- volatility
    pub fn step_prices(&self) {
        if self.volatility <= 0.0 {
            return;
        }
        let mut state = self.state.lock();
        let PaperState { mid_prices, rng, .. } = &mut *state;
        for (pair, mid) in mid_prices.iter_mut() {
            let step = rng.gen_range(-self.volatility..=self.volatility);
            if let Some(factor) = Decimal::from_f64(1.0 + step) {
                *mid = round8(*mid * factor);
                debug!("{} mid -> {}", pair, mid);
            }
        }
    }

    /// Fill every resting order the current mid price crosses
    pub fn match_orders(&self) -> Vec<FillEvent> {
        let mut state = self.state.lock();
        let crossed: Vec<ActiveOrder> = state
            .orders
            .values()
            .filter(|order| match state.mid_prices.get(&order.trading_pair) {
                Some(mid) => match order.side {
                    Side::Buy => *mid <= order.price,
                    Side::Sell => *mid >= order.price,
                },
                None => false,
            })
            .cloned()
            .collect();

        let mut fills = Vec::with_capacity(crossed.len());
        for order in crossed {
            state.orders.remove(&order.client_order_id);
            let Some((base, quote)) = split_trading_pair(&order.trading_pair) else {
                continue;
            };
            let notional = order.amount * order.price;
            match order.side {
                Side::Buy => {
                    state.credit(quote, -notional);
                    state.credit(base, order.amount);
                }
                Side::Sell => {
                    state.credit(base, -order.amount);
                    state.credit(quote, notional);
                }
            }
            state.fill_count += 1;
            fills.push(FillEvent {
                timestamp: state.clock,
                client_order_id: order.client_order_id,
                trading_pair: order.trading_pair,
                trade_type: order.side,
                order_type: order.order_type,
                price: order.price,
                amount: order.amount,
            });
        }
        fills
    }

    fn check_market(&self, market: &str) -> Result<(), PaperTradeError> {
        if market != self.name || !self.markets.has_exchange(market) {
            return Err(PaperTradeError::UnknownMarket(market.to_string()));
        }
        Ok(())
    }

    fn place(
        &self,
        market: &str,
        trading_pair: &str,
        side: Side,
        amount: Decimal,
        order_type: OrderType,
        price: Decimal,
    ) -> Result<String, PaperTradeError> {
        self.check_market(market)?;
        if !self.markets.contains(market, trading_pair) {
            return Err(PaperTradeError::UnknownTradingPair(trading_pair.to_string()));
        }
        if order_type == OrderType::Market {
            return Err(PaperTradeError::UnsupportedOrderType(order_type));
        }
        if amount <= Decimal::ZERO || price <= Decimal::ZERO {
            return Err(PaperTradeError::InvalidOrder { amount, price });
        }

        let mut state = self.state.lock();
        let (asset, required) = requirement(trading_pair, side, amount, price)
            .ok_or_else(|| PaperTradeError::UnknownTradingPair(trading_pair.to_string()))?;
        let available = state.available(asset);
        if required > available {
            return Err(PaperTradeError::InsufficientBalance {
                asset: asset.to_string(),
                required,
                available,
            });
        }

        let prefix = match side {
            Side::Buy => "buy",
            Side::Sell => "sell",
        };
        let client_order_id = format!("{}-{}-{}", prefix, trading_pair, state.next_nonce);
        state.next_nonce += 1;
        let order = ActiveOrder {
            client_order_id: client_order_id.clone(),
            trading_pair: trading_pair.to_string(),
            side,
            order_type,
            price,
            amount,
            created_at: state.clock,
        };
        state.orders.insert(client_order_id.clone(), order);
        Ok(client_order_id)
    }
}

impl OrderGateway for PaperExchange {
    fn active_orders(&self, market: &str) -> StrategyResult<Vec<ActiveOrder>> {
        self.check_market(market)?;
        Ok(self.state.lock().orders.values().cloned().collect())
    }

    fn cancel(
        &self,
        market: &str,
        trading_pair: &str,
        client_order_id: &str,
    ) -> StrategyResult<()> {
        self.check_market(market)?;
        let mut state = self.state.lock();
        let known = state
            .orders
            .get(client_order_id)
            .is_some_and(|order| order.trading_pair == trading_pair);
        if !known {
            return Err(PaperTradeError::UnknownOrder(client_order_id.to_string()).into());
        }
        state.orders.remove(client_order_id);
        debug!("Cancelled {}", client_order_id);
        Ok(())
    }

    fn buy(
        &self,
        market: &str,
        trading_pair: &str,
        amount: Decimal,
        order_type: OrderType,
        price: Decimal,
    ) -> StrategyResult<String> {
        Ok(self.place(market, trading_pair, Side::Buy, amount, order_type, price)?)
    }

    fn sell(
        &self,
        market: &str,
        trading_pair: &str,
        amount: Decimal,
        order_type: OrderType,
        price: Decimal,
    ) -> StrategyResult<String> {
        Ok(self.place(market, trading_pair, Side::Sell, amount, order_type, price)?)
    }
}

impl BudgetChecker for PaperExchange {
    fn adjust_candidates(
        &self,
        candidates: Vec<OrderCandidate>,
        all_or_none: bool,
    ) -> StrategyResult<Vec<OrderCandidate>> {
        let state = self.state.lock();
        let mut available: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut adjusted = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let (asset, required) = requirement(
                &candidate.trading_pair,
                candidate.side,
                candidate.amount,
                candidate.price,
            )
            .ok_or_else(|| {
                StrategyError::Budget(format!("unknown trading pair {}", candidate.trading_pair))
            })?;
            let remaining = available
                .entry(asset.to_string())
                .or_insert_with(|| state.available(asset));

            if required <= *remaining {
                *remaining -= required;
                adjusted.push(candidate);
            } else if all_or_none {
                debug!(
                    "Budget: {} {} needs {} {}, {} available; dropping the whole batch",
                    candidate.side, candidate.trading_pair, required, asset, remaining
                );
                return Ok(Vec::new());
            }
        }
        Ok(adjusted)
    }
}

impl FillFeed for PaperExchange {
    fn poll_fills(&self, now: f64) -> Vec<FillEvent> {
        self.set_clock(now);
        self.step_prices();
        self.match_orders()
    }

    fn status(&self) -> String {
        let state = self.state.lock();
        let mids = state
            .mid_prices
            .iter()
            .map(|(pair, mid)| format!("{} mid {:.2}", pair, mid))
            .collect::<Vec<_>>()
            .join(", ");
        let balances = state
            .balances
            .iter()
            .map(|(asset, balance)| format!("{} {}", asset, balance.normalize()))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}: {} | open orders {} | fills {} | balances {}",
            self.name,
            mids,
            state.orders.len(),
            state.fill_count,
            balances
        )
    }
}
