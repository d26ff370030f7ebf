//! Price point cycle strategy
//!
//! Quotes a maker buy half the total spread below the base price and a maker
//! sell half the spread above it. Every `order_refresh_time` seconds all open
//! orders are cancelled and both quotes are re-submitted, provided the budget
//! covers the pair.

use crate::application::strategies::traits::{Strategy, StrategyContext, StrategyResult};
use crate::domain::{round8, FillEvent, MarketsConfig, OrderCandidate, PricePoints, Side};
use crate::infrastructure::config::PPCycleConfig;
use rust_decimal::Decimal;
use tracing::{debug, Level};

pub struct PPCycleStrategy {
    config: PPCycleConfig,
    ctx: StrategyContext,
    prices: PricePoints,
    /// Earliest time the next refresh may run; 0 refreshes on the first tick
    next_refresh_deadline: f64,
}

impl PPCycleStrategy {
    /// Markets this strategy needs connectors for
    pub fn init_markets(config: &PPCycleConfig) -> MarketsConfig {
        MarketsConfig::new().with_market(config.exchange.clone(), config.trading_pair.clone())
    }

    pub fn new(config: PPCycleConfig, ctx: StrategyContext) -> Self {
        let prices = PricePoints::from_spread(config.base_ask_price, config.total_spread);
        Self {
            config,
            ctx,
            prices,
            next_refresh_deadline: 0.0,
        }
    }

    pub fn buy_price(&self) -> Decimal {
        self.prices.buy
    }

    pub fn sell_price(&self) -> Decimal {
        self.prices.sell
    }

    pub fn next_refresh_deadline(&self) -> f64 {
        self.next_refresh_deadline
    }

    /// One maker limit buy and one maker limit sell at the fixed price points
    pub fn create_proposal(&self) -> Vec<OrderCandidate> {
        vec![
            OrderCandidate::maker_limit(
                self.config.trading_pair.clone(),
                Side::Buy,
                self.config.order_amount,
                self.prices.buy,
            ),
            OrderCandidate::maker_limit(
                self.config.trading_pair.clone(),
                Side::Sell,
                self.config.order_amount,
                self.prices.sell,
            ),
        ]
    }

    fn adjust_proposal_to_budget(
        &self,
        proposal: Vec<OrderCandidate>,
    ) -> StrategyResult<Vec<OrderCandidate>> {
        self.ctx.budget.adjust_candidates(proposal, true)
    }

    fn place_orders(&self, proposal: &[OrderCandidate]) -> StrategyResult<()> {
        let exchange = self.config.exchange.as_str();
        for order in proposal {
            let client_order_id = match order.side {
                Side::Buy => self.ctx.orders.buy(
                    exchange,
                    &order.trading_pair,
                    order.amount,
                    order.order_type,
                    order.price,
                )?,
                Side::Sell => self.ctx.orders.sell(
                    exchange,
                    &order.trading_pair,
                    order.amount,
                    order.order_type,
                    order.price,
                )?,
            };
            debug!(
                "Placed {} {} {:.8} @ {:.8} ({})",
                order.side, order.trading_pair, order.amount, order.price, client_order_id
            );
        }
        Ok(())
    }

    fn cancel_all_orders(&self) -> StrategyResult<()> {
        let exchange = self.config.exchange.as_str();
        for order in self.ctx.orders.active_orders(exchange)? {
            self.ctx
                .orders
                .cancel(exchange, &order.trading_pair, &order.client_order_id)?;
        }
        Ok(())
    }

    fn refresh(&mut self, now: f64) -> StrategyResult<()> {
        self.cancel_all_orders()?;
        let proposal = self.create_proposal();
        let proposal_adjusted = self.adjust_proposal_to_budget(proposal)?;
        if proposal_adjusted.is_empty() {
            self.ctx.events.log(
                Level::WARN,
                "Insufficient balance for both price points, no orders placed this cycle",
            );
        }
        self.place_orders(&proposal_adjusted)?;
        self.next_refresh_deadline = now + self.config.order_refresh_time as f64;
        Ok(())
    }
}

impl Strategy for PPCycleStrategy {
    fn name(&self) -> &str {
        "pp_cycle"
    }

    fn description(&self) -> &str {
        "Cancels and re-quotes a fixed buy/sell price pair every refresh interval"
    }

    fn on_tick(&mut self, now: f64) -> StrategyResult<()> {
        if now < self.next_refresh_deadline {
            return Ok(());
        }
        self.refresh(now)
    }

    fn did_fill_order(&mut self, event: &FillEvent) {
        let msg = format!(
            "{} {:.8} {} {} at {:.8}",
            event.trade_type,
            round8(event.amount),
            event.trading_pair,
            self.config.exchange,
            round8(event.price)
        );
        self.ctx.events.log(Level::INFO, &msg);
        self.ctx.events.notify(&msg);
    }

    fn stop(&mut self) -> StrategyResult<()> {
        self.cancel_all_orders()
    }
}
