//! Controller tests against recording fakes

use super::*;
use crate::application::strategies::traits::{
    BudgetChecker, EventSink, OrderGateway, Strategy, StrategyContext, StrategyError,
    StrategyResult,
};
use crate::domain::{ActiveOrder, FillEvent, OrderCandidate, OrderType, Side};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::Level;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    ListActive(String),
    Cancel(String),
    Adjust { count: usize, all_or_none: bool },
    Buy { amount: Decimal, price: Decimal },
    Sell { amount: Decimal, price: Decimal },
    Log(Level, String),
    Notify(String),
}

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
    active: Mutex<Vec<ActiveOrder>>,
    reject_budget: bool,
    fail_sell: bool,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    fn submissions(&self) -> usize {
        self.count(|c| matches!(c, Call::Buy { .. } | Call::Sell { .. }))
    }

    fn clear(&self) {
        self.calls.lock().clear();
    }

    fn rest(&self, client_order_id: &str, side: Side) {
        self.active.lock().push(ActiveOrder {
            client_order_id: client_order_id.to_string(),
            trading_pair: "ETH-USDT".to_string(),
            side,
            order_type: OrderType::Limit,
            price: dec!(2000),
            amount: dec!(0.1),
            created_at: 0.0,
        });
    }
}

impl OrderGateway for Recorder {
    fn active_orders(&self, market: &str) -> StrategyResult<Vec<ActiveOrder>> {
        self.calls.lock().push(Call::ListActive(market.to_string()));
        Ok(self.active.lock().clone())
    }

    fn cancel(&self, _market: &str, _pair: &str, client_order_id: &str) -> StrategyResult<()> {
        self.calls.lock().push(Call::Cancel(client_order_id.to_string()));
        self.active.lock().retain(|o| o.client_order_id != client_order_id);
        Ok(())
    }

    fn buy(
        &self,
        _market: &str,
        _pair: &str,
        amount: Decimal,
        _order_type: OrderType,
        price: Decimal,
    ) -> StrategyResult<String> {
        self.calls.lock().push(Call::Buy { amount, price });
        Ok("buy-1".to_string())
    }

    fn sell(
        &self,
        _market: &str,
        _pair: &str,
        amount: Decimal,
        _order_type: OrderType,
        price: Decimal,
    ) -> StrategyResult<String> {
        self.calls.lock().push(Call::Sell { amount, price });
        if self.fail_sell {
            return Err(StrategyError::Connector("sell rejected".to_string()));
        }
        Ok("sell-1".to_string())
    }
}

impl BudgetChecker for Recorder {
    fn adjust_candidates(
        &self,
        candidates: Vec<OrderCandidate>,
        all_or_none: bool,
    ) -> StrategyResult<Vec<OrderCandidate>> {
        self.calls.lock().push(Call::Adjust {
            count: candidates.len(),
            all_or_none,
        });
        if self.reject_budget {
            return Ok(Vec::new());
        }
        Ok(candidates)
    }
}

impl EventSink for Recorder {
    fn log(&self, level: Level, message: &str) {
        self.calls.lock().push(Call::Log(level, message.to_string()));
    }

    fn notify(&self, message: &str) {
        self.calls.lock().push(Call::Notify(message.to_string()));
    }
}

fn strategy_with(recorder: Recorder, config: PPCycleConfig) -> (PPCycleStrategy, Arc<Recorder>) {
    let recorder = Arc::new(recorder);
    let ctx = StrategyContext::new(recorder.clone(), recorder.clone(), recorder.clone());
    (PPCycleStrategy::new(config, ctx), recorder)
}

fn default_strategy() -> (PPCycleStrategy, Arc<Recorder>) {
    strategy_with(Recorder::default(), PPCycleConfig::default())
}

#[test]
fn test_prices_from_default_config() {
    let (strategy, _) = default_strategy();
    assert_eq!(strategy.buy_price(), dec!(1950.00000000));
    assert_eq!(strategy.sell_price(), dec!(2050.00000000));
    assert_eq!(strategy.next_refresh_deadline(), 0.0);
}

#[test]
fn test_init_markets() {
    let markets = PPCycleStrategy::init_markets(&PPCycleConfig::default());
    assert!(markets.contains("binance_paper_trade", "ETH-USDT"));
    assert_eq!(markets.exchanges().count(), 1);
}

#[test]
fn test_proposal_is_two_maker_limits() {
    let (strategy, _) = default_strategy();
    let proposal = strategy.create_proposal();

    assert_eq!(proposal.len(), 2);
    assert_eq!(proposal[0].side, Side::Buy);
    assert_eq!(proposal[0].price, dec!(1950));
    assert_eq!(proposal[1].side, Side::Sell);
    assert_eq!(proposal[1].price, dec!(2050));
    for candidate in &proposal {
        assert!(candidate.is_maker);
        assert_eq!(candidate.order_type, OrderType::Limit);
        assert_eq!(candidate.amount, dec!(0.1));
        assert_eq!(candidate.trading_pair, "ETH-USDT");
    }
}

#[test]
fn test_first_tick_refreshes() {
    let (mut strategy, recorder) = default_strategy();
    strategy.on_tick(0.0).unwrap();

    assert_eq!(
        recorder.calls(),
        vec![
            Call::ListActive("binance_paper_trade".to_string()),
            Call::Adjust {
                count: 2,
                all_or_none: true
            },
            Call::Buy {
                amount: dec!(0.1),
                price: dec!(1950)
            },
            Call::Sell {
                amount: dec!(0.1),
                price: dec!(2050)
            },
        ]
    );
    assert_eq!(strategy.next_refresh_deadline(), 15.0);
}

#[test]
fn test_tick_before_deadline_is_noop() {
    let (mut strategy, recorder) = default_strategy();
    strategy.on_tick(100.0).unwrap();
    recorder.clear();

    strategy.on_tick(105.0).unwrap();
    strategy.on_tick(114.999).unwrap();

    assert!(recorder.calls().is_empty());
    assert_eq!(strategy.next_refresh_deadline(), 115.0);
}

#[test]
fn test_refresh_cancels_open_orders_before_submitting() {
    let recorder = Recorder::default();
    recorder.rest("buy-old", Side::Buy);
    recorder.rest("sell-old", Side::Sell);
    let (mut strategy, recorder) = strategy_with(recorder, PPCycleConfig::default());

    strategy.on_tick(0.0).unwrap();

    let calls = recorder.calls();
    let first_submit = calls
        .iter()
        .position(|c| matches!(c, Call::Buy { .. } | Call::Sell { .. }))
        .unwrap();
    let last_cancel = calls
        .iter()
        .rposition(|c| matches!(c, Call::Cancel(_)))
        .unwrap();
    assert!(last_cancel < first_submit);
    assert_eq!(recorder.count(|c| matches!(c, Call::Cancel(_))), 2);
    assert_eq!(recorder.count(|c| matches!(c, Call::ListActive(_))), 1);
    assert_eq!(recorder.submissions(), 2);
}

#[test]
fn test_empty_budget_submits_nothing() {
    let recorder = Recorder {
        reject_budget: true,
        ..Default::default()
    };
    let (mut strategy, recorder) = strategy_with(recorder, PPCycleConfig::default());

    strategy.on_tick(0.0).unwrap();

    assert_eq!(recorder.submissions(), 0);
    assert_eq!(recorder.count(|c| matches!(c, Call::Log(Level::WARN, _))), 1);
    assert_eq!(strategy.next_refresh_deadline(), 15.0);
}

#[test]
fn test_refresh_schedule() {
    let (mut strategy, recorder) = default_strategy();

    strategy.on_tick(0.0).unwrap();
    assert_eq!(strategy.next_refresh_deadline(), 15.0);
    assert_eq!(recorder.submissions(), 2);

    strategy.on_tick(10.0).unwrap();
    assert_eq!(strategy.next_refresh_deadline(), 15.0);
    assert_eq!(recorder.submissions(), 2);

    strategy.on_tick(15.0).unwrap();
    assert_eq!(strategy.next_refresh_deadline(), 30.0);
    assert_eq!(recorder.submissions(), 4);
}

#[test]
fn test_submission_failure_propagates_and_keeps_deadline() {
    let recorder = Recorder {
        fail_sell: true,
        ..Default::default()
    };
    let (mut strategy, recorder) = strategy_with(recorder, PPCycleConfig::default());

    let result = strategy.on_tick(0.0);
    assert!(matches!(result, Err(StrategyError::Connector(_))));
    assert_eq!(strategy.next_refresh_deadline(), 0.0);

    // Deadline did not move, so the next tick runs a full cycle again
    recorder.clear();
    let _ = strategy.on_tick(1.0);
    assert_eq!(recorder.count(|c| matches!(c, Call::ListActive(_))), 1);
}

#[test]
fn test_fill_logs_and_notifies_once() {
    let (mut strategy, recorder) = default_strategy();
    strategy.on_tick(0.0).unwrap();
    recorder.clear();

    let event = FillEvent {
        timestamp: 3.0,
        client_order_id: "buy-1".to_string(),
        trading_pair: "ETH-USDT".to_string(),
        trade_type: Side::Buy,
        order_type: OrderType::Limit,
        price: dec!(1950),
        amount: dec!(0.1),
    };
    strategy.did_fill_order(&event);

    let expected = "BUY 0.10000000 ETH-USDT binance_paper_trade at 1950.00000000".to_string();
    assert_eq!(
        recorder.calls(),
        vec![Call::Log(Level::INFO, expected.clone()), Call::Notify(expected)]
    );
    assert_eq!(strategy.buy_price(), dec!(1950));
    assert_eq!(strategy.sell_price(), dec!(2050));
    assert_eq!(strategy.next_refresh_deadline(), 15.0);
}

#[test]
fn test_fill_message_rounds_half_even_at_eight_digits() {
    let (mut strategy, recorder) = default_strategy();

    let fill = |amount: Decimal, price: Decimal| FillEvent {
        timestamp: 3.0,
        client_order_id: "buy-1".to_string(),
        trading_pair: "ETH-USDT".to_string(),
        trade_type: Side::Buy,
        order_type: OrderType::Limit,
        price,
        amount,
    };
    strategy.did_fill_order(&fill(dec!(0.123456789), dec!(1950.123456789)));
    strategy.did_fill_order(&fill(dec!(0.123456785), dec!(1950.000000015)));

    let notified: Vec<Call> = recorder
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Notify(_)))
        .collect();
    assert_eq!(
        notified,
        vec![
            Call::Notify(
                "BUY 0.12345679 ETH-USDT binance_paper_trade at 1950.12345679".to_string()
            ),
            Call::Notify(
                "BUY 0.12345678 ETH-USDT binance_paper_trade at 1950.00000002".to_string()
            ),
        ]
    );
}

#[test]
fn test_stop_cancels_everything() {
    let (mut strategy, recorder) = default_strategy();
    recorder.rest("buy-1", Side::Buy);
    recorder.rest("sell-1", Side::Sell);

    strategy.stop().unwrap();

    assert_eq!(recorder.count(|c| matches!(c, Call::Cancel(_))), 2);
    assert!(recorder.active.lock().is_empty());
}

#[test]
fn test_zero_spread_quotes_equal_prices() {
    let config = PPCycleConfig {
        total_spread: Decimal::ZERO,
        ..Default::default()
    };
    let (mut strategy, recorder) = strategy_with(Recorder::default(), config);
    assert_eq!(strategy.buy_price(), strategy.sell_price());

    strategy.on_tick(0.0).unwrap();
    assert_eq!(recorder.submissions(), 2);
}
