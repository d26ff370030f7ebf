//! PP Cycle Binary - Price Point Cycle Strategy Runner
//!
//! Quotes a fixed buy/sell pair around a base price and refreshes the
//! orders on a fixed interval, with graceful shutdown support.
//!
//! Usage:
//!   STRATEGIES_CONFIG_PATH=config/strategies_config.yaml ./pp_cycle
//!   ./pp_cycle path/to/config.yaml

use anyhow::{bail, Result};
use pp_cycle::application::{PPCycleStrategy, Strategy, StrategyContext, StrategyRunner};
use pp_cycle::infrastructure::{
    init_tracing_with_level, is_paper_trade_exchange, PaperExchange, ShutdownManager,
    StrategiesConfig, TracingEventSink,
};
use pp_cycle_bot::bin_common::{load_config_from_env, parse_args, ConfigType};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load config: CLI argument > STRATEGIES_CONFIG_PATH > default path
    let args = parse_args();
    let config_type = match args.first() {
        Some(path) => ConfigType::Custom(path.clone()),
        None => ConfigType::Strategies,
    };
    let config_path = load_config_from_env(config_type);
    let config = StrategiesConfig::load(&config_path)?;

    // Initialize logging
    init_tracing_with_level(&config.log_level);
    info!("Loaded configuration from {}", config_path.display());
    config.log();

    let strategy_config = config.pp_cycle.clone();
    let markets = PPCycleStrategy::init_markets(&strategy_config);

    if !is_paper_trade_exchange(&strategy_config.exchange) {
        bail!(
            "Exchange '{}' has no connector; use a *_paper_trade exchange",
            strategy_config.exchange
        );
    }

    let exchange = Arc::new(PaperExchange::new(
        strategy_config.exchange.clone(),
        &markets,
        &config.paper_trade,
    ));
    info!("Paper exchange '{}' initialized", exchange.name());

    let ctx = StrategyContext::new(
        exchange.clone(),
        exchange.clone(),
        Arc::new(TracingEventSink::new("pp_cycle")),
    );
    let strategy = PPCycleStrategy::new(strategy_config, ctx);
    info!(
        "Price points: buy {:.8}, sell {:.8}",
        strategy.buy_price(),
        strategy.sell_price()
    );
    print_banner(strategy.name(), strategy.description());

    let shutdown = ShutdownManager::new();
    shutdown.spawn_signal_handler();

    let mut runner = StrategyRunner::new(Box::new(strategy), exchange, &config.runner);
    let stats = runner.run(&shutdown).await;

    print_shutdown(runner.strategy().name(), &stats.to_string());
    Ok(())
}

fn print_banner(name: &str, description: &str) {
    info!("");
    info!("========================================");
    info!("PP Cycle - Strategy Runner");
    info!("  Strategy: {}", name);
    info!("  Description: {}", description);
    info!("  Press Ctrl+C to stop");
    info!("========================================");
    info!("");
}

fn print_shutdown(name: &str, stats: &str) {
    info!("");
    info!("========================================");
    info!("Strategy '{}' stopped gracefully", name);
    info!("  {}", stats);
    info!("========================================");
}
