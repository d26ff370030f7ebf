pub mod strategies;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::infrastructure::paper::is_paper_trade_exchange;

pub use strategies::PPCycleConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategiesConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Tick scheduling for the host runner
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Price point cycle strategy configuration
    #[serde(default)]
    pub pp_cycle: PPCycleConfig,

    /// In-memory exchange used for `*_paper_trade` markets
    #[serde(default)]
    pub paper_trade: PaperTradeConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Host runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Interval between strategy ticks in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Interval between status lines in seconds
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_heartbeat_interval_secs() -> u64 {
    60
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
        }
    }
}

/// Paper trade exchange configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperTradeConfig {
    /// Starting balance per asset
    #[serde(default = "default_initial_balances")]
    pub initial_balances: BTreeMap<String, Decimal>,

    /// Starting mid price for every pair
    #[serde(default = "default_start_price")]
    pub start_price: Decimal,

    /// Largest fractional mid price move per tick (0.001 = 0.1%)
    #[serde(default = "default_volatility")]
    pub volatility: f64,

    /// Seed for the price feed; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_initial_balances() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        ("ETH".to_string(), Decimal::ONE),
        ("USDT".to_string(), Decimal::new(5000, 0)),
    ])
}

fn default_start_price() -> Decimal {
    Decimal::new(2000, 0)
}

fn default_volatility() -> f64 {
    0.001
}

impl Default for PaperTradeConfig {
    fn default() -> Self {
        Self {
            initial_balances: default_initial_balances(),
            start_price: default_start_price(),
            volatility: default_volatility(),
            seed: None,
        }
    }
}

impl PaperTradeConfig {
    fn validate(&self) -> Result<()> {
        if self.start_price <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "paper_trade.start_price must be greater than 0".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.volatility) {
            return Err(ConfigError::ValidationError(
                "paper_trade.volatility must be in [0, 1)".to_string(),
            ));
        }
        if let Some((asset, _)) = self
            .initial_balances
            .iter()
            .find(|(_, balance)| balance.is_sign_negative())
        {
            return Err(ConfigError::ValidationError(format!(
                "paper_trade.initial_balances.{} must not be negative",
                asset
            )));
        }
        Ok(())
    }
}

impl Default for StrategiesConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            runner: RunnerConfig::default(),
            pp_cycle: PPCycleConfig::default(),
            paper_trade: PaperTradeConfig::default(),
        }
    }
}

impl StrategiesConfig {
    /// Load configuration from YAML file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&yaml_content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        let config: StrategiesConfig = serde_yaml::from_str(yaml_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        if self.runner.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "runner.tick_interval_ms must be greater than 0".to_string(),
            ));
        }

        self.pp_cycle.validate()?;
        self.paper_trade.validate()?;

        Ok(())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Strategies Configuration:");
        info!("  Log level: {}", self.log_level);
        info!("Runner:");
        info!("  Tick interval: {} ms", self.runner.tick_interval_ms);
        info!(
            "  Heartbeat interval: {} seconds",
            self.runner.heartbeat_interval_secs
        );
        self.pp_cycle.log();
        if is_paper_trade_exchange(&self.pp_cycle.exchange) {
            info!("Paper Trade:");
            info!("  Start price: {}", self.paper_trade.start_price);
            info!("  Volatility: {:.4}%", self.paper_trade.volatility * 100.0);
            for (asset, balance) in &self.paper_trade.initial_balances {
                info!("  Balance {}: {}", asset, balance);
            }
        }
    }
}
