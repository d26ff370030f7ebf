//! CLI utilities for binaries
//!
//! Resolves configuration file paths from the environment.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Strategies configuration (strategies_config.yaml)
    Strategies,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Strategies => "config/strategies_config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Strategies | ConfigType::Custom(_) => "STRATEGIES_CONFIG_PATH",
        }
    }
}

/// Load configuration path from environment or use default
///
/// A `Custom` path always wins over the environment.
///
/// # Examples
/// ```
/// use pp_cycle_bot::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Custom("my_config.yaml".to_string()));
/// assert_eq!(path.to_str(), Some("my_config.yaml"));
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    if let ConfigType::Custom(path) = &config_type {
        return PathBuf::from(path);
    }
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}
