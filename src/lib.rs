//! PP Cycle Trading Bot - Main Library
//!
//! Re-exports the strategy library and the helpers shared by the binaries.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (config path resolution)
//! - **pp_cycle**: Strategy, connectors and runner (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use pp_cycle_bot::bin_common::{load_config_from_env, ConfigType};
//! use pp_cycle_bot::pp_cycle::StrategiesConfig;
//! ```

// Re-export workspace libraries for convenience
pub use pp_cycle;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{load_config_from_env, parse_args, ConfigType};
}
