//! Domain Layer
//!
//! Contains pure business entities and domain models.
//! This layer has no dependencies on infrastructure or application layers.

pub mod markets;
pub mod order;
pub mod pricing;

// Re-export domain entities
pub use markets::MarketsConfig;
pub use order::{split_trading_pair, ActiveOrder, FillEvent, OrderCandidate, OrderType, Side};
pub use pricing::{round8, PricePoints, PRICE_DECIMALS};
