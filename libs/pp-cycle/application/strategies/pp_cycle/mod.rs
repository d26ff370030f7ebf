//! PP Cycle Strategy
//!
//! Fixed two-sided quoting around a configured base price.

mod strategy;

#[cfg(test)]
mod tests;

pub use crate::infrastructure::config::PPCycleConfig;
pub use strategy::PPCycleStrategy;
