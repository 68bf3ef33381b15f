//! Options pricing and strategy analytics.
//!
//! `models` holds the single-option closed forms (Black-Scholes price,
//! Greeks, implied volatility); `strategy` composes them into multi-leg
//! P&L curves, key metrics and aggregate Greeks. Everything is a pure
//! function of its inputs.

pub mod config;
pub mod errors;
pub mod feeds;
pub mod models;
pub mod report;
pub mod strategy;

pub use errors::{EngineError, EngineResult};
pub use models::{OptionMetrics, OptionParams, OptionType, PricingModel};
pub use strategy::{Action, MarketParameters, OptionLeg};
