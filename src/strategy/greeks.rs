use crate::models::black_scholes::all_metrics;
use crate::models::OptionMetrics;
use crate::strategy::{MarketParameters, OptionLeg};
use serde::Serialize;

/// Position-level Greeks, summed over active legs.
///
/// Rho is intentionally absent: it is available per leg via
/// [`leg_metrics`] but not aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StrategyGreeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
}

/// Per-unit metrics of one leg at the current spot, unsigned.
pub fn leg_metrics(leg: &OptionLeg, market: &MarketParameters) -> OptionMetrics {
    all_metrics(&market.option_params(market.spot, leg.strike), leg.option_type)
}

/// Each active leg valued at its own strike against the current spot, then
/// scaled by +qty (Buy) or -qty (Sell).
pub fn strategy_greeks(legs: &[OptionLeg], market: &MarketParameters) -> StrategyGreeks {
    legs.iter()
        .filter(|leg| leg.is_active())
        .fold(StrategyGreeks::default(), |mut acc, leg| {
            let m = leg_metrics(leg, market);
            let w = leg.signed_quantity();
            acc.delta += m.delta * w;
            acc.gamma += m.gamma * w;
            acc.theta += m.theta * w;
            acc.vega += m.vega * w;
            acc
        })
}
