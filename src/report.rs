use crate::errors::{EngineError, EngineResult};
use crate::models::black_scholes::{intrinsic_value, time_value};
use crate::models::OptionMetrics;
use crate::strategy::catalogue::StrategyId;
use crate::strategy::greeks::leg_metrics;
use crate::strategy::metrics::{strategy_metrics, StrategyMetrics};
use crate::strategy::pnl::{payoff_profile, PayoffProfile};
use crate::strategy::{MarketParameters, OptionLeg};
use serde::Serialize;

/// Per-leg valuation at the current spot. Unsigned, per unit.
#[derive(Debug, Clone, Serialize)]
pub struct LegReport {
    #[serde(flatten)]
    pub leg: OptionLeg,
    pub active: bool,
    pub metrics: OptionMetrics,
    pub intrinsic_value: f64,
    pub time_value: f64,
}

/// Everything a rendering layer needs for one strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub strategy: Option<StrategyId>,
    pub market: MarketParameters,
    pub legs: Vec<LegReport>,
    pub metrics: StrategyMetrics,
    pub payoff: PayoffProfile,
}

/// Validate inputs, then value every leg, the payoff curves and the
/// strategy metrics.
///
/// Inactive legs are carried through with `active: false` and contribute
/// nothing to the aggregates.
pub fn evaluate(
    strategy: Option<StrategyId>,
    legs: &[OptionLeg],
    market: &MarketParameters,
) -> EngineResult<StrategyReport> {
    market.validate()?;

    for (i, leg) in legs.iter().enumerate() {
        if leg.strike < 0.0 || !leg.strike.is_finite() {
            return Err(EngineError::InvalidInput(format!("leg {i}: strike {}", leg.strike)));
        }
        if let Some(p) = leg.premium {
            if p < 0.0 || !p.is_finite() {
                return Err(EngineError::InvalidInput(format!("leg {i}: premium {p}")));
            }
        }
    }

    // Greeks need sigma > 0 before expiry
    if market.time_to_expiration > 0.0 && market.volatility <= 0.0 {
        return Err(EngineError::InvalidInput(
            "volatility must be > 0 before expiration".into(),
        ));
    }

    let leg_reports = legs
        .iter()
        .map(|leg| {
            let active = leg.is_active();
            let (metrics, intrinsic, tv) = if leg.strike > 0.0 {
                let params = market.option_params(market.spot, leg.strike);
                (
                    leg_metrics(leg, market),
                    intrinsic_value(market.spot, leg.strike, leg.option_type),
                    time_value(&params, leg.option_type),
                )
            } else {
                (OptionMetrics::default(), 0.0, 0.0)
            };
            LegReport {
                leg: *leg,
                active,
                metrics,
                intrinsic_value: intrinsic,
                time_value: tv,
            }
        })
        .collect();

    let metrics = strategy_metrics(legs, market);
    let payoff = payoff_profile(legs, market);

    tracing::debug!(
        strategy = ?strategy,
        legs = legs.len(),
        breakevens = metrics.key.breakevens.len(),
        "strategy evaluated"
    );

    Ok(StrategyReport {
        strategy,
        market: *market,
        legs: leg_reports,
        metrics,
        payoff,
    })
}
