use crate::models::black_scholes::{price, vega_raw};
use crate::models::{OptionParams, OptionType};

/// Starting guess for the Newton-Raphson search (30% vol)
const INITIAL_SIGMA: f64 = 0.3;

/// Bounds applied after every step to keep the search from diverging
const MIN_SIGMA: f64 = 0.001;
const MAX_SIGMA: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
pub struct IvSolverConfig {
    pub max_iterations: u32,
    pub tolerance: f64,
}

impl Default for IvSolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-4,
        }
    }
}

/// Result of an implied-vol search. `converged` is false when the loop hit
/// the iteration cap or stopped on a flat vega; `sigma` is then the last
/// clamped estimate.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct IvSolution {
    pub sigma: f64,
    pub iterations: u32,
    pub converged: bool,
}

/// Implied volatility with the default solver settings.
///
/// Best-effort: there is no accuracy guarantee beyond the iteration cap.
/// Returns 0 for expired options.
pub fn implied_volatility(
    spot: f64,
    strike: f64,
    rate: f64,
    ttl_years: f64,
    market_price: f64,
    option_type: OptionType,
) -> f64 {
    let params = OptionParams::new(spot, strike, rate, ttl_years, INITIAL_SIGMA);
    solve_implied_volatility(&params, market_price, option_type, IvSolverConfig::default()).sigma
}

/// Newton-Raphson on sigma: sigma <- sigma - (model(sigma) - market) / vega_raw(sigma).
///
/// The `sigma` field of `params` is ignored; the search always starts at 0.3.
pub fn solve_implied_volatility(
    params: &OptionParams,
    market_price: f64,
    option_type: OptionType,
    config: IvSolverConfig,
) -> IvSolution {
    if params.is_expired() {
        return IvSolution { sigma: 0.0, iterations: 0, converged: false };
    }

    let mut sigma = INITIAL_SIGMA;

    for i in 0..config.max_iterations {
        let p = params.with_sigma(sigma);
        let theoretical = price(&p, option_type);
        let vega = vega_raw(&p);

        if vega.abs() < config.tolerance {
            tracing::debug!(sigma, iteration = i, "iv search stopped on flat vega");
            return IvSolution { sigma, iterations: i, converged: false };
        }

        let price_diff = theoretical - market_price;
        if price_diff.abs() < config.tolerance {
            return IvSolution { sigma, iterations: i, converged: true };
        }

        sigma = (sigma - price_diff / vega).clamp(MIN_SIGMA, MAX_SIGMA);
    }

    tracing::debug!(
        sigma,
        max_iterations = config.max_iterations,
        market_price,
        "iv search hit iteration cap"
    );
    IvSolution { sigma, iterations: config.max_iterations, converged: false }
}
