pub mod normal;
pub mod black_scholes;
pub mod implied_vol;
pub mod volatility;

use serde::{Deserialize, Serialize};

/// All single-option pricing models implement this trait.
/// Every method must be a pure function of its inputs.
/// Send + Sync required so sweeps can be valued across threads.
pub trait PricingModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Theoretical value of one unit of the option. Never negative.
    fn price(&self, params: &OptionParams, option_type: OptionType) -> f64;

    /// Price plus the five first-order Greeks.
    fn metrics(&self, params: &OptionParams, option_type: OptionType) -> OptionMetrics;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "Call"),
            Self::Put => write!(f, "Put"),
        }
    }
}

/// Inputs for a single-option valuation. Stack-allocated, Copy.
///
/// `sqrt_t` and `sigma_sqrt_t` are precomputed once; they are only read on
/// the `ttl_years > 0` branch, so a negative time never reaches a sqrt that
/// matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionParams {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub ttl_years: f64,
    pub sigma: f64,
    // Precomputed
    pub sqrt_t: f64,
    pub sigma_sqrt_t: f64,
}

impl OptionParams {
    #[inline]
    pub fn new(spot: f64, strike: f64, rate: f64, ttl_years: f64, sigma: f64) -> Self {
        let sqrt_t = ttl_years.max(0.0).sqrt();
        Self {
            spot,
            strike,
            rate,
            ttl_years,
            sigma,
            sqrt_t,
            sigma_sqrt_t: sigma * sqrt_t,
        }
    }

    /// Same contract, different volatility (used by the IV solver).
    #[inline]
    pub fn with_sigma(&self, sigma: f64) -> Self {
        Self::new(self.spot, self.strike, self.rate, self.ttl_years, sigma)
    }

    /// Same contract, different underlying price (used by sweeps).
    #[inline]
    pub fn with_spot(&self, spot: f64) -> Self {
        Self::new(spot, self.strike, self.rate, self.ttl_years, self.sigma)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.ttl_years <= 0.0
    }
}

/// Price and Greeks for one option. Plain record for callers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OptionMetrics {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    /// Per calendar day
    pub theta: f64,
    /// Per 1 vol point
    pub vega: f64,
    /// Per 1 rate point
    pub rho: f64,
}
