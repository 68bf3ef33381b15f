pub mod catalogue;
pub mod sweep;
pub mod pnl;
pub mod metrics;
pub mod greeks;

use crate::errors::{EngineError, EngineResult};
use crate::models::black_scholes;
use crate::models::{OptionParams, OptionType};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Standard contract multiplier: one contract controls 100 units.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Days per year used to turn calendar days into `time_to_expiration`.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Leg lists are almost always 1-4 legs; keep them inline.
pub type Legs = SmallVec<[OptionLeg; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    /// +1 for long exposure, -1 for short.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Self::Buy => 1.0,
            Self::Sell => -1.0,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

// ── Market snapshot ──

/// Immutable per-calculation market snapshot. Copy, never mutated mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    pub spot: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    /// Years. 0 means "at expiration".
    pub time_to_expiration: f64,
}

impl Default for MarketParameters {
    fn default() -> Self {
        Self::from_days(100.0, 0.05, 0.25, 30.0)
    }
}

impl MarketParameters {
    pub fn new(spot: f64, risk_free_rate: f64, volatility: f64, time_to_expiration: f64) -> Self {
        Self {
            spot,
            risk_free_rate,
            volatility,
            time_to_expiration,
        }
    }

    /// Build from calendar days to expiry (days / 365).
    pub fn from_days(spot: f64, risk_free_rate: f64, volatility: f64, days: f64) -> Self {
        Self::new(spot, risk_free_rate, volatility, days / DAYS_PER_YEAR)
    }

    /// Copy with the clock moved to expiration.
    #[inline]
    pub fn at_expiration(&self) -> Self {
        Self {
            time_to_expiration: 0.0,
            ..*self
        }
    }

    /// Option inputs for a given strike at a given underlying price.
    #[inline]
    pub fn option_params(&self, spot: f64, strike: f64) -> OptionParams {
        OptionParams::new(
            spot,
            strike,
            self.risk_free_rate,
            self.time_to_expiration,
            self.volatility,
        )
    }

    /// Reject inputs that would divide by zero or produce NaN in the closed forms.
    /// Zero volatility is allowed: the pricing layer documents it as a boundary.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(EngineError::InvalidInput(format!("spot must be > 0, got {}", self.spot)));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "volatility must be >= 0, got {}",
                self.volatility
            )));
        }
        if !self.time_to_expiration.is_finite() || self.time_to_expiration < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "time to expiration must be >= 0, got {}",
                self.time_to_expiration
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(EngineError::InvalidInput("risk-free rate must be finite".into()));
        }
        Ok(())
    }
}

// ── Legs ──

/// One position in a strategy.
///
/// A leg is "active" only once strike, premium and quantity are all set.
/// Inactive legs are placeholders and contribute nothing to any aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    pub action: Action,
    pub option_type: OptionType,
    pub strike: f64,
    /// Per-unit premium. None = not priced yet.
    pub premium: Option<f64>,
    pub quantity: u32,
}

impl OptionLeg {
    pub fn new(action: Action, option_type: OptionType) -> Self {
        Self {
            action,
            option_type,
            strike: 0.0,
            premium: None,
            quantity: 1,
        }
    }

    pub fn with_strike(mut self, strike: f64) -> Self {
        self.strike = strike;
        self
    }

    pub fn with_premium(mut self, premium: f64) -> Self {
        self.premium = Some(premium);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.strike > 0.0 && self.premium.is_some() && self.quantity > 0
    }

    #[inline]
    pub fn sign(&self) -> f64 {
        self.action.sign()
    }

    /// Signed contract count: +qty for Buy, -qty for Sell.
    #[inline]
    pub fn signed_quantity(&self) -> f64 {
        self.sign() * self.quantity as f64
    }
}

/// Theoretical premium for a leg at the current spot, rounded to cents.
/// Returns None for a leg without a strike.
pub fn theoretical_premium(leg: &OptionLeg, market: &MarketParameters) -> Option<f64> {
    if leg.strike <= 0.0 {
        return None;
    }
    let params = market.option_params(market.spot, leg.strike);
    let value = black_scholes::price(&params, leg.option_type);
    Some((value * 100.0).round() / 100.0)
}

/// Fill every unset premium with its theoretical value. Legs that already
/// carry a premium are left alone.
pub fn price_unset_premiums(legs: &[OptionLeg], market: &MarketParameters) -> Legs {
    legs.iter()
        .map(|leg| match (leg.premium, theoretical_premium(leg, market)) {
            (None, Some(premium)) => leg.with_premium(premium),
            _ => *leg,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_activity() {
        let leg = OptionLeg::new(Action::Buy, OptionType::Call);
        assert!(!leg.is_active(), "no strike or premium");
        assert!(!leg.with_strike(100.0).is_active(), "no premium");
        assert!(leg.with_strike(100.0).with_premium(0.0).is_active(), "zero premium is still set");
        assert!(!leg.with_strike(100.0).with_premium(2.0).with_quantity(0).is_active());
        assert!(!leg.with_strike(0.0).with_premium(2.0).is_active());
    }

    #[test]
    fn test_from_days_and_expiration() {
        let m = MarketParameters::from_days(100.0, 0.05, 0.25, 73.0);
        assert!((m.time_to_expiration - 0.2).abs() < 1e-12);
        assert_eq!(m.risk_free_rate, 0.05);
        assert_eq!(m.volatility, 0.25);
        assert_eq!(m, MarketParameters::new(100.0, 0.05, 0.25, 0.2));
        assert_eq!(m.at_expiration().time_to_expiration, 0.0);
        assert_eq!(m.at_expiration().spot, 100.0);
    }

    #[test]
    fn test_validate() {
        assert!(MarketParameters::default().validate().is_ok());
        assert!(MarketParameters::new(0.0, 0.05, 0.2, 0.1).validate().is_err());
        assert!(MarketParameters::new(-5.0, 0.05, 0.2, 0.1).validate().is_err());
        assert!(MarketParameters::new(100.0, 0.05, -0.2, 0.1).validate().is_err());
        assert!(MarketParameters::new(100.0, 0.05, 0.2, -1.0).validate().is_err());
        assert!(MarketParameters::new(100.0, f64::NAN, 0.2, 0.1).validate().is_err());
        assert!(MarketParameters::new(100.0, 0.05, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_theoretical_premium_rounds_to_cents() {
        let market = MarketParameters::new(100.0, 0.05, 0.2, 1.0);
        let leg = OptionLeg::new(Action::Buy, OptionType::Call).with_strike(100.0);
        assert_eq!(theoretical_premium(&leg, &market), Some(10.45));
        let unset = OptionLeg::new(Action::Buy, OptionType::Put);
        assert_eq!(theoretical_premium(&unset, &market), None);
    }

    #[test]
    fn test_price_unset_premiums_keeps_existing() {
        let market = MarketParameters::new(100.0, 0.05, 0.2, 1.0);
        let legs = [
            OptionLeg::new(Action::Buy, OptionType::Call).with_strike(100.0),
            OptionLeg::new(Action::Sell, OptionType::Put).with_strike(95.0).with_premium(1.25),
        ];
        let priced = price_unset_premiums(&legs, &market);
        assert_eq!(priced[0].premium, Some(10.45));
        assert_eq!(priced[1].premium, Some(1.25));
        assert!(priced.iter().all(|l| l.is_active()));
    }
}
