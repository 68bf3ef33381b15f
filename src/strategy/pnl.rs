use crate::models::black_scholes::{intrinsic_value, BlackScholes};
use crate::models::PricingModel;
use crate::strategy::sweep::PriceSweep;
use crate::strategy::{MarketParameters, OptionLeg, CONTRACT_MULTIPLIER};
use rayon::prelude::*;
use serde::Serialize;

/// Sweeps at least this long are valued across the rayon pool.
/// Below it, thread hand-off costs more than the pricing.
const PARALLEL_THRESHOLD: usize = 512;

static BLACK_SCHOLES: BlackScholes = BlackScholes;

/// Signed P&L of one active leg if the underlying were at `spot`.
///
/// The leg is valued at intrinsic when the market is at expiration, else by
/// the model with every other market input held fixed.
#[inline]
fn leg_pl_at(
    model: &dyn PricingModel,
    leg: &OptionLeg,
    spot: f64,
    market: &MarketParameters,
) -> f64 {
    let value = if market.time_to_expiration <= 0.0 {
        intrinsic_value(spot, leg.strike, leg.option_type)
    } else {
        model.price(&market.option_params(spot, leg.strike), leg.option_type)
    };
    let premium = leg.premium.unwrap_or(0.0);
    (value - premium) * leg.signed_quantity() * CONTRACT_MULTIPLIER
}

/// P&L series of one leg across the sweep, Black-Scholes valuation.
pub fn leg_pl(leg: &OptionLeg, sweep: &[f64], market: &MarketParameters) -> Vec<f64> {
    leg_pl_with(&BLACK_SCHOLES, leg, sweep, market)
}

/// P&L series of one leg across the sweep. Inactive legs yield zeros.
pub fn leg_pl_with(
    model: &dyn PricingModel,
    leg: &OptionLeg,
    sweep: &[f64],
    market: &MarketParameters,
) -> Vec<f64> {
    if !leg.is_active() {
        return vec![0.0; sweep.len()];
    }
    sweep.iter().map(|&spot| leg_pl_at(model, leg, spot, market)).collect()
}

/// Total strategy P&L across the sweep, Black-Scholes valuation.
pub fn strategy_pl(legs: &[OptionLeg], sweep: &[f64], market: &MarketParameters) -> Vec<f64> {
    strategy_pl_with(&BLACK_SCHOLES, legs, sweep, market)
}

/// Elementwise sum of every active leg's P&L, aligned by sweep index.
/// Empty or all-inactive leg sets give a zero series.
///
/// Legs are summed in input order at every sample on both the sequential and
/// the parallel path, so the two produce bit-identical output.
pub fn strategy_pl_with(
    model: &dyn PricingModel,
    legs: &[OptionLeg],
    sweep: &[f64],
    market: &MarketParameters,
) -> Vec<f64> {
    let total_at = |spot: f64| {
        legs.iter()
            .filter(|leg| leg.is_active())
            .fold(0.0, |acc, leg| acc + leg_pl_at(model, leg, spot, market))
    };

    if sweep.len() >= PARALLEL_THRESHOLD {
        tracing::debug!(samples = sweep.len(), legs = legs.len(), "valuing sweep in parallel");
        sweep.par_iter().map(|&spot| total_at(spot)).collect()
    } else {
        sweep.iter().map(|&spot| total_at(spot)).collect()
    }
}

/// Chart-ready curves: one X axis, P&L at expiration and at the current
/// time to expiry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffProfile {
    pub prices: PriceSweep,
    pub pl_at_expiration: Vec<f64>,
    pub pl_current: Vec<f64>,
}

/// Both P&L curves over the 70%..130% chart sweep.
pub fn payoff_profile(legs: &[OptionLeg], market: &MarketParameters) -> PayoffProfile {
    let prices = PriceSweep::for_chart(market.spot);
    let pl_at_expiration = strategy_pl(legs, prices.as_slice(), &market.at_expiration());
    let pl_current = strategy_pl(legs, prices.as_slice(), market);
    PayoffProfile {
        prices,
        pl_at_expiration,
        pl_current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionType;
    use crate::strategy::Action;

    fn market() -> MarketParameters {
        MarketParameters::from_days(100.0, 0.05, 0.25, 30.0)
    }

    #[test]
    fn test_long_call_at_expiration() {
        let leg = OptionLeg::new(Action::Buy, OptionType::Call)
            .with_strike(100.0)
            .with_premium(5.0);
        let pl = leg_pl(&leg, &[90.0, 100.0, 105.0, 120.0], &market().at_expiration());
        assert_eq!(pl, vec![-500.0, -500.0, 0.0, 1500.0]);
    }

    #[test]
    fn test_short_put_mirrors_long_put() {
        let long = OptionLeg::new(Action::Buy, OptionType::Put)
            .with_strike(95.0)
            .with_premium(2.0)
            .with_quantity(3);
        let short = OptionLeg { action: Action::Sell, ..long };
        let sweep = PriceSweep::for_chart(100.0);
        let a = leg_pl(&long, sweep.as_slice(), &market());
        let b = leg_pl(&short, sweep.as_slice(), &market());
        for (x, y) in a.iter().zip(&b) {
            assert!((x + y).abs() < 1e-9, "long {x} and short {y} should cancel");
        }
    }

    #[test]
    fn test_before_expiration_uses_model_value() {
        let m = market();
        let leg = OptionLeg::new(Action::Buy, OptionType::Call)
            .with_strike(100.0)
            .with_premium(0.0);
        let pl = leg_pl(&leg, &[100.0], &m);
        let expected =
            BLACK_SCHOLES.price(&m.option_params(100.0, 100.0), OptionType::Call) * 100.0;
        assert!((pl[0] - expected).abs() < 1e-9);
        assert!(pl[0] > 0.0, "ATM call has time value before expiry");
    }

    #[test]
    fn test_incomplete_leg_contributes_zero() {
        let sweep = PriceSweep::for_key_metrics(100.0);
        let no_strike = OptionLeg::new(Action::Buy, OptionType::Call)
            .with_strike(0.0)
            .with_premium(3.0);
        let no_premium = OptionLeg::new(Action::Sell, OptionType::Put).with_strike(100.0);
        for leg in [no_strike, no_premium] {
            let pl = leg_pl(&leg, sweep.as_slice(), &market());
            assert_eq!(pl.len(), sweep.len());
            assert!(pl.iter().all(|&x| x == 0.0));
        }
        let total = strategy_pl(&[no_strike, no_premium], sweep.as_slice(), &market());
        assert!(total.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_empty_legs_zero_series() {
        let total = strategy_pl(&[], &[80.0, 100.0, 120.0], &market());
        assert_eq!(total.len(), 3);
        assert!(total.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_strategy_is_sum_of_legs() {
        let legs = [
            OptionLeg::new(Action::Buy, OptionType::Call).with_strike(102.0).with_premium(2.4),
            OptionLeg::new(Action::Sell, OptionType::Call)
                .with_strike(108.0)
                .with_premium(0.9)
                .with_quantity(2),
        ];
        let sweep = PriceSweep::for_chart(100.0);
        for m in [market(), market().at_expiration()] {
            let total = strategy_pl(&legs, sweep.as_slice(), &m);
            let a = leg_pl(&legs[0], sweep.as_slice(), &m);
            let b = leg_pl(&legs[1], sweep.as_slice(), &m);
            for i in 0..sweep.len() {
                assert!(
                    (total[i] - (a[i] + b[i])).abs() < 1e-9,
                    "sample {i}: {} vs {}",
                    total[i],
                    a[i] + b[i]
                );
            }
        }
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let legs = [
            OptionLeg::new(Action::Buy, OptionType::Call).with_strike(100.0).with_premium(3.1),
            OptionLeg::new(Action::Buy, OptionType::Put).with_strike(100.0).with_premium(2.7),
        ];
        let big = PriceSweep::new(100.0, 0.5, 1.5, 0.001);
        assert!(big.len() >= PARALLEL_THRESHOLD);
        let parallel = strategy_pl(&legs, big.as_slice(), &market());

        let sequential: Vec<f64> = big
            .as_slice()
            .chunks(PARALLEL_THRESHOLD - 1)
            .flat_map(|chunk| strategy_pl(&legs, chunk, &market()))
            .collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_payoff_profile_curves() {
        let legs = [OptionLeg::new(Action::Buy, OptionType::Call)
            .with_strike(105.0)
            .with_premium(1.5)];
        let profile = payoff_profile(&legs, &market());
        assert_eq!(profile.prices.len(), 31);
        assert_eq!(profile.pl_at_expiration.len(), 31);
        assert_eq!(profile.pl_current.len(), 31);
        // Before expiry the long call is worth at least its intrinsic value
        for (now, exp) in profile.pl_current.iter().zip(&profile.pl_at_expiration) {
            assert!(now + 1e-9 >= *exp, "current {now} below expiration {exp}");
        }
    }
}
