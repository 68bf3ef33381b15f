use crate::models::OptionType;
use crate::strategy::greeks::{strategy_greeks, StrategyGreeks};
use crate::strategy::pnl::strategy_pl;
use crate::strategy::sweep::PriceSweep;
use crate::strategy::{MarketParameters, OptionLeg, CONTRACT_MULTIPLIER};
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

pub type Breakevens = SmallVec<[f64; 4]>;

/// Max profit or max loss of a strategy.
///
/// Serializes as a plain number, or as the string "Unlimited".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Finite(f64),
    Unbounded,
}

impl Bound {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }

    pub fn finite(&self) -> Option<f64> {
        match self {
            Bound::Finite(v) => Some(*v),
            Bound::Unbounded => None,
        }
    }
}

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bound::Finite(v) => serializer.serialize_f64(*v),
            Bound::Unbounded => serializer.serialize_str("Unlimited"),
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Finite(v) => write!(f, "{v:.2}"),
            Bound::Unbounded => write!(f, "Unlimited"),
        }
    }
}

/// Expiration-view summary of a strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub max_profit: Bound,
    /// Signed: a loss is negative.
    pub max_loss: Bound,
    /// Raw sweep extrema, kept even when the analytic bound is unlimited.
    pub sweep_max: f64,
    pub sweep_min: f64,
    pub breakevens: Breakevens,
    /// Positive = net premium paid, negative = net premium received.
    pub net_cost: f64,
}

/// Key metrics plus aggregate Greeks at the current spot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyMetrics {
    #[serde(flatten)]
    pub key: KeyMetrics,
    pub greeks: StrategyGreeks,
}

/// Max profit/loss, breakevens and net cost, all at expiration.
///
/// The curve is sampled on 50%..150% of spot regardless of the caller's
/// time to expiry. Profit or loss is reported as unbounded when the active
/// legs leave a net long or net short call position; puts are bounded
/// because the underlying cannot fall below zero.
pub fn key_metrics(legs: &[OptionLeg], market: &MarketParameters) -> KeyMetrics {
    let sweep = PriceSweep::for_key_metrics(market.spot);
    let pls = strategy_pl(legs, sweep.as_slice(), &market.at_expiration());

    let sweep_max = pls.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sweep_min = pls.iter().copied().fold(f64::INFINITY, f64::min);
    // Empty sweep (non-positive or non-finite spot) leaves the folds at their seeds
    let (sweep_max, sweep_min) = if pls.is_empty() { (0.0, 0.0) } else { (sweep_max, sweep_min) };

    let net_calls = net_call_quantity(legs);
    let max_profit = if net_calls > 0.0 { Bound::Unbounded } else { Bound::Finite(sweep_max) };
    let max_loss = if net_calls < 0.0 { Bound::Unbounded } else { Bound::Finite(sweep_min) };

    KeyMetrics {
        max_profit,
        max_loss,
        sweep_max,
        sweep_min,
        breakevens: find_breakevens(sweep.as_slice(), &pls),
        net_cost: net_cost(legs),
    }
}

pub fn strategy_metrics(legs: &[OptionLeg], market: &MarketParameters) -> StrategyMetrics {
    StrategyMetrics {
        key: key_metrics(legs, market),
        greeks: strategy_greeks(legs, market),
    }
}

/// Zero crossings of a P&L curve, linearly interpolated, in sweep order.
///
/// A pair of neighbours brackets a breakeven when their signs differ or one
/// of them is exactly zero. Pairs that are both zero carry no crossing and
/// are skipped, so a flat zero stretch is reported by its two edges. A
/// sample that is exactly zero is reported once, not once per pair.
pub fn find_breakevens(prices: &[f64], pls: &[f64]) -> Breakevens {
    let mut out = Breakevens::new();
    let n = prices.len().min(pls.len());

    for i in 1..n {
        let (a, b) = (pls[i - 1], pls[i]);
        if a == 0.0 && b == 0.0 {
            continue;
        }
        let brackets = (a <= 0.0 && b >= 0.0) || (a >= 0.0 && b <= 0.0);
        if !brackets {
            continue;
        }
        let ratio = a.abs() / (a.abs() + b.abs());
        let x = prices[i - 1] + (prices[i] - prices[i - 1]) * ratio;
        if out.last() != Some(&x) {
            out.push(x);
        }
    }
    out
}

/// Cost to establish the position: +premium paid on buys, -premium
/// received on sells, times quantity and the contract multiplier.
pub fn net_cost(legs: &[OptionLeg]) -> f64 {
    legs.iter()
        .filter(|leg| leg.is_active())
        .map(|leg| leg.premium.unwrap_or(0.0) * leg.signed_quantity() * CONTRACT_MULTIPLIER)
        .sum()
}

/// Net long call contracts across active legs.
fn net_call_quantity(legs: &[OptionLeg]) -> f64 {
    legs.iter()
        .filter(|leg| leg.is_active() && leg.option_type == OptionType::Call)
        .map(|leg| leg.signed_quantity())
        .sum()
}
