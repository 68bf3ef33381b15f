use crate::models::normal::{normal_cdf, normal_pdf};
use crate::models::{OptionMetrics, OptionParams, OptionType, PricingModel};

/// Black-Scholes European option pricing.
///
/// C = S*N(d1) - K*e^{-rT}*N(d2)
/// P = K*e^{-rT}*N(-d2) - S*N(-d1)
///
/// where d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// and d2 = d1 - sigma * sqrt(T).
///
/// At T <= 0 every function takes the expiration branch (intrinsic value,
/// step delta, zero higher Greeks) and never evaluates d1/d2.
/// sigma <= 0 with T > 0 divides by zero: callers validate inputs first.
pub struct BlackScholes;

impl BlackScholes {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BlackScholes {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingModel for BlackScholes {
    #[inline]
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    #[inline]
    fn price(&self, params: &OptionParams, option_type: OptionType) -> f64 {
        price(params, option_type)
    }

    #[inline]
    fn metrics(&self, params: &OptionParams, option_type: OptionType) -> OptionMetrics {
        all_metrics(params, option_type)
    }
}

#[inline]
pub fn d1(p: &OptionParams) -> f64 {
    ((p.spot / p.strike).ln() + (p.rate + 0.5 * p.sigma * p.sigma) * p.ttl_years) / p.sigma_sqrt_t
}

#[inline]
pub fn d2(p: &OptionParams) -> f64 {
    d1(p) - p.sigma_sqrt_t
}

#[inline]
pub fn call_price(p: &OptionParams) -> f64 {
    if p.is_expired() {
        return intrinsic_value(p.spot, p.strike, OptionType::Call);
    }
    let d1 = d1(p);
    let d2 = d1 - p.sigma_sqrt_t;
    let value = p.spot * normal_cdf(d1) - p.strike * (-p.rate * p.ttl_years).exp() * normal_cdf(d2);
    value.max(0.0)
}

#[inline]
pub fn put_price(p: &OptionParams) -> f64 {
    if p.is_expired() {
        return intrinsic_value(p.spot, p.strike, OptionType::Put);
    }
    let d1 = d1(p);
    let d2 = d1 - p.sigma_sqrt_t;
    let value =
        p.strike * (-p.rate * p.ttl_years).exp() * normal_cdf(-d2) - p.spot * normal_cdf(-d1);
    value.max(0.0)
}

#[inline]
pub fn price(p: &OptionParams, option_type: OptionType) -> f64 {
    match option_type {
        OptionType::Call => call_price(p),
        OptionType::Put => put_price(p),
    }
}

pub fn delta(p: &OptionParams, option_type: OptionType) -> f64 {
    if p.is_expired() {
        return match option_type {
            OptionType::Call => if p.spot > p.strike { 1.0 } else { 0.0 },
            OptionType::Put => if p.spot < p.strike { -1.0 } else { 0.0 },
        };
    }
    let n_d1 = normal_cdf(d1(p));
    match option_type {
        OptionType::Call => n_d1,
        OptionType::Put => n_d1 - 1.0,
    }
}

/// Same for calls and puts.
pub fn gamma(p: &OptionParams) -> f64 {
    if p.is_expired() {
        return 0.0;
    }
    normal_pdf(d1(p)) / (p.spot * p.sigma_sqrt_t)
}

/// Daily theta: annual decay divided by 365.
pub fn theta(p: &OptionParams, option_type: OptionType) -> f64 {
    if p.is_expired() {
        return 0.0;
    }
    let d1 = d1(p);
    let d2 = d1 - p.sigma_sqrt_t;
    let discounted_strike = p.strike * (-p.rate * p.ttl_years).exp();

    let decay = -p.spot * normal_pdf(d1) * p.sigma / (2.0 * p.sqrt_t);
    let carry = match option_type {
        OptionType::Call => -p.rate * discounted_strike * normal_cdf(d2),
        OptionType::Put => p.rate * discounted_strike * normal_cdf(-d2),
    };
    (decay + carry) / 365.0
}

/// Vega per 1 vol point (raw vega / 100).
pub fn vega(p: &OptionParams) -> f64 {
    vega_raw(p) / 100.0
}

/// dPrice/dSigma in price units. The IV solver needs this unscaled form.
#[inline]
pub fn vega_raw(p: &OptionParams) -> f64 {
    if p.is_expired() {
        return 0.0;
    }
    p.spot * normal_pdf(d1(p)) * p.sqrt_t
}

/// Rho per 1 rate point.
pub fn rho(p: &OptionParams, option_type: OptionType) -> f64 {
    if p.is_expired() {
        return 0.0;
    }
    let d2 = d2(p);
    let kt_disc = p.strike * p.ttl_years * (-p.rate * p.ttl_years).exp();
    match option_type {
        OptionType::Call => kt_disc * normal_cdf(d2) / 100.0,
        OptionType::Put => -kt_disc * normal_cdf(-d2) / 100.0,
    }
}

pub fn all_metrics(p: &OptionParams, option_type: OptionType) -> OptionMetrics {
    OptionMetrics {
        price: price(p, option_type),
        delta: delta(p, option_type),
        gamma: gamma(p),
        theta: theta(p, option_type),
        vega: vega(p),
        rho: rho(p, option_type),
    }
}

#[inline]
pub fn intrinsic_value(spot: f64, strike: f64, option_type: OptionType) -> f64 {
    match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    }
}

pub fn time_value(p: &OptionParams, option_type: OptionType) -> f64 {
    let theoretical = price(p, option_type);
    (theoretical - intrinsic_value(p.spot, p.strike, option_type)).max(0.0)
}
