//! Standard normal density and distribution.
//!
//! The CDF uses the Abramowitz-Stegun 7.1.26 rational approximation of erf
//! (max abs error ~1.5e-7). Symmetry N(-x) = 1 - N(x) holds by construction
//! because the approximation is evaluated on |x| and mirrored.

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

// A&S 7.1.26 coefficients
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;
const P: f64 = 0.327_591_1;

#[inline]
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() * INV_SQRT_2PI
}

#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let z = x.abs() / std::f64::consts::SQRT_2;

    let t = 1.0 / (1.0 + P * z);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    let erf = 1.0 - poly * (-z * z).exp();

    0.5 * (1.0 + sign * erf)
}
