/// Trading days per year used to annualize daily close-to-close volatility
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annualized historical volatility (decimal) from a series of daily closes.
///
/// Log returns, population variance, scaled by sqrt(252). Returns None with
/// fewer than two usable closes. Non-positive or non-finite closes break the
/// chain: the return across them is skipped.
pub fn historical_volatility(closes: &[f64]) -> Option<f64> {
    let returns: Vec<f64> = closes
        .windows(2)
        .filter(|w| w[0] > 0.0 && w[1] > 0.0 && w[0].is_finite() && w[1].is_finite())
        .map(|w| (w[1] / w[0]).ln())
        .collect();

    if returns.is_empty() {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let var = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n;

    Some(var.sqrt() * TRADING_DAYS_PER_YEAR.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_series_zero_vol() {
        assert_eq!(historical_volatility(&[100.0, 100.0, 100.0]), Some(0.0));
    }

    #[test]
    fn test_too_short() {
        assert_eq!(historical_volatility(&[]), None);
        assert_eq!(historical_volatility(&[100.0]), None);
    }

    #[test]
    fn test_alternating_series() {
        // Returns alternate +-ln(1.01): population std = ln(1.01)
        let closes = [100.0, 101.0, 100.0, 101.0, 100.0];
        let vol = historical_volatility(&closes).unwrap();
        let expected = (1.01f64).ln() * 252f64.sqrt();
        assert!((vol - expected).abs() < 1e-9, "vol={vol} expected={expected}");
    }

    #[test]
    fn test_skips_bad_closes() {
        let vol = historical_volatility(&[100.0, 0.0, 100.0, 100.0]).unwrap();
        assert_eq!(vol, 0.0);
    }
}
