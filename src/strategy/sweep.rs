use serde::Serialize;

/// Key-metric sweep: 50%..150% of spot in 1% steps (101 samples)
const METRICS_LOW: f64 = 0.5;
const METRICS_HIGH: f64 = 1.5;
const METRICS_STEP: f64 = 0.01;

/// Chart sweep: 70%..130% of spot in 2% steps (31 samples)
const CHART_LOW: f64 = 0.7;
const CHART_HIGH: f64 = 1.3;
const CHART_STEP: f64 = 0.02;

/// Upper bound on samples in one sweep; finer grids come back empty.
pub const MAX_SAMPLES: usize = 100_000;

/// Ordered candidate spot prices, the X axis of every P&L curve.
///
/// Samples are computed by index (`center * (low + i * step)`) rather than by
/// repeated addition, so the sample count and endpoints never drift with
/// floating-point accumulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSweep {
    prices: Vec<f64>,
}

impl PriceSweep {
    /// `low`, `high` and `step` are fractions of `center`.
    ///
    /// The sweep is empty when any input is non-finite, `center` or `step`
    /// is non-positive, `high < low`, or the grid would exceed
    /// [`MAX_SAMPLES`].
    pub fn new(center: f64, low: f64, high: f64, step: f64) -> Self {
        let finite = [center, low, high, step].iter().all(|v| v.is_finite());
        if !finite || center <= 0.0 || step <= 0.0 || high < low {
            return Self { prices: Vec::new() };
        }
        let span = ((high - low) / step).round();
        if !span.is_finite() || span >= MAX_SAMPLES as f64 {
            return Self { prices: Vec::new() };
        }
        let n = span as usize;
        let prices = (0..=n).map(|i| center * (low + i as f64 * step)).collect();
        Self { prices }
    }

    pub fn for_key_metrics(spot: f64) -> Self {
        Self::new(spot, METRICS_LOW, METRICS_HIGH, METRICS_STEP)
    }

    pub fn for_chart(spot: f64) -> Self {
        Self::new(spot, CHART_LOW, CHART_HIGH, CHART_STEP)
    }

    /// Caller-supplied samples, used as-is.
    pub fn from_prices(prices: Vec<f64>) -> Self {
        Self { prices }
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.prices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.prices.iter()
    }
}
