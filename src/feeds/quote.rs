use crate::errors::{EngineError, EngineResult};
use crate::strategy::MarketParameters;
use chrono::{DateTime, Utc};

// Quote record handed over by the market-data adapter:
// {
//   "symbol": "AAPL",
//   "price": 189.84,
//   "volatility": 23.41,          // annualized, in percent; null if unknown
//   "timestamp": "2026-02-17T08:27:54Z"
// }

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    /// Annualized volatility in percent, as providers report it.
    #[serde(default)]
    pub volatility: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Decode and sanity-check a quote.
    pub fn parse(json: &str) -> EngineResult<Self> {
        let quote: Quote = serde_json::from_str(json)?;

        if quote.price <= 0.0 || !quote.price.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "quote {}: invalid price {}",
                quote.symbol, quote.price
            )));
        }

        Ok(quote)
    }

    /// Quote volatility as a decimal, if the provider sent a usable one.
    pub fn volatility_decimal(&self) -> Option<f64> {
        self.volatility
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v / 100.0)
    }

    /// Market snapshot from this quote. The provider's volatility wins when
    /// present; otherwise `fallback_volatility` (decimal) is used.
    pub fn market_parameters(
        &self,
        risk_free_rate: f64,
        days_to_expiration: f64,
        fallback_volatility: f64,
    ) -> MarketParameters {
        let volatility = self.volatility_decimal().unwrap_or(fallback_volatility);
        MarketParameters::from_days(self.price, risk_free_rate, volatility, days_to_expiration)
    }

    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.timestamp).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"symbol":"AAPL","price":189.84,"volatility":23.41,"timestamp":"2026-02-17T08:27:54Z"}"#;

    #[test]
    fn test_parse_quote() {
        let q = Quote::parse(SAMPLE).unwrap();
        assert_eq!(q.symbol, "AAPL");
        assert_eq!(q.price, 189.84);
        assert!((q.volatility_decimal().unwrap() - 0.2341).abs() < 1e-12);
    }

    #[test]
    fn test_missing_volatility_falls_back() {
        let q = Quote::parse(
            r#"{"symbol":"SPY","price":500.0,"volatility":null,"timestamp":"2026-02-17T08:27:54Z"}"#,
        )
        .unwrap();
        let m = q.market_parameters(0.05, 30.0, 0.25);
        assert_eq!(m.volatility, 0.25);
        assert_eq!(m.spot, 500.0);

        let q2 =
            Quote::parse(r#"{"symbol":"SPY","price":500.0,"timestamp":"2026-02-17T08:27:54Z"}"#)
                .unwrap();
        assert_eq!(q2.volatility, None);
    }

    #[test]
    fn test_quote_volatility_wins() {
        let q = Quote::parse(SAMPLE).unwrap();
        let m = q.market_parameters(0.05, 73.0, 0.25);
        assert!((m.volatility - 0.2341).abs() < 1e-12);
        assert!((m.time_to_expiration - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_price() {
        let err = Quote::parse(r#"{"symbol":"X","price":0.0,"timestamp":"2026-02-17T08:27:54Z"}"#)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        let err = Quote::parse("{not json").unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[test]
    fn test_age() {
        let q = Quote::parse(SAMPLE).unwrap();
        let later = q.timestamp + chrono::Duration::seconds(90);
        assert_eq!(q.age_secs(later), 90);
    }
}
