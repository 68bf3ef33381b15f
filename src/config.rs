use crate::errors::{EngineError, EngineResult};
use crate::feeds::quote::Quote;
use crate::models::volatility::historical_volatility;
use crate::strategy::catalogue::StrategyId;
use crate::strategy::MarketParameters;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub strategy: StrategyId,
    pub spot_price: f64,
    /// Annualized, decimal (0.25 = 25%)
    pub volatility: f64,
    /// Annualized, decimal
    pub risk_free_rate: f64,
    pub days_to_expiration: f64,
    pub quantity: u32,
    /// Optional quote from a market-data adapter; overrides spot and vol.
    pub quote: Option<Quote>,
    /// Optional daily closes; their realized vol replaces `volatility`.
    pub historical_closes: Option<Vec<f64>>,
}

impl AppConfig {
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` is this over the process env.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let strategy = var_or("STRATEGY", "long-call")
            .parse::<StrategyId>()
            .map_err(|e| EngineError::Config(format!("STRATEGY: {e}")))?;

        let spot_price = var_or("SPOT_PRICE", "100")
            .parse::<f64>()
            .map_err(|e| EngineError::Config(format!("SPOT_PRICE: {e}")))?;

        let volatility = var_or("VOLATILITY", "0.25")
            .parse::<f64>()
            .map_err(|e| EngineError::Config(format!("VOLATILITY: {e}")))?;

        let risk_free_rate = var_or("RISK_FREE_RATE", "0.05")
            .parse::<f64>()
            .map_err(|e| EngineError::Config(format!("RISK_FREE_RATE: {e}")))?;

        let days_to_expiration = var_or("DAYS_TO_EXPIRATION", "30")
            .parse::<f64>()
            .map_err(|e| EngineError::Config(format!("DAYS_TO_EXPIRATION: {e}")))?;

        let quantity = var_or("QUANTITY", "1")
            .parse::<u32>()
            .map_err(|e| EngineError::Config(format!("QUANTITY: {e}")))?;

        let quote = match lookup("QUOTE_JSON") {
            Some(raw) if !raw.trim().is_empty() => Some(
                Quote::parse(&raw).map_err(|e| EngineError::Config(format!("QUOTE_JSON: {e}")))?,
            ),
            _ => None,
        };

        let historical_closes = match lookup("HISTORICAL_CLOSES") {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.split(',')
                    .map(|v| v.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| EngineError::Config(format!("HISTORICAL_CLOSES: {e}")))?,
            ),
            _ => None,
        };

        Ok(Self {
            strategy,
            spot_price,
            volatility,
            risk_free_rate,
            days_to_expiration,
            quantity,
            quote,
            historical_closes,
        })
    }

    /// Volatility to use when the quote does not carry one: realized vol of
    /// the configured closes if they yield a positive figure, else VOLATILITY.
    pub fn fallback_volatility(&self) -> f64 {
        self.historical_closes
            .as_deref()
            .and_then(historical_volatility)
            .filter(|v| *v > 0.0)
            .unwrap_or(self.volatility)
    }

    /// Market snapshot for this run. A configured quote supplies spot and,
    /// when it carries one, volatility.
    pub fn market_parameters(&self) -> MarketParameters {
        let volatility = self.fallback_volatility();
        match &self.quote {
            Some(q) => {
                q.market_parameters(self.risk_free_rate, self.days_to_expiration, volatility)
            }
            None => MarketParameters::from_days(
                self.spot_price,
                self.risk_free_rate,
                volatility,
                self.days_to_expiration,
            ),
        }
    }
}
