use crate::errors::{EngineError, EngineResult};
use crate::models::OptionType;
use crate::models::OptionType::{Call, Put};
use crate::strategy::Action::{Buy, Sell};
use crate::strategy::{Action, Legs, OptionLeg};
use serde::Serialize;
use std::str::FromStr;

// ── Identifiers ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyId {
    LongCall,
    LongPut,
    ShortCall,
    ShortPut,
    LongStraddle,
    ShortStraddle,
    LongStrangle,
    ShortStrangle,
    BullCallSpread,
    BearCallSpread,
    BullPutSpread,
    BearPutSpread,
}

impl StrategyId {
    pub const ALL: [StrategyId; 12] = [
        Self::LongCall,
        Self::LongPut,
        Self::ShortCall,
        Self::ShortPut,
        Self::LongStraddle,
        Self::ShortStraddle,
        Self::LongStrangle,
        Self::ShortStrangle,
        Self::BullCallSpread,
        Self::BearCallSpread,
        Self::BullPutSpread,
        Self::BearPutSpread,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LongCall => "long-call",
            Self::LongPut => "long-put",
            Self::ShortCall => "short-call",
            Self::ShortPut => "short-put",
            Self::LongStraddle => "long-straddle",
            Self::ShortStraddle => "short-straddle",
            Self::LongStrangle => "long-strangle",
            Self::ShortStrangle => "short-strangle",
            Self::BullCallSpread => "bull-call-spread",
            Self::BearCallSpread => "bear-call-spread",
            Self::BullPutSpread => "bull-put-spread",
            Self::BearPutSpread => "bear-put-spread",
        }
    }

    pub fn template(self) -> &'static StrategyTemplate {
        // ALL and STRATEGIES share ordering
        &STRATEGIES[self as usize]
    }

    /// Strike as a fraction of spot for each leg, in leg order.
    /// The spread pairs are deliberately not symmetric around one formula.
    fn default_strike_factors(self) -> &'static [f64] {
        match self {
            Self::LongCall | Self::ShortCall => &[1.05],
            Self::LongPut | Self::ShortPut => &[0.95],
            Self::LongStraddle | Self::ShortStraddle => &[1.0, 1.0],
            // call leg first, put leg second
            Self::LongStrangle | Self::ShortStrangle => &[1.05, 0.95],
            Self::BullCallSpread => &[1.02, 1.08],
            Self::BearCallSpread => &[1.02, 1.08],
            Self::BullPutSpread => &[0.95, 0.90],
            Self::BearPutSpread => &[0.95, 0.90],
        }
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EngineError::UnknownStrategy(s.to_string()))
    }
}

// ── Templates ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
}

/// Action + type of one template leg. Strike and premium are filled later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegShape {
    pub action: Action,
    pub option_type: OptionType,
}

const fn shape(action: Action, option_type: OptionType) -> LegShape {
    LegShape { action, option_type }
}

/// Static catalogue entry. Risk and complexity are informational only.
#[derive(Debug, Serialize)]
pub struct StrategyTemplate {
    pub id: StrategyId,
    pub name: &'static str,
    pub description: &'static str,
    pub risk_level: RiskLevel,
    pub complexity: Complexity,
    pub legs: &'static [LegShape],
}

static STRATEGIES: [StrategyTemplate; 12] = [
    StrategyTemplate {
        id: StrategyId::LongCall,
        name: "Long Call",
        description: "Bullish strategy. Buy a call option expecting the stock price to rise above the strike price.",
        risk_level: RiskLevel::Low,
        complexity: Complexity::Beginner,
        legs: &[shape(Buy, Call)],
    },
    StrategyTemplate {
        id: StrategyId::LongPut,
        name: "Long Put",
        description: "Bearish strategy. Buy a put option expecting the stock price to fall below the strike price.",
        risk_level: RiskLevel::Low,
        complexity: Complexity::Beginner,
        legs: &[shape(Buy, Put)],
    },
    StrategyTemplate {
        id: StrategyId::ShortCall,
        name: "Short Call",
        description: "Bearish strategy. Sell a call option expecting the stock price to stay below the strike price.",
        risk_level: RiskLevel::High,
        complexity: Complexity::Intermediate,
        legs: &[shape(Sell, Call)],
    },
    StrategyTemplate {
        id: StrategyId::ShortPut,
        name: "Short Put",
        description: "Bullish strategy. Sell a put option expecting the stock price to stay above the strike price.",
        risk_level: RiskLevel::High,
        complexity: Complexity::Intermediate,
        legs: &[shape(Sell, Put)],
    },
    StrategyTemplate {
        id: StrategyId::LongStraddle,
        name: "Long Straddle",
        description: "Neutral strategy expecting high volatility. Buy both call and put at the same strike price.",
        risk_level: RiskLevel::Medium,
        complexity: Complexity::Intermediate,
        legs: &[shape(Buy, Call), shape(Buy, Put)],
    },
    StrategyTemplate {
        id: StrategyId::ShortStraddle,
        name: "Short Straddle",
        description: "Neutral strategy expecting low volatility. Sell both call and put at the same strike price.",
        risk_level: RiskLevel::High,
        complexity: Complexity::Advanced,
        legs: &[shape(Sell, Call), shape(Sell, Put)],
    },
    StrategyTemplate {
        id: StrategyId::LongStrangle,
        name: "Long Strangle",
        description: "Neutral strategy expecting high volatility. Buy call and put at different strike prices.",
        risk_level: RiskLevel::Medium,
        complexity: Complexity::Intermediate,
        legs: &[shape(Buy, Call), shape(Buy, Put)],
    },
    StrategyTemplate {
        id: StrategyId::ShortStrangle,
        name: "Short Strangle",
        description: "Neutral strategy expecting low volatility. Sell call and put at different strike prices.",
        risk_level: RiskLevel::High,
        complexity: Complexity::Advanced,
        legs: &[shape(Sell, Call), shape(Sell, Put)],
    },
    StrategyTemplate {
        id: StrategyId::BullCallSpread,
        name: "Bull Call Spread",
        description: "Moderately bullish strategy. Buy lower strike call, sell higher strike call.",
        risk_level: RiskLevel::Medium,
        complexity: Complexity::Intermediate,
        legs: &[shape(Buy, Call), shape(Sell, Call)],
    },
    StrategyTemplate {
        id: StrategyId::BearCallSpread,
        name: "Bear Call Spread",
        description: "Moderately bearish strategy. Sell lower strike call, buy higher strike call.",
        risk_level: RiskLevel::Medium,
        complexity: Complexity::Intermediate,
        legs: &[shape(Sell, Call), shape(Buy, Call)],
    },
    StrategyTemplate {
        id: StrategyId::BullPutSpread,
        name: "Bull Put Spread",
        description: "Moderately bullish strategy. Sell higher strike put, buy lower strike put.",
        risk_level: RiskLevel::Medium,
        complexity: Complexity::Intermediate,
        legs: &[shape(Sell, Put), shape(Buy, Put)],
    },
    StrategyTemplate {
        id: StrategyId::BearPutSpread,
        name: "Bear Put Spread",
        description: "Moderately bearish strategy. Buy higher strike put, sell lower strike put.",
        risk_level: RiskLevel::Medium,
        complexity: Complexity::Intermediate,
        legs: &[shape(Buy, Put), shape(Sell, Put)],
    },
];

/// Look up a template by its kebab-case key.
pub fn get_strategy(key: &str) -> EngineResult<&'static StrategyTemplate> {
    key.parse::<StrategyId>().map(StrategyId::template)
}

/// Every template, in catalogue order.
pub fn all_strategies() -> &'static [StrategyTemplate] {
    &STRATEGIES
}

/// Derive concrete legs from a template: strikes at a fixed fraction of
/// spot rounded to a whole currency unit, premium unset, quantity 1.
/// The template itself is never touched.
pub fn apply_default_strikes(template: &StrategyTemplate, spot: f64) -> Legs {
    template
        .legs
        .iter()
        .zip(template.id.default_strike_factors())
        .map(|(shape, factor)| {
            OptionLeg::new(shape.action, shape.option_type).with_strike((spot * factor).round())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strikes(key: &str, spot: f64) -> Vec<f64> {
        let template = get_strategy(key).unwrap();
        apply_default_strikes(template, spot).iter().map(|l| l.strike).collect()
    }

    #[test]
    fn test_catalogue_order_matches_ids() {
        for (i, id) in StrategyId::ALL.iter().enumerate() {
            assert_eq!(all_strategies()[i].id, *id, "catalogue slot {i} out of order");
            assert_eq!(id.template().id, *id);
            assert_eq!(
                id.template().legs.len(),
                id.default_strike_factors().len(),
                "{id}: every leg needs a strike factor"
            );
        }
    }

    #[test]
    fn test_lookup_round_trip() {
        for id in StrategyId::ALL {
            assert_eq!(get_strategy(id.as_str()).unwrap().id, id);
            assert_eq!(id.to_string().parse::<StrategyId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_strategy() {
        let err = get_strategy("iron-condor").unwrap_err();
        assert!(matches!(err, EngineError::UnknownStrategy(ref k) if k == "iron-condor"));
    }

    #[test]
    fn test_default_strikes() {
        assert_eq!(strikes("long-call", 100.0), vec![105.0]);
        assert_eq!(strikes("short-put", 100.0), vec![95.0]);
        assert_eq!(strikes("long-straddle", 100.4), vec![100.0, 100.0]);
        assert_eq!(strikes("short-strangle", 200.0), vec![210.0, 190.0]);
        assert_eq!(strikes("bull-call-spread", 100.0), vec![102.0, 108.0]);
        assert_eq!(strikes("bear-call-spread", 100.0), vec![102.0, 108.0]);
        assert_eq!(strikes("bull-put-spread", 100.0), vec![95.0, 90.0]);
        assert_eq!(strikes("bear-put-spread", 250.0), vec![238.0, 225.0]);
    }

    #[test]
    fn test_default_legs_unpriced() {
        let legs = apply_default_strikes(StrategyId::BullPutSpread.template(), 100.0);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].action, Action::Sell);
        assert_eq!(legs[1].action, Action::Buy);
        assert!(legs.iter().all(|l| l.premium.is_none() && l.quantity == 1));
        assert!(legs.iter().all(|l| !l.is_active()));
    }
}
