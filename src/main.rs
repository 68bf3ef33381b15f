use optionsmith::config::AppConfig;
use optionsmith::report::{self, StrategyReport};
use optionsmith::strategy::catalogue::apply_default_strikes;
use optionsmith::strategy::{price_unset_premiums, Legs};
use optionsmith::EngineResult;

fn main() {
    // Structured logging on stderr; stdout carries the JSON report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    let report = match run(&cfg) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, strategy = %cfg.strategy, "evaluation failed");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("serialize error: {e}");
            std::process::exit(1);
        }
    }
}

/// Template -> default strikes -> theoretical premiums -> report.
fn run(cfg: &AppConfig) -> EngineResult<StrategyReport> {
    let market = cfg.market_parameters();
    let template = cfg.strategy.template();

    if let Some(quote) = &cfg.quote {
        tracing::info!(
            symbol = %quote.symbol,
            price = quote.price,
            volatility = ?quote.volatility,
            age_secs = quote.age_secs(chrono::Utc::now()),
            "using quote"
        );
    }

    tracing::info!(
        strategy = template.name,
        risk = ?template.risk_level,
        complexity = ?template.complexity,
        spot = market.spot,
        volatility = market.volatility,
        rate = market.risk_free_rate,
        days = cfg.days_to_expiration,
        "evaluating strategy"
    );

    let legs: Legs = apply_default_strikes(template, market.spot)
        .into_iter()
        .map(|leg| leg.with_quantity(cfg.quantity))
        .collect();
    let legs = price_unset_premiums(&legs, &market);

    let report = report::evaluate(Some(template.id), &legs, &market)?;

    for (i, leg) in report.legs.iter().enumerate() {
        tracing::info!(
            leg = i + 1,
            action = %leg.leg.action,
            option_type = %leg.leg.option_type,
            strike = leg.leg.strike,
            premium = ?leg.leg.premium,
            quantity = leg.leg.quantity,
            delta = leg.metrics.delta,
            "leg priced"
        );
    }

    let key = &report.metrics.key;
    let greeks = &report.metrics.greeks;
    tracing::info!(
        max_profit = %key.max_profit,
        max_loss = %key.max_loss,
        breakevens = ?key.breakevens.as_slice(),
        net_cost = key.net_cost,
        delta = greeks.delta,
        gamma = greeks.gamma,
        theta = greeks.theta,
        vega = greeks.vega,
        "strategy metrics"
    );

    Ok(report)
}
