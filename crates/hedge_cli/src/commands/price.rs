//! Price command implementation
//!
//! Black-Scholes price and Greeks of the configured European call.

use serde::Serialize;
use tracing::info;

use crate::config::HedgeConfig;
use crate::error::{hedging, CliError, Result};
use hedge_models::analytical::BlackScholesCallOption;

/// Overrides for the `[market]` and `[option]` settings
#[derive(Debug, Clone, Default)]
pub struct PriceArgs {
    pub spot: Option<f64>,
    pub strike: Option<f64>,
    pub rate: Option<f64>,
    pub dividend: Option<f64>,
    pub volatility: Option<f64>,
    pub maturity: Option<f64>,
}

#[derive(Debug, Serialize)]
struct PriceReport {
    spot: f64,
    strike: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    maturity: f64,
    price: f64,
    delta: f64,
    gamma: f64,
    vega: f64,
}

impl PriceReport {
    fn new(option: &BlackScholesCallOption<f64>) -> Self {
        Self {
            spot: option.spot(),
            strike: option.strike(),
            rate: option.rate(),
            dividend: option.dividend(),
            volatility: option.volatility(),
            maturity: option.maturity(),
            price: option.price(),
            delta: option.delta(),
            gamma: option.gamma(),
            vega: option.vega(),
        }
    }
}

/// Run the price command
pub fn run(config: &HedgeConfig, args: &PriceArgs, format: &str) -> Result<()> {
    let m = &config.market;
    let option = BlackScholesCallOption::new(
        args.spot.unwrap_or(m.spot),
        args.strike.unwrap_or(config.option.strike),
        args.rate.unwrap_or(m.rate),
        args.dividend.unwrap_or(m.dividend),
        args.maturity.unwrap_or(m.maturity),
        args.volatility.unwrap_or(m.volatility),
    )
    .map_err(hedging)?;

    info!("Pricing European call...");
    let report = PriceReport::new(&option);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => {
            println!("\n┌────────────┬──────────────┐");
            println!("│ Field      │ Value        │");
            println!("├────────────┼──────────────┤");
            for (name, value) in [
                ("Spot", report.spot),
                ("Strike", report.strike),
                ("Rate", report.rate),
                ("Dividend", report.dividend),
                ("Volatility", report.volatility),
                ("Maturity", report.maturity),
                ("Price", report.price),
                ("Delta", report.delta),
                ("Gamma", report.gamma),
                ("Vega", report.vega),
            ] {
                println!("│ {:<10} │ {:>12.6} │", name, value);
            }
            println!("└────────────┴──────────────┘");
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            )));
        }
    }

    info!("Pricing complete");
    Ok(())
}
