//! Simulate command implementation
//!
//! Generates price paths and summarises the terminal distribution.

use tracing::info;

use super::mean_std;
use crate::config::{HedgeConfig, ModelKind};
use crate::error::{hedging, Result};
use hedge_core::types::PricePath;
use hedge_models::instruments::european_call_payoff;

/// Terminal price statistics of a simulation
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl TerminalSummary {
    pub fn from_paths(paths: &PricePath<f64>) -> Self {
        let terminal = paths.terminal_prices();
        let (mean, std_dev) = mean_std(&terminal);
        let min = terminal.iter().copied().fold(f64::INFINITY, f64::min);
        let max = terminal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean,
            std_dev,
            min,
            max,
        }
    }
}

/// Run the simulate command
pub fn run(config: &HedgeConfig, model: Option<ModelKind>) -> Result<()> {
    let model = model.unwrap_or(config.simulation.model);
    let sim = config.simulation_config()?;
    let generator = config.generator(model)?;

    info!("Starting simulation...");
    info!("  Model: {}", generator.name());
    info!("  Paths: {}", sim.num_simulations());
    info!("  Timesteps: {}", sim.num_timesteps());
    info!("  Seed: {}", sim.seed());

    let paths = generator.simulate(&sim).map_err(hedging)?;
    let summary = TerminalSummary::from_paths(&paths);

    println!("\nTerminal prices ({} paths)", paths.num_simulations());
    println!("  Mean:    {:>12.6}", summary.mean);
    println!("  Std dev: {:>12.6}", summary.std_dev);
    println!("  Min:     {:>12.6}", summary.min);
    println!("  Max:     {:>12.6}", summary.max);

    if model == ModelKind::BlackScholes {
        let m = &config.market;
        let payoff = european_call_payoff(&paths.terminal_prices(), config.option.strike);
        let (mean_payoff, std_payoff) = mean_std(&payoff);
        let discount = (-m.rate * m.maturity).exp();
        let mc_price = discount * mean_payoff;
        let std_error = discount * std_payoff / (payoff.len() as f64).sqrt();
        let bs_price = config.option_contract()?.price();

        println!("\nCall K = {}", config.option.strike);
        println!("  Monte Carlo:   {:>12.6} (± {:.6})", mc_price, std_error);
        println!("  Black-Scholes: {:>12.6}", bs_price);
    }

    info!("Simulation complete");
    Ok(())
}
