//! Evaluate command implementation
//!
//! Simulates paths, builds a freshly initialised neural hedging strategy and
//! a Black-Scholes delta hedge, and reports their risk next to the
//! unhedged short call.

use tracing::{info, warn};

use super::mean_std;
use crate::config::HedgeConfig;
use crate::error::{hedging, Result};
use hedge_models::rng::HedgeRng;
use hedge_strategy::objective::HedgingObjective;
use hedge_strategy::strategy::{
    DeltaHedgingStrategy, FeedForwardHedgingStrategy, HedgingStrategy,
};
use hedge_strategy::StrategyError;

/// Path count used with `--gradient` unless `--num-paths` is given.
///
/// The gradient costs one dual pass over every path per network
/// parameter.
pub const GRADIENT_DEFAULT_PATHS: usize = 1_000;

/// Holds no position at any step.
struct NoHedge {
    steps: usize,
}

impl HedgingStrategy<f64> for NoHedge {
    fn num_steps(&self) -> usize {
        self.steps
    }

    fn hedge_ratio(
        &self,
        _step: usize,
        _spot: f64,
        _initial: f64,
    ) -> std::result::Result<f64, StrategyError> {
        Ok(0.0)
    }
}

/// Applies `--num-paths`, or caps the configured path count at
/// [`GRADIENT_DEFAULT_PATHS`] when the gradient is requested without one.
pub fn apply_path_count(config: &mut HedgeConfig, num_paths: Option<usize>, with_gradient: bool) {
    match num_paths {
        Some(n) => config.simulation.num_simulations = n,
        None if with_gradient && config.simulation.num_simulations > GRADIENT_DEFAULT_PATHS => {
            warn!(
                configured = config.simulation.num_simulations,
                used = GRADIENT_DEFAULT_PATHS,
                "capping path count for gradient; pass --num-paths to override"
            );
            config.simulation.num_simulations = GRADIENT_DEFAULT_PATHS;
        }
        None => {}
    }
}

/// Risk of one strategy on the simulated paths
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyReport {
    pub name: &'static str,
    pub loss: f64,
    pub mean_outcome: f64,
    pub std_outcome: f64,
}

/// Evaluation results
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub premium: f64,
    /// Short call with no hedge
    pub unhedged: StrategyReport,
    pub neural: StrategyReport,
    pub delta: StrategyReport,
    /// `(gradient norm, number of parameters)` when requested
    pub gradient: Option<(f64, usize)>,
}

/// Runs the evaluation without printing
pub fn evaluate(config: &HedgeConfig, with_gradient: bool) -> Result<Evaluation> {
    let sim = config.simulation_config()?;
    let generator = config.generator(config.simulation.model)?;
    let paths = generator.simulate(&sim).map_err(hedging)?;

    let premium = config.premium()?;
    let objective = HedgingObjective::new(config.option.strike, premium, config.risk_objective()?)
        .map_err(hedging)?;

    // Separate stream so network weights do not reuse the path draws
    let mut rng = HedgeRng::from_seed(sim.seed().wrapping_add(1));
    let neural =
        FeedForwardHedgingStrategy::new(config.strategy.hidden_nodes, sim.num_steps(), &mut rng)
            .map_err(hedging)?;

    let m = &config.market;
    let delta = DeltaHedgingStrategy::new(
        config.option.strike,
        m.rate,
        m.dividend,
        m.volatility,
        m.maturity,
        sim.num_steps(),
    )
    .map_err(hedging)?;

    let report = |name: &'static str, outcomes: Vec<f64>, loss: f64| {
        let (mean_outcome, std_outcome) = mean_std(&outcomes);
        StrategyReport {
            name,
            loss,
            mean_outcome,
            std_outcome,
        }
    };

    let no_hedge = NoHedge {
        steps: sim.num_steps(),
    };
    let unhedged_report = report(
        "unhedged",
        objective.outcomes(&no_hedge, &paths).map_err(hedging)?,
        objective.loss(&no_hedge, &paths).map_err(hedging)?,
    );
    let neural_report = report(
        "neural",
        objective.outcomes(&neural, &paths).map_err(hedging)?,
        objective.loss(&neural, &paths).map_err(hedging)?,
    );
    let delta_report = report(
        "delta",
        objective.outcomes(&delta, &paths).map_err(hedging)?,
        objective.loss(&delta, &paths).map_err(hedging)?,
    );

    let gradient = if with_gradient {
        let grad = objective.gradient(&neural, &paths).map_err(hedging)?;
        Some((grad.norm(), grad.parameters.len()))
    } else {
        None
    };

    Ok(Evaluation {
        premium,
        unhedged: unhedged_report,
        neural: neural_report,
        delta: delta_report,
        gradient,
    })
}

/// Run the evaluate command
pub fn run(config: &HedgeConfig, with_gradient: bool) -> Result<()> {
    info!("Starting evaluation...");
    info!("  Model: {:?}", config.simulation.model);
    info!("  Risk measure: {:?}", config.risk.measure);
    info!("  Hidden nodes: {}", config.strategy.hidden_nodes);

    let evaluation = evaluate(config, with_gradient)?;

    println!("\nPremium: {:.6}", evaluation.premium);
    println!("┌──────────┬──────────────┬──────────────┬──────────────┐");
    println!("│ Strategy │ Loss         │ Mean outcome │ Std outcome  │");
    println!("├──────────┼──────────────┼──────────────┼──────────────┤");
    for r in [&evaluation.unhedged, &evaluation.neural, &evaluation.delta] {
        println!(
            "│ {:<8} │ {:>12.6} │ {:>12.6} │ {:>12.6} │",
            r.name, r.loss, r.mean_outcome, r.std_outcome
        );
    }
    println!("└──────────┴──────────────┴──────────────┴──────────────┘");

    if let Some((norm, count)) = evaluation.gradient {
        println!("Gradient norm: {:.6} over {} parameters", norm, count);
    }

    info!("Evaluation complete");
    Ok(())
}
