//! Integration tests for the P&L loop, the delta benchmark and the
//! objective gradient.
//!
//! # Test Categories
//!
//! 1. **Invariants**: zero increments give zero P&L, output shapes
//! 2. **Benchmark**: delta hedging reduces outcome dispersion
//! 3. **Gradients**: forward-mode gradient vs central finite differences

use approx::assert_relative_eq;
use hedge_core::types::PricePath;
use hedge_models::analytical::BlackScholesCallOption;
use hedge_models::generators::{BlackScholesGenerator, PathGenerator, SimulationConfig};
use hedge_models::rng::HedgeRng;
use hedge_risk::{RiskMeasure, RiskObjective};
use hedge_strategy::objective::HedgingObjective;
use hedge_strategy::strategy::{
    DeltaHedgingStrategy, FeedForwardHedgingStrategy, HedgingStrategy,
};
use hedge_strategy::StrategyError;
use proptest::prelude::*;

fn gbm_paths(n: usize, m: usize, seed: u64) -> PricePath<f64> {
    let config = SimulationConfig::builder()
        .num_simulations(n)
        .num_timesteps(m)
        .seed(seed)
        .build()
        .unwrap();
    BlackScholesGenerator::new(100.0, 0.0, 0.0, 0.2, 1.0)
        .unwrap()
        .simulate(&config)
        .unwrap()
}

fn std_dev(xs: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    (xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt()
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #[test]
    fn prop_zero_increments_give_zero_pnl(
        seed in any::<u64>(),
        hidden in 1_usize..6,
        steps in 1_usize..6,
        spots in proptest::collection::vec(1.0_f64..500.0, 1..8),
    ) {
        let mut rng = HedgeRng::from_seed(seed);
        let strategy = FeedForwardHedgingStrategy::new(hidden, steps, &mut rng).unwrap();
        let rows: Vec<Vec<f64>> = spots.iter().map(|&s| vec![s; steps + 1]).collect();
        let paths = PricePath::from_rows(rows).unwrap();

        let out = strategy.forward(&paths).unwrap();
        prop_assert!(out.pnl.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn prop_output_shapes(
        seed in any::<u64>(),
        n in 1_usize..20,
        m in 2_usize..12,
    ) {
        let paths = gbm_paths(n, m, seed);
        let mut rng = HedgeRng::from_seed(seed);
        let strategy = FeedForwardHedgingStrategy::new(3, m - 1, &mut rng).unwrap();
        let out = strategy.forward(&paths).unwrap();
        prop_assert_eq!(out.pnl.len(), n);
        prop_assert_eq!(out.hedge.shape(), (n, m - 1));

        let delta = DeltaHedgingStrategy::new(100.0, 0.0, 0.0, 0.2, 1.0, m - 1).unwrap();
        let out = delta.forward(&paths).unwrap();
        prop_assert_eq!(out.pnl.len(), n);
        prop_assert_eq!(out.hedge.shape(), (n, m - 1));
    }
}

#[test]
fn test_mismatched_strategy_length() {
    let paths = gbm_paths(4, 6, 1);
    let mut rng = HedgeRng::from_seed(1);
    let strategy = FeedForwardHedgingStrategy::new(3, 3, &mut rng).unwrap();
    assert!(matches!(
        strategy.forward(&paths),
        Err(StrategyError::DimensionMismatch(_))
    ));
}

// ============================================================================
// Delta Benchmark
// ============================================================================

#[test]
fn test_delta_hedge_reduces_dispersion() {
    let steps = 50;
    let paths = gbm_paths(5_000, steps + 1, 21);
    let premium = BlackScholesCallOption::new(100.0, 100.0, 0.0, 0.0, 1.0, 0.2)
        .unwrap()
        .price();
    let risk = RiskObjective::new(RiskMeasure::cvar(0.9).unwrap(), 0.0).unwrap();
    let objective = HedgingObjective::new(100.0, premium, risk).unwrap();

    let delta = DeltaHedgingStrategy::new(100.0, 0.0, 0.0, 0.2, 1.0, steps).unwrap();
    let hedged = objective.outcomes(&delta, &paths).unwrap();

    // all-zero parameters hold nothing
    let template = FeedForwardHedgingStrategy::new(2, steps, &mut HedgeRng::from_seed(0)).unwrap();
    let zero = template
        .with_parameters(&vec![0.0; template.num_parameters()])
        .unwrap();
    let unhedged = objective.outcomes(&zero, &paths).unwrap();

    let (s_hedged, s_unhedged) = (std_dev(&hedged), std_dev(&unhedged));
    assert!(
        s_hedged < 0.3 * s_unhedged,
        "hedged std {} vs unhedged std {}",
        s_hedged,
        s_unhedged
    );

    // Mean outcome of a self-financing delta hedge sold at the fair premium is near zero
    let mean = hedged.iter().sum::<f64>() / hedged.len() as f64;
    assert!(mean.abs() < 0.2, "mean hedged outcome {}", mean);
}

// ============================================================================
// Gradients
// ============================================================================

fn finite_difference_gradient(
    objective: &HedgingObjective,
    strategy: &FeedForwardHedgingStrategy<f64>,
    paths: &PricePath<f64>,
    h: f64,
) -> Vec<f64> {
    let base = strategy.parameters();
    let mut bumped = strategy.clone();
    (0..base.len())
        .map(|k| {
            let mut p = base.clone();
            p[k] = base[k] + h;
            bumped.set_parameters(&p).unwrap();
            let up = objective.loss(&bumped, paths).unwrap();
            p[k] = base[k] - h;
            bumped.set_parameters(&p).unwrap();
            let dn = objective.loss(&bumped, paths).unwrap();
            (up - dn) / (2.0 * h)
        })
        .collect()
}

#[test]
fn test_entropy_gradient_matches_finite_differences() {
    let paths = gbm_paths(16, 4, 5);
    let strategy = FeedForwardHedgingStrategy::new(4, 3, &mut HedgeRng::from_seed(17)).unwrap();
    let risk = RiskObjective::new(RiskMeasure::entropy(0.5).unwrap(), 0.0).unwrap();
    let objective = HedgingObjective::new(100.0, 8.0, risk).unwrap();

    let grad = objective.gradient(&strategy, &paths).unwrap();
    let fd = finite_difference_gradient(&objective, &strategy, &paths, 1e-6);

    assert_eq!(grad.parameters.len(), fd.len());
    for (k, (ad, fd)) in grad.parameters.iter().zip(&fd).enumerate() {
        assert!(
            (ad - fd).abs() <= 1e-5 * (1.0 + fd.abs()),
            "parameter {}: AD {} vs FD {}",
            k,
            ad,
            fd
        );
    }
    assert_relative_eq!(grad.value, objective.loss(&strategy, &paths).unwrap(), epsilon = 1e-12);
}

#[test]
fn test_cvar_gradient_in_w_matches_finite_differences() {
    let paths = gbm_paths(32, 4, 9);
    let strategy = FeedForwardHedgingStrategy::new(4, 3, &mut HedgeRng::from_seed(2)).unwrap();
    let risk = RiskObjective::new(RiskMeasure::cvar(0.8).unwrap(), 1.234).unwrap();
    let mut objective = HedgingObjective::new(100.0, 8.0, risk).unwrap();

    let grad = objective.gradient(&strategy, &paths).unwrap();

    let h = 1e-7;
    objective.risk_mut().set_w(1.234 + h).unwrap();
    let up = objective.loss(&strategy, &paths).unwrap();
    objective.risk_mut().set_w(1.234 - h).unwrap();
    let dn = objective.loss(&strategy, &paths).unwrap();

    assert_relative_eq!(grad.w, (up - dn) / (2.0 * h), epsilon = 1e-5);
}
