//! Criterion benchmarks for hedge_strategy.
//!
//! Benchmarks cover:
//! - Neural strategy forward pass over growing path arrays
//! - Delta benchmark forward pass
//! - Objective gradient (forward-mode, one pass per parameter)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hedge_core::types::PricePath;
use hedge_models::generators::{BlackScholesGenerator, PathGenerator, SimulationConfig};
use hedge_models::rng::HedgeRng;
use hedge_risk::{RiskMeasure, RiskObjective};
use hedge_strategy::objective::HedgingObjective;
use hedge_strategy::strategy::{DeltaHedgingStrategy, FeedForwardHedgingStrategy, HedgingStrategy};

const NUM_TIMESTEPS: usize = 31;

fn paths(n: usize) -> PricePath<f64> {
    let config = SimulationConfig::builder()
        .num_simulations(n)
        .num_timesteps(NUM_TIMESTEPS)
        .seed(42)
        .build()
        .unwrap();
    BlackScholesGenerator::new(100.0, 0.0, 0.0, 0.2, 1.0)
        .unwrap()
        .simulate(&config)
        .unwrap()
}

fn bench_feedforward_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("feedforward_forward");
    let mut rng = HedgeRng::from_seed(1);
    let strategy = FeedForwardHedgingStrategy::new(16, NUM_TIMESTEPS - 1, &mut rng).unwrap();

    for n in [100, 1_000, 10_000] {
        let p = paths(n);
        group.bench_with_input(BenchmarkId::new("paths", n), &p, |b, p| {
            b.iter(|| strategy.forward(black_box(p)))
        });
    }
    group.finish();
}

fn bench_delta_forward(c: &mut Criterion) {
    let strategy = DeltaHedgingStrategy::new(100.0, 0.0, 0.0, 0.2, 1.0, NUM_TIMESTEPS - 1).unwrap();
    let p = paths(1_000);
    c.bench_function("delta_forward_1000", |b| {
        b.iter(|| strategy.forward(black_box(&p)))
    });
}

fn bench_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("objective_gradient");
    group.sample_size(10);

    let mut rng = HedgeRng::from_seed(2);
    let strategy = FeedForwardHedgingStrategy::new(8, NUM_TIMESTEPS - 1, &mut rng).unwrap();
    let risk = RiskObjective::new(RiskMeasure::cvar(0.9).unwrap(), 0.0).unwrap();
    let objective = HedgingObjective::new(100.0, 8.0, risk).unwrap();
    let p = paths(500);

    group.bench_function("cvar_500_paths", |b| {
        b.iter(|| objective.gradient(black_box(&strategy), black_box(&p)))
    });
    group.finish();
}

criterion_group!(benches, bench_feedforward_forward, bench_delta_forward, bench_gradient);
criterion_main!(benches);
