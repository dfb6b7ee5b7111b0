//! Criterion benchmarks for path simulation and along-path pricing.
//!
//! Measures both path constructions across step counts, and the parallel
//! Black-Scholes-Merton series over a simulated path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::analytical::OptionContract;
use pricer_pricing::mc::{simulate, PathScheme, PathSimulator, SimulationParameters};
use pricer_pricing::rng::PricerRng;
use pricer_pricing::scenario::price_along_path;

/// Benchmark path simulation for both schemes.
fn bench_path_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_simulation");

    for steps in [252, 2_520, 25_200] {
        for scheme in [
            PathScheme::LogReturnAccumulation,
            PathScheme::IterativeMultiplicative,
        ] {
            let params = SimulationParameters::builder()
                .step_count(steps)
                .scheme(scheme)
                .build()
                .unwrap();
            let simulator = PathSimulator::new(params).unwrap();

            group.bench_with_input(
                BenchmarkId::new(scheme.to_string(), steps),
                &simulator,
                |b, simulator| {
                    let mut rng = PricerRng::from_seed(42);
                    b.iter(|| simulator.simulate_with_rng(black_box(&mut rng)).unwrap());
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the parallel option value series along one path.
fn bench_price_along_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_along_path");
    let contract = OptionContract::new(105.0, 0.03, 0.2).unwrap();

    for steps in [252, 2_520, 25_200] {
        let params = SimulationParameters::builder()
            .step_count(steps)
            .seed(7)
            .build()
            .unwrap();
        let path = simulate(&params).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(steps), &path, |b, path| {
            b.iter(|| price_along_path(black_box(path), black_box(&contract)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_path_simulation, bench_price_along_path);
criterion_main!(benches);
