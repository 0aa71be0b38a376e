//! Criterion benchmarks for efp_core
//!
//! Run with: cargo bench -p efp_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use efp_core::analysis::{
    DesignGenerator, IndexEstimator, ProblemSpec, SaltelliEstimator, SaltelliSampler,
    run_sensitivity,
};
use efp_core::config::{EfpConfig, EfpConfigBuilder, PhysicalConstants};
use efp_core::model::{InputSample, ParameterConverter, evaluate_distances, impact_point};
use efp_core::simulation::monte_carlo_simulate;
use efp_core::statistics::ImpactStatistics;

fn bench_impact_point(c: &mut Criterion) {
    let physics = PhysicalConstants::default();
    let input = InputSample {
        vx: 0.4,
        vy: -0.3,
        t1_sim: 0.1,
        theta0: 0.01,
        phi0: -0.02,
        dtheta_dt: 0.005,
        dphi_dt: 0.01,
        efp_error_x: 0.002,
        efp_error_y: -0.003,
    };
    c.bench_function("impact_point", |b| {
        b.iter(|| impact_point(black_box(&physics), black_box(&input)))
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");

    for trials in [1_000, 10_000, 100_000].iter() {
        let config = EfpConfigBuilder::new()
            .num_simulations(*trials)
            .build()
            .expect("valid config");

        group.bench_with_input(BenchmarkId::new("trials", trials), trials, |b, _| {
            b.iter(|| {
                let cloud = monte_carlo_simulate(black_box(&config)).expect("simulation");
                ImpactStatistics::compute(&cloud.points, &config.target).expect("statistics")
            })
        });
    }

    group.finish();
}

fn bench_sensitivity_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivity");
    let config = EfpConfig::default();
    let problem = ProblemSpec::for_impact_model();
    let sampler = SaltelliSampler::default();
    let estimator = SaltelliEstimator::default();

    group.bench_function("design", |b| {
        b.iter(|| sampler.generate(black_box(&problem), black_box(1024)))
    });

    let mut design = sampler.generate(&problem, 1024).expect("design");
    design.clamp_all(1e-9, 1.0 - 1e-9);
    let converter = ParameterConverter::new(&config.inputs).expect("converter");
    let physical = converter.convert(&design).expect("conversion");
    let distances = evaluate_distances(&config.physics, &physical).expect("model");

    group.bench_function("convert_and_evaluate", |b| {
        b.iter(|| {
            let physical = converter.convert(black_box(&design)).expect("conversion");
            evaluate_distances(&config.physics, &physical)
        })
    });

    group.bench_function("estimate", |b| {
        b.iter(|| estimator.estimate(black_box(&problem), black_box(&distances)))
    });

    group.sample_size(10);
    group.bench_function("full_pipeline", |b| {
        b.iter(|| run_sensitivity(black_box(&config)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_impact_point,
    bench_monte_carlo,
    bench_sensitivity_stages,
);
criterion_main!(benches);
