use apex_harness::engine::{iterate, DEFAULT_ALPHA};
use apex_harness::trial::{DriftSimulator, Simulator, TestMode, TrialConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_iterate(c: &mut Criterion) {
    let input: Vec<f64> = (1..=64).map(|i| i as f64).collect();
    c.bench_function("iterate_64x100", |b| {
        b.iter(|| iterate(black_box(&input), 100, DEFAULT_ALPHA))
    });
}

fn bench_drift_trial(c: &mut Criterion) {
    let sim = DriftSimulator::new();
    let config = TrialConfig {
        test_mode: TestMode::Phase1F,
        cycle_count: 2000,
    };
    c.bench_function("drift_trial_2000", |b| {
        b.iter(|| sim.run(black_box(42), &config))
    });
}

criterion_group!(benches, bench_iterate, bench_drift_trial);
criterion_main!(benches);
