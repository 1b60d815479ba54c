use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sortbench_core::BenchContext;
use sortbench_core::perf::run_trial;
use std::time::Duration;

const BENCH_SIZE: usize = 10_000;

// Every bound pair at one size. Setup runs outside the measured window, the
// same way the harness driver times a trial.
fn bench_registered_pairs(c: &mut Criterion) {
    let ctx = BenchContext::standard(&[BENCH_SIZE]);
    let values = ctx.dataset.values(BENCH_SIZE).expect("bench dataset");

    for scenario in ctx.scenarios.iter() {
        let mut group = c.benchmark_group(scenario.name());
        let runnable = ctx.registry.runnable(scenario.name(), BENCH_SIZE).expect("registered scenario");
        for (candidate, spec) in runnable {
            group.bench_function(BenchmarkId::new(candidate, BENCH_SIZE), |b| {
                b.iter_custom(|iters| {
                    let mut total = Duration::ZERO;
                    for _ in 0..iters {
                        total += run_trial(scenario, spec, BENCH_SIZE, values).expect("trial failed while benchmarking");
                    }
                    total
                });
            });
        }
        group.finish();
    }
}

criterion_group!(scenarios, bench_registered_pairs);
criterion_main!(scenarios);
