use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use queue_sim::engine::{run_simulation, simulate_stream};
use queue_sim::models::QueueConfig;
use queue_sim::stream::RandomNumberStream;
use queue_sim::summary::compute_summary;
use rand::rngs::StdRng;
use rand::SeedableRng;

const CUSTOMER_COUNTS: &[usize] = &[100, 1_000, 10_000, 100_000];

fn bench_recurrence(c: &mut Criterion) {
    let mut group = c.benchmark_group("recurrence");

    for &count in CUSTOMER_COUNTS {
        group.bench_with_input(BenchmarkId::new("simulate_stream", count), &count, |b, &count| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    RandomNumberStream::new(count, None, None, &mut rng)
                        .expect("stream should build")
                },
                |stream| {
                    let records = simulate_stream(&stream).expect("simulation should succeed");
                    black_box(compute_summary(&records).expect("summary should succeed"));
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_simulation");

    for &count in CUSTOMER_COUNTS {
        let config = QueueConfig {
            customers: count,
            rn_iat: None,
            rn_st: None,
            seed: Some(42),
        };
        group.bench_with_input(BenchmarkId::from_parameter(count), &config, |b, config| {
            b.iter(|| {
                let result = run_simulation(config).expect("simulation should succeed");
                black_box(result);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recurrence, bench_full_run);
criterion_main!(benches);
