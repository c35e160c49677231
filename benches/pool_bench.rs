use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use workpool::ThreadPool;

fn spin(iterations: u64) -> u64 {
    (0..iterations).fold(0u64, |acc, i| acc.wrapping_mul(31).wrapping_add(i))
}

fn drain_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");

    for &threads in &[1u32, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(threads),
            &threads,
            |b, &threads| {
                b.iter_batched(
                    || {
                        let pool = ThreadPool::new(threads).unwrap();
                        let mut rng = thread_rng();
                        let work: Vec<u64> =
                            (0..200).map(|_| rng.gen_range(100..1000)).collect();
                        (pool, work)
                    },
                    |(pool, work)| {
                        let checksum = Arc::new(AtomicU64::new(0));
                        for iterations in work {
                            let checksum = checksum.clone();
                            pool.submit(move || {
                                checksum.fetch_add(spin(iterations), Ordering::Relaxed);
                            })
                            .unwrap();
                        }
                        pool.wait_idle();
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn submit_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit");

    group.bench_function("burst_1000", |b| {
        b.iter_batched(
            || ThreadPool::new(4).unwrap(),
            |pool| {
                for _ in 0..1000 {
                    pool.submit(|| {}).unwrap();
                }
                pool.wait_idle();
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, drain_bench, submit_bench);
criterion_main!(benches);
