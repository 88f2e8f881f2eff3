//! Aggregation and append throughput.
//!
//! Run with: `cargo bench --package tickdb-bench`

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tickdb_bench::{synthetic_table, synthetic_ticks};
use tickdb_lib::{Database, Period, SeriesColumns, StoreConfig, aggregate};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn aggregate_benchmark(c: &mut Criterion) {
    let columns = SeriesColumns::default();
    let mut group = c.benchmark_group("aggregate");

    for size in SIZES {
        let table = synthetic_table(size);
        group.throughput(Throughput::Elements(size as u64));

        for period in [Period::MINUTE, Period::HOUR] {
            group.bench_with_input(
                BenchmarkId::new(period.to_string(), size),
                &table,
                |b, table| b.iter(|| aggregate(table, &columns, period).unwrap()),
            );
        }
    }

    group.finish();
}

fn append_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    group.sample_size(20);

    for size in [100, 1_000, 10_000] {
        let seed = synthetic_ticks(10);
        let batch = synthetic_ticks(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter_batched(
                || {
                    let mut db = Database::open_in_memory(StoreConfig::new(":memory:")).unwrap();
                    db.write_full(seed.clone(), "RFX20Mar19").unwrap();
                    db
                },
                |mut db| db.append(batch.clone(), "RFX20Mar19").unwrap(),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, aggregate_benchmark, append_benchmark);
criterion_main!(benches);
