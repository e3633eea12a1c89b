//! Benchmarks comparing the heap and linear-scan partitioners.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use u_stage::generator::{EventGenerator, EventGeneratorConfig};
use u_stage::models::BoundaryPolicy;
use u_stage::partitioning::{sort_events, Strategy};

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_sorted");

    for count in [100usize, 1_000, 5_000] {
        let config = EventGeneratorConfig::dense().with_count(count);
        let sorted = sort_events(&EventGenerator::new(config, 42).generate());

        for strategy in Strategy::ALL {
            let partitioner = strategy.partitioner(BoundaryPolicy::Inclusive);
            group.bench_with_input(BenchmarkId::new(strategy.name(), count), &sorted, |b, events| {
                b.iter(|| partitioner.partition_sorted(black_box(events)))
            });
        }
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let events = EventGenerator::new(EventGeneratorConfig::dense().with_count(5_000), 7).generate();
    c.bench_function("sort_events/5000", |b| b.iter(|| sort_events(black_box(&events))));
}

criterion_group!(benches, bench_strategies, bench_sort);
criterion_main!(benches);
