use commonware_parfor::{Dispatcher, Partitioner};
use criterion::{criterion_group, Criterion};
use rayon::ThreadPoolBuilder;
use std::sync::Arc;

fn bench_reduce(c: &mut Criterion) {
    for workers in [1, 2, 4, 8] {
        let pool = Arc::new(ThreadPoolBuilder::new().num_threads(workers).build().unwrap());
        let dispatcher = Dispatcher::new(pool, Partitioner::default());
        for size in [1_024u64, 65_536, 1_048_576] {
            c.bench_function(
                &format!("{}/workers={} size={}", module_path!(), workers, size),
                |b| {
                    b.iter(|| {
                        dispatcher.reduce(
                            workers,
                            size,
                            || 0u64,
                            |_, _, index| index,
                            |a, b| a.wrapping_add(b),
                        )
                    });
                },
            );
        }
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_reduce,
}
