use criterion::criterion_main;

mod reduce;

criterion_main!(run::benches, reduce::benches);
