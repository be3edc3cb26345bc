#![no_main]

use arbitrary::Arbitrary;
use commonware_parfor::Partitioner;
use libfuzzer_sys::fuzz_target;

const MAX_WORKERS: usize = 1024;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    size: u64,
    workers: usize,
    min_size: u64,
}

fuzz_target!(|input: FuzzInput| {
    let workers = 1 + input.workers % MAX_WORKERS;
    let partitioner = Partitioner::new(input.min_size);

    // Ranges must tile [0, size) exactly: contiguous, in ascending worker
    // order, with no gaps or overlaps.
    let mut next = 0;
    for worker in 0..workers {
        let range = partitioner.range(input.size, workers, worker);
        assert!(range.start <= range.end);
        assert!(range.end <= input.size);
        assert_eq!(range.start, next);
        next = range.end;

        // Pure: repeated calls agree.
        assert_eq!(partitioner.range(input.size, workers, worker), range);
    }
    assert_eq!(next, input.size);

    // Below the minimum size, worker 0 owns everything.
    if !partitioner.is_parallel(input.size) {
        assert_eq!(partitioner.range(input.size, workers, 0), 0..input.size);
    }
});
