//! Serial-or-parallel dispatch of per-index work over a partitioned range.

use crate::{Partitioner, ThreadPool};

/// Executes per-index closures over `[0, size)`, in parallel across a
/// caller-owned thread pool when the problem is large enough.
///
/// # Worker Count Is a Hint
///
/// The worker count passed to [`run`](Self::run) and the reduce methods is an
/// upper bound, not a promise: the pool may grant fewer threads than
/// requested. Partitioning is always computed against the granted count, and
/// callbacks observe the granted count, never the requested one. Requesting
/// zero workers is a valid no-op, not an error.
///
/// # Callback Contract
///
/// Callbacks receive `(workers, worker, index)`: the granted worker count,
/// the invoking worker's 0-indexed id, and the index to process. The leading
/// pair lets a callback select per-worker scratch state; any other context
/// must be captured by the closure itself. Within one worker, indices arrive
/// in strictly ascending order. Across workers there is no ordering, and no
/// side effect of one worker is visible to another during the parallel
/// phase, beyond whatever the callback's own operations provide. Correct use
/// requires that a callback only write to locations derived from its own
/// index.
///
/// # Failure
///
/// This type performs no internal error handling. A panicking callback
/// panics the dispatch call, but only after every spawned worker has been
/// joined: sibling workers run their slices to completion and no threads are
/// leaked. Callers that need partial results in the face of faults must
/// catch inside the callback.
///
/// # Example
///
/// ```
/// use commonware_parfor::{Dispatcher, Partitioner};
/// use rayon::ThreadPoolBuilder;
/// use std::sync::{
///     atomic::{AtomicU64, Ordering},
///     Arc,
/// };
///
/// let pool = Arc::new(ThreadPoolBuilder::new().num_threads(4).build().unwrap());
/// let dispatcher = Dispatcher::new(pool, Partitioner::new(1));
///
/// // Write every index into a caller-owned array.
/// let cells: Vec<AtomicU64> = (0..100).map(|_| AtomicU64::new(0)).collect();
/// dispatcher.run(4, 100, |_, _, index| {
///     cells[index as usize].store(index, Ordering::Relaxed);
/// });
/// assert!(cells.iter().enumerate().all(|(i, c)| c.load(Ordering::Relaxed) == i as u64));
/// ```
#[derive(Clone, Debug)]
pub struct Dispatcher {
    pool: ThreadPool,
    partitioner: Partitioner,
}

impl Dispatcher {
    /// Creates a dispatcher that schedules work on `pool` and splits index
    /// ranges according to `partitioner`.
    ///
    /// The pool's lifecycle remains the caller's responsibility; multiple
    /// dispatchers may share one pool.
    pub const fn new(pool: ThreadPool, partitioner: Partitioner) -> Self {
        Self { pool, partitioner }
    }

    /// The partitioner used to assign index ranges to workers.
    pub const fn partitioner(&self) -> Partitioner {
        self.partitioner
    }

    /// Resolves the worker count actually granted for a request.
    fn granted(&self, requested: usize) -> usize {
        requested.min(self.pool.current_num_threads())
    }

    /// Invokes `work` for every index in `[0, size)`.
    ///
    /// When more than one worker is requested and `size` meets the
    /// partitioner's minimum, one task per granted worker is spawned on the
    /// pool and each runs its own contiguous slice. Otherwise the whole
    /// range runs on the calling thread as `work(1, 0, index)`. Either way,
    /// every spawned worker is joined before this method returns.
    ///
    /// There is no return value: effects happen entirely through `work`.
    pub fn run<F>(&self, workers: usize, size: u64, work: F)
    where
        F: Fn(usize, usize, u64) + Sync,
    {
        if workers == 0 {
            return;
        }
        if workers > 1 && self.partitioner.is_parallel(size) {
            let granted = self.granted(workers);
            let partitioner = self.partitioner;
            let work = &work;
            self.pool.scope(|scope| {
                for worker in 0..granted {
                    scope.spawn(move |_| {
                        for index in partitioner.range(size, granted, worker) {
                            work(granted, worker, index);
                        }
                    });
                }
            });
        } else {
            for index in 0..size {
                work(1, 0, index);
            }
        }
    }

    /// Folds every index in `[0, size)` into per-worker accumulators and
    /// returns them in worker-id order.
    ///
    /// Each granted worker owns exactly one accumulator, seeded with
    /// `identity()` and updated as `acc = op(acc, work(workers, worker,
    /// index))` for each index in its range, in ascending index order. No
    /// accumulator is touched by more than one worker, so accumulation
    /// requires no synchronization.
    ///
    /// On the serial path the result has exactly one element; requesting
    /// zero workers returns an empty vector (reduce-to-nothing).
    pub fn reduce_partials<R, ID, F, Op>(
        &self,
        workers: usize,
        size: u64,
        identity: ID,
        work: F,
        op: Op,
    ) -> Vec<R>
    where
        R: Send,
        ID: Fn() -> R + Sync,
        F: Fn(usize, usize, u64) -> R + Sync,
        Op: Fn(R, R) -> R + Sync,
    {
        if workers == 0 {
            return Vec::new();
        }
        if workers > 1 && self.partitioner.is_parallel(size) {
            let granted = self.granted(workers);
            let partitioner = self.partitioner;
            let mut partials: Vec<R> = (0..granted).map(|_| identity()).collect();
            let (identity, work, op) = (&identity, &work, &op);
            self.pool.scope(|scope| {
                for (worker, partial) in partials.iter_mut().enumerate() {
                    scope.spawn(move |_| {
                        let mut acc = identity();
                        for index in partitioner.range(size, granted, worker) {
                            acc = op(acc, work(granted, worker, index));
                        }
                        *partial = acc;
                    });
                }
            });
            partials
        } else {
            let mut acc = identity();
            for index in 0..size {
                acc = op(acc, work(1, 0, index));
            }
            vec![acc]
        }
    }

    /// Folds every index in `[0, size)` into a single value.
    ///
    /// Runs [`reduce_partials`](Self::reduce_partials), then folds the
    /// per-worker accumulators sequentially, in ascending worker-id order,
    /// starting from `identity()`.
    ///
    /// Because the fold order across workers is fixed even though workers
    /// run concurrently, the result is reproducible for associative and
    /// commutative `op`s. For any other `op`, ascending-worker-id order is
    /// the canonical fold order: partials combine exactly as if the ranges
    /// were processed lowest-index first.
    pub fn reduce<R, ID, F, Op>(
        &self,
        workers: usize,
        size: u64,
        identity: ID,
        work: F,
        op: Op,
    ) -> R
    where
        R: Send,
        ID: Fn() -> R + Sync,
        F: Fn(usize, usize, u64) -> R + Sync,
        Op: Fn(R, R) -> R + Sync,
    {
        let partials = self.reduce_partials(workers, size, &identity, &work, &op);
        partials
            .into_iter()
            .fold(identity(), |acc, partial| op(acc, partial))
    }
}
