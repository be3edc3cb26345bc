//! Deterministic assignment of contiguous index ranges to workers.

use core::ops::Range;

/// Splits a contiguous index range `[0, size)` into near-equal chunks.
///
/// The split is a pure function of `(size, workers, worker)`: worker `w` owns
/// `size * w / workers .. size * (w + 1) / workers` (floor division), so the
/// union of all workers' ranges covers `[0, size)` exactly, with no gaps or
/// overlaps, and ranges are assigned in ascending worker order (worker 0 owns
/// the lowest indices).
///
/// Below the configured minimum size the split degenerates to a single
/// worker: worker 0 owns the entire range and every other worker receives an
/// empty range. The [`Dispatcher`](crate::Dispatcher) consults the same
/// threshold (via [`Partitioner::is_parallel`]) to decide whether to engage
/// multiple threads at all, so the degenerate form is a correctness guard
/// rather than a performance heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partitioner {
    min_size: u64,
}

impl Partitioner {
    /// Default minimum number of indices required to engage more than one
    /// worker.
    ///
    /// Below this size, dispatch overhead dominates the per-index cost of the
    /// tight loops this crate targets.
    pub const DEFAULT_MIN_SIZE: u64 = 1024;

    /// Creates a partitioner that splits ranges of at least `min_size`
    /// indices.
    pub const fn new(min_size: u64) -> Self {
        Self { min_size }
    }

    /// The minimum number of indices required to engage more than one worker.
    pub const fn min_size(&self) -> u64 {
        self.min_size
    }

    /// Whether `size` is large enough to be split across multiple workers.
    pub const fn is_parallel(&self, size: u64) -> bool {
        size >= self.min_size
    }

    /// Returns the half-open range of `[0, size)` owned by `worker`.
    ///
    /// `workers` is the total worker count and `worker` is a 0-indexed worker
    /// id. When `size < workers`, some workers receive empty ranges; this is
    /// valid, not an error. When `workers` is 1, worker 0 owns `0..size`.
    ///
    /// # Panics
    ///
    /// Panics if `worker >= workers`.
    pub fn range(&self, size: u64, workers: usize, worker: usize) -> Range<u64> {
        assert!(worker < workers, "worker id out of bounds");
        if !self.is_parallel(size) {
            // Sub-threshold sizes are never split: worker 0 owns everything.
            return if worker == 0 { 0..size } else { size..size };
        }
        split_point(size, workers, worker)..split_point(size, workers, worker + 1)
    }
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_SIZE)
    }
}

/// `size * worker / workers`, widened through `u128` so the product cannot
/// overflow for sizes near `u64::MAX`.
fn split_point(size: u64, workers: usize, worker: usize) -> u64 {
    ((size as u128 * worker as u128) / workers as u128) as u64
}
