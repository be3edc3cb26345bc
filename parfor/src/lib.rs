//! Distribute contiguous index ranges across a bounded set of workers.
//!
//! This crate is a low-overhead building block for tight numerical kernels:
//! given an index range `[0, size)` and a per-index closure, it splits the
//! range into near-equal contiguous chunks, executes the chunks concurrently
//! on a caller-owned thread pool, and (optionally) combines per-worker
//! partial results into a single value.
//!
//! # Overview
//!
//! Three pieces cooperate, all built on the same partitioning scheme:
//!
//! - [`Partitioner`]: a pure function from `(size, workers, worker)` to the
//!   half-open range of indices that worker owns, plus the minimum-size
//!   threshold below which multi-worker dispatch is not worthwhile.
//! - [`Dispatcher::run`]: invokes a per-index closure over `[0, size)`, in
//!   parallel when the requested worker count and the problem size justify
//!   it, serially on the calling thread otherwise.
//! - [`Dispatcher::reduce_partials`] / [`Dispatcher::reduce`]: the same
//!   dispatch, but each worker folds its indices into a private accumulator,
//!   and the accumulators are folded into one result after all workers have
//!   joined.
//!
//! The thread pool is a collaborator, not a possession: callers build a
//! [rayon] thread pool (or share an existing one) and hand it to the
//! [`Dispatcher`] behind an [`Arc`]. This crate never creates or destroys
//! threads.
//!
//! # Features
//!
//! - `std` (default): Enables the [`Dispatcher`], backed by rayon.
//!
//! When the `std` feature is disabled, only [`Partitioner`] is available,
//! making this crate suitable for `no_std` environments.
//!
//! # Example
//!
//! ```
//! use commonware_parfor::{Dispatcher, Partitioner};
//! use rayon::ThreadPoolBuilder;
//! use std::sync::Arc;
//!
//! let pool = Arc::new(ThreadPoolBuilder::new().num_threads(4).build().unwrap());
//!
//! // Split ranges of at least 1 index (the default threshold of
//! // `Partitioner::default()` is better suited to production workloads).
//! let dispatcher = Dispatcher::new(pool, Partitioner::new(1));
//!
//! // Sum 0 + 1 + ... + 9 across up to 4 workers.
//! let sum = dispatcher.reduce(4, 10, || 0u64, |_, _, index| index, |a, b| a + b);
//! assert_eq!(sum, 45);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

use cfg_if::cfg_if;

mod partition;
pub use partition::Partitioner;

cfg_if! {
    if #[cfg(feature = "std")] {
        mod dispatch;
        pub use dispatch::Dispatcher;
        use std::sync::Arc;

        /// A clone-able wrapper around a caller-owned [rayon]-compatible thread pool.
        pub type ThreadPool = Arc<rayon::ThreadPool>;
    }
}
