//! Parallel top-K ranking kernel.
//!
//! Given a query, a candidate list, and a result size `k`, every ranker in
//! this crate returns the same `k` photos in the same order; they differ
//! only in how the scoring work is scheduled:
//!
//! - [`rank_sequential`]: single-threaded reference.
//! - [`rank_bsp`]: static chunk per worker, private heaps, one barrier
//!   phase, then a reduction on the calling thread.
//! - [`rank_pipeline`]: producer feeding a bounded channel, a pool of
//!   scoring workers, and a single collecting consumer.
//! - [`rank_ws`]: per-worker deques with randomized stealing, for skewed
//!   per-item costs.
//!
//! Determinism across strategies holds because the rank order
//! (score desc, downloads desc, id asc) is total, photo ids being unique,
//! so the top-K set and its sorted order do not depend on the order in
//! which candidates were scored.

mod bsp;
mod collector;
mod pipeline;
mod seq;
mod ws;

pub use bsp::{rank_bsp, Barrier};
pub use collector::{Collector, ScoredPhoto, TopK};
pub use pipeline::rank_pipeline;
pub use seq::rank_sequential;
pub use ws::{rank_ws, Deque};

use std::num::NonZeroUsize;
use std::thread;

/// Worker-count policy shared by the parallel rankers: zero falls back to
/// `fallback`, and more workers than candidates is clamped to the
/// candidate count.
pub(crate) fn clamp_workers(requested: usize, candidates: usize, fallback: usize) -> usize {
    let workers = if requested == 0 { fallback } else { requested };
    workers.clamp(1, candidates.max(1))
}

/// Default worker count when the caller passes zero.
pub(crate) fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_fall_back_and_oversized_counts_clamp() {
        assert_eq!(clamp_workers(0, 100, 4), 4);
        assert_eq!(clamp_workers(8, 3, 4), 3);
        assert_eq!(clamp_workers(2, 100, 4), 2);
        assert_eq!(clamp_workers(0, 0, 4), 1);
    }
}
