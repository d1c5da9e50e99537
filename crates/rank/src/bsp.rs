use std::sync::{Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use meta::PhotoMetadata;

use crate::collector::{ScoredPhoto, TopK};
use crate::clamp_workers;

/// Reusable barrier: `wait` blocks until `n` threads have arrived, then
/// releases all of them and resets for the next phase.
///
/// Release is tracked by a generation counter rather than by re-checking
/// the arrival count, so a thread racing into the next phase before a slow
/// waiter wakes can never be confused with the previous phase's arrivals.
pub struct Barrier {
    n: usize,
    state: Mutex<BarrierState>,
    cond: Condvar,
}

struct BarrierState {
    arrived: usize,
    generation: u64,
}

impl Barrier {
    /// Panics if `n` is zero; a barrier nobody waits on is a bug.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "barrier size must be positive");
        Self {
            n,
            state: Mutex::new(BarrierState {
                arrived: 0,
                generation: 0,
            }),
            cond: Condvar::new(),
        }
    }

    pub fn wait(&self) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let generation = state.generation;
        state.arrived += 1;
        if state.arrived == self.n {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.cond.notify_all();
            return;
        }
        while state.generation == generation {
            state = self
                .cond
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// Bulk-synchronous ranker: candidates are split into one contiguous chunk
/// per worker, each worker fills a private heap with no locking, a barrier
/// closes the compute superstep, and the calling thread reduces the private
/// heaps into the final top `k`. Returns the ranked photos and the elapsed
/// wall time of the whole run.
pub fn rank_bsp(
    query: &str,
    photos: &[PhotoMetadata],
    k: usize,
    workers: usize,
) -> (Vec<PhotoMetadata>, Duration) {
    let started = Instant::now();
    if k == 0 || photos.is_empty() {
        return (Vec::new(), started.elapsed());
    }

    let workers = clamp_workers(workers, photos.len(), 1);
    let chunk_len = photos.len().div_ceil(workers);
    let barrier = Barrier::new(workers);

    let mut locals: Vec<TopK> = Vec::with_capacity(workers);
    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                // The last chunk may be short (or empty when the ceiling
                // division overshoots); the worker still joins the barrier.
                let start = (worker * chunk_len).min(photos.len());
                let end = ((worker + 1) * chunk_len).min(photos.len());
                let chunk = &photos[start..end];
                let barrier = &barrier;
                scope.spawn(move || {
                    let mut local = TopK::new(k);
                    for photo in chunk {
                        local.offer(ScoredPhoto {
                            photo: photo.clone(),
                            score: textmatch::score(query, photo),
                        });
                    }
                    barrier.wait();
                    local
                })
            })
            .collect();
        for handle in handles {
            locals.push(handle.join().expect("bsp worker panicked"));
        }
    });

    let mut merged = TopK::new(k);
    for local in locals {
        merged.merge(local);
    }
    (merged.into_ranked(), started.elapsed())
}
