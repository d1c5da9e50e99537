use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use meta::PhotoMetadata;
use rand::seq::SliceRandom;

use crate::collector::{Collector, ScoredPhoto};
use crate::{available_workers, clamp_workers};

/// Steal attempts per idle cycle; bounding them keeps an idle worker from
/// hammering every peer's lock on each spin.
const MAX_STEAL_ATTEMPTS: usize = 3;

/// Double-ended task queue. The owning worker pushes and pops at the back;
/// stealers take from the front. One mutex serializes owner and stealers,
/// so a task can be handed out exactly once.
pub struct Deque<T> {
    tasks: Mutex<VecDeque<T>>,
}

impl<T> Deque<T> {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_bottom(&self, task: T) {
        self.lock().push_back(task);
    }

    pub fn pop_bottom(&self) -> Option<T> {
        self.lock().pop_back()
    }

    /// Steal entry point: takes from the opposite end the owner works on.
    pub fn pop_top(&self) -> Option<T> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<T>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Work-stealing ranker. Candidates are dealt round-robin into one deque
/// per worker; each worker drains its own deque from the bottom and, when
/// empty, tries to steal from the top of up to [`MAX_STEAL_ATTEMPTS`]
/// randomly-ordered victims. A shared counter of unscored tasks reaching
/// zero is the termination signal, so no worker parks while work remains
/// anywhere. Returns the ranked photos and the elapsed wall time.
///
/// The scheduling shines when per-item cost is skewed; with the token
/// scorer the items are near-uniform, but the strategy is the drop-in for
/// heavier scorers.
pub fn rank_ws(
    query: &str,
    photos: &[PhotoMetadata],
    k: usize,
    workers: usize,
) -> (Vec<PhotoMetadata>, Duration) {
    let started = Instant::now();
    if k == 0 || photos.is_empty() {
        return (Vec::new(), started.elapsed());
    }

    let workers = clamp_workers(workers, photos.len(), available_workers());
    let deques: Vec<Deque<&PhotoMetadata>> = (0..workers).map(|_| Deque::new()).collect();
    for (index, photo) in photos.iter().enumerate() {
        deques[index % workers].push_bottom(photo);
    }

    let outstanding = AtomicUsize::new(photos.len());
    let collector = Collector::new(k);

    thread::scope(|scope| {
        for own in 0..workers {
            let deques = &deques;
            let outstanding = &outstanding;
            let collector = &collector;
            scope.spawn(move || {
                let mut rng = rand::rng();
                let mut victims: Vec<usize> = (0..workers).filter(|&w| w != own).collect();
                loop {
                    let task = deques[own].pop_bottom().or_else(|| {
                        victims.shuffle(&mut rng);
                        victims
                            .iter()
                            .take(MAX_STEAL_ATTEMPTS)
                            .find_map(|&victim| deques[victim].pop_top())
                    });
                    match task {
                        Some(photo) => {
                            collector.offer(ScoredPhoto {
                                photo: photo.clone(),
                                score: textmatch::score(query, photo),
                            });
                            // Decrement after the offer so a zero counter
                            // means every task is already in the collector.
                            outstanding.fetch_sub(1, Ordering::AcqRel);
                        }
                        None => {
                            if outstanding.load(Ordering::Acquire) == 0 {
                                break;
                            }
                            thread::yield_now();
                        }
                    }
                }
            });
        }
    });

    (collector.into_ranked(), started.elapsed())
}
