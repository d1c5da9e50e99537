use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::{Mutex, PoisonError};

use meta::PhotoMetadata;

/// A photo paired with its relevance score.
///
/// The `Ord` impl is the single rank-order primitive for the whole kernel:
/// `Greater` means "preferred": higher score, then more downloads, then
/// the lexicographically smaller id. The min-heap and the final descending
/// sort both reuse it, so the heap's replacement test and the output order
/// can never disagree.
#[derive(Debug, Clone)]
pub struct ScoredPhoto {
    pub photo: PhotoMetadata,
    pub score: f32,
}

impl PartialEq for ScoredPhoto {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredPhoto {}

impl PartialOrd for ScoredPhoto {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredPhoto {
    fn cmp(&self, other: &Self) -> Ordering {
        // Scores are finite and non-negative, so total_cmp agrees with the
        // numeric order while keeping Ord's contract.
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.photo.stats_downloads.cmp(&other.photo.stats_downloads))
            .then_with(|| other.photo.photo_id.cmp(&self.photo.photo_id))
    }
}

/// Bounded min-heap of the best `capacity` photos seen so far.
///
/// While full, the root is the least-preferred retained photo and the
/// threshold a new candidate must strictly beat.
#[derive(Debug)]
pub struct TopK {
    heap: BinaryHeap<Reverse<ScoredPhoto>>,
    capacity: usize,
}

impl TopK {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Considers one candidate, keeping the heap bounded by `capacity`.
    pub fn offer(&mut self, candidate: ScoredPhoto) {
        if self.capacity == 0 {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(candidate));
            return;
        }
        if let Some(least) = self.heap.peek() {
            if candidate > least.0 {
                self.heap.pop();
                self.heap.push(Reverse(candidate));
            }
        }
    }

    /// Folds another heap into this one, keeping the bound.
    pub fn merge(&mut self, other: TopK) {
        for Reverse(scored) in other.heap {
            self.offer(scored);
        }
    }

    /// Consumes the heap, returning photos in rank order: best first.
    pub fn into_ranked(self) -> Vec<PhotoMetadata> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(scored)| scored.photo)
            .collect()
    }
}

/// Shared top-K collector for the pipeline and work-stealing rankers. All
/// mutation goes through [`offer`](Collector::offer) under one mutex; the
/// deterministic rank order makes the interleaving of offers irrelevant.
#[derive(Debug)]
pub struct Collector {
    inner: Mutex<TopK>,
}

impl Collector {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(TopK::new(capacity)),
        }
    }

    pub fn offer(&self, candidate: ScoredPhoto) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .offer(candidate);
    }

    pub fn into_ranked(self) -> Vec<PhotoMetadata> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_ranked()
    }
}
