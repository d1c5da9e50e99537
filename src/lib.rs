//! Workspace umbrella crate for photorank.
//!
//! `photorank` re-exports the metadata, text-matching, and ranking layers
//! so applications can drive a photo search end-to-end through a single
//! dependency: load a dataset with [`load_metadata_jsonl`], narrow it with
//! [`filter_photos`] using the external extractor's output, and rank the
//! survivors with [`rank_with_strategy`] (or any of the per-strategy
//! functions directly).
//!
//! ## Strategies
//!
//! [`Strategy`] names the four interchangeable execution strategies of the
//! ranking kernel: `seq`, `bsp`, `pipeline`, and `ws`. All four return the
//! same photos in the same order for the same input; they differ in
//! scheduling and synchronization, which is what the bench driver measures.
//!
//! ## Observability
//!
//! Install a [`RankObserver`] with [`set_rank_observer`] to receive one
//! [`RankEvent`] per ranking run (strategy, worker count, candidate count,
//! k, result length, latency). [`KeyValueLogger`] is a ready-made observer
//! that writes `key=value` lines to any writer; services typically install
//! it once at startup.

pub use meta::{
    filter_photos, load_metadata_dir, load_metadata_jsonl, merge_metadata, MetaError,
    PhotoMetadata, Query,
};
pub use rank::{
    rank_bsp, rank_pipeline, rank_sequential, rank_ws, Barrier, Collector, Deque, ScoredPhoto,
    TopK,
};
pub use textmatch::{score, tokens};

pub mod config;

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Execution strategy of the ranking kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Sequential,
    Bsp,
    Pipeline,
    WorkStealing,
}

/// Raised when a strategy name is not one of `seq|bsp|pipeline|ws`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown strategy {0:?} (expected seq, bsp, pipeline, or ws)")]
pub struct UnknownStrategy(String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seq" => Ok(Strategy::Sequential),
            "bsp" => Ok(Strategy::Bsp),
            "pipeline" => Ok(Strategy::Pipeline),
            "ws" => Ok(Strategy::WorkStealing),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Sequential => "seq",
            Strategy::Bsp => "bsp",
            Strategy::Pipeline => "pipeline",
            Strategy::WorkStealing => "ws",
        };
        f.write_str(name)
    }
}

/// Result of one ranking run.
#[derive(Debug)]
pub struct RankRun {
    pub photos: Vec<PhotoMetadata>,
    pub duration: Duration,
}

/// One structured observation per ranking run.
#[derive(Debug, Clone)]
pub struct RankEvent {
    pub strategy: Strategy,
    pub workers: usize,
    pub candidates: usize,
    pub top_k: usize,
    pub returned: usize,
    pub latency: Duration,
}

impl RankEvent {
    fn format_key_values(&self, include_timestamp: bool) -> String {
        let mut parts = Vec::new();
        if include_timestamp {
            let unix_ms = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0);
            parts.push(format!("unix_ms={unix_ms}"));
        }
        parts.push(format!("strategy={}", self.strategy));
        parts.push(format!("workers={}", self.workers));
        parts.push(format!("candidates={}", self.candidates));
        parts.push(format!("top_k={}", self.top_k));
        parts.push(format!("returned={}", self.returned));
        parts.push(format!("latency_us={}", self.latency.as_micros()));
        parts.join(" ")
    }
}

/// Hook for observing ranking runs.
pub trait RankObserver: Send + Sync {
    fn observe(&self, event: &RankEvent);
}

/// Observer that writes one `key=value` line per ranking run.
pub struct KeyValueLogger {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    include_timestamp: bool,
}

impl KeyValueLogger {
    /// Logger writing to stdout.
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            include_timestamp: true,
        }
    }

    /// Toggle timestamp emission, mostly for reproducible test output.
    pub fn with_timestamps(mut self, include_timestamp: bool) -> Self {
        self.include_timestamp = include_timestamp;
        self
    }
}

impl RankObserver for KeyValueLogger {
    fn observe(&self, event: &RankEvent) {
        if let Ok(mut writer) = self.writer.lock() {
            let line = event.format_key_values(self.include_timestamp);
            let _ = writeln!(writer, "{line}");
        }
    }
}

/// Install or clear the global rank observer.
pub fn set_rank_observer(observer: Option<Arc<dyn RankObserver>>) {
    let mut slot = observer_slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = observer;
}

fn observer_slot() -> &'static RwLock<Option<Arc<dyn RankObserver>>> {
    static OBSERVER: OnceLock<RwLock<Option<Arc<dyn RankObserver>>>> = OnceLock::new();
    OBSERVER.get_or_init(|| RwLock::new(None))
}

fn rank_observer() -> Option<Arc<dyn RankObserver>> {
    observer_slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Runs the chosen strategy and reports the run to the installed observer.
/// `workers` is ignored by [`Strategy::Sequential`]; zero means each
/// strategy's own default.
pub fn rank_with_strategy(
    strategy: Strategy,
    query: &str,
    photos: &[PhotoMetadata],
    k: usize,
    workers: usize,
) -> RankRun {
    let started = Instant::now();
    let (ranked, duration) = match strategy {
        Strategy::Sequential => {
            let ranked = rank_sequential(query, photos, k);
            (ranked, started.elapsed())
        }
        Strategy::Bsp => rank_bsp(query, photos, k, workers),
        Strategy::Pipeline => {
            let ranked = rank_pipeline(query, photos, k, workers);
            (ranked, started.elapsed())
        }
        Strategy::WorkStealing => rank_ws(query, photos, k, workers),
    };

    if let Some(observer) = rank_observer() {
        observer.observe(&RankEvent {
            strategy,
            workers,
            candidates: photos.len(),
            top_k: k,
            returned: ranked.len(),
            latency: duration,
        });
    }

    RankRun {
        photos: ranked,
        duration,
    }
}
