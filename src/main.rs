//! Benchmark driver: runs one ranking strategy over a JSONL dataset and
//! prints a single CSV line `mode,threads,size,time_ms` for the speedup
//! sweeps to aggregate.

use std::error::Error;
use std::path::Path;
use std::process;

use photorank::config::RankerConfig;
use photorank::{filter_photos, load_metadata_jsonl, rank_with_strategy, Query, Strategy};

struct Options {
    config: RankerConfig,
    /// Extractor output as a JSON string; applied as a metadata filter
    /// before ranking when present.
    metadata: Option<String>,
}

const USAGE: &str = "usage: photorank [--config FILE] [--mode seq|bsp|pipeline|ws] \
[--threads N] [--size N] [--topk N] [--query TEXT] [--dataset FILE] [--metadata JSON]";

fn parse_options(args: &[String]) -> Result<Options, Box<dyn Error>> {
    let mut config = RankerConfig::default();
    let mut metadata = None;

    // A --config file is applied first so later flags can override it.
    let mut iter = args.iter();
    let mut overrides: Vec<(String, String)> = Vec::new();
    while let Some(flag) = iter.next() {
        let Some(name) = flag.strip_prefix("--") else {
            return Err(format!("unexpected argument {flag:?}\n{USAGE}").into());
        };
        let value = iter
            .next()
            .ok_or_else(|| format!("missing value for --{name}\n{USAGE}"))?;
        if name == "config" {
            config = RankerConfig::from_file(value)?;
        } else {
            overrides.push((name.to_string(), value.clone()));
        }
    }

    for (name, value) in overrides {
        match name.as_str() {
            "mode" => config.ranking.mode = value,
            "threads" => config.ranking.workers = value.parse()?,
            "size" => config.dataset.size = value.parse()?,
            "topk" => config.ranking.top_k = value.parse()?,
            "query" => config.ranking.query = value,
            "dataset" => config.dataset.path = Some(value),
            "metadata" => metadata = Some(value),
            other => return Err(format!("unknown flag --{other}\n{USAGE}").into()),
        }
    }

    Ok(Options { config, metadata })
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let config = options.config;
    let strategy: Strategy = config.ranking.mode.parse()?;

    if config.ranking.query.is_empty() {
        return Err("a non-empty --query is required".into());
    }
    let dataset = config
        .dataset
        .path
        .as_deref()
        .ok_or("a --dataset path is required")?;

    let mut photos = load_metadata_jsonl(Path::new(dataset))?;
    if config.dataset.size > 0 && config.dataset.size < photos.len() {
        photos.truncate(config.dataset.size);
    }
    let size = photos.len();

    // The extractor runs out of process; its metadata bag can be passed in
    // to reproduce the full filter-then-rank path.
    let candidates = match options.metadata {
        Some(raw) => {
            let query = Query {
                message: config.ranking.query.clone(),
                metadata: serde_json::from_str(&raw)?,
            };
            filter_photos(&query, &photos)
        }
        None => photos,
    };

    let run = rank_with_strategy(
        strategy,
        &config.ranking.query,
        &candidates,
        config.ranking.top_k,
        config.ranking.workers,
    );

    let threads = match strategy {
        Strategy::Sequential => 1,
        _ => config.ranking.workers,
    };
    println!(
        "{},{},{},{:.3}",
        strategy,
        threads,
        size,
        run.duration.as_secs_f64() * 1e3
    );
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    if let Err(err) = run(options) {
        eprintln!("{err}");
        process::exit(1);
    }
}
