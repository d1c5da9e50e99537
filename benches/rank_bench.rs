use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use photorank::{rank_bsp, rank_pipeline, rank_sequential, rank_ws, PhotoMetadata};

const QUERY: &str = "glacier lagoon at dawn";
const TOP_K: usize = 10;

fn sample_photos(count: usize) -> Vec<PhotoMetadata> {
    let subjects = [
        "glacier lagoon at dawn",
        "city skyline at night",
        "portrait in a studio",
        "aurora over a fjord",
        "sunlit forest path",
        "harbor in the fog",
    ];
    (0..count)
        .map(|i| PhotoMetadata {
            photo_id: format!("bench{i:06}"),
            photo_description: subjects[i % subjects.len()].to_string(),
            ai_description: if i % 2 == 0 {
                "outdoor scene with water".to_string()
            } else {
                String::new()
            },
            stats_downloads: (i % 1009) as u64,
            ..Default::default()
        })
        .collect()
}

fn bench_sequential_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_seq");
    for size in [1_000, 10_000] {
        let photos = sample_photos(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &photos, |b, photos| {
            b.iter(|| rank_sequential(black_box(QUERY), photos, TOP_K));
        });
    }
    group.finish();
}

fn bench_strategies_by_thread_count(c: &mut Criterion) {
    let photos = sample_photos(10_000);

    let mut group = c.benchmark_group("rank_bsp");
    group.throughput(Throughput::Elements(photos.len() as u64));
    for workers in [1, 2, 4, 8] {
        group.bench_function(format!("{workers}_threads"), |b| {
            b.iter(|| rank_bsp(black_box(QUERY), &photos, TOP_K, workers));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("rank_pipeline");
    group.throughput(Throughput::Elements(photos.len() as u64));
    for scorers in [1, 2, 4, 8] {
        group.bench_function(format!("{scorers}_threads"), |b| {
            b.iter(|| rank_pipeline(black_box(QUERY), &photos, TOP_K, scorers));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("rank_ws");
    group.throughput(Throughput::Elements(photos.len() as u64));
    for workers in [1, 2, 4, 8] {
        group.bench_function(format!("{workers}_threads"), |b| {
            b.iter(|| rank_ws(black_box(QUERY), &photos, TOP_K, workers));
        });
    }
    group.finish();
}

fn bench_top_k_sizes(c: &mut Criterion) {
    let photos = sample_photos(10_000);
    let mut group = c.benchmark_group("rank_bsp_top_k");
    for k in [1, 10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| rank_bsp(black_box(QUERY), &photos, k, 4));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_baseline,
    bench_strategies_by_thread_count,
    bench_top_k_sizes
);
criterion_main!(benches);
