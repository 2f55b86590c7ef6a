use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use plinko::games::{enumerate, select_path, PathCache, SeededRng};
use std::hint::black_box;

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");
    for rows in [8u32, 12, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| black_box(enumerate(rows)).len())
        });
    }
    group.finish();
}

fn bench_cache_build(c: &mut Criterion) {
    c.bench_function("path_cache/build_8_16", |b| {
        b.iter(|| black_box(PathCache::build(8, 16).map(|cache| cache.total_paths())))
    });
}

fn bench_select(c: &mut Criterion) {
    let cache = match PathCache::build(16, 16) {
        Ok(cache) => cache,
        Err(e) => panic!("cache build failed: {}", e),
    };
    let rng = SeededRng::from_seed(42);
    c.bench_function("select_path/16", |b| {
        b.iter(|| {
            let selected = select_path(&rng, &cache, 16).map(|s| s.terminal_bucket());
            black_box(selected)
        })
    });
}

criterion_group!(benches, bench_enumerate, bench_cache_build, bench_select);
criterion_main!(benches);
