use criterion::{criterion_group, criterion_main, Criterion};
use gb2260_core::{CacheMode, Dataset, Resolver, ResolverConfig};
use std::hint::black_box;

fn bench_get(c: &mut Criterion) {
    let weak = Resolver::new(Dataset::bundled());
    let strong = Resolver::with_config(
        Dataset::bundled(),
        ResolverConfig::default().with_cache(CacheMode::Strong),
    );

    c.bench_function("get/weak/cold", |b| {
        b.iter(|| weak.get(black_box(110105)).ok())
    });
    let _held = weak.get(110105);
    c.bench_function("get/weak/held", |b| {
        b.iter(|| weak.get(black_box("110105")).ok())
    });
    c.bench_function("get/strong", |b| {
        b.iter(|| strong.get(black_box(110105)).ok())
    });
}

fn bench_search(c: &mut Criterion) {
    let resolver = Resolver::new(Dataset::bundled());
    c.bench_function("search/prefix", |b| {
        b.iter(|| resolver.search(black_box("11"), None))
    });
    c.bench_function("search/name", |b| {
        b.iter(|| resolver.search(black_box(""), Some(black_box("朝阳"))))
    });
}

criterion_group!(benches, bench_get, bench_search);
criterion_main!(benches);
