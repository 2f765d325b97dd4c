use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spacetree::constants::{PRISM_MAXLEVEL, QUAD_MAXLEVEL, TET_MAXLEVEL};
use spacetree::{Prism, Quad, Tet};

fn bench_linear_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_id");
    let tet = Tet::from_linear_id(0x1234_5678_9abc, TET_MAXLEVEL);
    group.bench_function("tet_maxlevel", |b| {
        b.iter(|| black_box(tet.linear_id(TET_MAXLEVEL)))
    });
    let quad = Quad::from_linear_id(0xdead_beef, QUAD_MAXLEVEL);
    group.bench_function("quad_maxlevel", |b| {
        b.iter(|| black_box(quad.linear_id(QUAD_MAXLEVEL)))
    });
    let prism = Prism::from_linear_id(0x1234_5678_9abc, PRISM_MAXLEVEL);
    group.bench_function("prism_maxlevel", |b| {
        b.iter(|| black_box(prism.linear_id(PRISM_MAXLEVEL)))
    });
    group.finish();
}

fn bench_from_linear_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_linear_id");
    group.bench_function("tet_maxlevel", |b| {
        b.iter(|| black_box(Tet::from_linear_id(black_box(0x1234_5678_9abc), TET_MAXLEVEL)))
    });
    group.bench_function("quad_maxlevel", |b| {
        b.iter(|| black_box(Quad::from_linear_id(black_box(0xdead_beef), QUAD_MAXLEVEL)))
    });
    group.finish();
}

fn bench_successor(c: &mut Criterion) {
    let mut group = c.benchmark_group("successor");
    // An element in the middle of the curve: the carry stays local.
    let tet = Tet::from_linear_id(0x1234_5678_9abc, TET_MAXLEVEL);
    group.bench_function("tet_maxlevel", |b| {
        b.iter(|| black_box(tet.successor(TET_MAXLEVEL)))
    });
    group.finish();
}

fn bench_children(c: &mut Criterion) {
    let mut group = c.benchmark_group("children");
    let tet = Tet::from_linear_id(0x1234, 10);
    group.bench_function("tet", |b| b.iter(|| black_box(tet.children())));
    group.finish();
}

criterion_group!(
    benches,
    bench_linear_id,
    bench_from_linear_id,
    bench_successor,
    bench_children
);
criterion_main!(benches);
