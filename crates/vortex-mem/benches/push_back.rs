use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use vortex_mem::GrowVec;

fn push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    for count in [1_000usize, 100_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::new("GrowVec", count), &count, |b, &count| {
            b.iter(|| {
                let mut vec: GrowVec<usize> = GrowVec::new().unwrap();
                for i in 0..count {
                    vec.push(black_box(i)).unwrap();
                }
                black_box(vec)
            })
        });
        group.bench_with_input(BenchmarkId::new("Vec", count), &count, |b, &count| {
            b.iter(|| {
                let mut vec = Vec::with_capacity(2);
                for i in 0..count {
                    vec.push(black_box(i));
                }
                black_box(vec)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, push_back);
criterion_main!(benches);
