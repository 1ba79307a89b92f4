//! Benchmarks for drape cloth simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use drape::*;

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_20x20_hanging", |b| {
        b.iter(|| Cloth::<f32>::new(ClothConfig::hanging()).unwrap());
    });
}

fn bench_hanging(c: &mut Criterion) {
    c.bench_function("hanging_20x20_60_steps", |b| {
        b.iter(|| {
            let mut cloth: Cloth<f32> = Cloth::new(ClothConfig::hanging()).unwrap();
            for _ in 0..60 {
                cloth.step();
            }
            cloth.max_stretch_ratio()
        });
    });
}

fn bench_draped(c: &mut Criterion) {
    c.bench_function("draped_40x40_60_steps", |b| {
        b.iter(|| {
            let config = ClothConfig::draped().with_layout(
                GridLayout::new(40, 40, 0.1).with_origin(Vec3::new(-2.0, 5.0, 0.0)),
            );
            let mut cloth: Cloth<f32> = Cloth::new(config).unwrap();
            for _ in 0..60 {
                cloth.step();
            }
            cloth.positions().fold(0.0, |acc, p| acc + p.y)
        });
    });
}

criterion_group!(benches, bench_build, bench_hanging, bench_draped);
criterion_main!(benches);
