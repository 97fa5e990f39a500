//! Benchmarks for the CPU hot paths: sampling, integration and drawing.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morphfield::prelude::*;
use morphfield::{CloudBounds, CloudConfig, ParticleField, PointSampler, Renderer, SamplerConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn field(text: &str, size: CanvasSize) -> ParticleField {
    let points = PointSampler::new(SamplerConfig::default()).sample(text, size);
    let bounds = CloudBounds::for_canvas(size, &CloudConfig::default());
    ParticleField::create(&points, &bounds, &mut SmallRng::seed_from_u64(1))
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    let sampler = PointSampler::new(SamplerConfig::default());

    for &(w, h) in &[(640u32, 360u32), (1280, 720), (1920, 1080)] {
        let size = CanvasSize::new(w, h);
        group.bench_with_input(BenchmarkId::new("hello", format!("{}x{}", w, h)), &size, |b, &size| {
            b.iter(|| black_box(sampler.sample("HELLO", size)))
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    let params = ForceParams::default();

    for text in ["HI", "HELLO", "MORPHFIELD"] {
        let mut f = field(text, CanvasSize::new(1280, 720));
        group.bench_function(BenchmarkId::new(format!("{}_particles", f.len()), text), |b| {
            let mut t = 0.0;
            b.iter(|| {
                t += 1.0 / 60.0;
                f.tick(0.7, Some(Vec2::new(640.0, 360.0)), t, &params);
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let size = CanvasSize::new(1280, 720);
    let f = field("HELLO", size);
    let renderer = Renderer::default();
    let mut canvas = PixelCanvas::new(size, Vec4::new(0.02, 0.02, 0.05, 1.0));

    c.bench_function("render_pixel_canvas", |b| {
        b.iter(|| black_box(renderer.render(f.particles(), size, &mut canvas)))
    });
}

criterion_group!(benches, bench_sample, bench_tick, bench_render);
criterion_main!(benches);
