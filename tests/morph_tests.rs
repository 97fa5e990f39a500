//! End-to-end behavior of sampling, simulation, progress smoothing and
//! session lifecycle.

use std::collections::HashSet;

use morphfield::forces::{ambient, repulsion, spring};
use morphfield::headless::{self, HeadlessOptions};
use morphfield::prelude::*;
use morphfield::{
    compute_acceleration, CloudBounds, CloudConfig, MorphController, ParticleField, PointSampler, SamplerConfig,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn sampler(font_size: f32) -> PointSampler {
    PointSampler::new(SamplerConfig {
        font_size: Some(font_size),
        ..Default::default()
    })
}

fn field_for(text: &str, size: CanvasSize, seed: u64) -> ParticleField {
    let points = sampler(100.0).sample(text, size);
    let bounds = CloudBounds::for_canvas(size, &CloudConfig::default());
    let mut rng = SmallRng::seed_from_u64(seed);
    ParticleField::create(&points, &bounds, &mut rng)
}

/// Canvas that only counts calls.
#[derive(Default)]
struct CountingCanvas {
    writes: usize,
}

impl Canvas for CountingCanvas {
    fn clear(&mut self) {
        self.writes += 1;
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Vec4) {
        self.writes += 1;
    }
}

// ========== Sampling ==========

#[test]
fn test_sampling_is_deterministic() {
    let size = CanvasSize::new(640, 320);
    let a = sampler(120.0).sample("MORPH", size);
    let b = sampler(120.0).sample("MORPH", size);
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_hi_points_lie_on_canvas() {
    let points = sampler(100.0).sample("HI", CanvasSize::new(400, 200));
    assert!(!points.is_empty());
    for p in &points {
        assert!(p.x >= 0.0 && p.x <= 400.0, "x out of range: {}", p.x);
        assert!(p.y >= 0.0 && p.y <= 200.0, "y out of range: {}", p.y);
    }
}

#[test]
fn test_particle_count_matches_points() {
    let size = CanvasSize::new(400, 200);
    let points = sampler(100.0).sample("HI", size);
    let field = field_for("HI", size, 1);
    assert_eq!(field.len(), points.len());
}

// ========== Simulation ==========

#[test]
fn test_full_progress_condenses_into_text() {
    let mut field = field_for("HI", CanvasSize::new(400, 200), 17);
    let params = ForceParams::default();
    for i in 0..500 {
        field.tick(1.0, None, i as f32 / 60.0, &params);
    }
    let worst = field.max_deviation(|p| p.target);
    assert!(worst < 5.0, "particle {} px from its target", worst);
}

#[test]
fn test_zero_progress_stays_in_cloud() {
    let mut field = field_for("HI", CanvasSize::new(400, 200), 23);
    let params = ForceParams::default();
    let reach = params.ambient_amplitude * std::f32::consts::SQRT_2;

    for i in 0..600 {
        field.tick(0.0, None, i as f32 / 60.0, &params);
        for p in field.particles() {
            let drift = (p.position - p.cloud_origin).truncate().length();
            assert!(drift <= reach * 2.0, "particle drifted {} px from its origin", drift);
        }
    }
    assert!(field.max_deviation(|p| p.cloud_origin) <= reach * 1.5);
    for p in field.particles() {
        assert!((p.position.z - p.cloud_origin.z).abs() < 1e-3);
    }
}

#[test]
fn test_no_pointer_means_no_repulsion() {
    let field = field_for("HI", CanvasSize::new(400, 200), 5);
    let params = ForceParams::default();
    for p in field.particles() {
        assert_eq!(repulsion(p, None, 3.0, &params), Vec3::ZERO);
        let expected = spring(p, 0.4, &params) + ambient(p, 3.0, &params);
        assert_eq!(compute_acceleration(p, 0.4, None, 3.0, &params), expected);
    }
}

// ========== Progress ==========

#[test]
fn test_progress_is_clamped_while_converging() {
    let mut morph = MorphController::default();
    morph.set_raw_progress(5.0);
    for _ in 0..1000 {
        let s = morph.tick();
        assert!((0.0..=1.0).contains(&s));
    }
    assert!((morph.smoothed_progress() - 1.0).abs() < 1e-3);

    morph.set_raw_progress(-5.0);
    for _ in 0..1000 {
        let s = morph.tick();
        assert!((0.0..=1.0).contains(&s));
    }
    assert!(morph.smoothed_progress() < 1e-3);
}

#[test]
fn test_smoothing_approaches_monotonically() {
    for &(start, target) in &[(0.0, 1.0), (1.0, 0.25), (0.3, 0.7), (0.9, 0.9)] {
        let mut morph = MorphController::default();
        morph.set_raw_progress(start);
        for _ in 0..2000 {
            morph.tick();
        }
        morph.set_raw_progress(target);

        let mut gap = (target - morph.smoothed_progress()).abs();
        for _ in 0..300 {
            let before = morph.smoothed_progress();
            let after = morph.tick();
            let new_gap = (target - after).abs();
            assert!(new_gap <= gap + 1e-6, "gap grew from {} to {}", gap, new_gap);
            // Never crosses the target
            assert!((before - target) * (after - target) >= -1e-9);
            gap = new_gap;
        }
    }
}

#[test]
fn test_reversed_input_never_jumps() {
    let mut morph = MorphController::default();
    morph.set_raw_progress(1.0);
    for _ in 0..40 {
        morph.tick();
    }
    let before = morph.smoothed_progress();
    assert!(before > 0.0);

    morph.set_raw_progress(1.0);
    morph.set_raw_progress(0.0);
    let after = morph.tick();
    assert!(after < before);
    assert!(before - after <= morph.rate() + 1e-6);

    let mut fresh = MorphController::default();
    fresh.set_raw_progress(1.0);
    fresh.set_raw_progress(0.0);
    assert_eq!(fresh.tick(), 0.0);
}

// ========== Lifecycle ==========

#[test]
fn test_unmount_cancels_pending_frame() {
    let config = MorphConfig::default().with_seed(9).with_font_size(60.0);
    let mut session = AnimationSession::mount(config, "HI", CanvasSize::new(400, 200));
    let mut frames = FrameLoop::new(ManualScheduler::new());
    let mut canvas = CountingCanvas::default();

    frames.start();
    let pending = frames.pending();
    assert_eq!(frames.scheduler().requested(), pending.as_slice());
    frames.stop();
    session.unmount();

    assert_eq!(frames.scheduler().cancelled(), pending.as_slice());
    for _ in 0..5 {
        let ran = frames.on_frame(|| {
            session.frame(0.0, &mut canvas);
        });
        assert!(!ran);
    }
    assert_eq!(canvas.writes, 0);
    assert_eq!(frames.scheduler().request_count(), 1);

    // Even a stray direct call writes nothing
    session.frame(1.0, &mut canvas);
    assert_eq!(canvas.writes, 0);
}

#[test]
fn test_undrawable_text_renders_blank_frames() {
    let config = MorphConfig::default().with_seed(3);
    let mut canvas = PixelCanvas::new(CanvasSize::new(120, 60), config.background);

    for (text, size) in [
        ("", CanvasSize::new(120, 60)),
        ("H\u{20ac}I", CanvasSize::new(120, 60)),
        ("HI", CanvasSize::new(0, 0)),
    ] {
        let mut session = AnimationSession::mount(config, text, size);
        session.set_raw_progress(1.0);
        session.set_pointer(Some(Vec2::new(60.0, 30.0)));
        for i in 0..30 {
            let stats = session.frame(i as f32 / 60.0, &mut canvas);
            assert_eq!(stats.particles, 0);
            assert_eq!(stats.render.drawn, 0);
        }
        assert!(session.field().is_empty());
        let image = canvas.to_image();
        let background = image.get_pixel(0, 0).0;
        assert!(image.pixels().all(|p| p.0 == background), "{:?} drew something", text);
    }

    // A later text change recovers
    let mut session = AnimationSession::mount(config, "", CanvasSize::new(120, 60));
    session.set_text("HI");
    session.frame(0.0, &mut canvas);
    assert!(!session.field().is_empty());
}

#[test]
fn test_session_settles_text_through_smoothing() {
    let config = MorphConfig::default().with_seed(4).with_font_size(100.0);
    let mut session = AnimationSession::mount(config, "HI", CanvasSize::new(400, 200));
    let mut canvas = CountingCanvas::default();
    session.set_raw_progress(1.0);

    let mut clock = Clock::fixed(1.0 / 60.0);
    for _ in 0..900 {
        session.frame(clock.tick(), &mut canvas);
    }
    assert!(session.morph().smoothed_progress() > 0.999);
    for p in session.field().particles() {
        assert!((p.position - p.target).length() < 5.0);
    }
}

#[test]
fn test_headless_export_writes_pngs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = MorphConfig::default().with_seed(2).with_font_size(40.0);
    let options = HeadlessOptions::default()
        .with_size(CanvasSize::new(160, 80))
        .with_frames(90)
        .with_every(30)
        .with_progress(1.0)
        .with_pointer(Some(Vec2::new(80.0, 40.0)));

    let paths = headless::render_frames(config, "HI", &options, dir.path()).expect("render");
    assert_eq!(paths.len(), 3);
    assert!(paths[2].ends_with("frame_0089.png"));

    let image = image::open(&paths[2]).expect("decode").to_rgba8();
    assert_eq!(image.dimensions(), (160, 80));
    let colors: HashSet<[u8; 4]> = image.pixels().map(|p| p.0).collect();
    assert!(colors.len() > 1, "frame is a flat background");
}
