//! The particle field: creation from sample points and per-frame integration.
//!
//! Integration is frame-coupled. Each call to [`ParticleField::tick`] is one
//! step with no delta-time scaling, so the stiffness and damping constants
//! are tuned per frame and the motion runs faster on faster displays.

use crate::canvas::CanvasSize;
use crate::forces::{compute_acceleration, ForceParams};
use crate::particle::Particle;
use crate::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// How starting clouds and per-particle attributes are randomized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudConfig {
    /// Maximum cloud radius as a fraction of the canvas diagonal.
    pub radius_factor: f32,
    /// Cloud depth half-range; origins get `z` in `[-depth, depth)`.
    pub depth: f32,
    /// Target depth half-range, so text is not a perfectly flat plane.
    pub target_jitter: f32,
    /// Particle radius range.
    pub size_range: (f32, f32),
    /// Upper bound of the ambient phase offset.
    pub max_phase: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            radius_factor: 0.8,
            depth: 500.0,
            target_jitter: 25.0,
            size_range: (1.0, 4.0),
            max_phase: 100.0,
        }
    }
}

/// Spatial extent of the starting cloud for one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudBounds {
    /// Cloud center, the middle of the canvas.
    pub center: Vec2,
    /// Largest planar distance of a cloud origin from `center`.
    pub max_radius: f32,
    /// Cloud origins get `z` in `[-depth, depth)`.
    pub depth: f32,
    /// Text targets get `z` in `[-target_jitter, target_jitter)`.
    pub target_jitter: f32,
    /// Base radius range, `min..max`.
    pub size_range: (f32, f32),
    /// Ambient phases are drawn from `[0, max_phase)`.
    pub max_phase: f32,
}

impl CloudBounds {
    /// Bounds centered on the canvas.
    pub fn for_canvas(size: CanvasSize, config: &CloudConfig) -> Self {
        Self {
            center: size.center(),
            max_radius: size.diagonal() * config.radius_factor,
            depth: config.depth,
            target_jitter: config.target_jitter,
            size_range: config.size_range,
            max_phase: config.max_phase,
        }
    }
}

/// Uniform sample in `[-half, half)`, tolerant of a zero range.
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

/// Uniform sample in `[lo, hi)`, tolerant of an empty range.
fn span<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// A fixed set of particles, one per sample point.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Create one particle per point.
    ///
    /// Particles start at rest on their cloud origin. The field does not
    /// resample; callers that want a different count adjust `points` first.
    pub fn create<R: Rng + ?Sized>(points: &[Vec2], bounds: &CloudBounds, rng: &mut R) -> Self {
        let particles = points
            .iter()
            .map(|point| {
                let target = point.extend(symmetric(rng, bounds.target_jitter));

                let angle = rng.gen_range(0.0..TAU);
                let radius = span(rng, 0.0, bounds.max_radius);
                let cloud_origin = (bounds.center + Vec2::from_angle(angle) * radius)
                    .extend(symmetric(rng, bounds.depth));

                let size = span(rng, bounds.size_range.0, bounds.size_range.1);
                let phase_offset = span(rng, 0.0, bounds.max_phase);

                Particle::at_origin(cloud_origin, target, size, phase_offset)
            })
            .collect();

        Self { particles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle by one step.
    ///
    /// `v += a; v *= damping; x += v`. Nothing is clamped: depth may run far
    /// out, and x/y are only ever pulled back by the spring.
    pub fn tick(&mut self, progress: f32, pointer: Option<Vec2>, time: f32, params: &ForceParams) {
        for p in &mut self.particles {
            let accel = compute_acceleration(p, progress, pointer, time, params);
            p.velocity = (p.velocity + accel) * params.damping;
            p.position += p.velocity;
        }
    }

    /// Total kinetic energy proxy (sum of squared speeds).
    pub fn energy(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| p.velocity.length_squared())
            .sum()
    }

    /// Largest distance from any particle to `anchor(particle)`.
    pub fn max_deviation(&self, anchor: impl Fn(&Particle) -> Vec3) -> f32 {
        self.particles
            .iter()
            .map(|p| (p.position - anchor(p)).length())
            .fold(0.0, f32::max)
    }
}
