//! The particle record.

use crate::Vec3;

/// One simulated particle.
///
/// `cloud_origin` and `target` are fixed when the particle is created; only
/// `position` and `velocity` change from tick to tick. `z` is depth for the
/// perspective projection, nothing collides along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current simulated location.
    pub position: Vec3,
    /// Current rate of change, damped every tick.
    pub velocity: Vec3,
    /// Where the particle rests when morph progress is 0.
    pub cloud_origin: Vec3,
    /// Where the particle rests when morph progress is 1.
    pub target: Vec3,
    /// Render radius at scale 1.
    pub size: f32,
    /// Phase shift for the ambient oscillation.
    pub phase_offset: f32,
}

impl Particle {
    /// A particle at rest on its cloud origin.
    pub fn at_origin(cloud_origin: Vec3, target: Vec3, size: f32, phase_offset: f32) -> Self {
        Self {
            position: cloud_origin,
            velocity: Vec3::ZERO,
            cloud_origin,
            target,
            size,
            phase_offset,
        }
    }
}
