//! Per-particle force model.
//!
//! Three independent terms are summed into one acceleration:
//!
//! | Term | Source | Axes |
//! |------|--------|------|
//! | Spring | blended cloud/target anchor | x, y, z |
//! | Repulsion | pointer within [`ForceParams::interaction_radius`] | x, y, plus a rippling z |
//! | Ambient | `time` and the particle's phase offset | x, y |
//!
//! Velocity damping is applied by the integrator in [`crate::field`], after
//! the acceleration has been added.

use crate::particle::Particle;
use crate::{Vec2, Vec3};

/// Tuning constants for the force model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    /// Spring constant toward the blended anchor.
    pub stiffness: f32,
    /// Multiplicative velocity damping per tick.
    pub damping: f32,
    /// Pointer influence radius in pixels (x/y distance only).
    pub interaction_radius: f32,
    /// Repulsion magnitude at the pointer location.
    pub push_strength: f32,
    /// Spatial frequency of the depth ripple, radians per pixel.
    pub ripple_frequency: f32,
    /// Temporal frequency of the depth ripple, radians per second.
    pub ripple_speed: f32,
    /// Depth ripple gain relative to the push.
    pub ripple_depth: f32,
    /// Ambient oscillation amplitude in pixels.
    pub ambient_amplitude: f32,
    /// Ambient oscillation rates (x uses sin, y uses cos), radians per second.
    pub ambient_rate: Vec2,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            stiffness: 0.03,
            damping: 0.90,
            interaction_radius: 250.0,
            push_strength: 8.0,
            ripple_frequency: 0.05,
            ripple_speed: 2.0,
            ripple_depth: 4.0,
            ambient_amplitude: 2.0,
            ambient_rate: Vec2::new(0.5, 0.3),
        }
    }
}

/// `1 - (1 - p)^3`, with `p` clamped to [0, 1].
#[inline]
pub fn ease_out_cubic(p: f32) -> f32 {
    let inv = 1.0 - p.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Anchor point for a given morph progress.
#[inline]
pub fn blended_anchor(particle: &Particle, progress: f32) -> Vec3 {
    particle
        .cloud_origin
        .lerp(particle.target, ease_out_cubic(progress))
}

/// Spring pull from the current position toward the blended anchor.
pub fn spring(particle: &Particle, progress: f32, params: &ForceParams) -> Vec3 {
    (blended_anchor(particle, progress) - particle.position) * params.stiffness
}

/// Pointer repulsion. Exactly zero when there is no pointer or the particle
/// is outside the interaction radius.
pub fn repulsion(particle: &Particle, pointer: Option<Vec2>, time: f32, params: &ForceParams) -> Vec3 {
    let Some(pointer) = pointer else {
        return Vec3::ZERO;
    };

    let delta = particle.position.truncate() - pointer;
    let radius = params.interaction_radius;
    let dist_sq = delta.length_squared();
    if !(dist_sq < radius * radius) {
        return Vec3::ZERO;
    }

    let dist = dist_sq.sqrt();
    let falloff = (radius - dist) / radius;
    let push = params.push_strength * falloff;
    // A particle exactly under the pointer is pushed along +x
    let dir = if dist > f32::EPSILON { delta / dist } else { Vec2::X };
    let ripple = (dist * params.ripple_frequency - time * params.ripple_speed).sin()
        * push
        * params.ripple_depth;

    (dir * push).extend(ripple)
}

/// Ambient offset added to the anchor so particles never settle completely.
#[inline]
pub fn ambient_offset(particle: &Particle, time: f32, params: &ForceParams) -> Vec2 {
    Vec2::new(
        (time * params.ambient_rate.x + particle.phase_offset).sin(),
        (time * params.ambient_rate.y + particle.phase_offset).cos(),
    ) * params.ambient_amplitude
}

/// Ambient drift acceleration. It acts through the spring, so its size is
/// the offset scaled by stiffness.
pub fn ambient(particle: &Particle, time: f32, params: &ForceParams) -> Vec3 {
    (ambient_offset(particle, time, params) * params.stiffness).extend(0.0)
}

/// Total acceleration on `particle` for this tick.
pub fn compute_acceleration(
    particle: &Particle,
    progress: f32,
    pointer: Option<Vec2>,
    time: f32,
    params: &ForceParams,
) -> Vec3 {
    spring(particle, progress, params)
        + repulsion(particle, pointer, time, params)
        + ambient(particle, time, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(position: Vec3) -> Particle {
        Particle {
            position,
            velocity: Vec3::ZERO,
            cloud_origin: Vec3::new(-100.0, 0.0, 200.0),
            target: Vec3::new(100.0, 50.0, 0.0),
            size: 2.0,
            phase_offset: 1.5,
        }
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), 1.0);
        // Faster than linear on the way in
        assert!(ease_out_cubic(0.5) > 0.5);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_anchor_blends_between_origin_and_target() {
        let p = particle_at(Vec3::ZERO);
        assert_eq!(blended_anchor(&p, 0.0), p.cloud_origin);
        assert_eq!(blended_anchor(&p, 1.0), p.target);
    }

    #[test]
    fn test_spring_points_at_anchor() {
        let params = ForceParams::default();
        let p = particle_at(Vec3::new(100.0, 0.0, 0.0));
        let a = spring(&p, 1.0, &params);
        assert!((a - Vec3::new(0.0, 50.0, 0.0) * 0.03).length() < 1e-5);
    }

    #[test]
    fn test_no_pointer_means_no_repulsion() {
        let params = ForceParams::default();
        let p = particle_at(Vec3::new(10.0, 10.0, 0.0));
        assert_eq!(repulsion(&p, None, 3.0, &params), Vec3::ZERO);
    }

    #[test]
    fn test_repulsion_zero_outside_radius() {
        let params = ForceParams::default();
        let p = particle_at(Vec3::new(0.0, 0.0, 0.0));
        let pointer = Some(Vec2::new(250.0, 0.0));
        assert_eq!(repulsion(&p, pointer, 0.0, &params), Vec3::ZERO);
    }

    #[test]
    fn test_repulsion_ignores_depth_for_distance() {
        let params = ForceParams::default();
        let near = particle_at(Vec3::new(0.0, 0.0, 0.0));
        let deep = particle_at(Vec3::new(0.0, 0.0, 10_000.0));
        let pointer = Some(Vec2::new(100.0, 0.0));
        assert_eq!(
            repulsion(&near, pointer, 1.0, &params),
            repulsion(&deep, pointer, 1.0, &params)
        );
    }

    #[test]
    fn test_repulsion_points_away_and_falls_off() {
        let params = ForceParams::default();
        let pointer = Some(Vec2::ZERO);
        let close = repulsion(&particle_at(Vec3::new(50.0, 0.0, 0.0)), pointer, 0.0, &params);
        let far = repulsion(&particle_at(Vec3::new(200.0, 0.0, 0.0)), pointer, 0.0, &params);
        assert!(close.x > 0.0 && far.x > 0.0);
        assert!(close.x > far.x);
        assert!((close.x - 8.0 * 0.8).abs() < 1e-4);
        assert_eq!(close.y, 0.0);
    }

    #[test]
    fn test_repulsion_at_pointer_is_finite() {
        let params = ForceParams::default();
        let p = particle_at(Vec3::new(5.0, 5.0, 0.0));
        let a = repulsion(&p, Some(Vec2::new(5.0, 5.0)), 0.25, &params);
        assert!(a.is_finite());
        assert!((a.x - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_ripple_depends_on_time() {
        let params = ForceParams::default();
        let p = particle_at(Vec3::new(60.0, 0.0, 0.0));
        let a = repulsion(&p, Some(Vec2::ZERO), 0.0, &params);
        let b = repulsion(&p, Some(Vec2::ZERO), 0.7, &params);
        assert_eq!(a.truncate(), b.truncate());
        assert_ne!(a.z, b.z);
    }

    #[test]
    fn test_ambient_is_bounded_and_planar() {
        let params = ForceParams::default();
        let p = particle_at(Vec3::ZERO);
        for i in 0..200 {
            let a = ambient(&p, i as f32 * 0.37, &params);
            assert_eq!(a.z, 0.0);
            assert!(a.x.abs() <= params.ambient_amplitude * params.stiffness + 1e-6);
            assert!(a.y.abs() <= params.ambient_amplitude * params.stiffness + 1e-6);
        }
    }

    #[test]
    fn test_phase_offset_desynchronizes_particles() {
        let params = ForceParams::default();
        let mut a = particle_at(Vec3::ZERO);
        let mut b = a;
        a.phase_offset = 0.0;
        b.phase_offset = 2.0;
        assert_ne!(ambient(&a, 1.0, &params), ambient(&b, 1.0, &params));
    }

    #[test]
    fn test_acceleration_is_sum_of_terms() {
        let params = ForceParams::default();
        let p = particle_at(Vec3::new(30.0, 40.0, 5.0));
        let pointer = Some(Vec2::new(0.0, 0.0));
        let total = compute_acceleration(&p, 0.4, pointer, 2.0, &params);
        let parts = spring(&p, 0.4, &params)
            + repulsion(&p, pointer, 2.0, &params)
            + ambient(&p, 2.0, &params);
        assert!((total - parts).length() < 1e-6);
    }
}
