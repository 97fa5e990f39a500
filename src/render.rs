//! Perspective projection and depth-graded drawing.

use crate::canvas::{Canvas, CanvasSize};
use crate::particle::Particle;
use crate::{Vec2, Vec3, Vec4};

/// Simple perspective divide around the canvas center.
///
/// `scale = perspective / (perspective + z + z_offset)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub perspective: f32,
    pub z_offset: f32,
    /// Floor applied to positive scales so very deep particles stay visible.
    pub min_scale: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            perspective: 800.0,
            z_offset: 600.0,
            min_scale: 0.1,
        }
    }
}

impl Projection {
    /// Project to screen space. Returns the 2D position and scale factor, or
    /// `None` when the particle is at or behind the eye (non-positive or
    /// non-finite scale).
    pub fn project(&self, position: Vec3, center: Vec2) -> Option<(Vec2, f32)> {
        let scale = self.perspective / (self.perspective + position.z + self.z_offset);
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let scale = scale.max(self.min_scale);
        let screen = (position.truncate() - center) * scale + center;
        screen.is_finite().then_some((screen, scale))
    }
}

/// Near/far color grading over a depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStyle {
    /// RGBA at `min_z` (closest).
    pub near: Vec4,
    /// RGBA at `max_z` (farthest).
    pub far: Vec4,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for DepthStyle {
    fn default() -> Self {
        Self {
            // Coral fading into a deeper, fully transparent coral
            near: Vec4::new(224.0 / 255.0, 133.0 / 255.0, 118.0 / 255.0, 0.6),
            far: Vec4::new(214.0 / 255.0, 112.0 / 255.0, 96.0 / 255.0, 0.0),
            min_z: -500.0,
            max_z: 500.0,
        }
    }
}

impl DepthStyle {
    /// Depth normalized to `[0, 1]`, 0 being nearest.
    pub fn normalized(&self, z: f32) -> f32 {
        let span = self.max_z - self.min_z;
        if span.abs() <= f32::EPSILON {
            return 0.0;
        }
        ((z - self.min_z) / span).clamp(0.0, 1.0)
    }

    pub fn color_at(&self, z: f32) -> Vec4 {
        self.near.lerp(self.far, self.normalized(z))
    }
}

/// Per-frame draw counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Draws particles onto a [`Canvas`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Renderer {
    pub projection: Projection,
    pub style: DepthStyle,
}

impl Renderer {
    pub fn new(projection: Projection, style: DepthStyle) -> Self {
        Self { projection, style }
    }

    /// Draw every particle. The canvas is not cleared here.
    ///
    /// Particles that do not project, or whose radius comes out non-positive,
    /// are skipped for this frame only; their simulated state is untouched.
    pub fn draw(&self, particles: &[Particle], size: CanvasSize, canvas: &mut impl Canvas) -> RenderStats {
        let center = size.center();
        let mut stats = RenderStats::default();

        for p in particles {
            let Some((screen, scale)) = self.projection.project(p.position, center) else {
                stats.skipped += 1;
                continue;
            };
            let radius = p.size * scale;
            if !radius.is_finite() || radius <= 0.0 {
                stats.skipped += 1;
                continue;
            }
            let color = self.style.color_at(p.position.z);
            if color.w <= 0.0 {
                // Fully transparent, nothing to composite
                stats.skipped += 1;
                continue;
            }
            canvas.fill_circle(screen, radius, color);
            stats.drawn += 1;
        }

        stats
    }

    /// Clear the canvas, then draw.
    pub fn render(&self, particles: &[Particle], size: CanvasSize, canvas: &mut impl Canvas) -> RenderStats {
        canvas.clear();
        self.draw(particles, size, canvas)
    }
}
