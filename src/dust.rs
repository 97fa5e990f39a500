//! Ambient dust: a sparse 2D layer of drifting motes behind the morph field.
//!
//! Motes are pushed away by the pointer, slowed by drag, nudged back into
//! motion when they nearly stop, and wrap around the canvas edges.

use crate::canvas::{Canvas, CanvasSize};
use crate::{Vec2, Vec4};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DustConfig {
    /// Canvas area per mote, in square pixels.
    pub density: f32,
    pub interaction_radius: f32,
    pub force: f32,
    /// Multiplicative velocity drag per tick.
    pub drag: f32,
    /// Natural drift speed; initial velocities are within ±drift/2.
    pub drift: f32,
    /// Fraction of motes drawn in the accent color.
    pub accent_ratio: f32,
    /// RGB of ordinary motes (alpha is per mote).
    pub base_color: Vec4,
    pub accent_color: Vec4,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            density: 6000.0,
            interaction_radius: 200.0,
            force: 0.3,
            drag: 0.96,
            drift: 0.2,
            accent_ratio: 0.05,
            base_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            accent_color: Vec4::new(224.0 / 255.0, 133.0 / 255.0, 118.0 / 255.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mote {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub accent: bool,
}

#[derive(Debug, Clone)]
pub struct DustField {
    motes: Vec<Mote>,
    size: CanvasSize,
    config: DustConfig,
}

impl DustField {
    pub fn new<R: Rng + ?Sized>(size: CanvasSize, config: DustConfig, rng: &mut R) -> Self {
        let count = if config.density > 0.0 && !size.is_empty() {
            ((size.width as f32 * size.height as f32) / config.density) as usize
        } else {
            0
        };
        let half_drift = config.drift * 0.5;

        let motes = (0..count)
            .map(|_| Mote {
                position: Vec2::new(
                    rng.gen_range(0.0..size.width as f32),
                    rng.gen_range(0.0..size.height as f32),
                ),
                velocity: if half_drift > 0.0 {
                    Vec2::new(
                        rng.gen_range(-half_drift..half_drift),
                        rng.gen_range(-half_drift..half_drift),
                    )
                } else {
                    Vec2::ZERO
                },
                size: rng.gen_range(0.5..2.0),
                alpha: rng.gen_range(0.05..0.25),
                accent: rng.gen::<f32>() < config.accent_ratio,
            })
            .collect();

        Self { motes, size, config }
    }

    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }

    pub fn len(&self) -> usize {
        self.motes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motes.is_empty()
    }

    /// One frame of motion.
    pub fn tick<R: Rng + ?Sized>(&mut self, pointer: Option<Vec2>, rng: &mut R) {
        let c = self.config;
        let w = self.size.width as f32;
        let h = self.size.height as f32;

        for m in &mut self.motes {
            if let Some(pointer) = pointer {
                let delta = m.position - pointer;
                let dist = delta.length();
                if dist < c.interaction_radius {
                    let falloff = (c.interaction_radius - dist) / c.interaction_radius;
                    let dir = if dist > f32::EPSILON { delta / dist } else { Vec2::X };
                    m.velocity += dir * falloff * c.force;
                }
            }

            m.position += m.velocity;
            m.velocity *= c.drag;

            if m.velocity.length() < c.drift * 0.5 {
                m.velocity += Vec2::new(rng.gen_range(-0.005..0.005), rng.gen_range(-0.005..0.005));
            }

            if m.position.x < 0.0 {
                m.position.x = w;
            } else if m.position.x > w {
                m.position.x = 0.0;
            }
            if m.position.y < 0.0 {
                m.position.y = h;
            } else if m.position.y > h {
                m.position.y = 0.0;
            }
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        for m in &self.motes {
            let color = if m.accent {
                self.config.accent_color
            } else {
                self.config.base_color
            };
            canvas.fill_circle(m.position, m.size, color.truncate().extend(m.alpha));
        }
    }
}
