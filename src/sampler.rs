//! Text rasterization into particle target points.
//!
//! The sampler draws a string into a detached grayscale surface the size of
//! the canvas, centered both ways, then walks a fixed grid and keeps every
//! grid position whose coverage passes the opacity threshold. Nothing here is
//! random: the same inputs always produce the same points.

use crate::canvas::CanvasSize;
use crate::font::{self, ADVANCE, GLYPH_HEIGHT};
use crate::Vec2;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

/// Sampling parameters.
///
/// `None` fields are derived from the canvas size on every call, which is
/// what lets a resize pick a new font size and grid density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// Font size in pixels (glyph cell height is `font_size / 10`).
    pub font_size: Option<f32>,
    /// Grid spacing between sampled pixels.
    pub gap: Option<u32>,
    /// Minimum coverage (0-255) for a grid pixel to count as opaque.
    pub alpha_threshold: u8,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            font_size: None,
            gap: None,
            alpha_threshold: 128,
        }
    }
}

impl SamplerConfig {
    /// Font size used for a canvas: `min(width * 0.2, 400)` unless fixed.
    pub fn font_size_for(&self, size: CanvasSize) -> f32 {
        self.font_size
            .unwrap_or_else(|| (size.width as f32 * 0.2).min(400.0))
    }

    /// Grid gap used for a canvas: denser on narrow canvases unless fixed.
    pub fn gap_for(&self, size: CanvasSize) -> u32 {
        self.gap
            .unwrap_or(if size.width < 800 { 6 } else { 8 })
            .max(1)
    }
}

/// Rasterizes strings into point sets.
#[derive(Debug, Clone, Default)]
pub struct PointSampler {
    config: SamplerConfig,
}

impl PointSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Sample `text` for a canvas of the given size.
    ///
    /// Returns an empty set for empty or undrawable text and for zero-area
    /// canvases.
    pub fn sample(&self, text: &str, size: CanvasSize) -> Vec<Vec2> {
        let font_size = self.config.font_size_for(size);
        let gap = self.config.gap_for(size);
        match rasterize(text, size, font_size) {
            Some(surface) => collect_points(&surface, gap, self.config.alpha_threshold),
            None => Vec::new(),
        }
    }
}

/// Draw `text` centered on an off-screen surface.
///
/// Returns `None` when there is nothing to draw or when any character has no
/// glyph.
pub fn rasterize(text: &str, size: CanvasSize, font_size: f32) -> Option<Pixmap> {
    if size.is_empty() || !font_size.is_finite() || font_size <= 0.0 {
        return None;
    }

    let glyphs = text.chars().map(font::glyph).collect::<Option<Vec<_>>>()?;
    if glyphs.iter().all(|g| g.iter().all(|row| *row == 0)) {
        return None;
    }

    let cell = font_size / 10.0;
    // Trailing spacing column is not part of the measured width
    let cols = glyphs.len() as u32 * ADVANCE - 1;
    let text_w = cols as f32 * cell;
    let text_h = GLYPH_HEIGHT as f32 * cell;
    let origin = size.center() - Vec2::new(text_w, text_h) * 0.5;

    let mut pb = PathBuilder::new();
    for (i, glyph) in glyphs.iter().enumerate() {
        let glyph_x = origin.x + (i as u32 * ADVANCE) as f32 * cell;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..font::GLYPH_WIDTH {
                if !font::is_lit(glyph, col, row) {
                    continue;
                }
                let x = glyph_x + col as f32 * cell;
                let y = origin.y + row as f32 * cell;
                if let Some(rect) = Rect::from_xywh(x, y, cell, cell) {
                    pb.push_rect(rect);
                }
            }
        }
    }

    let mut surface = Pixmap::new(size.width, size.height)?;
    let mut paint = Paint::default();
    paint.set_color(Color::BLACK);
    paint.anti_alias = true;
    surface.fill_path(&pb.finish()?, &paint, FillRule::Winding, Transform::identity(), None);
    Some(surface)
}

fn collect_points(surface: &Pixmap, gap: u32, threshold: u8) -> Vec<Vec2> {
    let mut points = Vec::new();
    for y in (0..surface.height()).step_by(gap as usize) {
        for x in (0..surface.width()).step_by(gap as usize) {
            if surface.pixel(x, y).is_some_and(|p| p.alpha() > threshold) {
                points.push(Vec2::new(x as f32, y as f32));
            }
        }
    }
    points
}
