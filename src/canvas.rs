//! Drawing surfaces.
//!
//! The renderer only needs two operations from a surface: clear it, and fill
//! a circle with a translucent color. [`PixelCanvas`] is the software
//! implementation used by the headless renderer and tests; the windowed host
//! uses the GPU canvas in [`crate::gpu`].

use crate::error::ExportError;
use crate::{Vec2, Vec4};
use image::{Rgba, RgbaImage};
use std::path::Path;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * 0.5
    }

    #[inline]
    pub fn diagonal(&self) -> f32 {
        Vec2::new(self.width as f32, self.height as f32).length()
    }
}

/// A surface particles can be drawn onto.
pub trait Canvas {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill a circle. `color` is straight (non-premultiplied) RGBA in 0..1.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4);
}

/// CPU canvas backed by a tiny-skia pixmap.
///
/// Circles are filled anti-aliased and composited source-over. A zero-area
/// canvas has no pixmap and silently ignores drawing.
pub struct PixelCanvas {
    pixmap: Option<Pixmap>,
    size: CanvasSize,
    background: Color,
}

impl PixelCanvas {
    pub fn new(size: CanvasSize, background: Vec4) -> Self {
        let mut canvas = Self {
            pixmap: Pixmap::new(size.width, size.height),
            size,
            background: to_skia_color(background),
        };
        canvas.clear();
        canvas
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Reallocate the backing pixmap. Contents are cleared.
    pub fn resize(&mut self, size: CanvasSize) {
        if size != self.size {
            self.pixmap = Pixmap::new(size.width, size.height);
            self.size = size;
        }
        self.clear();
    }

    /// Read a pixel back as straight RGBA in 0..1.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec4> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Vec4::new(c.red() as f32, c.green() as f32, c.blue() as f32, c.alpha() as f32) / 255.0)
    }

    /// Copy the contents into a straight-alpha RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        let Some(pixmap) = &self.pixmap else {
            return RgbaImage::new(0, 0);
        };
        RgbaImage::from_fn(self.size.width, self.size.height, |x, y| {
            let c = pixmap
                .pixel(x, y)
                .map(|p| p.demultiply())
                .map(|c| [c.red(), c.green(), c.blue(), c.alpha()])
                .unwrap_or_default();
            Rgba(c)
        })
    }

    /// Write the current contents as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(ExportError::from)
    }
}

impl Canvas for PixelCanvas {
    fn clear(&mut self) {
        if let Some(pixmap) = &mut self.pixmap {
            pixmap.fill(self.background);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return;
        }
        let Some(pixmap) = &mut self.pixmap else {
            return;
        };
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(to_skia_color(color));
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn to_skia_color(c: Vec4) -> Color {
    let c = c.clamp(Vec4::ZERO, Vec4::ONE);
    Color::from_rgba(c.x, c.y, c.z, c.w).unwrap_or(Color::TRANSPARENT)
}
