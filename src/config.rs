//! Session configuration.
//!
//! Every tuning constant lives in one of the sub-structs below; `MorphConfig`
//! bundles them and offers `with_*` builder methods.
//!
//! ```ignore
//! let config = MorphConfig::default()
//!     .with_seed(7)
//!     .with_font_size(120.0)
//!     .with_dust(DustConfig::default());
//! ```

use crate::dust::DustConfig;
use crate::field::CloudConfig;
use crate::forces::ForceParams;
use crate::morph::ScrollMapper;
use crate::render::{DepthStyle, Projection};
use crate::sampler::SamplerConfig;
use crate::Vec4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphConfig {
    pub forces: ForceParams,
    /// Fraction of the raw/smoothed gap closed per frame.
    pub smoothing_rate: f32,
    pub projection: Projection,
    pub style: DepthStyle,
    pub sampler: SamplerConfig,
    pub cloud: CloudConfig,
    pub scroll: ScrollMapper,
    /// Optional background dust layer.
    pub dust: Option<DustConfig>,
    /// Fixed RNG seed; `None` seeds from entropy so every mount differs.
    pub seed: Option<u64>,
    /// Clear color used by canvases that own their background.
    pub background: Vec4,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            forces: ForceParams::default(),
            smoothing_rate: 0.03,
            projection: Projection::default(),
            style: DepthStyle::default(),
            sampler: SamplerConfig::default(),
            cloud: CloudConfig::default(),
            scroll: ScrollMapper::default(),
            dust: None,
            seed: None,
            background: Vec4::new(0.02, 0.02, 0.05, 1.0),
        }
    }
}

impl MorphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spring, damping, repulsion and ambient drift parameters.
    pub fn with_forces(mut self, forces: ForceParams) -> Self {
        self.forces = forces;
        self
    }

    /// Set the fraction of the raw/smoothed progress gap closed per frame.
    pub fn with_smoothing_rate(mut self, rate: f32) -> Self {
        self.smoothing_rate = rate;
        self
    }

    /// Set the perspective used to project particle depth.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Set how depth maps to particle size, alpha and color.
    pub fn with_style(mut self, style: DepthStyle) -> Self {
        self.style = style;
        self
    }

    /// Fix the font size instead of deriving it from the canvas width.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.sampler.font_size = Some(font_size);
        self
    }

    /// Fix the sampling grid gap instead of deriving it from the canvas width.
    pub fn with_sample_gap(mut self, gap: u32) -> Self {
        self.sampler.gap = Some(gap);
        self
    }

    /// Set the shape of the starting cloud.
    pub fn with_cloud(mut self, cloud: CloudConfig) -> Self {
        self.cloud = cloud;
        self
    }

    /// Set how scroll offset maps to raw progress.
    pub fn with_scroll(mut self, scroll: ScrollMapper) -> Self {
        self.scroll = scroll;
        self
    }

    /// Enable the background dust layer.
    pub fn with_dust(mut self, dust: DustConfig) -> Self {
        self.dust = Some(dust);
        self
    }

    /// Seed the RNG so every mount builds the same cloud.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the canvas clear color (straight RGBA in 0..1).
    pub fn with_background(mut self, background: Vec4) -> Self {
        self.background = background;
        self
    }
}
