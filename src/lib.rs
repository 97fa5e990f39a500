//! # morphfield
//!
//! A depth-graded particle cloud that condenses into text.
//!
//! Text is rasterized and sampled into target points. Each point gets one
//! particle that starts somewhere in a wide 3D cloud. Every frame a spring
//! pulls each particle toward a blend of its cloud origin and its text
//! target, a pointer pushes nearby particles away with a rippling depth
//! kick, and a slow ambient drift keeps the settled text alive. A
//! perspective projection shrinks and fades particles with depth.
//!
//! ## Quick Start
//!
//! ```ignore
//! use morphfield::prelude::*;
//!
//! let config = MorphConfig::default().with_seed(7);
//! let mut session = AnimationSession::mount(config, "HELLO", CanvasSize::new(800, 400));
//! let mut canvas = PixelCanvas::new(CanvasSize::new(800, 400), config.background);
//!
//! session.set_raw_progress(1.0);
//! for frame in 0..300 {
//!     session.frame(frame as f32 / 60.0, &mut canvas);
//! }
//! canvas.save_png("hello.png")?;
//! ```
//!
//! ## Core Concepts
//!
//! ### Progress
//!
//! Raw progress in `[0, 1]` comes from the host (usually a scroll offset via
//! [`ScrollMapper`]). [`MorphController`] eases a smoothed value toward it a
//! little every frame; only the smoothed value reaches the force model, so
//! input jumps never make the field jump.
//!
//! ### Frames
//!
//! [`AnimationSession::frame`] is the whole per-frame pipeline: apply any
//! pending resize or text change, advance progress, integrate the field,
//! then clear and draw. Hosts drive it from a [`FrameLoop`] so that
//! teardown cancels the outstanding frame request.
//!
//! ### Surfaces
//!
//! Anything implementing [`Canvas`] can be drawn on. [`PixelCanvas`] renders
//! on the CPU (headless export and tests); the window host records circles
//! into a GPU canvas and draws them instanced with wgpu.
//!
//! ## Modules
//!
//! | Concern | Items |
//! |---------|-------|
//! | Sampling | [`PointSampler`], [`SamplerConfig`] |
//! | Simulation | [`ParticleField`], [`ForceParams`], [`compute_acceleration`] |
//! | Progress | [`MorphController`], [`ScrollMapper`] |
//! | Drawing | [`Renderer`], [`Projection`], [`DepthStyle`], [`Canvas`] |
//! | Hosting | [`AnimationSession`], [`FrameLoop`], [`window::run`], [`headless::render_frames`] |

pub mod canvas;
pub mod config;
pub mod dust;
pub mod error;
pub mod field;
pub mod font;
pub mod forces;
pub mod frame;
pub mod gpu;
pub mod headless;
pub mod input;
pub mod morph;
pub mod particle;
pub mod pointer;
pub mod render;
pub mod sampler;
pub mod session;
pub mod time;
pub mod window;

pub use canvas::{Canvas, CanvasSize, PixelCanvas};
pub use config::MorphConfig;
pub use dust::{DustConfig, DustField};
pub use error::{ExportError, GpuError, RunError};
pub use field::{CloudBounds, CloudConfig, ParticleField};
pub use forces::{compute_acceleration, ForceParams};
pub use frame::{FrameId, FrameLoop, FrameScheduler, ManualScheduler};
pub use glam::{Vec2, Vec3, Vec4};
pub use morph::{MorphController, ScrollMapper};
pub use particle::Particle;
pub use pointer::PointerState;
pub use render::{DepthStyle, Projection, RenderStats, Renderer};
pub use sampler::{PointSampler, SamplerConfig};
pub use session::{AnimationSession, FrameStats};
pub use time::Clock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use morphfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, CanvasSize, PixelCanvas};
    pub use crate::config::MorphConfig;
    pub use crate::dust::DustConfig;
    pub use crate::forces::ForceParams;
    pub use crate::frame::{FrameLoop, FrameScheduler, ManualScheduler};
    pub use crate::render::{DepthStyle, Projection};
    pub use crate::session::{AnimationSession, FrameStats};
    pub use crate::time::Clock;
    pub use crate::{Vec2, Vec3, Vec4};
}
