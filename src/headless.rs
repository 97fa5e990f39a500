//! Headless rendering: run a session on a [`PixelCanvas`] and write frames as
//! PNG files.
//!
//! Time advances a fixed step per frame, so with a seeded config the same
//! options always produce the same images.

use std::fs;
use std::path::{Path, PathBuf};

use crate::canvas::{CanvasSize, PixelCanvas};
use crate::config::MorphConfig;
use crate::error::ExportError;
use crate::frame::{FrameLoop, ManualScheduler};
use crate::session::AnimationSession;
use crate::time::Clock;
use crate::Vec2;

/// How a headless run advances and what it writes.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessOptions {
    pub size: CanvasSize,
    /// Frames to simulate.
    pub frames: u32,
    /// Write every n-th frame (the last frame is always written).
    pub every: u32,
    /// Raw morph progress held for the whole run.
    pub progress: f32,
    /// Fixed pointer position, if any.
    pub pointer: Option<Vec2>,
    /// Seconds per frame fed to the force model.
    pub time_step: f32,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            size: CanvasSize::new(800, 400),
            frames: 120,
            every: 30,
            progress: 1.0,
            pointer: None,
            time_step: 1.0 / 60.0,
        }
    }
}

impl HeadlessOptions {
    pub fn with_size(mut self, size: CanvasSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_every(mut self, every: u32) -> Self {
        self.every = every.max(1);
        self
    }

    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_pointer(mut self, pointer: Option<Vec2>) -> Self {
        self.pointer = pointer;
        self
    }

    fn should_write(&self, frame: u32) -> bool {
        let every = self.every.max(1);
        (frame + 1) % every == 0 || frame + 1 == self.frames
    }
}

/// File name for frame `index`, e.g. `frame_0042.png`.
pub fn frame_file_name(index: u32) -> String {
    format!("frame_{:04}.png", index)
}

/// Render `text` and write the selected frames into `out_dir`, creating it if
/// needed. Returns the written paths in order.
pub fn render_frames(
    config: MorphConfig,
    text: &str,
    options: &HeadlessOptions,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(out_dir)?;

    let mut session = AnimationSession::mount(config, text, options.size);
    session.set_raw_progress(options.progress);
    session.set_pointer(options.pointer);
    log::info!(
        "rendering {} frames of {:?} ({} particles) into {}",
        options.frames,
        text,
        session.field().len(),
        out_dir.display()
    );

    let mut canvas = PixelCanvas::new(options.size, config.background);
    let mut clock = Clock::fixed(options.time_step);
    let mut frames = FrameLoop::new(ManualScheduler::new());
    let mut written = Vec::new();

    frames.start();
    for index in 0..options.frames {
        frames.on_frame(|| {
            session.frame(clock.tick(), &mut canvas);
        });

        if options.should_write(index) {
            let path = out_dir.join(frame_file_name(index));
            canvas.save_png(&path)?;
            log::debug!("wrote {}", path.display());
            written.push(path);
        }
    }
    frames.stop();
    session.unmount();

    log::info!("wrote {} frames", written.len());
    Ok(written)
}
