//! The animation session: everything one mounted text morph owns.
//!
//! Hosts wire platform events to the cheap setters (`set_scroll_offset`,
//! `set_pointer`, `resize`, `set_text`) and call [`AnimationSession::frame`]
//! once per animation frame. Setters never rebuild particles themselves;
//! resize and text changes are recorded and applied at the start of the next
//! frame, latest value wins, so a frame always sees one complete particle set.

use crate::canvas::{Canvas, CanvasSize};
use crate::config::MorphConfig;
use crate::dust::DustField;
use crate::field::{CloudBounds, ParticleField};
use crate::morph::MorphController;
use crate::pointer::PointerState;
use crate::render::{RenderStats, Renderer};
use crate::sampler::PointSampler;
use crate::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// What one frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Particles in the field this frame.
    pub particles: usize,
    /// Smoothed morph progress used for the tick.
    pub progress: f32,
    pub render: RenderStats,
}

pub struct AnimationSession {
    config: MorphConfig,
    sampler: PointSampler,
    renderer: Renderer,
    text: String,
    size: CanvasSize,
    field: ParticleField,
    dust: Option<DustField>,
    morph: MorphController,
    pointer: PointerState,
    rng: SmallRng,
    pending_size: Option<CanvasSize>,
    pending_text: Option<String>,
    mounted: bool,
    frames: u64,
}

impl AnimationSession {
    /// Mount a session and build its first particle set synchronously.
    pub fn mount(config: MorphConfig, text: impl Into<String>, size: CanvasSize) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut session = Self {
            sampler: PointSampler::new(config.sampler),
            renderer: Renderer::new(config.projection, config.style),
            morph: MorphController::new(config.smoothing_rate),
            config,
            text: text.into(),
            size,
            field: ParticleField::default(),
            dust: None,
            pointer: PointerState::new(),
            rng,
            pending_size: None,
            pending_text: None,
            mounted: true,
            frames: 0,
        };
        session.rebuild();
        session
    }

    // ========== Input setters ==========

    /// Set raw morph progress directly. Clamped to `[0, 1]`.
    pub fn set_raw_progress(&mut self, progress: f32) {
        self.morph.set_raw_progress(progress);
    }

    /// Set raw morph progress from a scroll offset in pixels.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        let height = self.pending_size.unwrap_or(self.size).height;
        let progress = self.config.scroll.progress(offset, height);
        self.morph.set_raw_progress(progress);
    }

    /// Pointer in canvas coordinates, or `None` when there is none.
    pub fn set_pointer(&mut self, position: Option<Vec2>) {
        self.pointer.set(position);
    }

    /// Pointer in client coordinates, translated by the canvas origin.
    pub fn set_pointer_client(&mut self, client: Vec2, canvas_origin: Vec2) {
        self.pointer.set_client(client, canvas_origin);
    }

    /// Record a new canvas size. Applied on the next frame.
    pub fn resize(&mut self, size: CanvasSize) {
        if self.mounted {
            self.pending_size = Some(size);
        }
    }

    /// Record new target text. Applied on the next frame.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.mounted {
            self.pending_text = Some(text.into());
        }
    }

    /// Apply pending resize/text changes now instead of on the next frame.
    pub fn rebuild_now(&mut self) {
        if self.mounted && self.has_pending_rebuild() {
            self.rebuild();
        }
    }

    #[inline]
    pub fn has_pending_rebuild(&self) -> bool {
        self.pending_size.is_some() || self.pending_text.is_some()
    }

    // ========== Frame ==========

    /// Advance the simulation one frame. Returns the smoothed progress used.
    pub fn tick(&mut self, time: f32) -> f32 {
        if !self.mounted {
            return self.morph.smoothed_progress();
        }
        if self.has_pending_rebuild() {
            self.rebuild();
        }

        let progress = self.morph.tick();
        let pointer = self.pointer.position();
        self.field.tick(progress, pointer, time, &self.config.forces);
        if let Some(dust) = &mut self.dust {
            dust.tick(pointer, &mut self.rng);
        }
        self.frames += 1;
        progress
    }

    /// Clear `canvas` and draw the current state.
    pub fn draw(&self, canvas: &mut impl Canvas) -> RenderStats {
        if !self.mounted {
            return RenderStats::default();
        }
        canvas.clear();
        if let Some(dust) = &self.dust {
            dust.draw(canvas);
        }
        self.renderer.draw(self.field.particles(), self.size, canvas)
    }

    /// Tick then draw. After [`unmount`](Self::unmount) this does nothing.
    pub fn frame(&mut self, time: f32, canvas: &mut impl Canvas) -> FrameStats {
        if !self.mounted {
            return FrameStats::default();
        }
        let progress = self.tick(time);
        let render = self.draw(canvas);
        FrameStats {
            particles: self.field.len(),
            progress,
            render,
        }
    }

    /// Tear down. Drops the particle set and resets morph and pointer state.
    /// Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.field = ParticleField::default();
        self.dust = None;
        self.morph.reset();
        self.pointer.clear();
        self.pending_size = None;
        self.pending_text = None;
        log::debug!("session unmounted after {} frames", self.frames);
    }

    // ========== Accessors ==========

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn dust(&self) -> Option<&DustField> {
        self.dust.as_ref()
    }

    pub fn morph(&self) -> &MorphController {
        &self.morph
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer.position()
    }

    /// Size of the current particle set (not a pending resize).
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn rebuild(&mut self) {
        let resized = match self.pending_size.take() {
            Some(size) => {
                self.size = size;
                true
            }
            None => false,
        };
        if let Some(text) = self.pending_text.take() {
            self.text = text;
        }

        let points = self.sampler.sample(&self.text, self.size);
        let bounds = CloudBounds::for_canvas(self.size, &self.config.cloud);
        self.field = ParticleField::create(&points, &bounds, &mut self.rng);
        // Dust only depends on the canvas, so text changes keep it
        if resized || self.dust.is_none() {
            self.dust = self
                .config
                .dust
                .map(|dust| DustField::new(self.size, dust, &mut self.rng));
        }

        log::debug!(
            "rebuilt field: {} particles for {:?} at {}x{}",
            self.field.len(),
            self.text,
            self.size.width,
            self.size.height
        );
    }
}
