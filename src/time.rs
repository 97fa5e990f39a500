//! Animation clock.
//!
//! The force model reads a monotonic time in seconds for the ripple and
//! ambient drift. Windowed runs use wall time; headless runs and tests step
//! a fixed amount per frame so output is reproducible.
//!
//! ```ignore
//! let mut clock = Clock::fixed(1.0 / 60.0);
//! let t = clock.tick();
//! session.frame(t, &mut canvas);
//! ```

use std::time::Instant;

#[derive(Debug, Clone, Copy)]
enum Source {
    Wall { start: Instant, last: Instant },
    Fixed { step: f32 },
}

/// Elapsed time, frame count and a smoothed FPS estimate.
#[derive(Debug, Clone)]
pub struct Clock {
    source: Source,
    elapsed: f32,
    delta: f32,
    frames: u64,
    fps: f32,
    fps_frames: u64,
    fps_window: f32,
    fps_interval: f32,
}

impl Clock {
    /// Clock driven by wall time, starting now.
    pub fn wall() -> Self {
        let now = Instant::now();
        Self::with_source(Source::Wall { start: now, last: now })
    }

    /// Clock that advances `step` seconds per tick. Negative steps count as 0.
    pub fn fixed(step: f32) -> Self {
        Self::with_source(Source::Fixed { step: step.max(0.0) })
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            elapsed: 0.0,
            delta: 0.0,
            frames: 0,
            fps: 0.0,
            fps_frames: 0,
            fps_window: 0.0,
            fps_interval: 0.5,
        }
    }

    /// Advance one frame. Returns elapsed seconds.
    pub fn tick(&mut self) -> f32 {
        match &mut self.source {
            Source::Wall { start, last } => {
                let now = Instant::now();
                self.delta = now.duration_since(*last).as_secs_f32();
                self.elapsed = now.duration_since(*start).as_secs_f32();
                *last = now;
            }
            Source::Fixed { step } => {
                self.delta = *step;
                self.elapsed += *step;
            }
        }
        self.frames += 1;

        self.fps_window += self.delta;
        if self.fps_window >= self.fps_interval && self.fps_window > 0.0 {
            self.fps = (self.frames - self.fps_frames) as f32 / self.fps_window;
            self.fps_frames = self.frames;
            self.fps_window = 0.0;
        }

        self.elapsed
    }

    /// Seconds since the clock started (as of the last tick).
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds covered by the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames per second, refreshed every half second of clock time.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::wall()
    }
}
