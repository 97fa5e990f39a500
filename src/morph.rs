//! Morph progress: a clamped raw signal and its smoothed follower.

/// Raw and smoothed morph progress.
///
/// The raw value follows the input signal directly. The smoothed value
/// chases it with a first-order exponential filter once per frame, so the
/// visual transition always lags the input and never jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphController {
    raw: f32,
    smoothed: f32,
    rate: f32,
}

impl MorphController {
    /// `rate` is the fraction of the remaining gap closed per tick, clamped
    /// to `[0, 1]` so the follower cannot overshoot.
    pub fn new(rate: f32) -> Self {
        Self {
            raw: 0.0,
            smoothed: 0.0,
            rate: if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) },
        }
    }

    /// Set the raw target. Values outside `[0, 1]` are clamped; NaN is ignored.
    pub fn set_raw_progress(&mut self, p: f32) {
        if !p.is_nan() {
            self.raw = p.clamp(0.0, 1.0);
        }
    }

    /// Advance the smoothed value one frame and return it.
    pub fn tick(&mut self) -> f32 {
        self.smoothed += (self.raw - self.smoothed) * self.rate;
        self.smoothed
    }

    #[inline]
    pub fn raw_progress(&self) -> f32 {
        self.raw
    }

    #[inline]
    pub fn smoothed_progress(&self) -> f32 {
        self.smoothed
    }

    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Back to fully dispersed.
    pub fn reset(&mut self) {
        self.raw = 0.0;
        self.smoothed = 0.0;
    }
}

impl Default for MorphController {
    fn default() -> Self {
        Self::new(0.03)
    }
}

/// Converts a scroll offset into raw progress.
///
/// The transition completes after scrolling `transition_fraction` of the
/// viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMapper {
    pub transition_fraction: f32,
}

impl Default for ScrollMapper {
    fn default() -> Self {
        Self {
            transition_fraction: 0.6,
        }
    }
}

impl ScrollMapper {
    /// Unclamped progress for `offset` pixels of scroll.
    pub fn progress(&self, offset: f32, viewport_height: u32) -> f32 {
        let distance = viewport_height as f32 * self.transition_fraction;
        if distance > 0.0 {
            offset / distance
        } else if offset > 0.0 {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_progress_is_clamped() {
        let mut m = MorphController::default();
        m.set_raw_progress(-5.0);
        assert_eq!(m.raw_progress(), 0.0);
        m.set_raw_progress(5.0);
        assert_eq!(m.raw_progress(), 1.0);
        m.set_raw_progress(f32::NAN);
        assert_eq!(m.raw_progress(), 1.0);
    }

    #[test]
    fn test_smoothed_lags_raw() {
        let mut m = MorphController::default();
        m.set_raw_progress(1.0);
        let first = m.tick();
        assert!((first - 0.03).abs() < 1e-6);
        assert!(first < m.raw_progress());
    }

    #[test]
    fn test_rate_is_clamped() {
        assert_eq!(MorphController::new(3.0).rate(), 1.0);
        assert_eq!(MorphController::new(-1.0).rate(), 0.0);
        assert_eq!(MorphController::new(f32::NAN).rate(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut m = MorphController::default();
        m.set_raw_progress(1.0);
        for _ in 0..10 {
            m.tick();
        }
        m.reset();
        assert_eq!(m.raw_progress(), 0.0);
        assert_eq!(m.smoothed_progress(), 0.0);
    }

    #[test]
    fn test_scroll_mapper() {
        let mapper = ScrollMapper::default();
        assert!((mapper.progress(300.0, 1000) - 0.5).abs() < 1e-6);
        assert!((mapper.progress(1200.0, 1000) - 2.0).abs() < 1e-6);
        assert_eq!(mapper.progress(0.0, 0), 0.0);
        assert_eq!(mapper.progress(10.0, 0), 1.0);
    }
}
