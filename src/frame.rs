//! Cancellable animation-frame loop.
//!
//! A host supplies a [`FrameScheduler`] (a window's redraw request, a test
//! clock, ...). [`FrameLoop`] keeps at most one request outstanding, runs the
//! frame body only when that request is honored, and cancels it on
//! [`FrameLoop::stop`], so nothing is drawn after teardown.

/// Opaque handle for one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Something that can call back on the next animation frame.
pub trait FrameScheduler {
    /// Ask for one more frame callback.
    fn request_frame(&mut self) -> FrameId;

    /// Withdraw a request made by [`request_frame`](Self::request_frame).
    fn cancel_frame(&mut self, id: FrameId);
}

/// Drives a frame body from a scheduler.
#[derive(Debug)]
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameId>,
    running: bool,
    frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            running: false,
            frames: 0,
        }
    }

    /// Begin requesting frames. Calling it again while running does nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    /// Run `body` for the pending frame and request the next one.
    ///
    /// Returns `false` without calling `body` when the loop is stopped or no
    /// frame was requested.
    pub fn on_frame(&mut self, body: impl FnOnce()) -> bool {
        if !self.running || self.pending.take().is_none() {
            return false;
        }
        body();
        self.frames += 1;
        if self.running {
            self.pending = Some(self.scheduler.request_frame());
        }
        true
    }

    /// Stop and cancel any outstanding request. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// Frames run so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Scheduler that only records requests; frames are fired by the caller.
///
/// Used by the headless renderer and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    requested: Vec<FrameId>,
    cancelled: Vec<FrameId>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested(&self) -> &[FrameId] {
        &self.requested
    }

    pub fn cancelled(&self) -> &[FrameId] {
        &self.cancelled
    }

    /// Number of requests made so far, honored or not.
    pub fn request_count(&self) -> usize {
        self.requested.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next);
        self.next += 1;
        self.requested.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.cancelled.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requests_one_frame() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.start();
        frames.start();
        assert_eq!(frames.scheduler().request_count(), 1);
        assert!(frames.is_running());
    }

    #[test]
    fn test_each_frame_requests_the_next() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.start();
        let mut ran = 0;
        for _ in 0..3 {
            assert!(frames.on_frame(|| ran += 1));
        }
        assert_eq!(ran, 3);
        assert_eq!(frames.frames(), 3);
        assert_eq!(frames.scheduler().request_count(), 4);
    }

    #[test]
    fn test_stop_cancels_pending_request() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.start();
        let pending = frames.pending().unwrap();
        frames.stop();
        assert_eq!(frames.scheduler().cancelled(), &[pending]);
        assert_eq!(frames.pending(), None);

        let mut ran = false;
        assert!(!frames.on_frame(|| ran = true));
        assert!(!ran);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.start();
        frames.stop();
        frames.stop();
        assert_eq!(frames.scheduler().cancelled().len(), 1);
        assert_eq!(frames.scheduler().request_count(), 1);
    }

    #[test]
    fn test_frame_without_start_does_nothing() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        assert!(!frames.on_frame(|| panic!("must not run")));
        assert_eq!(frames.scheduler().request_count(), 0);
    }
}
