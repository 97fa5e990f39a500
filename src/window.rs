//! Windowed host: a winit application that owns one animation session.
//!
//! Redraws are the frame scheduler. Every honored redraw ticks the session,
//! draws it into a [`GpuCanvas`] and presents; the next redraw is requested
//! through the [`FrameLoop`], which stops requesting once the window closes.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::canvas::CanvasSize;
use crate::config::MorphConfig;
use crate::error::RunError;
use crate::frame::{FrameId, FrameLoop, FrameScheduler};
use crate::gpu::{GpuCanvas, GpuState};
use crate::input::{Input, InputAction};
use crate::session::AnimationSession;
use crate::time::Clock;

/// Frames between window title refreshes.
const TITLE_INTERVAL: u64 = 30;

/// Schedules frames by asking the window for a redraw.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    window: Option<Arc<Window>>,
    next: u64,
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameId {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        let id = FrameId(self.next);
        self.next += 1;
        id
    }

    // winit cannot withdraw a redraw request; the loop ignores the stale one
    fn cancel_frame(&mut self, _id: FrameId) {}
}

struct App {
    config: MorphConfig,
    text: String,
    initial_size: CanvasSize,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    session: Option<AnimationSession>,
    frames: FrameLoop<RedrawScheduler>,
    canvas: GpuCanvas,
    clock: Clock,
    input: Input,
    error: Option<RunError>,
}

impl App {
    fn new(config: MorphConfig, text: String, initial_size: CanvasSize) -> Self {
        Self {
            config,
            text,
            initial_size,
            window: None,
            gpu: None,
            session: None,
            frames: FrameLoop::new(RedrawScheduler::default()),
            canvas: GpuCanvas::new(),
            clock: Clock::wall(),
            input: Input::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        log::error!("{}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.frames.stop();
        if let Some(session) = &mut self.session {
            session.unmount();
        }
        event_loop.exit();
    }

    fn update_scroll_limit(&mut self, size: CanvasSize) {
        let distance = size.height as f32 * self.config.scroll.transition_fraction;
        self.input.set_scroll_limit(Some(distance));
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let attrs = Window::default_attributes()
            .with_title(format!("morphfield - {}", self.text))
            .with_inner_size(LogicalSize::new(self.initial_size.width, self.initial_size.height));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let gpu = pollster::block_on(GpuState::new(window.clone()))?;

        let size = gpu.size();
        log::info!("window ready at {}x{}", size.width, size.height);
        self.session = Some(AnimationSession::mount(self.config, self.text.clone(), size));
        self.update_scroll_limit(size);

        self.frames.scheduler_mut().window = Some(window.clone());
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.frames.start();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(session), Some(gpu)) = (&mut self.session, &mut self.gpu) else {
            return;
        };
        let clock = &mut self.clock;
        let canvas = &mut self.canvas;

        let ran = self.frames.on_frame(|| {
            let time = clock.tick();
            session.frame(time, canvas);
        });
        if !ran {
            return;
        }

        match gpu.render(canvas.instances(), self.config.background) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                self.shutdown(event_loop);
                return;
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }

        if clock.frames() % TITLE_INTERVAL == 0 {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "morphfield - {} - {:.0} fps - {} particles",
                    self.text,
                    clock.fps(),
                    session.field().len()
                ));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            self.redraw(event_loop);
            return;
        }

        let Some(action) = self.input.handle_event(&event) else {
            return;
        };
        if let InputAction::Resize(size) = action {
            if let Some(gpu) = &mut self.gpu {
                gpu.resize(size);
            }
            self.update_scroll_limit(size);
        }

        let keep_running = match &mut self.session {
            Some(session) => action.apply(session),
            None => action != InputAction::Exit,
        };
        if !keep_running {
            self.shutdown(event_loop);
        }
    }
}

/// Open a window and run the animation until it is closed.
pub fn run(config: MorphConfig, text: impl Into<String>, size: CanvasSize) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, text.into(), size);
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
