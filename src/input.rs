//! Translate winit window events into session input.
//!
//! The window keeps a virtual scroll offset (there is no page to scroll), so
//! wheel and arrow keys drive morph progress the way a scrolling page would.
//! Cursor and touch positions become the pointer; leaving the window or
//! lifting the finger clears it.

use crate::canvas::CanvasSize;
use crate::session::AnimationSession;
use crate::Vec2;
use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels scrolled per wheel line or arrow key press.
pub const LINE_HEIGHT: f32 = 40.0;

/// Something the session (or the window) should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// New pointer position in canvas pixels, or `None` when it left.
    Pointer(Option<Vec2>),
    /// New absolute scroll offset in pixels.
    Scroll(f32),
    Resize(CanvasSize),
    Exit,
}

/// Pixels to add to the scroll offset for one wheel event.
///
/// Wheel-down (negative `y`) scrolls further into the page and so increases
/// the offset.
pub fn scroll_pixels(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    }
}

/// Scroll and touch state carried between events.
#[derive(Debug, Default)]
pub struct Input {
    scroll_offset: f32,
    scroll_limit: Option<f32>,
    touch: Option<u64>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Largest reachable offset; `None` leaves it open-ended.
    pub fn set_scroll_limit(&mut self, limit: Option<f32>) {
        self.scroll_limit = limit.filter(|l| l.is_finite()).map(|l| l.max(0.0));
        self.scroll_offset = self.clamp_offset(self.scroll_offset);
    }

    /// Scroll by `pixels` and return the new offset.
    pub fn scroll_by(&mut self, pixels: f32) -> f32 {
        if pixels.is_finite() {
            self.scroll_offset = self.clamp_offset(self.scroll_offset + pixels);
        }
        self.scroll_offset
    }

    /// Jump to an absolute offset and return the clamped result.
    pub fn scroll_to(&mut self, offset: f32) -> f32 {
        if offset.is_finite() {
            self.scroll_offset = self.clamp_offset(offset);
        }
        self.scroll_offset
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        let offset = offset.max(0.0);
        match self.scroll_limit {
            Some(limit) => offset.min(limit),
            None => offset,
        }
    }

    /// Map a key press to an action.
    pub fn key_pressed(&mut self, key: KeyCode) -> Option<InputAction> {
        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::ArrowDown => Some(InputAction::Scroll(self.scroll_by(LINE_HEIGHT))),
            KeyCode::ArrowUp => Some(InputAction::Scroll(self.scroll_by(-LINE_HEIGHT))),
            KeyCode::Home => Some(InputAction::Scroll(self.scroll_to(0.0))),
            KeyCode::End => self
                .scroll_limit
                .map(|limit| InputAction::Scroll(self.scroll_to(limit))),
            _ => None,
        }
    }

    /// Map a touch event. Only the first active finger acts as the pointer.
    pub fn touch(&mut self, id: u64, phase: TouchPhase, location: Vec2) -> Option<InputAction> {
        match phase {
            TouchPhase::Started if self.touch.is_none() => {
                self.touch = Some(id);
                Some(InputAction::Pointer(Some(location)))
            }
            TouchPhase::Moved if self.touch == Some(id) => Some(InputAction::Pointer(Some(location))),
            TouchPhase::Ended | TouchPhase::Cancelled if self.touch == Some(id) => {
                self.touch = None;
                Some(InputAction::Pointer(None))
            }
            _ => None,
        }
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<InputAction> {
        match event {
            WindowEvent::CloseRequested => Some(InputAction::Exit),

            WindowEvent::Resized(size) => Some(InputAction::Resize(CanvasSize::new(size.width, size.height))),

            WindowEvent::CursorMoved { position, .. } => Some(InputAction::Pointer(Some(Vec2::new(
                position.x as f32,
                position.y as f32,
            )))),

            WindowEvent::CursorLeft { .. } => Some(InputAction::Pointer(None)),

            WindowEvent::MouseWheel { delta, .. } => Some(InputAction::Scroll(self.scroll_by(scroll_pixels(*delta)))),

            WindowEvent::Touch(touch) => self.touch(
                touch.id,
                touch.phase,
                Vec2::new(touch.location.x as f32, touch.location.y as f32),
            ),

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => match event.physical_key {
                PhysicalKey::Code(code) => self.key_pressed(code),
                PhysicalKey::Unidentified(_) => None,
            },

            _ => None,
        }
    }
}

impl InputAction {
    /// Forward to the session. Returns `false` for [`InputAction::Exit`].
    pub fn apply(self, session: &mut AnimationSession) -> bool {
        match self {
            InputAction::Pointer(position) => session.set_pointer(position),
            InputAction::Scroll(offset) => session.set_scroll_offset(offset),
            InputAction::Resize(size) => session.resize(size),
            InputAction::Exit => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MorphConfig;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_wheel_down_scrolls_forward() {
        assert_eq!(scroll_pixels(MouseScrollDelta::LineDelta(0.0, -1.0)), 40.0);
        assert_eq!(scroll_pixels(MouseScrollDelta::LineDelta(0.0, 2.0)), -80.0);
        assert_eq!(
            scroll_pixels(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.5))),
            12.5
        );
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut input = Input::new();
        assert_eq!(input.scroll_by(-100.0), 0.0);
        input.set_scroll_limit(Some(120.0));
        assert_eq!(input.scroll_by(100.0), 100.0);
        assert_eq!(input.scroll_by(100.0), 120.0);
        input.set_scroll_limit(Some(50.0));
        assert_eq!(input.scroll_offset(), 50.0);
        assert_eq!(input.scroll_by(f32::NAN), 50.0);
    }

    #[test]
    fn test_keys() {
        let mut input = Input::new();
        assert_eq!(input.key_pressed(KeyCode::Escape), Some(InputAction::Exit));
        assert_eq!(input.key_pressed(KeyCode::ArrowDown), Some(InputAction::Scroll(40.0)));
        assert_eq!(input.key_pressed(KeyCode::End), None);
        input.set_scroll_limit(Some(300.0));
        assert_eq!(input.key_pressed(KeyCode::End), Some(InputAction::Scroll(300.0)));
        assert_eq!(input.key_pressed(KeyCode::Home), Some(InputAction::Scroll(0.0)));
        assert_eq!(input.key_pressed(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_first_finger_drives_pointer() {
        let mut input = Input::new();
        let at = Vec2::new(10.0, 20.0);
        assert_eq!(input.touch(1, TouchPhase::Started, at), Some(InputAction::Pointer(Some(at))));
        assert_eq!(input.touch(2, TouchPhase::Started, Vec2::ZERO), None);
        assert_eq!(input.touch(2, TouchPhase::Moved, Vec2::ZERO), None);
        assert_eq!(input.touch(1, TouchPhase::Ended, at), Some(InputAction::Pointer(None)));
        assert_eq!(input.touch(2, TouchPhase::Started, at), Some(InputAction::Pointer(Some(at))));
    }

    #[test]
    fn test_apply_forwards_to_session() {
        let config = MorphConfig::default().with_seed(3).with_font_size(40.0);
        let mut session = AnimationSession::mount(config, "A", CanvasSize::new(200, 100));

        assert!(InputAction::Pointer(Some(Vec2::new(5.0, 6.0))).apply(&mut session));
        assert_eq!(session.pointer(), Some(Vec2::new(5.0, 6.0)));

        assert!(InputAction::Scroll(60.0).apply(&mut session));
        assert!((session.morph().raw_progress() - 1.0).abs() < 1e-6);

        assert!(InputAction::Resize(CanvasSize::new(300, 100)).apply(&mut session));
        assert!(session.has_pending_rebuild());

        assert!(!InputAction::Exit.apply(&mut session));
    }
}
