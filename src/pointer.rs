//! Last known pointer position in canvas coordinates.

use crate::Vec2;

/// Pointer state shared by the force model and the dust layer.
///
/// `None` until the first pointer event, and again after the pointer leaves
/// the canvas. With no pointer the repulsion term is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    position: Option<Vec2>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a canvas-local position. Non-finite positions clear the pointer.
    pub fn set(&mut self, position: Option<Vec2>) {
        self.position = position.filter(|p| p.is_finite());
    }

    /// Set from client (window) coordinates and the canvas origin within
    /// the client area.
    pub fn set_client(&mut self, client: Vec2, canvas_origin: Vec2) {
        self.set(Some(client - canvas_origin));
    }

    pub fn clear(&mut self) {
        self.position = None;
    }

    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }
}
