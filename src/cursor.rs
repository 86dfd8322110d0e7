//! Cursor position within the viewport

use crate::input::Key;
use crate::size::ViewportSize;

/// Logical cursor position, 0-based from the viewport's top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Column position
    pub x: u16,
    /// Row position
    pub y: u16,
}

impl Cursor {
    /// Create a new cursor at position (0, 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an arrow-key movement, clamped to the viewport bounds.
    /// Non-movement keys are ignored.
    pub fn move_key(&mut self, key: Key, size: ViewportSize) {
        match key {
            Key::ArrowUp => self.y = self.y.saturating_sub(1),
            Key::ArrowDown => self.y = (self.y + 1).min(size.rows.saturating_sub(1)),
            Key::ArrowLeft => self.x = self.x.saturating_sub(1),
            Key::ArrowRight => self.x = (self.x + 1).min(size.cols.saturating_sub(1)),
            _ => {}
        }
    }
}
