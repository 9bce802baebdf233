pub mod palette;
pub mod stroke_registry;

pub use palette::{Palette, SwatchIndex};
pub use stroke_registry::{RegistryError, StrokeRegistry, StrokeSlot};

use crate::{Color, DrawMode};

/// The counters and flags a session carries between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Whether the resolver runs this tick.
    pub drawing: bool,
    pub mode: DrawMode,
    /// Color given to the next slot created.
    pub color: Color,
    /// The slot being extended, or about to be created.
    ///
    /// Advanced by [`crate::Session::set_color`] and [`crate::Session::undo`], so the next stroke
    /// never lands in an existing slot.
    pub current_index: usize,
}
impl SessionState {
    #[must_use]
    pub fn new(mode: DrawMode, color: Color) -> Self {
        Self {
            drawing: true,
            mode,
            color,
            current_index: 0,
        }
    }
    /// Should the drawing plane be shown for this state?
    #[must_use]
    pub fn shows_draw_plane(&self) -> bool {
        self.drawing && self.mode == DrawMode::Normal
    }
}
impl Default for SessionState {
    fn default() -> Self {
        Self::new(DrawMode::Normal, Color::WHITE)
    }
}
