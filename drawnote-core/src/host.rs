//! # Scene host
//!
//! The engine owns every renderable stroke. The core only asks it to make, move, hide and
//! destroy them through [`StrokeHost`], holding on to whatever handle the host hands back.

use crate::{Color, Point};

pub trait StrokeHost {
    /// Opaque reference to a renderable stroke, owned by the host.
    type Handle;
    /// Instantiate a new stroke visual called `name` under the drawings container, with a fresh
    /// material of `color` applied to its trail.
    fn spawn_stroke(&mut self, name: &str, color: Color) -> Self::Handle;
    /// Move the stroke's anchor. The trail itself is left to the renderer.
    fn move_stroke(&mut self, handle: &Self::Handle, to: Point);
    fn set_stroke_active(&mut self, handle: &Self::Handle, active: bool);
    /// Destroy the visual. The handle is never used again.
    fn release_stroke(&mut self, handle: Self::Handle);
}
