//! # Presentation
//!
//! The HUD and drawing plane mirror session state. They are told about changes and never
//! change anything themselves.

use crate::{state::palette::PALETTE_SIZE, tracking::Pose, Color};

pub trait Presentation {
    fn set_color_palette(&mut self, colors: &[Color; PALETTE_SIZE]);
    fn set_color_indicator(&mut self, color: Color);
    /// Show or hide the HUD. `immediate` skips any transition animation.
    fn set_visibility(&mut self, visible: bool, immediate: bool);
    fn set_mode_text(&mut self, text: &str);
    fn set_draw_plane_enabled(&mut self, enabled: bool);
    /// Keep head-locked elements (HUD, drawing plane) in front of the user.
    fn follow_head(&mut self, _head: Pose) {}
}
