//! # DrawNote core
//!
//! Stroke session state machine and draw position resolver for sketching in mixed reality.
//! Everything the engine owns (tracking, the scene graph, the HUD) is reached through the
//! traits in [`tracking`], [`host`] and [`presentation`], so the logic here runs the same
//! inside a headset app or a headless replay.

pub mod color;
pub mod config;
pub mod host;
pub mod presentation;
pub mod resolver;
pub mod session;
pub mod state;
pub mod tracking;

pub use color::Color;
pub use resolver::{DrawMode, DrawPoint, Surface};
pub use session::{commands::Command, Session};

/// Positions are world-space, in meters.
pub type Point = ultraviolet::Vec3;
