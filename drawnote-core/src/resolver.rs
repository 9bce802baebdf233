//! # Draw position resolver
//!
//! Decides, from one frame of tracking data, where (if anywhere) the pen is this frame. Each
//! [`DrawMode`] gets its own resolver function and hit filter.

use crate::{
    tracking::{Handedness, HitResult, Joint, SourceKind, Tracking},
    Point,
};

/// Which surfaces the user draws onto.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Default,
    strum::EnumIter,
    strum::EnumCount,
    strum::Display,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum DrawMode {
    /// Draw only on the draw plane, by hand ray.
    #[default]
    Normal,
    /// Draw only on scene meshes, by hand ray.
    Mesh,
    /// Draw from the index fingertip.
    Finger,
}
impl DrawMode {
    /// The next mode in the cycle, wrapping back to the first.
    #[must_use]
    pub fn next(self) -> Self {
        use strum::{EnumCount, IntoEnumIterator};
        let position = Self::iter().position(|mode| mode == self).unwrap_or_default();
        Self::iter()
            .nth((position + 1) % Self::COUNT)
            .unwrap_or_default()
    }
}

/// The kind of surface a draw position was found on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Surface {
    DrawPlane,
    /// Any other scene object, by name.
    Mesh { name: String },
    Fingertip,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawPoint {
    pub position: Point,
    pub surface: Surface,
}

/// Find this frame's draw position under `mode`.
///
/// Nothing is drawn unless a wrist is tracked, whatever the mode. `draw_plane` names the scene
/// object acting as the drawing plane.
#[must_use]
pub fn resolve(mode: DrawMode, tracking: &impl Tracking, draw_plane: &str) -> Option<DrawPoint> {
    tracking.joint_pose(Joint::Wrist, Handedness::Any)?;

    match mode {
        DrawMode::Normal => resolve_normal(tracking, draw_plane),
        DrawMode::Mesh => resolve_mesh(tracking, draw_plane),
        DrawMode::Finger => resolve_finger(tracking),
    }
}

fn resolve_normal(tracking: &impl Tracking, draw_plane: &str) -> Option<DrawPoint> {
    let hit = first_far_hand_hit(tracking, |hit| hit.object == draw_plane)?;
    Some(DrawPoint {
        position: hit.point,
        surface: Surface::DrawPlane,
    })
}

fn resolve_mesh(tracking: &impl Tracking, draw_plane: &str) -> Option<DrawPoint> {
    let hit = first_far_hand_hit(tracking, |hit| hit.object != draw_plane)?;
    Some(DrawPoint {
        position: hit.point,
        surface: Surface::Mesh {
            name: hit.object.clone(),
        },
    })
}

fn resolve_finger(tracking: &impl Tracking) -> Option<DrawPoint> {
    let tip = tracking.joint_pose(Joint::IndexTip, Handedness::Any)?;
    Some(DrawPoint {
        position: tip.position,
        surface: Surface::Fingertip,
    })
}

/// The first hit, in enumeration order, of a far pointer on a hand source that passes `accept`.
///
/// No scoring: a closer hit from a later pointer never wins.
fn first_far_hand_hit<'t>(
    tracking: &'t impl Tracking,
    accept: impl Fn(&HitResult) -> bool,
) -> Option<&'t HitResult> {
    tracking
        .input_sources()
        .iter()
        .filter(|source| source.kind == SourceKind::Hand)
        .flat_map(|source| source.pointers.iter())
        .filter(|pointer| !pointer.is_near())
        .filter_map(|pointer| pointer.hit.as_ref())
        .find(|hit| accept(hit))
}
