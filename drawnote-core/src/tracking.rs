//! # Tracking
//!
//! What the spatial tracking subsystem reports each frame: hand joints, head pose, and the
//! pointers attached to every detected input source along with whatever their rays hit.

use crate::Point;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Joint {
    Wrist,
    IndexTip,
}

#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Handedness {
    Left,
    Right,
    /// Whichever hand the tracking system reports first.
    #[default]
    Any,
}
impl Handedness {
    /// Does a joint tracked on `hand` satisfy a query for `self`?
    #[must_use]
    pub fn matches(self, hand: Handedness) -> bool {
        self == Handedness::Any || self == hand
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Pose {
    pub position: Point,
    pub rotation: ultraviolet::Rotor3,
}
impl Pose {
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self {
            position,
            rotation: ultraviolet::Rotor3::identity(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum SourceKind {
    Hand,
    Controller,
    Gaze,
    Voice,
    Other,
}

/// Short-range (touch, poke, grab) or long-range ray pointer.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Default, serde::Serialize, serde::Deserialize,
)]
pub enum PointerReach {
    Near,
    #[default]
    Far,
}

/// Where a pointer's ray ended up this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HitResult {
    pub point: Point,
    /// Name of the scene object that was hit.
    pub object: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pointer {
    pub reach: PointerReach,
    pub hit: Option<HitResult>,
}
impl Pointer {
    #[must_use]
    pub fn far(hit: Option<HitResult>) -> Self {
        Self {
            reach: PointerReach::Far,
            hit,
        }
    }
    #[must_use]
    pub fn near(hit: Option<HitResult>) -> Self {
        Self {
            reach: PointerReach::Near,
            hit,
        }
    }
    #[must_use]
    pub fn is_near(&self) -> bool {
        self.reach == PointerReach::Near
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputSource {
    pub kind: SourceKind,
    /// In the order the tracking system enumerates them.
    pub pointers: smallvec::SmallVec<[Pointer; 4]>,
}

/// Read access to one frame of tracking data.
pub trait Tracking {
    fn joint_pose(&self, joint: Joint, handedness: Handedness) -> Option<Pose>;
    fn input_sources(&self) -> &[InputSource];
    /// Pose of the user's head (the main camera), if known.
    fn head_pose(&self) -> Option<Pose> {
        None
    }
}

/// An owned snapshot of one frame of tracking data.
#[derive(Clone, Debug, Default)]
pub struct TrackingFrame {
    pub head: Option<Pose>,
    pub joints: Vec<(Joint, Handedness, Pose)>,
    pub sources: Vec<InputSource>,
}
impl TrackingFrame {
    #[must_use]
    pub fn with_joint(mut self, joint: Joint, hand: Handedness, position: Point) -> Self {
        self.joints.push((joint, hand, Pose::at(position)));
        self
    }
    #[must_use]
    pub fn with_source(
        mut self,
        kind: SourceKind,
        pointers: impl IntoIterator<Item = Pointer>,
    ) -> Self {
        self.sources.push(InputSource {
            kind,
            pointers: pointers.into_iter().collect(),
        });
        self
    }
}
impl Tracking for TrackingFrame {
    fn joint_pose(&self, joint: Joint, handedness: Handedness) -> Option<Pose> {
        self.joints
            .iter()
            .find(|(j, hand, _)| *j == joint && handedness.matches(*hand))
            .map(|(_, _, pose)| *pose)
    }
    fn input_sources(&self) -> &[InputSource] {
        &self.sources
    }
    fn head_pose(&self) -> Option<Pose> {
        self.head
    }
}
