//! # Session scripts
//!
//! A TOML description of tracking frames and button presses, replayed frame by frame through a
//! [`Session`]. Commands listed on a frame are applied before that frame ticks.
//!
//! ```toml
//! [[frame]]
//! repeat = 2
//! commands = ["SwitchMode", { UpdateColor = 2 }]
//! wrist = { hand = "Right", at = [0.2, 1.2, 0.3] }
//! [[frame.source]]
//! kind = "Hand"
//! pointers = [{ reach = "Far", hit = { point = [0.0, 1.4, 0.64], object = "DrawPlane" } }]
//! ```

use drawnote_core::{
    host::StrokeHost,
    presentation::Presentation,
    state::SwatchIndex,
    tracking::{
        Handedness, HitResult, InputSource, Joint, Pointer, PointerReach, Pose, SourceKind,
        TrackingFrame,
    },
    Color, Command, Point, Session,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub enum ScriptCommand {
    UpdateColor(usize),
    SetColor(Color),
    Undo,
    Clear,
    SwitchMode,
}
impl From<ScriptCommand> for Command {
    fn from(value: ScriptCommand) -> Self {
        match value {
            ScriptCommand::UpdateColor(index) => Command::UpdateColor(SwatchIndex(index)),
            ScriptCommand::SetColor(color) => Command::SetColor(color),
            ScriptCommand::Undo => Command::Undo,
            ScriptCommand::Clear => Command::Clear,
            ScriptCommand::SwitchMode => Command::SwitchMode,
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ScriptJoint {
    #[serde(default)]
    pub hand: Handedness,
    pub at: [f32; 3],
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ScriptHit {
    pub point: [f32; 3],
    pub object: String,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ScriptPointer {
    #[serde(default)]
    pub reach: PointerReach,
    pub hit: Option<ScriptHit>,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ScriptSource {
    pub kind: SourceKind,
    #[serde(default)]
    pub pointers: Vec<ScriptPointer>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScriptFrame {
    /// Tick this frame this many times. Commands are only applied once.
    pub repeat: Option<usize>,
    pub commands: Vec<ScriptCommand>,
    pub head: Option<[f32; 3]>,
    pub wrist: Option<ScriptJoint>,
    pub index_tip: Option<ScriptJoint>,
    #[serde(rename = "source")]
    pub sources: Vec<ScriptSource>,
}
impl ScriptFrame {
    #[must_use]
    pub fn to_tracking(&self) -> TrackingFrame {
        let joints = [(Joint::Wrist, &self.wrist), (Joint::IndexTip, &self.index_tip)]
            .into_iter()
            .filter_map(|(joint, script)| {
                let script = script.as_ref()?;
                Some((joint, script.hand, Pose::at(Point::from(script.at))))
            })
            .collect();
        let sources = self
            .sources
            .iter()
            .map(|source| InputSource {
                kind: source.kind,
                pointers: source
                    .pointers
                    .iter()
                    .map(|pointer| Pointer {
                        reach: pointer.reach,
                        hit: pointer.hit.as_ref().map(|hit| HitResult {
                            point: Point::from(hit.point),
                            object: hit.object.clone(),
                        }),
                    })
                    .collect(),
            })
            .collect();
        TrackingFrame {
            head: self.head.map(|head| Pose::at(Point::from(head))),
            joints,
            sources,
        }
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Script {
    #[serde(rename = "frame", default)]
    pub frames: Vec<ScriptFrame>,
}
impl Script {
    pub fn from_toml(string: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(string)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub ticks: usize,
    /// Ticks that extended a stroke.
    pub drawn: usize,
    pub commands: usize,
    pub failed_commands: usize,
}

/// Replay every frame of `script` through `session`.
pub fn replay<H, P>(script: &Script, session: &mut Session<H, P>) -> Summary
where
    H: StrokeHost,
    P: Presentation,
{
    let mut summary = Summary::default();
    for (number, frame) in script.frames.iter().enumerate() {
        for &command in &frame.commands {
            summary.commands += 1;
            match session.apply(command.into()) {
                Ok(outcome) => log::debug!("frame {number}: {command:?} -> {outcome:?}"),
                Err(e) => {
                    summary.failed_commands += 1;
                    log::warn!("frame {number}: {command:?} failed: {e}");
                }
            }
        }
        let tracking = frame.to_tracking();
        for _ in 0..frame.repeat.unwrap_or(1) {
            summary.ticks += 1;
            if session.tick(&tracking).is_some() {
                summary.drawn += 1;
            }
        }
    }
    summary
}
