//! # Session
//!
//! Ties the resolver and the stroke registry together, once per frame, and carries out the user's
//! operations. The session owns its scene host and presentation for its whole lifetime.
//!
//! The current index is both "slot being extended" and "next slot to create". Only the
//! operations here move it:
//!
//! | operation      | drawing   | current index                          |
//! |----------------|-----------|----------------------------------------|
//! | `tick`         | unchanged | unchanged, slot created on demand      |
//! | `set_color`    | `true`    | `+1` if the current slot exists        |
//! | `undo`         | `false`   | `+1` if drawing was on                 |
//! | `clear`        | `false`   | `0`                                    |
//! | `switch_mode`  | unchanged | unchanged                              |

pub mod commands;

use crate::{
    config::SessionConfig,
    host::StrokeHost,
    presentation::Presentation,
    resolver,
    state::{Palette, RegistryError, SessionState, StrokeRegistry, SwatchIndex},
    tracking::Tracking,
    Color, DrawMode, DrawPoint,
};
use commands::{Command, CommandError, Outcome};

pub struct Session<H: StrokeHost, P: Presentation> {
    state: SessionState,
    strokes: StrokeRegistry<H::Handle>,
    palette: Palette,
    draw_plane: String,
    host: H,
    presentation: P,
    /// Last values pushed to the presentation, to only forward changes.
    shown_plane: Option<bool>,
    shown_hud: Option<bool>,
    /// Index that last failed to get a slot, so the warning isn't repeated every frame.
    blocked_index: Option<usize>,
}
impl<H: StrokeHost, P: Presentation> Session<H, P> {
    #[must_use]
    pub fn new(config: &SessionConfig, host: H, presentation: P) -> Self {
        Self {
            state: SessionState::new(config.initial_mode, config.initial_color),
            strokes: StrokeRegistry::with_limit(config.stroke_limit()),
            palette: config.swatches.clone(),
            draw_plane: config.draw_plane.clone(),
            host,
            presentation,
            shown_plane: None,
            shown_hud: None,
            blocked_index: None,
        }
    }
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }
    #[must_use]
    pub fn strokes(&self) -> &StrokeRegistry<H::Handle> {
        &self.strokes
    }
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }
    #[must_use]
    pub fn presentation(&self) -> &P {
        &self.presentation
    }
    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    /// Push the initial HUD state. Call once, before the first tick.
    pub fn start(&mut self) {
        self.presentation.set_color_palette(self.palette.swatches());
        self.presentation.set_color_indicator(self.state.color);
        self.presentation.set_visibility(self.state.drawing, true);
        self.shown_hud = Some(self.state.drawing);
        self.presentation
            .set_mode_text(&self.state.mode.to_string());
    }

    /// Advance one frame. Returns where the current stroke was extended to, if anywhere.
    pub fn tick(&mut self, tracking: &impl Tracking) -> Option<DrawPoint> {
        if let Some(head) = tracking.head_pose() {
            self.presentation.follow_head(head);
        }
        self.sync_presentation();

        if !self.state.drawing {
            return None;
        }
        let point = resolver::resolve(self.state.mode, tracking, &self.draw_plane)?;
        log::trace!("draw point {:?} on {:?}", point.position, point.surface);

        let index = self.state.current_index;
        let slot = self
            .strokes
            .ensure_slot(index, self.state.color, &mut self.host)
            .map(|_| ());
        match slot {
            Ok(()) => {
                self.blocked_index = None;
                self.strokes.extend(index, point.position, &mut self.host);
                Some(point)
            }
            Err(RegistryError::CapacityExhausted { limit }) => {
                if self.blocked_index != Some(index) {
                    log::warn!("stroke limit of {limit} reached, clear to keep drawing");
                    self.blocked_index = Some(index);
                }
                None
            }
        }
    }

    /// Select a swatch from the palette as the drawing color.
    pub fn update_color(&mut self, swatch: SwatchIndex) -> Result<Color, CommandError> {
        let color = self
            .palette
            .get(swatch)
            .ok_or(CommandError::UnknownSwatch(swatch))?;
        self.set_color(color);
        Ok(color)
    }
    /// Set the drawing color and resume drawing. If the current slot was already drawn in,
    /// the next stroke starts in a new slot so it gets the new color.
    pub fn set_color(&mut self, color: Color) {
        self.state.color = color;
        if self.state.current_index < self.strokes.len() {
            self.state.current_index += 1;
        }
        self.state.drawing = true;
        log::debug!(
            "color set to {color}, current slot {}",
            self.state.current_index
        );
        self.presentation.set_color_indicator(color);
    }
    /// Stop drawing and hide the most recent visible stroke.
    ///
    /// Returns whether a stroke was hidden. Hidden strokes are never drawn into again.
    pub fn undo(&mut self) -> bool {
        if self.state.drawing {
            self.state.drawing = false;
            self.state.current_index += 1;
        }
        let undone = self.strokes.deactivate_most_recent_active(&mut self.host);
        if !undone {
            log::debug!("nothing to undo");
        }
        undone
    }
    /// Stop drawing and destroy every stroke.
    pub fn clear(&mut self) {
        self.state.drawing = false;
        let count = self.strokes.len();
        self.strokes.clear(&mut self.host);
        self.state.current_index = 0;
        self.blocked_index = None;
        log::info!("cleared {count} strokes");
    }
    /// Move on to the next drawing mode.
    pub fn switch_mode(&mut self) -> DrawMode {
        self.state.mode = self.state.mode.next();
        log::info!("switched to {} mode", self.state.mode);
        self.presentation
            .set_mode_text(&self.state.mode.to_string());
        self.state.mode
    }
    /// Carry out a user command.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, CommandError> {
        Ok(match command {
            Command::UpdateColor(swatch) => Outcome::ColorChanged(self.update_color(swatch)?),
            Command::SetColor(color) => {
                self.set_color(color);
                Outcome::ColorChanged(color)
            }
            Command::Undo => Outcome::Undone(self.undo()),
            Command::Clear => {
                self.clear();
                Outcome::Cleared
            }
            Command::SwitchMode => Outcome::ModeChanged(self.switch_mode()),
        })
    }

    /// Forward HUD and draw plane visibility, only where they differ from what was last shown.
    fn sync_presentation(&mut self) {
        let hud = self.state.drawing;
        if self.shown_hud != Some(hud) {
            self.presentation.set_visibility(hud, false);
            self.shown_hud = Some(hud);
        }
        let plane = self.state.shows_draw_plane();
        if self.shown_plane != Some(plane) {
            self.presentation.set_draw_plane_enabled(plane);
            self.shown_plane = Some(plane);
        }
    }
}

#[cfg(test)]
mod test {
    use super::{
        commands::{Command, CommandError, Outcome},
        Session,
    };
    use crate::{
        config::SessionConfig,
        host::recording::RecordingHost,
        presentation::recording::{Call, RecordingPresentation},
        state::SwatchIndex,
        tracking::{Handedness, HitResult, Joint, Pointer, SourceKind, TrackingFrame},
        Color, DrawMode, Point,
    };

    type TestSession = Session<RecordingHost, RecordingPresentation>;

    fn session() -> TestSession {
        Session::new(
            &SessionConfig::default(),
            RecordingHost::default(),
            RecordingPresentation::default(),
        )
    }
    /// A tracked hand whose far ray hits `object` at `point`.
    fn ray_frame(object: &str, point: Point) -> TrackingFrame {
        TrackingFrame::default()
            .with_joint(Joint::Wrist, Handedness::Right, Point::zero())
            .with_source(
                SourceKind::Hand,
                [Pointer::far(Some(HitResult {
                    point,
                    object: object.to_owned(),
                }))],
            )
    }
    fn plane_frame(point: Point) -> TrackingFrame {
        ray_frame("DrawPlane", point)
    }

    #[test]
    fn initial_state() {
        let session = session();
        let state = session.state();
        assert!(state.drawing);
        assert_eq!(state.mode, DrawMode::Normal);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.color, Color::WHITE);
        assert!(session.strokes().is_empty());
    }
    #[test]
    fn scenario() {
        let mut session = session();
        let p1 = Point::new(0.0, 1.5, 0.64);
        let p2 = Point::new(0.2, 1.4, 0.64);

        assert!(session.tick(&plane_frame(p1)).is_some());
        assert_eq!(session.strokes().len(), 1);
        assert_eq!(session.strokes().get(0).unwrap().position, Some(p1));

        let swatch = session.palette().get(SwatchIndex(2)).unwrap();
        session.update_color(SwatchIndex(2)).unwrap();
        assert_eq!(session.state().current_index, 1);
        assert!(session.state().drawing);

        session.tick(&plane_frame(p2));
        assert_eq!(session.strokes().len(), 2);
        let slot = session.strokes().get(1).unwrap();
        assert_eq!(slot.position, Some(p2));
        assert_eq!(slot.color, swatch);
        // First stroke untouched.
        assert_eq!(session.strokes().get(0).unwrap().position, Some(p1));
        assert_eq!(session.strokes().get(0).unwrap().color, Color::WHITE);

        assert!(session.undo());
        assert!(!session.strokes().is_active(1));
        assert!(session.strokes().is_active(0));
        assert_eq!(session.state().current_index, 2);
        assert!(!session.state().drawing);
    }
    #[test]
    fn continuing_stroke_reuses_slot() {
        let mut session = session();
        for z in [0.5, 0.6, 0.7] {
            session.tick(&plane_frame(Point::new(0.0, 0.0, z)));
        }
        assert_eq!(session.strokes().len(), 1);
        assert_eq!(
            session.strokes().get(0).unwrap().position,
            Some(Point::new(0.0, 0.0, 0.7))
        );
    }
    #[test]
    fn no_wrist_is_noop() {
        let mut session = session();
        session.tick(&plane_frame(Point::unit_z()));

        let no_wrist = TrackingFrame::default().with_source(
            SourceKind::Hand,
            [Pointer::far(Some(HitResult {
                point: Point::unit_x(),
                object: "DrawPlane".to_owned(),
            }))],
        );
        for _ in 0..3 {
            assert_eq!(session.tick(&no_wrist), None);
        }
        assert_eq!(session.strokes().len(), 1);
        assert_eq!(
            session.strokes().get(0).unwrap().position,
            Some(Point::unit_z())
        );
    }
    #[test]
    fn nothing_drawn_while_disabled() {
        let mut session = session();
        session.undo();
        assert!(!session.state().drawing);
        assert_eq!(session.tick(&plane_frame(Point::unit_z())), None);
        assert!(session.strokes().is_empty());
    }
    #[test]
    fn unused_slot_keeps_index_on_color_change() {
        let mut session = session();
        session.set_color(Color::RED);
        session.set_color(Color::BLUE);
        assert_eq!(session.state().current_index, 0);

        session.tick(&plane_frame(Point::unit_z()));
        assert_eq!(session.strokes().get(0).unwrap().color, Color::BLUE);
    }
    #[test]
    fn undo_then_draw_starts_fresh_slot() {
        let mut session = session();
        session.tick(&plane_frame(Point::unit_z()));
        session.undo();
        // Resuming by picking a color lands past the undone slot.
        session.set_color(Color::GREEN);
        assert_eq!(session.state().current_index, 1);
        session.tick(&plane_frame(Point::unit_y()));

        assert_eq!(session.strokes().len(), 2);
        assert!(!session.strokes().is_active(0));
        assert!(session.strokes().is_active(1));
        assert_eq!(session.strokes().get(1).unwrap().color, Color::GREEN);
    }
    #[test]
    fn undo_when_idle_only_deactivates() {
        let mut session = session();
        session.tick(&plane_frame(Point::unit_z()));
        session.set_color(Color::RED);
        session.tick(&plane_frame(Point::unit_y()));

        assert!(session.undo());
        assert_eq!(session.state().current_index, 2);
        // Already idle, index stays put.
        assert!(session.undo());
        assert_eq!(session.state().current_index, 2);
        assert_eq!(session.strokes().active_count(), 0);
        assert!(!session.undo());
        assert_eq!(session.strokes().len(), 2);
    }
    #[test]
    fn clear_resets() {
        let mut session = session();
        session.tick(&plane_frame(Point::unit_z()));
        session.set_color(Color::RED);
        session.tick(&plane_frame(Point::unit_y()));
        session.switch_mode();

        session.clear();
        assert!(session.strokes().is_empty());
        assert_eq!(session.state().current_index, 0);
        assert!(!session.state().drawing);
        assert_eq!(session.host().live().count(), 0);
        // Mode and color are kept.
        assert_eq!(session.state().mode, DrawMode::Mesh);
        assert_eq!(session.state().color, Color::RED);
    }
    #[test]
    fn indices_stay_dense() {
        let mut session = session();
        for step in 0..24 {
            match step % 6 {
                0 => {
                    session.tick(&plane_frame(Point::unit_z()));
                }
                1 => session.set_color(Color::RED),
                2 => {
                    session.undo();
                }
                3 => session.set_color(Color::BLUE),
                4 => {
                    session.tick(&plane_frame(Point::unit_x()));
                }
                _ => {
                    session.switch_mode();
                }
            }
            if step == 14 {
                session.clear();
                session.set_color(Color::WHITE);
            }
            for (position, slot) in session.strokes().iter().enumerate() {
                assert_eq!(slot.index, position);
            }
        }
        assert!(!session.strokes().is_empty());
    }
    #[test]
    fn mesh_mode_draws_on_meshes() {
        let mut session = session();
        session.switch_mode();
        assert_eq!(session.tick(&plane_frame(Point::unit_z())), None);
        assert!(session.tick(&ray_frame("Couch", Point::unit_y())).is_some());
        assert_eq!(
            session.strokes().get(0).unwrap().position,
            Some(Point::unit_y())
        );
    }
    #[test]
    fn finger_mode_draws_at_tip() {
        let mut session = session();
        session.switch_mode();
        session.switch_mode();
        assert_eq!(session.state().mode, DrawMode::Finger);

        let tip = Point::new(0.1, 1.1, 0.3);
        let frame = TrackingFrame::default()
            .with_joint(Joint::Wrist, Handedness::Left, Point::zero())
            .with_joint(Joint::IndexTip, Handedness::Left, tip);
        session.tick(&frame);
        assert_eq!(session.strokes().get(0).unwrap().position, Some(tip));
    }
    #[test]
    fn stroke_limit_stops_drawing() {
        let config = SessionConfig {
            max_strokes: 1,
            ..SessionConfig::default()
        };
        let mut session = Session::new(
            &config,
            RecordingHost::default(),
            RecordingPresentation::default(),
        );
        assert!(session.tick(&plane_frame(Point::unit_z())).is_some());
        session.set_color(Color::RED);
        assert_eq!(session.tick(&plane_frame(Point::unit_y())), None);
        assert_eq!(session.tick(&plane_frame(Point::unit_y())), None);
        assert_eq!(session.strokes().len(), 1);

        session.clear();
        session.set_color(Color::RED);
        assert!(session.tick(&plane_frame(Point::unit_y())).is_some());
    }
    #[test]
    fn start_pushes_hud() {
        let mut session = session();
        session.start();
        let palette = *session.palette().swatches();
        assert_eq!(
            session.presentation_mut().take(),
            [
                Call::Palette(palette),
                Call::Indicator(Color::WHITE),
                Call::Visibility {
                    visible: true,
                    immediate: true
                },
                Call::ModeText("Normal".to_owned()),
            ]
        );
    }
    #[test]
    fn plane_and_hud_are_edge_triggered() {
        let mut session = session();
        session.start();
        session.presentation_mut().take();

        let frame = plane_frame(Point::unit_z());
        session.tick(&frame);
        session.tick(&frame);
        assert_eq!(session.presentation_mut().take(), [Call::DrawPlane(true)]);

        session.switch_mode();
        session.tick(&frame);
        assert_eq!(
            session.presentation_mut().take(),
            [Call::ModeText("Mesh".to_owned()), Call::DrawPlane(false)]
        );

        session.switch_mode();
        session.switch_mode();
        session.presentation_mut().take();
        session.undo();
        session.tick(&frame);
        assert_eq!(
            session.presentation_mut().take(),
            [Call::Visibility {
                visible: false,
                immediate: false
            }]
        );

        session.set_color(Color::RED);
        session.tick(&frame);
        assert_eq!(
            session.presentation_mut().take(),
            [
                Call::Indicator(Color::RED),
                Call::Visibility {
                    visible: true,
                    immediate: false
                },
                Call::DrawPlane(true),
            ]
        );
    }
    #[test]
    fn head_pose_forwarded() {
        let mut session = session();
        let mut frame = TrackingFrame::default();
        frame.head = Some(crate::tracking::Pose::at(Point::new(0.0, 1.6, 0.0)));
        session.tick(&frame);
        assert!(session.presentation().calls.contains(&Call::FollowHead));
    }
    #[test]
    fn commands() {
        let mut session = session();
        assert_eq!(
            session.apply(Command::UpdateColor(SwatchIndex(1))),
            Ok(Outcome::ColorChanged(Color::RED))
        );
        assert_eq!(
            session.apply(Command::UpdateColor(SwatchIndex(7))),
            Err(CommandError::UnknownSwatch(SwatchIndex(7)))
        );
        // Failed command changes nothing.
        assert_eq!(session.state().color, Color::RED);
        assert_eq!(
            session.apply(Command::SwitchMode),
            Ok(Outcome::ModeChanged(DrawMode::Mesh))
        );
        assert_eq!(session.apply(Command::Undo), Ok(Outcome::Undone(false)));
        assert_eq!(session.apply(Command::Clear), Ok(Outcome::Cleared));
        assert_eq!(
            session.apply(Command::SetColor(Color::BLACK)),
            Ok(Outcome::ColorChanged(Color::BLACK))
        );
        assert!(session.state().drawing);
    }
}
