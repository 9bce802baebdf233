//! In-memory stand-ins for the engine: a scene graph holding stroke visuals, and a HUD that
//! writes to the log.

use drawnote_core::{
    host::StrokeHost, presentation::Presentation, state::palette::PALETTE_SIZE, tracking::Pose,
    Color, Point,
};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct StrokeHandle(usize);

pub struct SceneStroke {
    pub name: String,
    pub parent: String,
    /// Material color, as handed to the renderer.
    pub material: [f32; 4],
    pub active: bool,
    /// Every anchor position, as a trail renderer would keep them.
    pub trail: Vec<Point>,
}

/// Flat list of stroke visuals. Released strokes leave a hole so handles stay valid.
pub struct Scene {
    drawings_parent: String,
    strokes: Vec<Option<SceneStroke>>,
}
impl Scene {
    #[must_use]
    pub fn new(drawings_parent: impl Into<String>) -> Self {
        Self {
            drawings_parent: drawings_parent.into(),
            strokes: Vec::new(),
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = &SceneStroke> + '_ {
        self.strokes.iter().flatten()
    }
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.iter().filter(|stroke| stroke.active).count()
    }
    fn get_mut(&mut self, handle: StrokeHandle) -> Option<&mut SceneStroke> {
        self.strokes.get_mut(handle.0)?.as_mut()
    }
}
impl StrokeHost for Scene {
    type Handle = StrokeHandle;
    fn spawn_stroke(&mut self, name: &str, color: Color) -> StrokeHandle {
        self.strokes.push(Some(SceneStroke {
            name: name.to_owned(),
            parent: self.drawings_parent.clone(),
            material: color.as_array(),
            active: true,
            trail: Vec::new(),
        }));
        StrokeHandle(self.strokes.len() - 1)
    }
    fn move_stroke(&mut self, handle: &StrokeHandle, to: Point) {
        match self.get_mut(*handle) {
            Some(stroke) => stroke.trail.push(to),
            None => log::warn!("moved unknown stroke {handle:?}"),
        }
    }
    fn set_stroke_active(&mut self, handle: &StrokeHandle, active: bool) {
        match self.get_mut(*handle) {
            Some(stroke) => stroke.active = active,
            None => log::warn!("toggled unknown stroke {handle:?}"),
        }
    }
    fn release_stroke(&mut self, handle: StrokeHandle) {
        if let Some(slot) = self.strokes.get_mut(handle.0) {
            *slot = None;
        }
    }
}

/// HUD that logs what it would show.
#[derive(Default)]
pub struct LogHud {
    visible: bool,
    draw_plane: bool,
    mode: String,
}
impl LogHud {
    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
    #[must_use]
    pub fn draw_plane_enabled(&self) -> bool {
        self.draw_plane
    }
}
impl Presentation for LogHud {
    fn set_color_palette(&mut self, colors: &[Color; PALETTE_SIZE]) {
        let swatches: Vec<String> = colors.iter().map(ToString::to_string).collect();
        log::info!("HUD palette: {}", swatches.join(" "));
    }
    fn set_color_indicator(&mut self, color: Color) {
        log::info!("HUD color: {color}");
    }
    fn set_visibility(&mut self, visible: bool, immediate: bool) {
        self.visible = visible;
        log::info!(
            "HUD {}{}",
            if visible { "shown" } else { "hidden" },
            if immediate { " (immediate)" } else { "" }
        );
    }
    fn set_mode_text(&mut self, text: &str) {
        text.clone_into(&mut self.mode);
        log::info!("HUD mode: {text}");
    }
    fn set_draw_plane_enabled(&mut self, enabled: bool) {
        self.draw_plane = enabled;
        log::debug!("draw plane {}", if enabled { "enabled" } else { "disabled" });
    }
    fn follow_head(&mut self, head: Pose) {
        log::trace!("following head at {:?}", head.position);
    }
}
