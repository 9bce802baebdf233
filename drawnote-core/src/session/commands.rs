use crate::{state::SwatchIndex, Color};

/// The user-facing operations, as issued by HUD buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Pick a palette swatch.
    UpdateColor(SwatchIndex),
    /// Pick an arbitrary color.
    SetColor(Color),
    Undo,
    Clear,
    SwitchMode,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("no swatch at index {0}")]
    UnknownSwatch(SwatchIndex),
}

/// What an applied command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    ColorChanged(Color),
    /// Whether a stroke was hidden.
    Undone(bool),
    Cleared,
    ModeChanged(crate::DrawMode),
}
