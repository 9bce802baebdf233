use crate::Color;

pub const PALETTE_SIZE: usize = 4;

/// Index into the [`Palette`]'s swatches.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct SwatchIndex(pub usize);
impl std::fmt::Display for SwatchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// The fixed set of swatches offered on the HUD.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Palette {
    swatches: [Color; PALETTE_SIZE],
}
impl Default for Palette {
    fn default() -> Self {
        Self {
            swatches: [Color::WHITE, Color::RED, Color::GREEN, Color::BLUE],
        }
    }
}
impl Palette {
    #[must_use]
    pub fn new(swatches: [Color; PALETTE_SIZE]) -> Self {
        Self { swatches }
    }
    /// Get a swatch from it's index, or None if out of range.
    #[must_use]
    pub fn get(&self, idx: SwatchIndex) -> Option<Color> {
        self.swatches.get(idx.0).copied()
    }
    #[must_use]
    pub fn swatches(&self) -> &[Color; PALETTE_SIZE] {
        &self.swatches
    }
    /// Flat `rgba rgba ..` view of the swatches, for hosts that upload them as-is.
    #[must_use]
    pub fn as_rgba(&self) -> &[f32] {
        bytemuck::cast_slice(&self.swatches)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.swatches.iter()
    }
}
