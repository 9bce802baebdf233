/// A straight (non-premultiplied) RGBA color. Every channel is finite.
// Because of the preconditions invalidating many bitpatterns, this is not Pod.
#[repr(transparent)]
#[derive(
    Copy,
    Clone,
    PartialEq,
    bytemuck::NoUninit,
    bytemuck::Zeroable,
    Debug,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color([f32; 4]);
impl Color {
    pub const TRANSPARENT: Self = Self([0.0; 4]);
    pub const WHITE: Self = Self([1.0; 4]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Self = Self([0.0, 0.0, 1.0, 1.0]);

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Result<Self, ColorError> {
        Self::from_array([r, g, b, a])
    }
    pub fn from_array(rgba: [f32; 4]) -> Result<Self, ColorError> {
        if rgba.iter().all(|channel| channel.is_finite()) {
            Ok(Self(rgba))
        } else {
            Err(ColorError::NotFinite)
        }
    }
    #[must_use]
    pub fn as_array(&self) -> [f32; 4] {
        self.0
    }
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.0[3]
    }
}
// Channels are never NaN, so equality is total.
impl Eq for Color {}

impl TryFrom<[f32; 4]> for Color {
    type Error = ColorError;
    fn try_from(value: [f32; 4]) -> Result<Self, Self::Error> {
        Self::from_array(value)
    }
}
impl From<Color> for [f32; 4] {
    fn from(value: Color) -> Self {
        value.0
    }
}
impl std::fmt::Display for Color {
    /// Formats as `#RRGGBBAA`, clamping each channel to the displayable range.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b, a] = self.0.map(|channel| {
            // Clamped and rounded, the cast cannot truncate.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let byte = (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
            byte
        });
        write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorError {
    #[error("color channel not finite")]
    NotFinite,
}
