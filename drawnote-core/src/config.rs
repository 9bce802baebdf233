//! # Configuration
//!
//! Per-user session settings, saved as TOML in the platform preferences directory.

use crate::{state::Palette, Color, DrawMode};

const DOCUMENTATION: &str = r#"# DrawNote settings. You may edit this file, but be aware that formatting and comments will not
# be preserved, and all keys and values are case sensitive.

# draw_plane:    name of the scene object used as the drawing surface in Normal mode.
# initial_mode:  one of "Normal", "Mesh", "Finger".
# initial_color, swatches: [r, g, b, a] with channels in 0.0..=1.0. Exactly four swatches.
# max_strokes:   most strokes kept before drawing stops until the canvas is cleared. 0 for no limit.

"#;

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("no preferences directory found")]
    NoPreferencesDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub draw_plane: String,
    pub initial_mode: DrawMode,
    pub initial_color: Color,
    pub swatches: Palette,
    /// Zero means unlimited.
    pub max_strokes: usize,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            draw_plane: "DrawPlane".to_owned(),
            initial_mode: DrawMode::Normal,
            initial_color: Color::WHITE,
            swatches: Palette::default(),
            max_strokes: 4096,
        }
    }
}
impl SessionConfig {
    pub const FILENAME: &'static str = "drawnote.toml";

    /// The stroke cap, or None if unlimited.
    #[must_use]
    pub fn stroke_limit(&self) -> Option<usize> {
        (self.max_strokes != 0).then_some(self.max_strokes)
    }
    pub fn from_toml(string: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(string)?)
    }
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let string = toml::ser::to_string_pretty(self)?;
        Ok(DOCUMENTATION.to_owned() + &string)
    }
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let string = std::fs::read_to_string(path)?;
        Self::from_toml(&string)
    }
    /// Load from `path`, defaulting if it's missing or malformed.
    #[must_use]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no settings at {path:?}, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("failed to load settings from {path:?}, using defaults: {e}");
                Self::default()
            }
        }
    }
    /// Load the user's settings from their preferences directory.
    #[must_use]
    pub fn load_user() -> Self {
        match preferences_dir() {
            Some(mut path) => {
                path.push(Self::FILENAME);
                Self::load_or_default(&path)
            }
            None => {
                log::warn!("Settings weren't available, defaulting.");
                Self::default()
            }
        }
    }
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
    pub fn save_user(&self) -> Result<(), ConfigError> {
        let mut preferences = preferences_dir().ok_or(ConfigError::NoPreferencesDir)?;
        // Explicity do *not* create recursively. If not found, the user probably has a good reason.
        // Ignore errors (could already exist). Any real errors will be emitted by file access below.
        let _ = std::fs::DirBuilder::new().create(&preferences);

        preferences.push(Self::FILENAME);
        self.save(&preferences)
    }
}

#[cfg(test)]
mod test {
    use super::SessionConfig;
    use crate::{Color, DrawMode};
    #[test]
    fn partial_file_fills_defaults() {
        let config = SessionConfig::from_toml(
            r#"
            initial_mode = "Finger"
            max_strokes = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_mode, DrawMode::Finger);
        assert_eq!(config.stroke_limit(), None);
        assert_eq!(config.draw_plane, "DrawPlane");
        assert_eq!(config.initial_color, Color::WHITE);
    }
    #[test]
    fn survives_toml() {
        let config = SessionConfig {
            draw_plane: "Canvas".to_owned(),
            initial_mode: DrawMode::Mesh,
            initial_color: Color::BLUE,
            max_strokes: 12,
            ..SessionConfig::default()
        };
        let string = config.to_toml().unwrap();
        assert!(string.starts_with("# DrawNote settings."));
        assert_eq!(SessionConfig::from_toml(&string).unwrap(), config);
    }
    #[test]
    fn rejects_wrong_swatch_count() {
        let result = SessionConfig::from_toml(
            "swatches = [[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 1.0]]",
        );
        assert!(result.is_err());
    }
    #[test]
    fn missing_file_defaults() {
        let config = SessionConfig::load_or_default(std::path::Path::new(
            "/this/path/does/not/exist/drawnote.toml",
        ));
        assert_eq!(config, SessionConfig::default());
    }
}
