//! Configuration loading for the neorain screensaver.
//!
//! Settings are read from `config.toml` in the platform config
//! directory. Every field is optional; a missing file just yields the
//! defaults.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use neorain_core::ColorTheme;
use serde::Deserialize;

/// Default target frame rate for the rain loop.
const DEFAULT_FPS: f64 = 30.0;
/// Default surface-width threshold (units) below which reduced mode
/// engages; 48 glyph slots at the standard 16-unit slot width.
const DEFAULT_REDUCED_WIDTH: f32 = 768.0;
/// Default banner text.
const DEFAULT_BANNER: &str = "NEORAIN";

/// User-facing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Target frame rate for the rain loop.
    pub fps: f64,
    /// Color theme name: red, green, cyan, magenta, yellow, blue, white.
    pub theme: String,
    /// Glyph alphabet override; the built-in rain set when empty.
    pub alphabet: String,
    /// Banner text; A-Z, 0-9 and spaces render as block letters.
    pub banner: String,
    /// Draw the decorative crackle lines.
    pub crackles: bool,
    /// Periodically glitch the banner sideways.
    pub glitch: bool,
    /// Reduced-mode threshold in surface units.
    pub reduced_width: f32,
    /// Fixed RNG seed; random per run when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            theme: ColorTheme::default().name().to_string(),
            alphabet: String::new(),
            banner: DEFAULT_BANNER.to_string(),
            crackles: true,
            glitch: true,
            reduced_width: DEFAULT_REDUCED_WIDTH,
            seed: None,
        }
    }
}

impl Config {
    /// Load from the platform config file, or defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Platform location of `config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "neorain").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load and validate a specific config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml(&text)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if ColorTheme::from_name(&self.theme).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown theme {:?}",
                self.theme
            )));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(ConfigError::Invalid(format!("fps must be positive, got {}", self.fps)));
        }
        if !self.reduced_width.is_finite() || self.reduced_width < 0.0 {
            return Err(ConfigError::Invalid(
                "reduced_width must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// The validated color theme.
    pub fn color_theme(&self) -> ColorTheme {
        ColorTheme::from_name(&self.theme).unwrap_or_default()
    }

    /// The alphabet override as characters, when one is configured.
    pub fn alphabet_chars(&self) -> Option<Vec<char>> {
        if self.alphabet.is_empty() {
            None
        } else {
            Some(self.alphabet.chars().collect())
        }
    }
}

/// Failure to read or understand a config file.
#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, err) => {
                write!(f, "failed to read config {}: {err}", path.display())
            }
            ConfigError::Parse(err) => write!(f, "failed to parse config: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(_, err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fps, 30.0);
        assert_eq!(config.color_theme(), ColorTheme::Red);
        assert_eq!(config.banner, "NEORAIN");
        assert!(config.crackles);
        assert!(config.glitch);
        assert_eq!(config.reduced_width, 768.0);
        assert!(config.alphabet_chars().is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_empty_document_is_defaults() {
        let config = Config::from_toml("").expect("parse");
        assert_eq!(config.fps, Config::default().fps);
    }

    #[test]
    fn test_full_document() {
        let config = Config::from_toml(
            r#"
            fps = 24.0
            theme = "green"
            alphabet = "01"
            banner = "HELLO"
            crackles = false
            glitch = false
            reduced_width = 512.0
            seed = 1234
            "#,
        )
        .expect("parse");
        assert_eq!(config.fps, 24.0);
        assert_eq!(config.color_theme(), ColorTheme::Green);
        assert_eq!(config.alphabet_chars(), Some(vec!['0', '1']));
        assert_eq!(config.banner, "HELLO");
        assert!(!config.crackles);
        assert!(!config.glitch);
        assert_eq!(config.reduced_width, 512.0);
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let err = Config::from_toml(r#"theme = "plaid""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_nonpositive_fps_rejected() {
        assert!(Config::from_toml("fps = 0.0").is_err());
        assert!(Config::from_toml("fps = -5.0").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("frames = 30").is_err());
    }
}
