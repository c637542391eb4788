//! Configuration for Slippy
//!
//! Static configuration is read from a TOML file. Editor preferences and the
//! theme are user state: they live in the persistence adapter and are
//! restored by the session controller at bootstrap.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::adapters::WidgetKind;
use crate::error::{PlaygroundError, Result};
use crate::highlight::Language;

/// Environment variable overriding the storage file location
pub const STORAGE_PATH_ENV: &str = "SLIPPY_STORAGE_PATH";

pub const MIN_FONT_SIZE: u8 = 10;
pub const MAX_FONT_SIZE: u8 = 24;
pub const TAB_WIDTHS: [usize; 3] = [2, 4, 8];

/// Editor preferences persisted between sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorPreferences {
    /// Font size in pixels
    pub font_size: u8,

    /// Indent width in spaces
    pub tab_width: usize,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            font_size: 14,
            tab_width: 4,
        }
    }
}

impl EditorPreferences {
    /// Font size clamped to the supported range
    pub fn clamp_font_size(px: u8) -> u8 {
        px.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }

    pub fn validate_tab_width(width: usize) -> Result<usize> {
        if TAB_WIDTHS.contains(&width) {
            Ok(width)
        } else {
            Err(PlaygroundError::InvalidPreference(format!(
                "tab width must be one of 2, 4 or 8 (got {})",
                width
            )))
        }
    }

    /// Bring values from an older or hand-edited store back into range
    pub fn sanitized(self) -> Self {
        Self {
            font_size: Self::clamp_font_size(self.font_size),
            tab_width: Self::validate_tab_width(self.tab_width)
                .unwrap_or(Self::default().tab_width),
        }
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Storage file; defaults to the local data directory
    pub storage_path: Option<PathBuf>,

    /// Directory receiving exported ("downloaded") files
    pub export_dir: PathBuf,

    /// Editor widget implementation
    pub widget: WidgetKind,

    /// Language of tabs created without an explicit choice
    pub default_language: Language,

    /// Initial preferences before anything is restored from storage
    pub preferences: EditorPreferences,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            export_dir: PathBuf::from("."),
            widget: WidgetKind::default(),
            default_language: Language::default(),
            preferences: EditorPreferences::default(),
        }
    }
}

impl PlaygroundConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PlaygroundError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let mut config: PlaygroundConfig = toml::from_str(toml_str)?;
        config.preferences = config.preferences.sanitized();
        Ok(config)
    }

    /// Load from `path` if given (defaults otherwise), then apply
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(path) = env::var(STORAGE_PATH_ENV) {
            if !path.is_empty() {
                debug!("Using storage path from {}", STORAGE_PATH_ENV);
                self.storage_path = Some(PathBuf::from(path));
            }
        }
    }

    /// Effective storage file location
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(crate::adapters::FileStorage::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = EditorPreferences::default();
        assert_eq!(prefs.font_size, 14);
        assert_eq!(prefs.tab_width, 4);
    }

    #[test]
    fn test_preferences_json_shape() {
        let json = serde_json::to_string(&EditorPreferences::default()).unwrap();
        assert_eq!(json, r#"{"fontSize":14,"tabWidth":4}"#);

        let partial: EditorPreferences = serde_json::from_str(r#"{"fontSize":18}"#).unwrap();
        assert_eq!(partial.font_size, 18);
        assert_eq!(partial.tab_width, 4);
    }

    #[test]
    fn test_preference_validation() {
        assert_eq!(EditorPreferences::clamp_font_size(3), 10);
        assert_eq!(EditorPreferences::clamp_font_size(40), 24);
        assert_eq!(EditorPreferences::clamp_font_size(16), 16);

        assert!(EditorPreferences::validate_tab_width(8).is_ok());
        assert!(matches!(
            EditorPreferences::validate_tab_width(3),
            Err(PlaygroundError::InvalidPreference(_))
        ));

        let fixed = EditorPreferences { font_size: 99, tab_width: 5 }.sanitized();
        assert_eq!(fixed, EditorPreferences { font_size: 24, tab_width: 4 });
    }

    #[test]
    fn test_theme() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::parse(" light "), Some(Theme::Light));
        assert_eq!(Theme::parse("solarized"), None);
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_config_from_toml() {
        let config = PlaygroundConfig::from_toml(
            r#"
            export_dir = "/tmp/out"
            widget = "plain-text"
            default_language = "css"

            [preferences]
            fontSize = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.widget, WidgetKind::PlainText);
        assert_eq!(config.default_language, Language::Css);
        assert_eq!(config.preferences.font_size, 24);
        assert_eq!(config.storage_path, None);
    }

    #[test]
    fn test_invalid_toml() {
        let err = PlaygroundConfig::from_toml("widget = 12").unwrap_err();
        assert!(matches!(err, PlaygroundError::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = PlaygroundConfig::from_file(Path::new("/nonexistent/slippy.toml")).unwrap_err();
        assert!(matches!(err, PlaygroundError::Config(_)));
    }
}
