use std::path::{Path, PathBuf};

use serde::Deserialize;
use stopwatch_core::DEFAULT_TICK_INTERVAL_MS;

use crate::error::AppError;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Front-end settings. Read once at startup, never written back.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_interval_ms: u64,
    pub sound: bool,
    pub theme: Theme,
    pub fullscreen: bool,
    /// Where saved times go. Current directory when unset.
    pub export_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            sound: true,
            theme: Theme::Dark,
            fullscreen: false,
            export_dir: None,
        }
    }
}

impl Settings {
    /// `<config dir>/stopwatch/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stopwatch").join("config.toml"))
    }

    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::ConfigRead(path.to_path_buf(), e))?;
        Self::parse(&content).map_err(|e| AppError::ConfigParse(path.to_path_buf(), e))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut settings: Settings = toml::from_str(content)?;
        settings.tick_interval_ms = settings.tick_interval_ms.max(1);
        Ok(settings)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_fields() {
        let settings = Settings::parse(
            r#"
            tick_interval_ms = 50
            sound = false
            theme = "light"
            fullscreen = true
            export_dir = "/tmp/laps"
            "#,
        )
        .unwrap();
        assert_eq!(settings.tick_interval_ms, 50);
        assert!(!settings.sound);
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.fullscreen);
        assert_eq!(settings.export_dir(), PathBuf::from("/tmp/laps"));
    }

    #[test]
    fn test_zero_interval_clamped() {
        assert_eq!(Settings::parse("tick_interval_ms = 0").unwrap().tick_interval_ms, 1);
    }

    #[test]
    fn test_bad_theme_rejected() {
        assert!(Settings::parse(r#"theme = "neon""#).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sound = \"loud\"").unwrap();
        assert!(matches!(Settings::load(&path), Err(AppError::ConfigParse(..))));
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
