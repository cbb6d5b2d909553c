use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{model::Position, render::ClockZone};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000/";

/// Hourly rows on the standard page, matching what the server sends.
pub const DEFAULT_HOURLY_SLOTS: usize = 5;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// server_url = "http://127.0.0.1:8000/"
/// hourly_slots = 5
///
/// [default_location]
/// latitude = 51.5
/// longitude = -0.1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: Option<String>,
    pub hourly_slots: usize,
    /// Display hourly times at this UTC offset instead of local time.
    pub utc_offset_minutes: Option<i32>,
    pub timeout_secs: u64,
    pub default_location: Option<Position>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: None,
            hourly_slots: DEFAULT_HOURLY_SLOTS,
            utc_offset_minutes: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_location: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "geoforecast", "geoforecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn clock_zone(&self) -> Result<ClockZone> {
        match self.utc_offset_minutes {
            Some(minutes) => ClockZone::from_offset_minutes(minutes),
            None => Ok(ClockZone::Local),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.hourly_slots, 5);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            server_url: Some("http://forecast.local/".into()),
            default_location: Some(Position::new(51.5, -0.1)),
            hourly_slots: 8,
            utc_offset_minutes: Some(60),
            timeout_secs: 3,
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = \"http://x/\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg.server_url.as_deref(), Some("http://x/"));
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.default_location, None);
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "hourly_slots = \"many\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn clock_zone_follows_offset() {
        assert_eq!(Config::default().clock_zone().unwrap(), ClockZone::Local);

        let cfg = Config {
            utc_offset_minutes: Some(-300),
            ..Config::default()
        };
        let expected = ClockZone::Fixed(FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(cfg.clock_zone().unwrap(), expected);
    }
}
