use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Seconds between two poll ticks.
pub const POLL_INTERVAL_SECS: u64 = 180;

/// How many of the newest readings an export contains.
pub const EXPORT_LIMIT: usize = 10;

pub const DEFAULT_LATITUDE: f64 = 55.69782222;
pub const DEFAULT_LONGITUDE: f64 = 37.36156389;
pub const DEFAULT_API_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_DATABASE_FILE: &str = "weather_data.db";

/// Collector settings. Every field is optional on disk and falls back to
/// the built-in default.
///
/// Example TOML:
/// latitude = 55.69782222
/// longitude = 37.36156389
/// database_path = "weather_data.db"
/// poll_interval_secs = 180
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub latitude: f64,
    pub longitude: f64,
    pub api_base_url: String,
    pub database_path: PathBuf,
    pub export_dir: PathBuf,
    pub poll_interval_secs: u64,
    pub export_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            export_dir: PathBuf::from("."),
            poll_interval_secs: POLL_INTERVAL_SECS,
            export_limit: EXPORT_LIMIT,
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Load config from the platform location, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
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
        let dirs = ProjectDirs::from("dev", "weather-collector", "weather-collector")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(anyhow!("latitude {} is outside [-90, 90]", self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(anyhow!("longitude {} is outside [-180, 180]", self.longitude));
        }
        if self.poll_interval_secs == 0 {
            return Err(anyhow!("poll_interval_secs must be greater than zero"));
        }
        Ok(())
    }
}
