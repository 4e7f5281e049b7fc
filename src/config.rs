use crate::wheel::{
    DEFAULT_ANIMATION_MS, DEFAULT_DEAD_ZONE, DEFAULT_SECTION_COUNT, Easing, EvenSections,
    SNAP_EPSILON, START_OFFSET_DEGREES,
};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelConfig {
    pub animation_duration_ms: u64,
    pub easing: Easing,
    pub snap_epsilon: f64,
    pub dead_zone_radius: f64,
    pub sections: usize,
    pub start_offset_degrees: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: DEFAULT_ANIMATION_MS,
            easing: Easing::default(),
            snap_epsilon: SNAP_EPSILON,
            dead_zone_radius: DEFAULT_DEAD_ZONE,
            sections: DEFAULT_SECTION_COUNT,
            start_offset_degrees: START_OFFSET_DEGREES,
        }
    }
}

impl WheelConfig {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Equal-width sections laid out as configured.
    pub fn data_source(&self) -> EvenSections {
        EvenSections::new(self.sections).with_start_offset(self.start_offset_degrees.to_radians())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "colorwheel", "colorwheel")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Loads any config shape from the config file, overridden by `COLORWHEEL_*` variables.
pub fn load<T: DeserializeOwned>() -> Result<T, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("COLORWHEEL").try_parsing(true))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn from_toml_str<T: DeserializeOwned>(toml: &str) -> Result<T, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<WheelConfig, ConfigError> {
    load()
}

pub fn load_or_default() -> WheelConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default wheel config: {}", e);
            WheelConfig::default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
