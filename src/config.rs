//! # Controller settings
//!
//! Settings live in a single TOML file under the user's config directory
//! (`~/.config/gamepad-normalize/controller.toml` on Linux). A missing file is
//! not an error: the defaults are used and the caller may save them back.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::controller::{ControllerError, Layout, DEFAULT_DEAD_ZONE};

const CONFIG_DIR: &str = "gamepad-normalize";
const CONFIG_FILE: &str = "controller.toml";

/// User-tunable controller settings
///
/// ```toml
/// device_index = 0
/// dead_zone = 0.15
/// poll_interval_ms = 16
/// # layout = "alpha"   # override host detection
/// ```
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ControllerSettings {
    /// Which connected gamepad to open, counting from 0
    pub device_index: usize,
    /// Stick dead zone in [0, 1)
    pub dead_zone: f32,
    /// Delay between polls in the demo loops
    pub poll_interval_ms: u64,
    /// Forces a layout instead of detecting it from the host
    pub layout: Option<Layout>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            dead_zone: DEFAULT_DEAD_ZONE,
            poll_interval_ms: 16,
            layout: None,
        }
    }
}

impl ControllerSettings {
    /// Default settings file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads from [`Self::default_path`], falling back to defaults
    pub fn load_default() -> Result<Self, ControllerError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => {
                warn!("No config directory on this platform, using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ControllerError> {
        if !path.exists() {
            warn!(
                "Settings file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|e| {
            ControllerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let settings: Self = toml::from_str(&text).map_err(|e| {
            ControllerError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        settings.validate()?;

        info!("Loaded controller settings from {}", path.display());
        debug!("Settings: {:?}", settings);
        Ok(settings)
    }

    /// Writes settings to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ControllerError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ControllerError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let text = toml::to_string_pretty(self)
            .map_err(|e| ControllerError::Config(format!("Failed to serialize settings: {}", e)))?;
        fs::write(path, text).map_err(|e| {
            ControllerError::Config(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!("Saved controller settings to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        if !(0.0..1.0).contains(&self.dead_zone) {
            return Err(ControllerError::Config(format!(
                "dead_zone must be in [0, 1), got {}",
                self.dead_zone
            )));
        }
        Ok(())
    }
}
