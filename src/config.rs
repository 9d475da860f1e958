//! Configuration module.
//!
//! Handles loading, validating, and merging `overlay.toml`. Stock defaults
//! are serialized to a TOML table and the user file is merged on top of it,
//! so a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [session]
//! initial_opacity = 0.0     # Top layer opacity when a session starts (0-1)
//!
//! [picker]
//! selection_limit = 1       # Results taken from one pick
//! filter = ["images", "screenshots"]
//!
//! [frame]
//! width = 390.0             # Frame used before a replay sets its own
//! height = 600.0
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::geometry::Size;
use crate::picker::PickerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `overlay.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    /// Comparison session settings.
    pub session: SessionConfig,
    /// Photo picker settings.
    pub picker: PickerConfig,
    /// Default display frame.
    pub frame: FrameConfig,
}

impl CompareConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.session.initial_opacity) {
            return Err(ConfigError::Validation(
                "session.initial_opacity must be 0-1".into(),
            ));
        }
        if self.picker.selection_limit == 0 {
            return Err(ConfigError::Validation(
                "picker.selection_limit must be at least 1".into(),
            ));
        }
        if self.picker.filter.is_empty() {
            return Err(ConfigError::Validation(
                "picker.filter must not be empty".into(),
            ));
        }
        if !self.frame.size().is_positive() {
            return Err(ConfigError::Validation(
                "frame.width and frame.height must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Top layer opacity when a session starts.
    pub initial_opacity: f64,
}

/// Display frame used until something lays out a real one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    pub width: f64,
    pub height: f64,
}

impl FrameConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 600.0,
        }
    }
}

// =============================================================================
// Layering user overrides onto the stock defaults
// =============================================================================

impl CompareConfig {
    /// Stock defaults as a TOML table, the layer user overrides land on.
    pub fn defaults_table() -> Result<toml::Table, ConfigError> {
        let text = toml::to_string(&CompareConfig::default())?;
        Ok(toml::from_str(&text)?)
    }

    /// Layer `overrides` onto the stock defaults, then deserialize and
    /// validate the result.
    pub fn from_overrides(overrides: toml::Table) -> Result<Self, ConfigError> {
        let mut layered = Self::defaults_table()?;
        overlay_table(&mut layered, overrides);
        let config: CompareConfig = toml::Value::Table(layered).try_into()?;
        config.validate()?;
        Ok(config)
    }
}

/// Write `overrides` into `base` in place.
///
/// A section present on both sides is descended into, so `[frame] width`
/// alone keeps the stock `height`. Anything else, arrays included, replaces
/// the base entry.
pub fn overlay_table(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        if let toml::Value::Table(section) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                overlay_table(existing, section);
                continue;
            }
            base.insert(key, toml::Value::Table(section));
        } else {
            base.insert(key, value);
        }
    }
}

/// Load config from the file at `path`. A missing file means no overrides.
pub fn load_config(path: &Path) -> Result<CompareConfig, ConfigError> {
    let overrides: toml::Table = match fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => toml::Table::new(),
        Err(e) => return Err(e.into()),
    };
    debug!(path = %path.display(), sections = overrides.len(), "loading config");
    CompareConfig::from_overrides(overrides)
}

/// Returns a fully-commented stock `overlay.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# overlay-compare configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Comparison session
# ---------------------------------------------------------------------------
[session]
# Opacity of the top picture when a session starts, from 0 (invisible)
# to 1 (fully covers the bottom picture).
initial_opacity = 0.0

# ---------------------------------------------------------------------------
# Photo picker
# ---------------------------------------------------------------------------
[picker]
# How many results one pick may return. Each result replaces the previous
# picture in the slot, so only the last one stays.
selection_limit = 1

# Media kinds offered: "images", "screenshots", "live_photos".
filter = ["images", "screenshots"]

# ---------------------------------------------------------------------------
# Display frame
# ---------------------------------------------------------------------------
[frame]
# Frame size pictures are fitted into until a replay sets its own.
width = 390.0
height = 600.0
"##
}
