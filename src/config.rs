//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the text-watch.toml file.
//! It provides a centralized way to pick the word style, the animation timing,
//! the screen layout and the debug button behavior.
//!
//! Every section and field has a default, so a partial file only overrides
//! what it names.

use crate::animation::Curve;
use crate::date::OrdinalKey;
use crate::line::{ChangeDetection, ContentionPolicy, LinePolicy};
use crate::words::WordStyle;
use crate::WatchError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "text-watch.toml";

/// Application configuration loaded from text-watch.toml
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Wording and update rules
    pub face: FaceConfig,
    /// Line slide timing
    pub animation: AnimationConfig,
    /// Screen geometry
    pub display: DisplayConfig,
    /// Debug button behavior
    pub debug: DebugConfig,
}

/// Wording and update rules
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FaceConfig {
    /// "digital" reads digits ("ten twenty five"), "relative" reads "quarter past ten"
    pub word_style: WordStyle,
    /// Field that picks the date suffix, "day_of_month" or "minute_of_hour"
    pub ordinal_key: OrdinalKey,
    /// "exact" or "prefix_bounded"
    pub change_detection: ChangeDetection,
    /// Update arriving mid-slide: "queue", "cancel_and_restart" or "ignore_until_idle"
    pub contention: ContentionPolicy,
}

/// Line slide timing
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Slide duration in milliseconds
    pub duration_ms: u64,
    /// Easing curve of the slide
    pub curve: Curve,
    /// Distance travelled by a slide, also where hidden text waits
    pub slide_offset: i32,
    /// Redraw period while a slide runs
    pub frame_interval_ms: u64,
}

/// Screen geometry in pixels
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Top edge of the three time lines
    pub line_rows: [i32; 3],
    /// Top edge of the weekday line
    pub day_row: i32,
    /// Top edge of the date line
    pub date_row: i32,
}

/// Debug button behavior
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Auto-repeat period of a held button
    pub repeat_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            duration_ms: 400,
            curve: Curve::EaseOut,
            slide_offset: 144,
            frame_interval_ms: 33, // ~30 fps
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 144,
            height: 168,
            line_rows: [10, 47, 84],
            day_row: 135,
            date_row: 150,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        DebugConfig {
            repeat_interval_ms: 100,
        }
    }
}

impl Config {
    /// Load configuration from text-watch.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load(&path) {
            Ok(config) => {
                info!(
                    "loaded configuration from {} ({:?} words)",
                    path.as_ref().display(),
                    config.face.word_style
                );
                config
            }
            Err(e) => {
                warn!("{}, using default configuration", e);
                Self::default()
            }
        }
    }

    /// Load configuration, reporting a missing or malformed file
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self, WatchError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| WatchError::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str::<Config>(&contents)
            .map_err(|e| WatchError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save current configuration as pretty TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), WatchError> {
        let path = path.as_ref();
        let contents =
            toml::to_string_pretty(self).map_err(|e| WatchError::Config(e.to_string()))?;
        fs::write(path, contents)
            .map_err(|e| WatchError::Config(format!("{}: {}", path.display(), e)))?;
        info!("configuration saved to {}", path.display());
        Ok(())
    }

    /// Per-line behavior derived from the face and animation sections
    pub fn line_policy(&self) -> LinePolicy {
        LinePolicy {
            detection: self.face.change_detection,
            contention: self.face.contention,
            duration: Duration::from_millis(self.animation.duration_ms),
            curve: self.animation.curve,
            slide_offset: self.animation.slide_offset,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.animation.frame_interval_ms.max(1))
    }

    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.debug.repeat_interval_ms)
    }
}
