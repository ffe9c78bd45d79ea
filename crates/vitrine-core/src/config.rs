//! Configuration management for Vitrine.
//!
//! Loads configuration from ${VITRINE_HOME}/config.toml with sensible defaults.
//! Every tunable of the scroll stage lives here: input sensitivities, pin
//! sizing, gap breakpoints, transition timings, navigation offsets.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Input normalization and intercept hand-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Progress gained per wheel `deltaY` unit.
    pub wheel_sensitivity: f32,
    /// Progress gained per touch pixel while opening (dragging up).
    pub touch_open_sensitivity: f32,
    /// Progress lost per touch pixel while closing (dragging down).
    pub touch_close_sensitivity: f32,
    /// Intercept progress at which native scrolling is released.
    pub completion_threshold: f32,
    /// Intercept progress below which revealed content hides again.
    pub content_hide_threshold: f32,
    /// Page offset treated as "at the top" for reverse recapture.
    pub top_tolerance_px: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: 0.005,
            touch_open_sensitivity: 0.015,
            touch_close_sensitivity: 0.010,
            completion_threshold: 0.95,
            content_hide_threshold: 0.75,
            top_tolerance_px: 5.0,
        }
    }
}

/// Pinned region sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinningConfig {
    /// Scroll distance per item, as a fraction of viewport height.
    pub per_item_viewport_fraction: f64,
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            per_item_viewport_fraction: 0.6,
        }
    }
}

/// Breakpoints for the carousel gap between active and neighbor items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    pub min_width: f64,
    pub max_width: f64,
    pub min_gap: f64,
    pub max_gap: f64,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            min_width: 480.0,
            max_width: 1440.0,
            min_gap: 24.0,
            max_gap: 96.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub gap: GapConfig,
}

/// Time-based transition defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionsConfig {
    pub crossfade_ms: u64,
    pub reveal_ms: u64,
    /// Visible ratio that starts an entrance reveal.
    pub reveal_threshold: f32,
    /// Intersection root margin; negative values require the element to be
    /// further inside the viewport.
    pub reveal_root_margin_px: f64,
    /// Vertical travel of the hidden state.
    pub reveal_distance_px: f32,
    pub text_interval_ms: u64,
    pub text_start_delay_ms: u64,
    pub cipher_alphabet: String,
    /// Fixed seed for the scramble generator (replays, tests).
    pub scramble_seed: Option<u64>,
}

impl Default for TransitionsConfig {
    fn default() -> Self {
        Self {
            crossfade_ms: 1000,
            reveal_ms: 800,
            reveal_threshold: 0.15,
            reveal_root_margin_px: -50.0,
            reveal_distance_px: 40.0,
            text_interval_ms: 50,
            text_start_delay_ms: 0,
            cipher_alphabet: "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%&*".to_string(),
            scramble_seed: None,
        }
    }
}

impl TransitionsConfig {
    pub fn crossfade(&self) -> Duration {
        Duration::from_millis(self.crossfade_ms)
    }

    pub fn text_interval(&self) -> Duration {
        Duration::from_millis(self.text_interval_ms)
    }

    pub fn text_start_delay(&self) -> Duration {
        Duration::from_millis(self.text_start_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Height of the fixed navigation bar subtracted from anchor targets.
    pub anchor_offset_px: f64,
    /// Fallback wait before scrolling to a deep-link anchor.
    pub settle_delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            anchor_offset_px: 80.0,
            settle_delay_ms: 300,
        }
    }
}

impl NavigationConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Play the intro on a plain (non deep-link) load.
    pub enabled: bool,
    pub duration_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 2400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Latency of the simulated submitter.
    pub simulated_delay_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 1500,
        }
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Vitrine configuration and logs.
    //!
    //! VITRINE_HOME resolution order:
    //! 1. VITRINE_HOME environment variable (if set)
    //! 2. ~/.config/vitrine (default)
    //! 3. ./.vitrine when no home directory can be determined

    use std::path::PathBuf;

    pub fn vitrine_home() -> PathBuf {
        if let Ok(home) = std::env::var("VITRINE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".vitrine"),
            |h| h.join(".config").join("vitrine"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vitrine_home().join("config.toml")
    }

    /// Returns the directory for rolling log files.
    pub fn logs_dir() -> PathBuf {
        vitrine_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub pinning: PinningConfig,
    pub layout: LayoutConfig,
    pub transitions: TransitionsConfig,
    pub navigation: NavigationConfig,
    pub intro: IntroConfig,
    pub form: FormConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            Self::parse(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Effective configuration as TOML, every key spelled out.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}
