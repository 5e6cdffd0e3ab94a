//! Experience tuning loaded from TOML
//!
//! Every field has a default matching the shipped experience, so an empty
//! file (or no file at all) is a valid configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExperienceConfig {
    pub gesture: GestureConfig,
    pub proximity: ProximityConfig,
    pub timing: TimingConfig,
    pub scene: SceneConfig,
}

/// Fist hysteresis band
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// A closed hand opens once strength drops below this
    pub open_threshold: f32,
    /// An open hand closes once strength rises above this
    pub close_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            open_threshold: 0.2,
            close_threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProximityConfig {
    /// Meters between an input and the bait that count as grabbing it
    pub bait_grab_range: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            bait_grab_range: 0.2,
        }
    }
}

/// Durations in seconds
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub camera_flicker: f32,
    pub tool_countdown: f32,
    pub tool_flicker_ramp: f32,
    pub bait_spawn: f32,
    pub passthrough_reset: f32,
    pub passthrough_reveal: f32,
    pub secondary_tool_unlock: f32,
    pub unlock_haptic: f32,
    pub desaturation_delay: f32,
    pub desaturation_ramp: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            camera_flicker: 0.5,
            tool_countdown: 0.0,
            tool_flicker_ramp: 0.5,
            bait_spawn: 2.0,
            passthrough_reset: 0.1,
            passthrough_reveal: 5.0,
            secondary_tool_unlock: 10.0,
            unlock_haptic: 1.0,
            desaturation_delay: 4.0,
            desaturation_ramp: 4.0,
        }
    }
}

impl TimingConfig {
    fn entries(&self) -> [(&'static str, f32); 10] {
        [
            ("camera_flicker", self.camera_flicker),
            ("tool_countdown", self.tool_countdown),
            ("tool_flicker_ramp", self.tool_flicker_ramp),
            ("bait_spawn", self.bait_spawn),
            ("passthrough_reset", self.passthrough_reset),
            ("passthrough_reveal", self.passthrough_reveal),
            ("secondary_tool_unlock", self.secondary_tool_unlock),
            ("unlock_haptic", self.unlock_haptic),
            ("desaturation_delay", self.desaturation_delay),
            ("desaturation_ramp", self.desaturation_ramp),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Extra ticks to wait after the deferred scene-load flag is observed
    pub settle_ticks: u32,
}

/// Seconds to a `Duration`, treating negatives as zero
pub fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value.max(0.0)).unwrap_or(Duration::MAX)
}

impl ExperienceConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded experience config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let open_threshold = self.gesture.open_threshold;
        let close_threshold = self.gesture.close_threshold;
        if !(0.0..=1.0).contains(&open_threshold) || !(0.0..=1.0).contains(&close_threshold) {
            return Err(ConfigError::Invalid(
                "gesture thresholds must lie in [0, 1]".to_string(),
            ));
        }
        if open_threshold >= close_threshold {
            return Err(ConfigError::Invalid(format!(
                "open threshold {open_threshold} must be below close threshold {close_threshold}"
            )));
        }
        if self.proximity.bait_grab_range <= 0.0 {
            return Err(ConfigError::Invalid(
                "bait grab range must be positive".to_string(),
            ));
        }
        for (name, value) in self.timing.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "timing.{name} must be a non-negative number of seconds"
                )));
            }
        }
        Ok(())
    }
}
