//! Configuration management for dynamic parameter tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling fast iteration without recompilation. The trigger threshold,
//! window geometry, and classifier parameters can all be adjusted via
//! the config file for rapid experimentation on recorded motion data.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub trigger: TriggerConfig,
    pub window: WindowConfig,
    pub classifier: ClassifierConfig,
}

/// Motion trigger parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Acceleration energy threshold (L1 norm, in g) that starts an episode.
    /// The default of 0.0 disables filtering: any polled sample triggers
    /// while the pipeline is idle. This is a tuning knob, not a constant.
    pub energy_threshold: f32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            energy_threshold: 0.0,
        }
    }
}

/// Collection window geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Number of gyroscope samples collected per episode
    pub capacity: usize,
}

impl WindowConfig {
    /// Gyroscope channels per collected sample (x, y, z)
    pub const CHANNELS: usize = 3;

    /// Flattened tensor length handed to the classifier
    pub fn tensor_len(&self) -> usize {
        self.capacity * Self::CHANNELS
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { capacity: 200 }
    }
}

/// Classifier backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum winning score required before an episode report names a
    /// best class. 0.0 reports whatever the engine produced.
    pub confidence_floor: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            confidence_floor: 0.0,
        }
    }
}

impl Default for AppConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            trigger: TriggerConfig::default(),
            window: WindowConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the defaults when the file is missing
    /// or fails to parse (both are logged, neither is fatal).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.trigger.energy_threshold, 0.0);
        assert_eq!(config.window.capacity, 200);
        assert_eq!(config.window.tensor_len(), 600);
        assert_eq!(config.classifier.confidence_floor, 0.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.trigger.energy_threshold,
            config.trigger.energy_threshold
        );
        assert_eq!(parsed.window.capacity, config.window.capacity);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_file("/nonexistent/motion_config.json");
        assert_eq!(config.window.capacity, 200);
    }
}
