// TriggerDetector - acceleration-energy episode gating
//
// This module decides when a motion episode begins. Each idle-state sample
// is scored by the L1 norm of its acceleration channels and compared
// against a configured threshold.
//
// Algorithm:
// 1. energy = |ax| + |ay| + |az|
// 2. Fire iff energy >= threshold AND no episode is currently collecting
//
// The L1 norm is deliberate: it stays monotonic with motion intensity
// while avoiding a square root on resource-constrained targets. The
// default threshold of 0.0 disables filtering entirely (every idle poll
// fires), which makes the threshold a tuning knob rather than a built-in
// screening policy.

use crate::config::TriggerConfig;
use crate::sensor::Sample;

/// TriggerDetector applies the acceleration-energy gate that starts episodes
pub struct TriggerDetector {
    threshold: f32,
}

impl TriggerDetector {
    /// Create a detector with explicit configuration parameters
    pub fn with_config(config: &TriggerConfig) -> Self {
        Self {
            threshold: config.energy_threshold,
        }
    }

    /// Create a detector with an explicit threshold value
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// The configured energy threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Evaluate one sample against the trigger condition
    ///
    /// # Arguments
    /// * `sample` - The polled sample to score
    /// * `episode_active` - Whether the pipeline is already collecting
    ///
    /// # Returns
    /// `true` iff the acceleration energy meets the threshold and no
    /// episode is active. Stateless: the episode-active flag is owned by
    /// the engine and passed in, so the detector can never start a second
    /// overlapping window.
    pub fn observe(&self, sample: &Sample, episode_active: bool) -> bool {
        if episode_active {
            return false;
        }
        sample.accel_energy() >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accel(ax: f32, ay: f32, az: f32) -> Sample {
        Sample {
            ax,
            ay,
            az,
            gx: 0.0,
            gy: 0.0,
            gz: 0.0,
        }
    }

    #[test]
    fn test_fires_at_or_above_threshold() {
        let detector = TriggerDetector::new(0.5);
        assert_eq!(detector.threshold(), 0.5);
        assert!(detector.observe(&accel(0.5, 0.0, 0.0), false));
        assert!(detector.observe(&accel(0.2, 0.2, 0.2), false));
    }

    #[test]
    fn test_does_not_fire_below_threshold() {
        let detector = TriggerDetector::new(0.5);
        assert!(!detector.observe(&accel(0.1, 0.1, 0.1), false));
        assert!(!detector.observe(&accel(0.0, 0.0, 0.0), false));
    }

    #[test]
    fn test_sign_is_ignored() {
        let detector = TriggerDetector::new(1.0);
        assert!(detector.observe(&accel(-0.4, -0.4, -0.4), false));
    }

    #[test]
    fn test_never_fires_while_episode_active() {
        let detector = TriggerDetector::new(0.0);
        // Even the permissive default threshold must not fire mid-episode.
        assert!(!detector.observe(&accel(5.0, 5.0, 5.0), true));
    }

    #[test]
    fn test_default_threshold_is_permissive() {
        let detector = TriggerDetector::with_config(&TriggerConfig::default());
        assert!(detector.observe(&accel(0.0, 0.0, 0.0), false));
    }
}
