//! Motion analysis: trigger detection, window accumulation, classification.
//!
//! The modules here form the per-sample hot path: [`TriggerDetector`] gates
//! episode starts on acceleration energy, [`WindowBuffer`] accumulates the
//! fixed-length gyroscope window, and the [`Classifier`] trait hands the
//! completed window to the inference engine.

pub mod classifier;
pub mod trigger;
pub mod window;

pub use classifier::{Classifier, HeuristicClassifier, CLASS_COUNT, LABELS};
pub use trigger::TriggerDetector;
pub use window::WindowBuffer;
