// Motion Classifier Core - trigger-and-window inertial pipeline
// Episode-gated gyroscope classification over an injectable sensor source

// Module declarations
pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod sensor;

// Re-exports for convenience
pub use analysis::{Classifier, HeuristicClassifier, TriggerDetector, WindowBuffer, LABELS};
pub use config::AppConfig;
pub use engine::{EpisodeState, Pipeline};
pub use report::ResultReporter;
pub use sensor::{Sample, SensorSource};
