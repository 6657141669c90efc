// Startup error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Startup error code constants
///
/// These constants provide a single source of truth for the codes the CLI
/// and any supervising process see when the pipeline fails before the
/// first episode.
///
/// Error code range: 1001-1004
pub struct InitErrorCodes {}

impl InitErrorCodes {
    /// Sensor could not be reached or configured at startup
    pub const SENSOR_UNAVAILABLE: i32 = 1001;

    /// Model blob could not be loaded or parsed
    pub const MODEL_LOAD_FAILED: i32 = 1002;

    /// Model input/output shape does not match the pipeline's window geometry
    pub const MODEL_SHAPE_MISMATCH: i32 = 1003;

    /// Label table length does not match the classifier's class count
    pub const LABEL_TABLE_MISMATCH: i32 = 1004;
}

/// Log a startup error with structured context
///
/// Logged fields include the numeric error code, the component, and the
/// human-readable message. Every fatal startup condition goes through here
/// exactly once before the process halts.
pub fn log_init_error(err: &InitError, context: &str) {
    error!(
        "Init error in {}: code={}, component=Pipeline, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Startup errors
///
/// These errors cover everything that can go wrong before the pipeline
/// polls its first sample: sensor bring-up, model loading, and contract
/// validation between the classifier and the reporter. All of them are
/// fatal; the process never enters the poll loop after one is raised.
///
/// Error code range: 1001-1004
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// Sensor could not be reached or configured
    SensorUnavailable { details: String },

    /// Model blob failed to load or parse
    ModelLoadFailed { reason: String },

    /// Model shape does not match the configured window geometry
    ModelShapeMismatch { expected: usize, actual: usize },

    /// Label table length differs from the classifier's class count
    LabelTableMismatch { labels: usize, classes: usize },
}

impl ErrorCode for InitError {
    fn code(&self) -> i32 {
        match self {
            InitError::SensorUnavailable { .. } => InitErrorCodes::SENSOR_UNAVAILABLE,
            InitError::ModelLoadFailed { .. } => InitErrorCodes::MODEL_LOAD_FAILED,
            InitError::ModelShapeMismatch { .. } => InitErrorCodes::MODEL_SHAPE_MISMATCH,
            InitError::LabelTableMismatch { .. } => InitErrorCodes::LABEL_TABLE_MISMATCH,
        }
    }

    fn message(&self) -> String {
        match self {
            InitError::SensorUnavailable { details } => {
                format!("Sensor unavailable: {}", details)
            }
            InitError::ModelLoadFailed { reason } => {
                format!("Failed to load classifier model: {}", reason)
            }
            InitError::ModelShapeMismatch { expected, actual } => {
                format!(
                    "Model input shape mismatch: pipeline window is {} floats, model expects {}",
                    expected, actual
                )
            }
            InitError::LabelTableMismatch { labels, classes } => {
                format!(
                    "Label table has {} entries but classifier reports {} classes",
                    labels, classes
                )
            }
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InitError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for InitError {}

impl From<std::io::Error> for InitError {
    fn from(err: std::io::Error) -> Self {
        InitError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
