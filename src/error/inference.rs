// Inference error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Inference error code constants
///
/// Runtime failures of the classifier engine. Distinct range from the
/// startup codes so a supervising process can tell "never started" from
/// "died mid-run".
///
/// Error code range: 2001-2002
pub struct InferenceErrorCodes {}

impl InferenceErrorCodes {
    /// The external engine failed to execute the model
    pub const ENGINE_FAILURE: i32 = 2001;

    /// The window handed to the engine had the wrong length
    pub const INPUT_SHAPE_MISMATCH: i32 = 2002;
}

/// Log an inference error with structured context
pub fn log_inference_error(err: &InferenceError, context: &str) {
    error!(
        "Inference error in {}: code={}, component=Classifier, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Inference-related errors
///
/// Raised when the classifier engine fails mid-run. These are fatal to the
/// process: the pipeline halts rather than emitting a result derived from
/// a failed call, and no zero-filled score vector is ever reported.
///
/// Error code range: 2001-2002
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// The engine reported an internal failure (allocation, kernel error)
    EngineFailure { reason: String },

    /// The flattened window length did not match the engine's input shape
    InputShapeMismatch { expected: usize, actual: usize },
}

impl ErrorCode for InferenceError {
    fn code(&self) -> i32 {
        match self {
            InferenceError::EngineFailure { .. } => InferenceErrorCodes::ENGINE_FAILURE,
            InferenceError::InputShapeMismatch { .. } => {
                InferenceErrorCodes::INPUT_SHAPE_MISMATCH
            }
        }
    }

    fn message(&self) -> String {
        match self {
            InferenceError::EngineFailure { reason } => {
                format!("Classifier engine failed: {}", reason)
            }
            InferenceError::InputShapeMismatch { expected, actual } => {
                format!(
                    "Classifier input shape mismatch: expected {} floats, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InferenceError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for InferenceError {}
