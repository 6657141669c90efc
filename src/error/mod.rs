// Error types for the motion classification pipeline
//
// This module defines custom error types for startup and inference
// operations, providing structured error handling with numeric error
// codes suitable for exit-status mapping and log scraping.

mod inference;
mod init;

pub use inference::{log_inference_error, InferenceError, InferenceErrorCodes};
pub use init::{log_init_error, InitError, InitErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the CLI boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
