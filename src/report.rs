//! Result reporting for completed episodes.
//!
//! Purely presentational: maps class indices onto the fixed label table
//! and emits one line per class. The label table is validated against the
//! classifier's class count at construction, so a mismatch surfaces as a
//! startup error instead of a garbled report mid-run.

use std::fmt;
use std::io::{self, Write};

use crate::error::InitError;

/// Line-oriented score reporter over any writer.
///
/// Each episode produces `labels.len()` lines of `"<label>: <score>"`
/// (six decimal digits) followed by one blank line.
pub struct ResultReporter<W: Write> {
    labels: Vec<String>,
    writer: W,
}

impl<W: Write> fmt::Debug for ResultReporter<W> {
    // Manual impl: the writer carries no Debug bound.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultReporter")
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

impl<W: Write> ResultReporter<W> {
    /// Build a reporter, validating the label table against the classifier
    ///
    /// # Arguments
    /// * `labels` - Ordered class names matching the model output order
    /// * `class_count` - The classifier's declared output length
    ///
    /// # Returns
    /// `Err(InitError::LabelTableMismatch)` when the table and the
    /// classifier disagree on the number of classes.
    pub fn new(labels: &[&str], class_count: usize, writer: W) -> Result<Self, InitError> {
        if labels.len() != class_count {
            return Err(InitError::LabelTableMismatch {
                labels: labels.len(),
                classes: class_count,
            });
        }
        Ok(Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            writer,
        })
    }

    /// Emit one episode's score vector
    ///
    /// Scores arrive in table order; no system state is touched. Callers
    /// must pass exactly one score per label (the pipeline enforces this
    /// against the classifier's declared class count before reporting).
    pub fn report(&mut self, scores: &[f32]) -> io::Result<()> {
        debug_assert_eq!(
            scores.len(),
            self.labels.len(),
            "score vector length must match the label table"
        );
        for (label, score) in self.labels.iter().zip(scores.iter()) {
            writeln!(self.writer, "{}: {:.6}", label, score)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }

    /// The validated label table
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Consume the reporter and recover the writer (test inspection)
    pub fn into_writer(self) -> W {
        self.writer
    }
}
