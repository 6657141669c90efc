// Classifier - inference adapter for motion window classification
//
// The pre-trained model and its execution engine live behind the
// [`Classifier`] trait: the pipeline hands over a fully-filled, flattened
// gyroscope window and gets back one score per class. Backends declare
// their input length and class count up front so shape and label-table
// contracts are validated at startup instead of mid-episode.
//
// `HeuristicClassifier` is the built-in reference backend. It scores the
// window from mean absolute angular rate, letting the pipeline, CLI, and
// tests run end-to-end without a model blob linked in.

use crate::error::InferenceError;

/// Number of output classes, matching the fixed label table
pub const CLASS_COUNT: usize = 6;

/// Labels matching the model output order
pub const LABELS: [&str; CLASS_COUNT] = ["idle", "wave", "updown", "circle", "shake", "flick"];

/// Trait implemented by classifier backends.
///
/// The input window is flattened row-major: sample 0's three gyroscope
/// channels first, then sample 1's, and so on.
pub trait Classifier {
    /// Flattened input length the engine expects (`rows * 3`)
    fn input_len(&self) -> usize;

    /// Number of per-class scores produced per inference
    fn class_count(&self) -> usize;

    /// Run one inference on a completed window
    ///
    /// # Arguments
    /// * `window` - Flattened `rows * 3` gyroscope tensor in arrival order
    ///
    /// # Returns
    /// Exactly `class_count()` scores in the fixed class order, or an
    /// [`InferenceError`] when the engine fails. A failed call never yields
    /// a partial or zero-filled score vector.
    fn infer(&mut self, window: &[f32]) -> Result<Vec<f32>, InferenceError>;
}

/// Index and score of the winning class in a score vector.
///
/// Returns `None` for an empty vector or when scores are not comparable
/// (NaN everywhere).
pub fn best_class(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(idx, &score)| (idx, score))
}

/// Reference backend scoring windows from mean absolute angular rate.
///
/// Buckets of increasing rotation intensity map onto the label table, with
/// the winning bucket taking most of the probability mass. Useful for
/// exercising the pipeline end-to-end; not a trained model.
pub struct HeuristicClassifier {
    input_len: usize,
}

impl HeuristicClassifier {
    pub fn new(input_len: usize) -> Self {
        Self { input_len }
    }
}

impl Classifier for HeuristicClassifier {
    fn input_len(&self) -> usize {
        self.input_len
    }

    fn class_count(&self) -> usize {
        CLASS_COUNT
    }

    fn infer(&mut self, window: &[f32]) -> Result<Vec<f32>, InferenceError> {
        if window.len() != self.input_len {
            return Err(InferenceError::InputShapeMismatch {
                expected: self.input_len,
                actual: window.len(),
            });
        }

        let mean_abs: f32 = window.iter().map(|v| v.abs()).sum::<f32>() / window.len() as f32;

        // Rotation-intensity buckets over the six labels. Winner gets 0.85,
        // the rest share the remainder.
        let winner = match mean_abs {
            v if v < 5.0 => 0,   // idle
            v if v < 30.0 => 1,  // wave
            v if v < 80.0 => 2,  // updown
            v if v < 150.0 => 3, // circle
            v if v < 250.0 => 4, // shake
            _ => 5,              // flick
        };

        let rest = 0.15 / (CLASS_COUNT - 1) as f32;
        let mut scores = vec![rest; CLASS_COUNT];
        scores[winner] = 0.85;

        log::debug!(
            "[Classifier] heuristic inference: mean |w| = {:.2}, winner = {}",
            mean_abs,
            LABELS[winner]
        );
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_table_matches_class_count() {
        assert_eq!(LABELS.len(), CLASS_COUNT);
    }

    #[test]
    fn test_heuristic_output_length_always_class_count() {
        let mut clf = HeuristicClassifier::new(6);
        for window in [
            vec![0.0; 6],
            vec![50.0; 6],
            vec![500.0, -500.0, 500.0, -500.0, 500.0, -500.0],
        ] {
            let scores = clf.infer(&window).unwrap();
            assert_eq!(scores.len(), CLASS_COUNT);
        }
    }

    #[test]
    fn test_heuristic_rejects_wrong_shape() {
        let mut clf = HeuristicClassifier::new(600);
        let err = clf.infer(&[0.0; 300]).unwrap_err();
        assert_eq!(
            err,
            InferenceError::InputShapeMismatch {
                expected: 600,
                actual: 300
            }
        );
    }

    #[test]
    fn test_heuristic_quiet_window_scores_idle() {
        let mut clf = HeuristicClassifier::new(6);
        let scores = clf.infer(&[0.1; 6]).unwrap();
        let (idx, score) = best_class(&scores).unwrap();
        assert_eq!(LABELS[idx], "idle");
        assert!(score > 0.5);
    }

    #[test]
    fn test_heuristic_energetic_window_scores_flick() {
        let mut clf = HeuristicClassifier::new(6);
        let scores = clf.infer(&[400.0; 6]).unwrap();
        let (idx, _) = best_class(&scores).unwrap();
        assert_eq!(LABELS[idx], "flick");
    }

    #[test]
    fn test_best_class_handles_empty_scores() {
        assert!(best_class(&[]).is_none());
    }

    #[test]
    fn test_scores_sum_to_one() {
        let mut clf = HeuristicClassifier::new(6);
        let scores = clf.infer(&[10.0; 6]).unwrap();
        let sum: f32 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }
}
