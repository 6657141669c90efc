//! Integration tests for the motion classification pipeline
//!
//! These tests validate the full episode lifecycle across the public API,
//! including:
//! - Trigger gating (no episode below threshold)
//! - Exact-length window collection and row fidelity
//! - One-inference-per-episode and idempotent reset
//! - Startup error surface (shape and label-table contracts)
//! - Line-oriented report formatting

use std::cell::RefCell;
use std::rc::Rc;

use motion_classifier::analysis::classifier::CLASS_COUNT;
use motion_classifier::error::{InferenceError, InitError};
use motion_classifier::sensor::ReplaySource;
use motion_classifier::{
    AppConfig, Classifier, EpisodeState, Pipeline, ResultReporter, Sample, LABELS,
};

/// Classifier backend that records every window it is handed.
struct RecordingClassifier {
    input_len: usize,
    calls: Rc<RefCell<Vec<Vec<f32>>>>,
    scores: Vec<f32>,
}

impl RecordingClassifier {
    fn new(input_len: usize) -> Self {
        let mut scores = vec![0.02; CLASS_COUNT];
        scores[1] = 0.90;
        Self {
            input_len,
            calls: Rc::new(RefCell::new(Vec::new())),
            scores,
        }
    }
}

impl Classifier for RecordingClassifier {
    fn input_len(&self) -> usize {
        self.input_len
    }

    fn class_count(&self) -> usize {
        CLASS_COUNT
    }

    fn infer(&mut self, window: &[f32]) -> Result<Vec<f32>, InferenceError> {
        self.calls.borrow_mut().push(window.to_vec());
        Ok(self.scores.clone())
    }
}

fn quiet_accel(energy: f32) -> Sample {
    Sample {
        ax: energy,
        ay: 0.0,
        az: 0.0,
        gx: 0.0,
        gy: 0.0,
        gz: 0.0,
    }
}

fn gyro_row(gx: f32, gy: f32, gz: f32) -> Sample {
    Sample {
        ax: 0.0,
        ay: 0.0,
        az: 0.0,
        gx,
        gy,
        gz,
    }
}

fn config_with(threshold: f32, capacity: usize) -> AppConfig {
    let mut config = AppConfig::default();
    config.trigger.energy_threshold = threshold;
    config.window.capacity = capacity;
    config
}

/// 200 acceleration samples all below threshold 0.5: no episode starts
/// and the classifier is never invoked.
#[test]
fn test_below_threshold_feed_never_reaches_classifier() {
    let config = config_with(0.5, 200);
    let classifier = RecordingClassifier::new(config.window.tensor_len());
    let calls = Rc::clone(&classifier.calls);
    let mut pipeline = Pipeline::new(&config, Box::new(classifier)).unwrap();
    let mut reporter = ResultReporter::new(&LABELS, CLASS_COUNT, Vec::new()).unwrap();

    let samples = (0..200).map(|_| quiet_accel(0.4)).collect::<Vec<_>>();
    let mut source = ReplaySource::from_samples(samples);

    let episodes = pipeline.run(&mut source, &mut reporter).unwrap();

    assert_eq!(episodes, 0);
    assert!(calls.borrow().is_empty(), "classifier must never be invoked");
    assert!(reporter.into_writer().is_empty(), "no report may be emitted");
}

/// One sample with L1 norm 1.2 triggers, then exactly 200 gyroscope
/// readings {1.0, 0.0, 0.0} fill the window. The classifier receives a
/// 200x3 buffer where every row is [1.0, 0.0, 0.0]; afterwards the state
/// is idle again and 6 labeled scores were emitted.
#[test]
fn test_triggered_episode_collects_exact_window_and_reports() {
    let config = config_with(0.5, 200);
    let classifier = RecordingClassifier::new(config.window.tensor_len());
    let calls = Rc::clone(&classifier.calls);
    let mut pipeline = Pipeline::new(&config, Box::new(classifier)).unwrap();
    let mut reporter = ResultReporter::new(&LABELS, CLASS_COUNT, Vec::new()).unwrap();

    let mut samples = vec![Sample {
        ax: 0.4,
        ay: 0.4,
        az: 0.4, // L1 norm 1.2 >= 0.5
        gx: 777.0,
        gy: 777.0,
        gz: 777.0, // must not leak into the window
    }];
    samples.extend((0..200).map(|_| gyro_row(1.0, 0.0, 0.0)));
    let mut source = ReplaySource::from_samples(samples);

    let episodes = pipeline.run(&mut source, &mut reporter).unwrap();
    assert_eq!(episodes, 1);
    assert_eq!(pipeline.state(), EpisodeState::Idle);
    assert_eq!(pipeline.rows_collected(), 0);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1, "exactly one inference per episode");
    assert_eq!(calls[0].len(), 600, "row count invariant: 200 x 3");
    for row in calls[0].chunks(3) {
        assert_eq!(row, &[1.0, 0.0, 0.0]);
    }

    let out = String::from_utf8(reporter.into_writer()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), CLASS_COUNT + 1, "one line per class + blank");
    assert_eq!(lines[CLASS_COUNT], "");
    assert!(lines[0].starts_with("idle: "));
    assert!(lines[1].starts_with("wave: 0.900000"));
    assert!(out.ends_with("\n\n"), "report ends with a blank line");
}

/// A classifier whose declared shape does not match the window geometry
/// is rejected at startup, before any polling.
#[test]
fn test_shape_mismatch_halts_before_any_polling() {
    let config = config_with(0.5, 200);
    let classifier = RecordingClassifier::new(375); // wrong model shape
    let calls = Rc::clone(&classifier.calls);

    let err = Pipeline::new(&config, Box::new(classifier)).unwrap_err();
    assert_eq!(
        err,
        InitError::ModelShapeMismatch {
            expected: 600,
            actual: 375
        }
    );
    assert!(calls.borrow().is_empty());
}

/// Round-trip: the label table length must equal the classifier's output
/// length; a short table is a startup contract violation.
#[test]
fn test_label_table_contract_checked_at_startup() {
    let err = ResultReporter::new(&LABELS[..4], CLASS_COUNT, Vec::new()).unwrap_err();
    assert_eq!(
        err,
        InitError::LabelTableMismatch {
            labels: 4,
            classes: CLASS_COUNT
        }
    );

    assert!(ResultReporter::new(&LABELS, CLASS_COUNT, Vec::new()).is_ok());
}

/// Back-to-back episodes never overlap: each gets its own full window and
/// its own single inference, with an idle gap in between.
#[test]
fn test_consecutive_episodes_do_not_overlap() {
    let config = config_with(0.5, 2);
    let classifier = RecordingClassifier::new(config.window.tensor_len());
    let calls = Rc::clone(&classifier.calls);
    let mut pipeline = Pipeline::new(&config, Box::new(classifier)).unwrap();
    let mut reporter = ResultReporter::new(&LABELS, CLASS_COUNT, Vec::new()).unwrap();

    let samples = vec![
        quiet_accel(1.0),
        gyro_row(1.0, 1.0, 1.0),
        gyro_row(2.0, 2.0, 2.0),
        quiet_accel(0.1), // idle gap, below threshold
        quiet_accel(1.0),
        gyro_row(3.0, 3.0, 3.0),
        gyro_row(4.0, 4.0, 4.0),
    ];
    let mut source = ReplaySource::from_samples(samples);

    let episodes = pipeline.run(&mut source, &mut reporter).unwrap();
    assert_eq!(episodes, 2);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
    assert_eq!(calls[1], vec![3.0, 3.0, 3.0, 4.0, 4.0, 4.0]);
}

/// An engine failure mid-run is process-fatal: run() returns the error and
/// no report is emitted for the failed episode.
#[test]
fn test_engine_failure_halts_run_without_report() {
    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn input_len(&self) -> usize {
            6
        }

        fn class_count(&self) -> usize {
            CLASS_COUNT
        }

        fn infer(&mut self, _window: &[f32]) -> Result<Vec<f32>, InferenceError> {
            Err(InferenceError::EngineFailure {
                reason: "tensor arena allocation failed".to_string(),
            })
        }
    }

    let config = config_with(0.5, 2);
    let mut pipeline = Pipeline::new(&config, Box::new(FailingClassifier)).unwrap();
    let mut reporter = ResultReporter::new(&LABELS, CLASS_COUNT, Vec::new()).unwrap();

    let samples = vec![
        quiet_accel(1.0),
        gyro_row(1.0, 0.0, 0.0),
        gyro_row(0.0, 1.0, 0.0),
    ];
    let mut source = ReplaySource::from_samples(samples);

    let err = pipeline.run(&mut source, &mut reporter).unwrap_err();
    assert!(err.downcast_ref::<InferenceError>().is_some());
    assert!(reporter.into_writer().is_empty());
}

/// A truncated source shuts the loop down cleanly mid-episode without a
/// partial window ever reaching the classifier.
#[test]
fn test_partial_window_is_never_submitted() {
    let config = config_with(0.5, 200);
    let classifier = RecordingClassifier::new(config.window.tensor_len());
    let calls = Rc::clone(&classifier.calls);
    let mut pipeline = Pipeline::new(&config, Box::new(classifier)).unwrap();
    let mut reporter = ResultReporter::new(&LABELS, CLASS_COUNT, Vec::new()).unwrap();

    let mut samples = vec![quiet_accel(1.0)];
    samples.extend((0..150).map(|_| gyro_row(1.0, 0.0, 0.0))); // short of 200
    let mut source = ReplaySource::from_samples(samples);

    let episodes = pipeline.run(&mut source, &mut reporter).unwrap();
    assert_eq!(episodes, 0);
    assert!(calls.borrow().is_empty());
    assert_eq!(pipeline.state(), EpisodeState::Collecting);
    assert_eq!(pipeline.rows_collected(), 150);
}
