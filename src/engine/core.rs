//! Pipeline: the trigger-and-window episode state machine.
//!
//! This struct owns every piece of per-episode state (the trigger
//! detector, the reusable window buffer, the boxed classifier backend, and
//! the Idle/Collecting flag) and is driven one sample at a time by a
//! single control thread. Stages receive state by reference from here;
//! there is no shared mutable state anywhere else, so the fill-window and
//! read-window phases can never overlap.

use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};

use crate::analysis::classifier::{best_class, Classifier};
use crate::analysis::{TriggerDetector, WindowBuffer};
use crate::config::AppConfig;
use crate::error::{log_inference_error, InferenceError, InitError};
use crate::report::ResultReporter;
use crate::sensor::{Sample, SensorSource};

/// Episode lifecycle states.
///
/// `Idle` evaluates acceleration samples for the trigger; `Collecting`
/// appends gyroscope rows until the window is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeState {
    Idle,
    Collecting,
}

/// The motion classification pipeline.
///
/// Strictly sequential: poll, advance the state machine, maybe infer,
/// maybe report, poll again. Exactly one inference fires per completed
/// episode, and the window handed to the classifier always has exactly
/// `window.capacity()` rows.
pub struct Pipeline {
    trigger: TriggerDetector,
    window: WindowBuffer,
    classifier: Box<dyn Classifier>,
    confidence_floor: f32,
    state: EpisodeState,
    episodes_completed: u64,
}

impl fmt::Debug for Pipeline {
    // Manual impl: the boxed classifier backend has no Debug bound.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("state", &self.state)
            .field("rows_collected", &self.window.rows_filled())
            .field("episodes_completed", &self.episodes_completed)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Build a pipeline, validating the classifier against the window shape
    ///
    /// # Arguments
    /// * `config` - Application configuration (trigger, window, classifier)
    /// * `classifier` - Inference backend; its declared input length must
    ///   equal the configured window's flattened tensor length
    ///
    /// # Returns
    /// `Err(InitError::ModelShapeMismatch)` when the model and window
    /// geometry disagree. Fatal at startup, before any polling.
    pub fn new(config: &AppConfig, classifier: Box<dyn Classifier>) -> Result<Self, InitError> {
        let tensor_len = config.window.tensor_len();
        if classifier.input_len() != tensor_len {
            return Err(InitError::ModelShapeMismatch {
                expected: tensor_len,
                actual: classifier.input_len(),
            });
        }

        let trigger = TriggerDetector::with_config(&config.trigger);
        log::info!(
            "[Pipeline] window {}x{}, {} classes, trigger threshold {}",
            config.window.capacity,
            crate::config::WindowConfig::CHANNELS,
            classifier.class_count(),
            trigger.threshold()
        );

        Ok(Self {
            trigger,
            window: WindowBuffer::new(&config.window),
            classifier,
            confidence_floor: config.classifier.confidence_floor,
            state: EpisodeState::Idle,
            episodes_completed: 0,
        })
    }

    /// Current episode state
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    /// Rows collected in the active episode (0 while idle)
    pub fn rows_collected(&self) -> usize {
        self.window.rows_filled()
    }

    /// Episodes classified since startup
    pub fn episodes_completed(&self) -> u64 {
        self.episodes_completed
    }

    /// Number of per-class scores each completed episode produces
    pub fn class_count(&self) -> usize {
        self.classifier.class_count()
    }

    /// Advance the state machine by one polled sample
    ///
    /// While idle, the sample's acceleration channels feed the trigger;
    /// while collecting, its gyroscope channels fill exactly one window
    /// row. The trigger sample itself is not part of the window: the
    /// trigger reads acceleration, the classified signal is angular rate.
    ///
    /// # Returns
    /// * `Ok(None)` - No completed episode on this sample
    /// * `Ok(Some(scores))` - The window filled; exactly one inference ran
    ///   and the episode reset to idle
    /// * `Err(InferenceError)` - The engine failed; the episode is lost and
    ///   the caller must halt (process-fatal policy)
    pub fn step(&mut self, sample: Sample) -> Result<Option<Vec<f32>>, InferenceError> {
        match self.state {
            EpisodeState::Idle => {
                if self.trigger.observe(&sample, false) {
                    self.window.reset();
                    self.state = EpisodeState::Collecting;
                    log::debug!(
                        "[Pipeline] episode triggered (energy {:.3})",
                        sample.accel_energy()
                    );
                }
                Ok(None)
            }
            EpisodeState::Collecting => {
                if !self.window.push_row(sample.gyro()) {
                    return Ok(None);
                }

                let scores = {
                    let tensor = self
                        .window
                        .as_tensor()
                        .expect("window is full after push_row returned true");
                    self.classifier.infer(tensor)?
                };

                if scores.len() != self.classifier.class_count() {
                    return Err(InferenceError::EngineFailure {
                        reason: format!(
                            "engine returned {} scores, declared {} classes",
                            scores.len(),
                            self.classifier.class_count()
                        ),
                    });
                }

                // Reset before handing scores out so the next trigger sees
                // a clean idle state even if the caller drops the scores.
                self.window.reset();
                self.state = EpisodeState::Idle;
                self.episodes_completed += 1;

                if let Some((idx, score)) = best_class(&scores) {
                    if score >= self.confidence_floor {
                        log::info!(
                            "[Pipeline] episode {}: class {} ({:.1}%)",
                            self.episodes_completed,
                            idx,
                            score * 100.0
                        );
                    }
                }

                Ok(Some(scores))
            }
        }
    }

    /// Drive the pipeline from a sensor source until it shuts down
    ///
    /// The unbounded poll loop: suspension happens only inside
    /// `source.poll()` (a blocking busy-wait on hardware). There is no
    /// timeout and no cancellation, so a stalled source stalls the pipeline.
    /// An inference failure is process-fatal: the error is logged once and
    /// propagated, and no report is emitted for the failed episode.
    ///
    /// # Returns
    /// Total episodes completed when the source shut down cleanly.
    pub fn run<S, W>(
        &mut self,
        source: &mut S,
        reporter: &mut ResultReporter<W>,
    ) -> Result<u64>
    where
        S: SensorSource,
        W: Write,
    {
        log::info!("[Pipeline] entering poll loop");

        while let Some(sample) = source.poll() {
            let outcome = self.step(sample).map_err(|err| {
                log_inference_error(&err, "poll loop");
                err
            })?;

            if let Some(scores) = outcome {
                reporter
                    .report(&scores)
                    .context("emitting episode report")?;
            }
        }

        log::info!(
            "[Pipeline] source shut down after {} episodes",
            self.episodes_completed
        );
        Ok(self.episodes_completed)
    }
}
