//! Replay sensor source backed by JSON fixtures.
//!
//! This loads recorded sample streams from disk and feeds them through the
//! pipeline exactly as a live sensor would, supporting CI and QA workflows
//! without hardware attached.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{Sample, SensorSource};

/// JSON schema for a recorded sample stream.
///
/// Each entry in `samples` is one 6-float poll: `[ax, ay, az, gx, gy, gz]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayFixture {
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub samples: Vec<[f32; 6]>,
}

impl ReplayFixture {
    /// Load a fixture from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading replay fixture {:?}", path.as_ref()))?;
        let fixture: ReplayFixture = serde_json::from_str(&contents)
            .with_context(|| format!("parsing replay fixture {:?}", path.as_ref()))?;
        log::info!(
            "[Replay] Loaded fixture '{}' with {} samples",
            fixture.name,
            fixture.samples.len()
        );
        Ok(fixture)
    }
}

/// Sensor source that replays a fixed sequence of samples, then shuts down.
pub struct ReplaySource {
    samples: std::vec::IntoIter<[f32; 6]>,
}

impl ReplaySource {
    pub fn new(fixture: ReplayFixture) -> Self {
        Self {
            samples: fixture.samples.into_iter(),
        }
    }

    /// Build a source directly from raw samples (test scripting).
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let rows = samples
            .into_iter()
            .map(|s| [s.ax, s.ay, s.az, s.gx, s.gy, s.gz])
            .collect::<Vec<_>>();
        Self {
            samples: rows.into_iter(),
        }
    }
}

impl SensorSource for ReplaySource {
    fn poll(&mut self) -> Option<Sample> {
        let [ax, ay, az, gx, gy, gz] = self.samples.next()?;
        Some(Sample {
            ax,
            ay,
            az,
            gx,
            gy,
            gz,
        })
    }
}
