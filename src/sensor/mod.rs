//! Sensor source abstractions for the motion pipeline.
//!
//! The pipeline never talks to hardware directly: it is driven through the
//! [`SensorSource`] trait so tests and the CLI can replace the physical IMU
//! with scripted or replayed data. A hardware implementation wraps its bus
//! driver behind `poll()` and blocks/retries internally until a fresh
//! reading is available; a stalled sensor stalls the pipeline by design.

use serde::{Deserialize, Serialize};

mod replay;

pub use replay::{ReplayFixture, ReplaySource};

/// One 6-axis IMU reading: 3-axis acceleration (g) and angular rate (°/s).
///
/// Ephemeral by design: the pipeline reads the acceleration channels for
/// trigger evaluation or the gyroscope channels for window collection, then
/// drops the sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
}

impl Sample {
    /// L1 norm of the acceleration channels.
    ///
    /// A cheap proxy for motion intensity: monotonic with movement energy
    /// without paying for a square root on constrained targets.
    pub fn accel_energy(&self) -> f32 {
        self.ax.abs() + self.ay.abs() + self.az.abs()
    }

    /// Gyroscope channels in arrival order, the row shape stored per
    /// window slot.
    pub fn gyro(&self) -> [f32; 3] {
        [self.gx, self.gy, self.gz]
    }
}

/// Trait implemented by sample producers feeding the pipeline.
///
/// `poll` blocks until a fresh reading is available; there is no timeout
/// and no backoff, matching the single-source busy-poll model. Returning
/// `None` means the source has shut down for good (a replay file ran out,
/// a channel closed); the run loop exits cleanly in that case. Hardware
/// sources never return `None`.
pub trait SensorSource {
    fn poll(&mut self) -> Option<Sample>;
}
