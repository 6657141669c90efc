// WindowBuffer - fixed-capacity gyroscope window for one episode
//
// The buffer is allocated once at pipeline startup and reused across
// episodes: push_row fills it row by row at a write index, and the
// flattened tensor view only becomes readable when every row is present.
// Ownership enforces the non-overlap invariant: the fill path takes
// `&mut self` while the inference path borrows `&self`, so a partially
// written window can never be read while it is being filled.

use crate::config::WindowConfig;

/// Fixed-capacity window of gyroscope rows, flattened row-major.
///
/// Row i occupies `data[i*3 .. i*3+3]` as `[gx, gy, gz]` in arrival order.
pub struct WindowBuffer {
    data: Vec<f32>,
    capacity: usize,
    rows_filled: usize,
}

impl WindowBuffer {
    /// Allocate a window for `config.capacity` rows of 3 channels
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            data: vec![0.0; config.tensor_len()],
            capacity: config.capacity,
            rows_filled: 0,
        }
    }

    /// Number of rows the window holds when full
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rows written so far in the current episode (0..=capacity)
    pub fn rows_filled(&self) -> usize {
        self.rows_filled
    }

    /// Whether every row of the window has been written
    pub fn is_full(&self) -> bool {
        self.rows_filled == self.capacity
    }

    /// Append one gyroscope row at the current write index
    ///
    /// # Arguments
    /// * `row` - `[gx, gy, gz]` from the polled sample
    ///
    /// # Returns
    /// `true` when this row completed the window. Rows pushed into a full
    /// window are ignored; the engine must `reset()` first.
    pub fn push_row(&mut self, row: [f32; 3]) -> bool {
        if self.is_full() {
            log::warn!("[Window] push_row on full window ignored; reset() required");
            return true;
        }

        let base = self.rows_filled * WindowConfig::CHANNELS;
        self.data[base..base + WindowConfig::CHANNELS].copy_from_slice(&row);
        self.rows_filled += 1;
        self.is_full()
    }

    /// Borrow the flattened row-major tensor for inference
    ///
    /// # Returns
    /// `Some(&[f32])` of length `capacity * 3` only when the window is
    /// full. Partial windows are never readable, so the classifier cannot be
    /// handed a short tensor.
    pub fn as_tensor(&self) -> Option<&[f32]> {
        if self.is_full() {
            Some(&self.data)
        } else {
            None
        }
    }

    /// Reset the write index for the next episode
    ///
    /// The backing storage is retained and overwritten row by row; stale
    /// values are unreachable because `as_tensor` gates on fullness.
    pub fn reset(&mut self) {
        self.rows_filled = 0;
    }
}
