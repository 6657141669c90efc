//! Pipeline orchestration layer.

pub mod core;

pub use core::{EpisodeState, Pipeline};
