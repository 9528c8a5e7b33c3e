//! FrameIt core (renderer-agnostic)
//!
//! Bins a series of 4D rotation-state samples by time into animation frames: one
//! point set per time window, with empty windows kept so a renderer never has gaps.
//! Rendering, file output and the state-series type itself live outside this crate;
//! they meet it through [`StateSource`] on the way in and [`FrameSink`] on the way out.

pub mod binning;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod partition;
pub mod report;

// Re-exports for consumers (renderer adapters)
pub use binning::{bin, Counts, FrameBin, FrameSink, SpaceBins};
pub use config::{FrameItConfig, OutOfRangePolicy, Projection};
pub use data::{Point3, Sample, StateSource, TimeSpace};
pub use engine::{frame_states, BinnedFrames, FrameIt};
pub use error::{FrameError, Result};
pub use partition::{build_intervals, FrameIndex, Interval, Partition, PartitionSpec};
pub use report::export_frames_json;
