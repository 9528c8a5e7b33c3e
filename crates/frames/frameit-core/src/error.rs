//! Error types for frame binning.

use serde::{Deserialize, Serialize};

/// Failures raised while configuring or running the binning engine.
///
/// Every variant is a configuration or contract problem; nothing here is
/// transient, so callers should not retry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FrameError {
    /// `start > end`, or a bound that is not a finite number.
    #[error("Invalid time range: start={start} end={end}")]
    InvalidRange { start: f64, end: f64 },

    /// Fewer than two frame edges cannot form an interval.
    #[error("Invalid frame count: {frames} (need at least 2 edges)")]
    InvalidFrameCount { frames: usize },

    /// The time and space columns of a state series differ in length.
    #[error("Malformed input: {times} time values but {points} spatial values")]
    MalformedInput { times: usize, points: usize },

    /// An engine built without a series needs both bounds.
    #[error("Time range not set: start={start:?} end={end:?}")]
    MissingRange {
        start: Option<f64>,
        end: Option<f64>,
    },

    /// A range bound had to be derived from an empty series.
    #[error("Cannot derive a time range from an empty series")]
    EmptySeries,

    /// Raised only under [`OutOfRangePolicy::Reject`](crate::config::OutOfRangePolicy::Reject).
    #[error("Sample {sample} at t={t} is out of range [{start}, {end}]")]
    OutOfRange {
        sample: usize,
        t: f64,
        start: f64,
        end: f64,
    },
}

pub type Result<T> = std::result::Result<T, FrameError>;
