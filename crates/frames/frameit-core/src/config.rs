//! Engine configuration for frame binning.

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// Default number of frame edges (yields `DEFAULT_FRAMES - 1` frames).
pub const DEFAULT_FRAMES: usize = 100;

/// What to do with a sample whose time lies outside `[start, end]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Exclude the sample from every frame and from the counts.
    #[default]
    Drop,
    /// Pin early samples to the first frame and late samples to the last.
    Clamp,
    /// Fail the run on the first out-of-range sample.
    Reject,
}

/// Which 3-tuple is stored for every binned sample.
///
/// Labelling always uses the time column; the projection only decides what
/// the renderer receives as coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    #[default]
    Xyz,
    Txy,
    Tx,
    Ty,
    Tz,
}

impl Projection {
    #[inline]
    pub fn apply(self, t: f64, [x, y, z]: [f64; 3]) -> [f64; 3] {
        match self {
            Projection::Xyz => [x, y, z],
            Projection::Txy => [t, x, y],
            Projection::Tx => [t, x, 0.0],
            Projection::Ty => [t, y, 0.0],
            Projection::Tz => [t, z, 0.0],
        }
    }
}

/// Configuration for one binning engine.
///
/// `start`/`end` left as `None` are derived from the series handed to
/// [`FrameIt::from_states`](crate::engine::FrameIt::from_states).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameItConfig {
    pub start: Option<f64>,
    pub end: Option<f64>,
    /// Number of frame edges, not frames.
    pub frames: usize,
    /// Suppress per-frame reporting.
    pub quiet: bool,
    pub out_of_range: OutOfRangePolicy,
    pub projection: Projection,
}

impl Default for FrameItConfig {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            frames: DEFAULT_FRAMES,
            quiet: false,
            out_of_range: OutOfRangePolicy::Drop,
            projection: Projection::Xyz,
        }
    }
}

impl FrameItConfig {
    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_frames(mut self, frames: usize) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Check the parts of the config that do not depend on sample data.
    pub fn validate(&self) -> Result<()> {
        if self.frames < 2 {
            return Err(FrameError::InvalidFrameCount {
                frames: self.frames,
            });
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            validate_range(start, end)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_range(start: f64, end: f64) -> Result<()> {
    if !start.is_finite() || !end.is_finite() || start > end {
        return Err(FrameError::InvalidRange { start, end });
    }
    Ok(())
}
