//! Time-axis partitioning.
//!
//! Model:
//! - `frames` evenly spaced edges over `[start, end]` inclusive; the first edge is
//!   exactly `start` and the last exactly `end`.
//! - Adjacent edges form `frames - 1` intervals in ascending order.
//! - Interval 0 is closed on both ends, every later interval is `(lo, hi]`, so a time
//!   sitting on an internal edge belongs to the earlier interval.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::validate_range;
use crate::error::{FrameError, Result};

/// 0-based position of an interval within a partition.
pub type FrameIndex = usize;

/// One frame's time window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
    /// Only the first interval of a partition includes its lower edge.
    pub closed_lo: bool,
}

impl Interval {
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        let above = if self.closed_lo { t >= self.lo } else { t > self.lo };
        above && t <= self.hi
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.closed_lo { '[' } else { '(' };
        write!(f, "{open}{}, {}]", self.lo, self.hi)
    }
}

/// `count` evenly spaced values over `[start, end]`, endpoints exact.
///
/// Edge `i` is `start + span * i / div`, never an accumulated step. When `end - start`
/// overflows, edges are blended as `start * (1 - f) + end * f` instead.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let div = (count - 1) as f64;
            let span = end - start;
            let mut edges: Vec<f64> = if span.is_finite() {
                (0..count)
                    .map(|i| start + span * (i as f64) / div)
                    .collect()
            } else {
                (0..count)
                    .map(|i| {
                        let f = i as f64 / div;
                        start * (1.0 - f) + end * f
                    })
                    .collect()
            };
            edges[count - 1] = end;
            edges
        }
    }
}

/// Build the ordered intervals for `(start, end, frames)`.
pub fn build_intervals(start: f64, end: f64, frames: usize) -> Result<Vec<Interval>> {
    Ok(Partition::new(start, end, frames)?.intervals)
}

/// Serialized form of a [`Partition`]; edges and intervals are rebuilt on load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartitionSpec {
    pub start: f64,
    pub end: f64,
    pub frames: usize,
}

/// An immutable linear partition of a time range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PartitionSpec", into = "PartitionSpec")]
pub struct Partition {
    start: f64,
    end: f64,
    edges: Vec<f64>,
    intervals: Vec<Interval>,
}

impl Partition {
    pub fn new(start: f64, end: f64, frames: usize) -> Result<Self> {
        if frames < 2 {
            return Err(FrameError::InvalidFrameCount { frames });
        }
        validate_range(start, end)?;

        let edges = linspace(start, end, frames);
        let intervals = edges
            .windows(2)
            .enumerate()
            .map(|(i, w)| Interval {
                lo: w[0],
                hi: w[1],
                closed_lo: i == 0,
            })
            .collect();
        log::debug!("partition: [{start}, {end}] into {} frames", frames - 1);

        Ok(Self {
            start,
            end,
            edges,
            intervals,
        })
    }

    pub fn spec(&self) -> PartitionSpec {
        PartitionSpec {
            start: self.start,
            end: self.end,
            frames: self.edges.len(),
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Number of frames (intervals), always `edges().len() - 1`.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn get(&self, index: FrameIndex) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// Frame index for time `t`, or `None` when `t` lies outside `[start, end]` or is NaN.
    pub fn locate(&self, t: f64) -> Option<FrameIndex> {
        if t.is_nan() || t < self.start || t > self.end {
            return None;
        }
        if t == self.start {
            return Some(0);
        }
        // First interval whose upper edge reaches t; upper edges are ascending.
        let idx = self.edges[1..].partition_point(|&hi| hi < t);
        Some(idx.min(self.len() - 1))
    }

    /// Like [`locate`](Self::locate), but pins finite out-of-range times to the nearest end.
    /// Non-finite times match no frame.
    pub fn locate_clamped(&self, t: f64) -> Option<FrameIndex> {
        if !t.is_finite() {
            return None;
        }
        if t < self.start {
            Some(0)
        } else if t > self.end {
            Some(self.len() - 1)
        } else {
            self.locate(t)
        }
    }
}

impl TryFrom<PartitionSpec> for Partition {
    type Error = FrameError;

    fn try_from(spec: PartitionSpec) -> Result<Self> {
        Partition::new(spec.start, spec.end, spec.frames)
    }
}

impl From<Partition> for PartitionSpec {
    fn from(partition: Partition) -> Self {
        partition.spec()
    }
}
