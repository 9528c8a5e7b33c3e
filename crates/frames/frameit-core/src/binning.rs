//! Space binning: label samples with their frame, group points per frame, summarize.
//!
//! The output is total over the partition. A frame that receives no samples is kept as
//! [`FrameBin::Empty`] so a renderer can emit one image per index without reindexing.

use serde::{Deserialize, Serialize};

use crate::config::{OutOfRangePolicy, Projection};
use crate::data::{Point3, TimeSpace};
use crate::error::{FrameError, Result};
use crate::partition::{FrameIndex, Partition};

/// Points observed in one frame, or the explicit empty marker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "points",
    rename_all = "snake_case",
    try_from = "RawFrameBin"
)]
pub enum FrameBin {
    #[default]
    Empty,
    /// Never empty; in original sample order.
    Points(Vec<Point3>),
}

/// Unchecked wire form of [`FrameBin`].
#[derive(Deserialize)]
#[serde(tag = "type", content = "points", rename_all = "snake_case")]
enum RawFrameBin {
    Empty,
    Points(Vec<Point3>),
}

impl TryFrom<RawFrameBin> for FrameBin {
    type Error = &'static str;

    fn try_from(raw: RawFrameBin) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawFrameBin::Empty => Ok(FrameBin::Empty),
            RawFrameBin::Points(points) if points.is_empty() => {
                Err("a points frame needs at least one point; use the empty marker")
            }
            RawFrameBin::Points(points) => Ok(FrameBin::Points(points)),
        }
    }
}

impl FrameBin {
    pub fn len(&self) -> usize {
        match self {
            FrameBin::Empty => 0,
            FrameBin::Points(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FrameBin::Empty)
    }

    pub fn points(&self) -> Option<&[Point3]> {
        match self {
            FrameBin::Empty => None,
            FrameBin::Points(points) => Some(points),
        }
    }

    fn push(&mut self, point: Point3) {
        match self {
            FrameBin::Empty => *self = FrameBin::Points(vec![point]),
            FrameBin::Points(points) => points.push(point),
        }
    }
}

/// Consumer of binned frames (typically a renderer adapter).
pub trait FrameSink {
    type Error;

    /// Called once per frame in ascending index order. `None` means "base scene only".
    fn frame(
        &mut self,
        index: FrameIndex,
        points: Option<&[Point3]>,
    ) -> std::result::Result<(), Self::Error>;
}

/// Ordered, total mapping from frame index to that frame's points.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceBins {
    frames: Vec<FrameBin>,
}

impl SpaceBins {
    /// `len` empty frames.
    pub fn empty(len: usize) -> Self {
        Self {
            frames: vec![FrameBin::Empty; len],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: FrameIndex) -> Option<&FrameBin> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrameIndex, &FrameBin)> + '_ {
        self.frames.iter().enumerate()
    }

    pub fn frames(&self) -> &[FrameBin] {
        &self.frames
    }

    /// Total number of binned points across all frames.
    pub fn point_count(&self) -> usize {
        self.frames.iter().map(FrameBin::len).sum()
    }

    /// Feed every frame to `sink` in ascending order, stopping at the first error.
    pub fn drive<S: FrameSink>(&self, sink: &mut S) -> std::result::Result<(), S::Error> {
        for (index, bin) in self.iter() {
            sink.frame(index, bin.points())?;
        }
        Ok(())
    }
}

impl std::ops::Index<FrameIndex> for SpaceBins {
    type Output = FrameBin;

    fn index(&self, index: FrameIndex) -> &FrameBin {
        &self.frames[index]
    }
}

/// Summary of a [`SpaceBins`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub with_events: usize,
    pub without_events: usize,
    pub max_events: usize,
}

impl Counts {
    pub fn from_bins(bins: &SpaceBins) -> Self {
        bins.frames.iter().fold(Counts::default(), |mut c, bin| {
            if bin.is_empty() {
                c.without_events += 1;
            } else {
                c.with_events += 1;
                c.max_events = c.max_events.max(bin.len());
            }
            c
        })
    }

    pub fn total(&self) -> usize {
        self.with_events + self.without_events
    }
}

/// Per-sample frame labels plus the number of samples that matched no frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Labels {
    pub frames: Vec<Option<FrameIndex>>,
    pub out_of_range: usize,
}

/// Assign every sample its frame index under `policy`.
pub fn label(
    samples: &TimeSpace,
    partition: &Partition,
    policy: OutOfRangePolicy,
) -> Result<Labels> {
    let mut labels = Labels {
        frames: Vec::with_capacity(samples.len()),
        out_of_range: 0,
    };
    for (i, &t) in samples.times().iter().enumerate() {
        let frame = match policy {
            OutOfRangePolicy::Drop => partition.locate(t),
            OutOfRangePolicy::Clamp => partition.locate_clamped(t),
            OutOfRangePolicy::Reject => match partition.locate(t) {
                Some(frame) => Some(frame),
                None => {
                    return Err(FrameError::OutOfRange {
                        sample: i,
                        t,
                        start: partition.start(),
                        end: partition.end(),
                    })
                }
            },
        };
        if frame.is_none() {
            labels.out_of_range += 1;
        } else if policy == OutOfRangePolicy::Clamp && partition.locate(t).is_none() {
            log::warn!("sample {i} at t={t} clamped into frame {frame:?}");
        }
        labels.frames.push(frame);
    }
    if labels.out_of_range > 0 {
        log::warn!(
            "{} of {} samples outside [{}, {}] dropped",
            labels.out_of_range,
            samples.len(),
            partition.start(),
            partition.end()
        );
    }
    Ok(labels)
}

/// Group projected points by label. `frames` is the partition length.
pub fn group(
    samples: &TimeSpace,
    labels: &[Option<FrameIndex>],
    frames: usize,
    projection: Projection,
) -> SpaceBins {
    let mut bins = SpaceBins::empty(frames);
    for ((t, point), label) in samples.iter().zip(labels) {
        let Some(index) = *label else { continue };
        if let Some(frame) = bins.frames.get_mut(index) {
            frame.push(projection.apply(t, point));
        }
    }
    bins
}

/// Bin `samples` against `partition`, silently dropping out-of-range samples.
pub fn bin(samples: &TimeSpace, partition: &Partition) -> (SpaceBins, Counts) {
    let frames: Vec<_> = samples
        .times()
        .iter()
        .map(|&t| partition.locate(t))
        .collect();
    let bins = group(samples, &frames, partition.len(), Projection::Xyz);
    let counts = Counts::from_bins(&bins);
    (bins, counts)
}
