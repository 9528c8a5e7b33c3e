//! Input data model: samples, state sources and the split time/space columns.

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// Spatial coordinates stored per binned sample.
pub type Point3 = [f64; 3];

/// One observation of a 4D rotation state: time plus three spatial components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn new(t: f64, x: f64, y: f64, z: f64) -> Self {
        Self { t, x, y, z }
    }

    #[inline]
    pub fn xyz(&self) -> Point3 {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 4]> for Sample {
    fn from([t, x, y, z]: [f64; 4]) -> Self {
        Self { t, x, y, z }
    }
}

/// Accessors a state-series type exposes to the binning engine.
///
/// Both columns must follow the same sample order and have equal length;
/// the engine checks the lengths and refuses to truncate.
pub trait StateSource {
    /// Time component of every sample.
    fn t(&self) -> Vec<f64>;
    /// Spatial component of every sample.
    fn xyz(&self) -> Vec<Point3>;
}

impl StateSource for [Sample] {
    fn t(&self) -> Vec<f64> {
        self.iter().map(|s| s.t).collect()
    }

    fn xyz(&self) -> Vec<Point3> {
        self.iter().map(Sample::xyz).collect()
    }
}

/// Quaternion-like states laid out as `[t, x, y, z]`.
impl StateSource for [[f64; 4]] {
    fn t(&self) -> Vec<f64> {
        self.iter().map(|q| q[0]).collect()
    }

    fn xyz(&self) -> Vec<Point3> {
        self.iter().map(|q| [q[1], q[2], q[3]]).collect()
    }
}

impl<S: StateSource + ?Sized> StateSource for &S {
    fn t(&self) -> Vec<f64> {
        (**self).t()
    }

    fn xyz(&self) -> Vec<Point3> {
        (**self).xyz()
    }
}

impl<T> StateSource for Vec<T>
where
    [T]: StateSource,
{
    fn t(&self) -> Vec<f64> {
        self.as_slice().t()
    }

    fn xyz(&self) -> Vec<Point3> {
        self.as_slice().xyz()
    }
}

/// Parallel time and space columns split out of a state series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSpace")]
pub struct TimeSpace {
    times: Vec<f64>,
    points: Vec<Point3>,
}

/// Unchecked wire form of [`TimeSpace`].
#[derive(Deserialize)]
struct RawTimeSpace {
    times: Vec<f64>,
    points: Vec<Point3>,
}

impl TryFrom<RawTimeSpace> for TimeSpace {
    type Error = FrameError;

    fn try_from(raw: RawTimeSpace) -> Result<Self> {
        TimeSpace::from_parts(raw.times, raw.points)
    }
}

impl TimeSpace {
    /// Pair up the two columns; mismatched lengths are a contract violation.
    pub fn from_parts(times: Vec<f64>, points: Vec<Point3>) -> Result<Self> {
        if times.len() != points.len() {
            return Err(FrameError::MalformedInput {
                times: times.len(),
                points: points.len(),
            });
        }
        Ok(Self { times, points })
    }

    pub fn from_source<S: StateSource + ?Sized>(source: &S) -> Result<Self> {
        Self::from_parts(source.t(), source.xyz())
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, Point3)> + '_ {
        self.times.iter().copied().zip(self.points.iter().copied())
    }

    /// `(min t, max t)` over the finite times, or `None` when there are none.
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        self.times
            .iter()
            .copied()
            .filter(|t| t.is_finite())
            .fold(None, |acc, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }
}
