//! Binning engine: fixed range and frame count, reusable across state series.

use serde::{Deserialize, Serialize};

use crate::binning::{self, Counts, SpaceBins};
use crate::config::FrameItConfig;
use crate::data::{StateSource, TimeSpace};
use crate::error::{FrameError, Result};
use crate::partition::{FrameIndex, Partition};
use crate::report;

/// Result of one binning run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BinnedFrames {
    pub bins: SpaceBins,
    pub counts: Counts,
    /// Samples that matched no frame. Never part of `counts`.
    pub out_of_range: usize,
}

/// Bins a state series by time into animation frames.
///
/// The partition is built once at construction and never changes, so one engine
/// can be shared (it is `Send + Sync`) and run against any number of series.
#[derive(Clone, Debug)]
pub struct FrameIt {
    cfg: FrameItConfig,
    partition: Partition,
}

impl FrameIt {
    /// Engine with an explicit range; both `start` and `end` must be set.
    pub fn new(cfg: FrameItConfig) -> Result<Self> {
        cfg.validate()?;
        let (start, end) = match (cfg.start, cfg.end) {
            (Some(start), Some(end)) => (start, end),
            (start, end) => return Err(FrameError::MissingRange { start, end }),
        };
        Self::with_range(cfg, start, end)
    }

    /// Engine whose missing bounds come from the time column of `states`.
    pub fn from_states<S: StateSource + ?Sized>(states: &S, cfg: FrameItConfig) -> Result<Self> {
        cfg.validate()?;
        let (start, end) = match (cfg.start, cfg.end) {
            (Some(start), Some(end)) => (start, end),
            (start, end) => {
                let (lo, hi) = TimeSpace::from_source(states)?
                    .time_bounds()
                    .ok_or(FrameError::EmptySeries)?;
                (start.unwrap_or(lo), end.unwrap_or(hi))
            }
        };
        Self::with_range(cfg, start, end)
    }

    fn with_range(mut cfg: FrameItConfig, start: f64, end: f64) -> Result<Self> {
        let partition = Partition::new(start, end, cfg.frames)?;
        cfg.start = Some(start);
        cfg.end = Some(end);
        Ok(Self { cfg, partition })
    }

    pub fn config(&self) -> &FrameItConfig {
        &self.cfg
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Split a series into its parallel time and space columns.
    pub fn split_events<S: StateSource + ?Sized>(&self, states: &S) -> Result<TimeSpace> {
        let split = TimeSpace::from_source(states)?;
        if !self.cfg.quiet {
            for (t, xyz) in split.iter() {
                log::info!("t/xyz: {t} {xyz:?}");
            }
        }
        Ok(split)
    }

    /// Frame index of every sample, `None` where it matched no frame.
    pub fn label(&self, split: &TimeSpace) -> Result<Vec<Option<FrameIndex>>> {
        Ok(binning::label(split, &self.partition, self.cfg.out_of_range)?.frames)
    }

    /// Group an already split series into frames and summarize.
    pub fn space_bins(&self, split: &TimeSpace) -> Result<BinnedFrames> {
        let labels = binning::label(split, &self.partition, self.cfg.out_of_range)?;
        let bins = binning::group(
            split,
            &labels.frames,
            self.partition.len(),
            self.cfg.projection,
        );
        let counts = Counts::from_bins(&bins);
        log::debug!(
            "binned {} samples into {} frames ({} with events, {} out of range)",
            split.len(),
            bins.len(),
            counts.with_events,
            labels.out_of_range
        );
        if !self.cfg.quiet {
            report::log_frames(&bins, &counts);
        }
        Ok(BinnedFrames {
            bins,
            counts,
            out_of_range: labels.out_of_range,
        })
    }

    /// Split, label, group and summarize `states`.
    pub fn run<S: StateSource + ?Sized>(&self, states: &S) -> Result<BinnedFrames> {
        let split = self.split_events(states)?;
        self.space_bins(&split)
    }
}

/// Bin `states` with a one-off engine.
pub fn frame_states<S: StateSource + ?Sized>(
    states: &S,
    cfg: FrameItConfig,
) -> Result<(SpaceBins, Counts)> {
    let out = FrameIt::from_states(states, cfg)?.run(states)?;
    Ok((out.bins, out.counts))
}
