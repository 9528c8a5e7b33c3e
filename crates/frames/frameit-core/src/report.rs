//! Reporting and export helpers layered outside the binning core.

use crate::binning::{Counts, FrameBin, SpaceBins};
use crate::engine::BinnedFrames;

/// Log every frame and the summary counts at info level.
pub fn log_frames(bins: &SpaceBins, counts: &Counts) {
    for (index, bin) in bins.iter() {
        match bin {
            FrameBin::Empty => log::info!("space_bins: {index}/empty"),
            FrameBin::Points(points) => log::info!("space_bins: {index}/{points:?}"),
        }
    }
    log_counts(counts);
}

pub fn log_counts(counts: &Counts) {
    log::info!("frames without events: {}", counts.without_events);
    log::info!("frames with events: {}", counts.with_events);
    log::info!("max events in one frame: {}", counts.max_events);
}

/// Export binned frames as serde_json::Value (stable schema for renderer hand-off).
pub fn export_frames_json(frames: &BinnedFrames) -> serde_json::Value {
    serde_json::to_value(frames).unwrap_or(serde_json::Value::Null)
}
