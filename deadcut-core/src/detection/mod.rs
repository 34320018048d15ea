//! Gap detection
//!
//! Runs the freeze and silence passes over a file and bundles their results
//! into a [`MediaAnalysis`].

pub mod gaps;

pub use gaps::{
    DetectionOutput, FfmpegGapDetector, GapDetector, GapKind, parse_duration_line, parse_gap_events,
};

use crate::config::DetectionParams;
use crate::error::CoreResult;
use crate::processing::intervals::Interval;
use std::path::Path;

/// Both gap lists and the duration of one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaAnalysis {
    pub freezes: Vec<Interval>,
    pub silences: Vec<Interval>,
    pub duration: Option<f64>,
}

/// Runs the freeze pass, then the silence pass, over `path`.
///
/// The duration comes from whichever pass reported it first.
pub fn analyze_file<D: GapDetector>(
    detector: &D,
    path: &Path,
    freeze_params: &DetectionParams,
    silence_params: &DetectionParams,
) -> CoreResult<MediaAnalysis> {
    let freeze = detector.detect(path, GapKind::Freeze, freeze_params)?;
    let silence = detector.detect(path, GapKind::Silence, silence_params)?;

    Ok(MediaAnalysis {
        freezes: freeze.intervals,
        silences: silence.intervals,
        duration: freeze.duration.or(silence.duration),
    })
}
