//! Cut planning: turns merged cut regions into the segments to keep.

use crate::config::SEGMENT_EPSILON_SECS;
use crate::error::{CoreError, CoreResult};
use crate::processing::intervals::Interval;

/// A span of the input to keep. `end: None` runs to the end of the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeepSegment {
    pub start: f64,
    pub end: Option<f64>,
}

impl KeepSegment {
    /// Length in seconds, resolving an open end against `total`.
    #[must_use]
    pub fn duration(&self, total: Option<f64>) -> Option<f64> {
        self.end.or(total).map(|end| (end - self.start).max(0.0))
    }
}

/// What to do with a file that has nothing to cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoGapPolicy {
    /// Copy the input to the output unchanged.
    #[default]
    Copy,
    /// Transcode the whole file with the fixed encode parameters.
    Reencode,
}

/// Outcome of planning one file.
#[derive(Debug, Clone, PartialEq)]
pub enum CutPlan {
    NoGapsFound(NoGapPolicy),
    GapsFound(Vec<KeepSegment>),
}

/// Computes the keep segments between `gaps`.
///
/// Segments no longer than [`SEGMENT_EPSILON_SECS`] are dropped, but the
/// cursor still moves past the gap that produced them. The trailing segment
/// is open-ended and is dropped only when `duration` shows it to be empty.
#[must_use]
pub fn keep_segments(gaps: &[Interval], duration: Option<f64>) -> Vec<KeepSegment> {
    let mut segments = Vec::with_capacity(gaps.len() + 1);
    let mut last_end = 0.0_f64;

    for gap in gaps {
        if gap.start - last_end > SEGMENT_EPSILON_SECS {
            segments.push(KeepSegment {
                start: last_end,
                end: Some(gap.start),
            });
        } else {
            log::trace!(
                "Skipping degenerate keep segment {last_end:.4}..{:.4}",
                gap.start
            );
        }
        last_end = last_end.max(gap.end);
    }

    let trailing_is_empty = duration.is_some_and(|total| total - last_end <= SEGMENT_EPSILON_SECS);
    if !trailing_is_empty {
        segments.push(KeepSegment {
            start: last_end,
            end: None,
        });
    }

    segments
}

/// Plans the processing of one file from its merged cut regions.
///
/// Returns `CoreError::NothingToKeep` when the gaps cover the whole file.
pub fn plan_cuts(gaps: &[Interval], duration: Option<f64>, force_encode: bool) -> CoreResult<CutPlan> {
    if gaps.is_empty() {
        let policy = if force_encode {
            NoGapPolicy::Reencode
        } else {
            NoGapPolicy::Copy
        };
        return Ok(CutPlan::NoGapsFound(policy));
    }

    let segments = keep_segments(gaps, duration);
    if segments.is_empty() {
        return Err(CoreError::NothingToKeep);
    }
    if let (None, [KeepSegment { start, end: None }]) = (duration, segments.as_slice()) {
        log::warn!(
            "Duration unknown and everything before {start:.3}s is dead air; the remaining tail may be empty"
        );
    }
    Ok(CutPlan::GapsFound(segments))
}

/// Concat filter graph joining the first video and audio stream of `segment_count` inputs.
#[must_use]
pub fn build_filter_graph(segment_count: usize) -> String {
    let mut graph = String::new();
    for index in 0..segment_count {
        graph.push_str(&format!("[{index}:v:0][{index}:a:0]"));
    }
    graph.push_str(&format!("concat=n={segment_count}:v=1:a=1[outv][outa]"));
    graph
}
