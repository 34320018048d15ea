//! Core processing logic and orchestration.
//!
//! Organizes the pipeline stages that run after detection: merging the gap
//! lists, planning cuts, encoding single files and driving the batch.

/// Gap intervals and the freeze/silence merge
pub mod intervals;

/// Keep-segment planning and the concat filter graph
pub mod planner;

/// Per-file copy, transcode or cut
pub mod encode;

/// Two-phase batch driver
pub mod batch;

pub use batch::{BatchReport, JobFailure, print_summary, process_videos, run_batch};
pub use encode::{EncodeJob, JobAction, JobOutcome, run_job};
pub use intervals::{Interval, TieBreak, merge_gaps, merge_intervals};
pub use planner::{CutPlan, KeepSegment, NoGapPolicy, build_filter_graph, keep_segments, plan_cuts};
