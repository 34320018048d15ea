//! Core library for removing dead air from video files with ffmpeg.
//!
//! A region is "dead" when the picture is frozen and the audio is silent at
//! the same time. This crate finds such regions with ffmpeg's `freezedetect`
//! and `silencedetect` filters, intersects the two gap lists, and re-encodes
//! each file without them on a bounded worker pool.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use deadcut_core::{CoreConfig, process_videos};
//! use deadcut_core::external::SidecarSpawner;
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(PathBuf::from("in"), PathBuf::from("out"));
//! config.threads = 2;
//! config.validate().unwrap();
//!
//! let report = process_videos(&SidecarSpawner, &config).unwrap();
//! println!("cut {} file(s)", report.cut());
//! ```

pub mod archive;
pub mod config;
pub mod detection;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod terminal_output;
pub mod utils;

// Re-exports for public API
pub use archive::{ArchiveSummary, extract_archives};
pub use config::{CoreConfig, CoreConfigBuilder, DetectionParams};
pub use detection::{FfmpegGapDetector, GapDetector, GapKind, MediaAnalysis, analyze_file};
pub use discovery::{PlannedFile, find_processable_files, plan_outputs};
pub use error::{CoreError, CoreResult};
pub use processing::{
    BatchReport, CutPlan, Interval, JobAction, JobOutcome, KeepSegment, NoGapPolicy, TieBreak,
    merge_gaps, merge_intervals, plan_cuts, process_videos, run_batch,
};
pub use utils::{format_bytes, format_duration, parse_ffmpeg_time};
