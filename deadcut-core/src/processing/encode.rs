//! Per-file encode: turns one analyzed file into its output.
//!
//! Each job merges its gap lists, plans the cut, and then either copies the
//! input, transcodes it whole, or runs the trim-and-concat encode. The input
//! is deleted only after the output has been written.

use crate::detection::MediaAnalysis;
use crate::error::CoreResult;
use crate::external::{
    FfmpegOutputHandler, FfmpegSpawner, build_cut_command, build_transcode_command, ensure_success,
    run_ffmpeg,
};
use crate::processing::intervals::merge_gaps;
use crate::processing::planner::{CutPlan, NoGapPolicy, plan_cuts};
use crate::terminal_output;
use crate::utils::{format_duration, get_filename_safe};

use ffmpeg_sidecar::command::FfmpegCommand;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Everything needed to process one file. Jobs share no mutable state.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub analysis: MediaAnalysis,
    pub force_encode: bool,
    pub verbose: bool,
    pub min_gap_secs: f64,
}

/// What a job did to produce its output.
#[derive(Debug, Clone, PartialEq)]
pub enum JobAction {
    Copied,
    Reencoded,
    Cut { removed_secs: f64, segments: usize },
}

/// Result of a successful job.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub filename: String,
    pub action: JobAction,
    pub elapsed: Duration,
    pub input_size: u64,
    pub output_size: u64,
}

fn run_encode<S: FfmpegSpawner>(
    spawner: &S,
    cmd: FfmpegCommand,
    filename: &str,
    verbose: bool,
    expected_duration: Option<f64>,
) -> CoreResult<()> {
    let mut handler = FfmpegOutputHandler::for_encode(filename, verbose, expected_duration);
    let status = run_ffmpeg(spawner, cmd, &mut handler)?;
    ensure_success(&format!("ffmpeg encode of {filename}"), status, &handler)
}

/// Processes one job and deletes its input on success.
///
/// On error the input is left untouched; a partially written output is not
/// cleaned up.
pub fn run_job<S: FfmpegSpawner>(spawner: &S, job: &EncodeJob) -> CoreResult<JobOutcome> {
    let start_time = Instant::now();
    let filename = get_filename_safe(&job.input)?;
    let input_size = fs::metadata(&job.input)?.len();
    let duration = job.analysis.duration;

    let gaps = merge_gaps(&job.analysis.freezes, &job.analysis.silences, job.min_gap_secs);
    let plan = plan_cuts(&gaps, duration, job.force_encode)?;

    if let Some(parent) = job.output.parent() {
        fs::create_dir_all(parent)?;
    }

    let action = match plan {
        CutPlan::NoGapsFound(NoGapPolicy::Copy) => {
            terminal_output::print_processing(&format!("{filename}: no dead air, copying"));
            fs::copy(&job.input, &job.output)?;
            JobAction::Copied
        }
        CutPlan::NoGapsFound(NoGapPolicy::Reencode) => {
            terminal_output::print_processing(&format!("{filename}: no dead air, re-encoding"));
            let cmd = build_transcode_command(&job.input, &job.output);
            run_encode(spawner, cmd, &filename, job.verbose, duration)?;
            JobAction::Reencoded
        }
        CutPlan::GapsFound(segments) => {
            let removed_secs: f64 = gaps.iter().map(|gap| gap.duration()).sum();
            terminal_output::print_processing(&format!(
                "{filename}: cutting {} region(s) ({}), keeping {} segment(s)",
                gaps.len(),
                format_duration(removed_secs),
                segments.len()
            ));
            let expected = duration.map(|total| (total - removed_secs).max(0.0));
            let cmd = build_cut_command(&job.input, &job.output, &segments)?;
            run_encode(spawner, cmd, &filename, job.verbose, expected)?;
            JobAction::Cut {
                removed_secs,
                segments: segments.len(),
            }
        }
    };

    let output_size = fs::metadata(&job.output)?.len();
    fs::remove_file(&job.input)?;
    log::debug!("Deleted input {}", job.input.display());

    let elapsed = start_time.elapsed();
    terminal_output::print_success(&format!(
        "{filename} done in {}",
        format_duration(elapsed.as_secs_f64())
    ));

    Ok(JobOutcome {
        filename,
        action,
        elapsed,
        input_size,
        output_size,
    })
}
