// deadcut-core/src/processing/batch.rs
//
// Batch driver. Runs the whole pipeline over an input root in two strictly
// sequential phases:
//
// 1. Preparation (single-threaded): extract archives, discover `.mp4` files,
//    skip those whose output exists, check for ffmpeg, and analyze every
//    remaining file.
// 2. Encoding (bounded parallel): one job per analyzed file on a rayon pool
//    sized by `CoreConfig::threads`. Jobs never share mutable state.
//
// A failing job does not stop its siblings. Once the pool has drained the
// summary is printed and the first failure, in submission order, is returned.

use crate::archive::{ArchiveSummary, extract_archives};
use crate::config::CoreConfig;
use crate::detection::{FfmpegGapDetector, analyze_file};
use crate::discovery::{PlannedFile, find_processable_files, plan_outputs};
use crate::error::{CoreError, CoreResult};
use crate::external::FfmpegSpawner;
use crate::processing::encode::{EncodeJob, JobAction, JobOutcome, run_job};
use crate::terminal_output;
use crate::utils::{calculate_size_reduction, format_bytes, format_duration, get_filename_safe};

use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// A job that failed, with the error that stopped it.
#[derive(Debug)]
pub struct JobFailure {
    pub input: PathBuf,
    pub error: CoreError,
}

/// Everything that happened during one batch, in submission order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub archives: ArchiveSummary,
    pub skipped: Vec<PlannedFile>,
    pub outcomes: Vec<JobOutcome>,
    pub failures: Vec<JobFailure>,
    pub elapsed: Duration,
}

impl BatchReport {
    fn count(&self, matches: impl Fn(&JobAction) -> bool) -> usize {
        self.outcomes.iter().filter(|o| matches(&o.action)).count()
    }

    #[must_use]
    pub fn copied(&self) -> usize {
        self.count(|a| *a == JobAction::Copied)
    }

    #[must_use]
    pub fn reencoded(&self) -> usize {
        self.count(|a| *a == JobAction::Reencoded)
    }

    #[must_use]
    pub fn cut(&self) -> usize {
        self.count(|a| matches!(a, JobAction::Cut { .. }))
    }

    /// Seconds of dead air removed across all cut files.
    #[must_use]
    pub fn removed_secs(&self) -> f64 {
        self.outcomes
            .iter()
            .map(|o| match o.action {
                JobAction::Cut { removed_secs, .. } => removed_secs,
                _ => 0.0,
            })
            .sum()
    }

    #[must_use]
    pub fn total_input_size(&self) -> u64 {
        self.outcomes.iter().map(|o| o.input_size).sum()
    }

    #[must_use]
    pub fn total_output_size(&self) -> u64 {
        self.outcomes.iter().map(|o| o.output_size).sum()
    }

    /// Percentage by which the finished outputs are smaller than their inputs.
    #[must_use]
    pub fn size_reduction(&self) -> u64 {
        calculate_size_reduction(self.total_input_size(), self.total_output_size())
    }
}

/// Runs both phases over `config.input_dir` and reports every job's result.
///
/// Job failures are collected into the report rather than returned. Errors
/// that stop the whole batch (unreadable input root, missing ffmpeg, an
/// analysis run that cannot be spawned, pool construction) are returned.
pub fn run_batch<S: FfmpegSpawner + Sync>(spawner: &S, config: &CoreConfig) -> CoreResult<BatchReport> {
    let start_time = Instant::now();
    let mut report = BatchReport::default();

    // ---- Phase 1: preparation ----

    if config.extract_archives {
        report.archives = extract_archives(&config.input_dir)?;
        if !report.archives.extracted.is_empty() {
            terminal_output::print_sub_item(&format!(
                "Extracted {} archive(s)",
                report.archives.extracted.len()
            ));
        }
    }

    let files = find_processable_files(&config.input_dir)?;
    let (pending, skipped) = plan_outputs(&config.input_dir, &config.output_dir, files)?;
    for planned in &skipped {
        terminal_output::print_sub_item(&format!(
            "Skipping {} (output exists)",
            planned.input.display()
        ));
    }
    report.skipped = skipped;

    if pending.is_empty() {
        terminal_output::print_success("Nothing to process");
        report.elapsed = start_time.elapsed();
        return Ok(report);
    }

    spawner.ensure_available()?;

    terminal_output::print_section("Analysis");
    let detector = FfmpegGapDetector::new(spawner);
    let mut jobs = Vec::with_capacity(pending.len());
    for planned in pending {
        terminal_output::print_processing(&format!("Analyzing {}", planned.input.display()));
        let analysis = analyze_file(
            &detector,
            &planned.input,
            &config.freeze_params,
            &config.silence_params,
        )?;
        terminal_output::print_status(
            "Gaps",
            &format!(
                "{} freeze, {} silence",
                analysis.freezes.len(),
                analysis.silences.len()
            ),
            false,
        );
        jobs.push(EncodeJob {
            input: planned.input,
            output: planned.output,
            analysis,
            force_encode: config.force_encode,
            verbose: config.verbose,
            min_gap_secs: config.min_gap_secs,
        });
    }

    // ---- Phase 2: encoding ----

    terminal_output::print_section("Encoding");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| CoreError::ThreadPool(e.to_string()))?;

    let results: Vec<CoreResult<JobOutcome>> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let result = run_job(spawner, job);
                if let Err(e) = &result {
                    let name = get_filename_safe(&job.input)
                        .unwrap_or_else(|_| job.input.display().to_string());
                    terminal_output::print_error(&name, &e.to_string(), Some("input left in place"));
                }
                result
            })
            .collect()
    });

    for (job, result) in jobs.into_iter().zip(results) {
        match result {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(error) => report.failures.push(JobFailure {
                input: job.input,
                error,
            }),
        }
    }

    report.elapsed = start_time.elapsed();
    Ok(report)
}

/// Prints the end-of-run summary section.
pub fn print_summary(report: &BatchReport) {
    terminal_output::print_section("Summary");
    terminal_output::print_status("Copied", &report.copied().to_string(), false);
    terminal_output::print_status("Re-encoded", &report.reencoded().to_string(), false);
    terminal_output::print_status("Cut", &report.cut().to_string(), report.cut() > 0);
    terminal_output::print_status("Skipped", &report.skipped.len().to_string(), false);
    terminal_output::print_status(
        "Failed",
        &report.failures.len().to_string(),
        !report.failures.is_empty(),
    );
    if !report.archives.skipped.is_empty() {
        terminal_output::print_status(
            "Bad archives",
            &report.archives.skipped.len().to_string(),
            true,
        );
    }
    terminal_output::print_status("Time removed", &format_duration(report.removed_secs()), true);
    terminal_output::print_status("Input size", &format_bytes(report.total_input_size()), false);
    terminal_output::print_status("Output size", &format_bytes(report.total_output_size()), false);
    terminal_output::print_status(
        "Size reduction",
        &format!("{}%", report.size_reduction()),
        report.size_reduction() > 0,
    );
    terminal_output::print_status(
        "Wall time",
        &format_duration(report.elapsed.as_secs_f64()),
        false,
    );
}

/// Runs the batch, prints the summary, and surfaces the first job failure.
///
/// # Errors
///
/// * `CoreError::JobFailed` - the first failed job in submission order
/// * any error from [`run_batch`] that stops the batch outright
pub fn process_videos<S: FfmpegSpawner + Sync>(spawner: &S, config: &CoreConfig) -> CoreResult<BatchReport> {
    let mut report = run_batch(spawner, config)?;
    print_summary(&report);

    if report.failures.is_empty() {
        return Ok(report);
    }
    let first = report.failures.remove(0);
    Err(CoreError::JobFailed {
        file: first.input.display().to_string(),
        source: Box::new(first.error),
    })
}
