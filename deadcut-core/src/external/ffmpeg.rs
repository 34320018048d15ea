//! FFmpeg command building and execution.
//!
//! This module builds the three kinds of ffmpeg command lines the tool uses
//! (analysis pass, straight transcode, trim-and-concat) and runs them through
//! an [`FfmpegSpawner`], feeding every event into an [`FfmpegOutputHandler`].

use crate::config::encode_output_args;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::{FfmpegProcess, FfmpegSpawner};
use crate::processing::planner::{KeepSegment, build_filter_graph};
use crate::utils::{format_duration, parse_ffmpeg_time};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel as FfmpegLogLevel};
use log::{debug, info};

use std::collections::VecDeque;
use std::path::Path;
use std::process::ExitStatus;

/// Number of trailing diagnostic lines kept for error messages.
const STDERR_TAIL_LINES: usize = 20;

/// Formats a timestamp for `-ss`/`-to` without losing sub-millisecond gaps.
#[must_use]
pub fn format_seconds_arg(secs: f64) -> String {
    format!("{secs:.6}")
}

/// Builds a decode-only analysis pass that writes to the null muxer.
///
/// `filter_flag` is `-vf` or `-af`; `stream_map` restricts the pass to one
/// stream when given.
#[must_use]
pub fn build_analysis_command(
    input: &Path,
    filter_flag: &str,
    filter: &str,
    stream_map: Option<&str>,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.arg("-hide_banner");
    cmd.input(input);
    cmd.args([filter_flag, filter]);
    if let Some(map) = stream_map {
        cmd.args(["-map", map]);
    }
    cmd.args(["-f", "null"]);
    cmd.output("-");
    cmd
}

/// Builds a full transcode of `input` with the fixed output parameters.
#[must_use]
pub fn build_transcode_command(input: &Path, output: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.args(["-hide_banner", "-y"]);
    cmd.input(input);
    cmd.args(encode_output_args());
    cmd.output(output);
    cmd
}

/// Builds a trim-and-concat encode: one seeked input per keep segment,
/// joined by a concat filter graph.
pub fn build_cut_command(
    input: &Path,
    output: &Path,
    segments: &[KeepSegment],
) -> CoreResult<FfmpegCommand> {
    if segments.is_empty() {
        return Err(CoreError::NothingToKeep);
    }

    let mut cmd = FfmpegCommand::new();
    cmd.args(["-hide_banner", "-y"]);

    for segment in segments {
        cmd.args(["-ss", &format_seconds_arg(segment.start)]);
        if let Some(end) = segment.end {
            cmd.args(["-to", &format_seconds_arg(end)]);
        }
        cmd.input(input);
    }

    cmd.args(["-filter_complex", &build_filter_graph(segments.len())]);
    cmd.args(["-map", "[outv]", "-map", "[outa]"]);
    cmd.args(encode_output_args());
    cmd.output(output);
    Ok(cmd)
}

/// Consumes the events of one ffmpeg run.
///
/// Keeps the diagnostic lines (when capturing for analysis), the input
/// duration ffmpeg reports, and a short tail of stderr for error messages.
/// Lines are echoed through `log` at `info` when verbose, `trace` otherwise.
pub struct FfmpegOutputHandler {
    label: String,
    verbose: bool,
    capture_lines: bool,
    expected_duration: Option<f64>,
    lines: Vec<String>,
    media_duration: Option<f64>,
    decoded_secs: Option<f64>,
    stderr_tail: VecDeque<String>,
    last_logged_threshold: i32,
}

impl FfmpegOutputHandler {
    /// Handler for an analysis pass: keeps every diagnostic line.
    #[must_use]
    pub fn for_analysis(label: impl Into<String>) -> Self {
        Self::new(label.into(), false, true, None)
    }

    /// Handler for an encode: reports progress against `expected_duration`.
    #[must_use]
    pub fn for_encode(label: impl Into<String>, verbose: bool, expected_duration: Option<f64>) -> Self {
        Self::new(label.into(), verbose, false, expected_duration)
    }

    fn new(label: String, verbose: bool, capture_lines: bool, expected_duration: Option<f64>) -> Self {
        Self {
            label,
            verbose,
            capture_lines,
            expected_duration,
            lines: Vec::new(),
            media_duration: None,
            decoded_secs: None,
            stderr_tail: VecDeque::with_capacity(STDERR_TAIL_LINES),
            last_logged_threshold: -1,
        }
    }

    /// Handles an `FFmpeg` event
    pub fn handle_event(&mut self, event: FfmpegEvent) -> CoreResult<()> {
        match event {
            FfmpegEvent::Progress(progress) => self.handle_progress(&progress),
            FfmpegEvent::Log(level, line) => self.handle_line(&level, line),
            FfmpegEvent::Error(line) => self.handle_line(&FfmpegLogLevel::Error, line),
            FfmpegEvent::ParsedDuration(parsed) if parsed.input_index == 0 => {
                self.media_duration.get_or_insert(parsed.duration);
            }
            _ => {}
        }
        Ok(())
    }

    /// Diagnostic lines captured during the run.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Duration of the first input, when ffmpeg reported one.
    #[must_use]
    pub fn media_duration(&self) -> Option<f64> {
        self.media_duration
    }

    /// Input position of the last progress report, in seconds.
    #[must_use]
    pub fn decoded_secs(&self) -> Option<f64> {
        self.decoded_secs
    }

    /// Last lines of ffmpeg's stderr, newline-joined.
    #[must_use]
    pub fn stderr_tail(&self) -> String {
        self.stderr_tail.iter().cloned().collect::<Vec<_>>().join("\n")
    }

    fn handle_line(&mut self, level: &FfmpegLogLevel, line: String) {
        if self.verbose {
            info!(target: "ffmpeg_log", "[{}] {}", self.label, line);
        } else {
            log::log!(target: "ffmpeg_log", map_ffmpeg_log_level(level), "{line}");
        }

        if self.stderr_tail.len() == STDERR_TAIL_LINES {
            self.stderr_tail.pop_front();
        }
        self.stderr_tail.push_back(line.clone());

        if self.capture_lines {
            self.lines.push(line);
        }
    }

    fn handle_progress(&mut self, progress: &FfmpegProgress) {
        if let Some(secs) = parse_ffmpeg_time(&progress.time) {
            self.decoded_secs = Some(secs);
        }
        let Some(total) = self.expected_duration.filter(|&d| d > 0.0) else {
            return;
        };
        let current_secs = parse_ffmpeg_time(&progress.time).unwrap_or(0.0);
        let percent = (current_secs / total * 100.0).clamp(0.0, 100.0);
        let threshold = (percent as i32 / 10) * 10;

        if threshold > self.last_logged_threshold {
            self.last_logged_threshold = threshold;
            let message = format!(
                "{}: {:.0}% | {} / {} | {:.2}x",
                self.label,
                percent,
                format_duration(current_secs),
                format_duration(total),
                progress.speed
            );
            if self.verbose {
                info!(target: "deadcut::progress", "{message}");
            } else {
                debug!(target: "deadcut::progress", "{message}");
            }
        }
    }
}

/// Maps `FFmpeg` log level to Rust log level for non-verbose runs.
///
/// Everything stays at debug or below; failures are reported through the
/// exit status and the stderr tail instead.
fn map_ffmpeg_log_level(level: &FfmpegLogLevel) -> log::Level {
    match level {
        FfmpegLogLevel::Fatal | FfmpegLogLevel::Error | FfmpegLogLevel::Warning => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

/// Spawns `cmd`, drains its events into `handler`, and waits for exit.
pub fn run_ffmpeg<S: FfmpegSpawner>(
    spawner: &S,
    cmd: FfmpegCommand,
    handler: &mut FfmpegOutputHandler,
) -> CoreResult<ExitStatus> {
    let rendered: Vec<String> = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    debug!("Running ffmpeg {}", rendered.join(" "));
    let mut process = spawner.spawn(cmd)?;
    process.handle_events(|event| handler.handle_event(event))?;
    process.wait()
}

/// Turns a non-zero exit into `CoreError::CommandFailed` carrying the stderr tail.
pub fn ensure_success(
    what: &str,
    status: ExitStatus,
    handler: &FfmpegOutputHandler,
) -> CoreResult<()> {
    if status.success() {
        Ok(())
    } else {
        Err(command_failed_error(what, status, handler.stderr_tail()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args_of(cmd: &FfmpegCommand) -> Vec<String> {
        cmd.get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    fn value_after(args: &[String], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    }

    #[test]
    fn test_analysis_command_targets_null_muxer() {
        let cmd = build_analysis_command(
            Path::new("/in/a.mp4"),
            "-vf",
            "freezedetect=n=-60dB:d=0.5",
            Some("0:v:0"),
        );
        let args = args_of(&cmd);
        assert_eq!(value_after(&args, "-i").as_deref(), Some("/in/a.mp4"));
        assert_eq!(value_after(&args, "-vf").as_deref(), Some("freezedetect=n=-60dB:d=0.5"));
        assert_eq!(value_after(&args, "-map").as_deref(), Some("0:v:0"));
        assert_eq!(value_after(&args, "-f").as_deref(), Some("null"));
        assert_eq!(args.last().map(String::as_str), Some("-"));
    }

    #[test]
    fn test_transcode_command_uses_fixed_parameters() {
        let cmd = build_transcode_command(Path::new("/in/a.mp4"), Path::new("/out/a.mp4"));
        let args = args_of(&cmd);
        assert_eq!(value_after(&args, "-profile:v").as_deref(), Some("high"));
        assert_eq!(value_after(&args, "-level").as_deref(), Some("4.2"));
        assert_eq!(value_after(&args, "-crf").as_deref(), Some("30"));
        assert_eq!(value_after(&args, "-movflags").as_deref(), Some("+faststart"));
        assert_eq!(value_after(&args, "-c:a").as_deref(), Some("aac"));
        assert_eq!(value_after(&args, "-b:a").as_deref(), Some("128k"));
        assert_eq!(value_after(&args, "-preset").as_deref(), Some("slower"));
        assert_eq!(args.last().map(String::as_str), Some("/out/a.mp4"));
        assert!(!args.iter().any(|a| a == "-filter_complex"));
    }

    #[test]
    fn test_cut_command_seeks_each_segment() {
        let segments = vec![
            KeepSegment { start: 0.0, end: Some(12.0) },
            KeepSegment { start: 19.0, end: Some(41.0) },
            KeepSegment { start: 49.0, end: None },
        ];
        let cmd = build_cut_command(
            &PathBuf::from("/in/a.mp4"),
            &PathBuf::from("/out/a.mp4"),
            &segments,
        )
        .unwrap();
        let args = args_of(&cmd);

        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 3);
        assert_eq!(args.iter().filter(|a| *a == "-ss").count(), 3);
        assert_eq!(args.iter().filter(|a| *a == "-to").count(), 2);
        assert_eq!(value_after(&args, "-ss").as_deref(), Some("0.000000"));
        assert_eq!(value_after(&args, "-to").as_deref(), Some("12.000000"));
        assert_eq!(
            value_after(&args, "-filter_complex").as_deref(),
            Some("[0:v:0][0:a:0][1:v:0][1:a:0][2:v:0][2:a:0]concat=n=3:v=1:a=1[outv][outa]")
        );
        assert!(args.windows(2).any(|w| w[0] == "-map" && w[1] == "[outv]"));
        assert!(args.windows(2).any(|w| w[0] == "-map" && w[1] == "[outa]"));
        assert_eq!(args.last().map(String::as_str), Some("/out/a.mp4"));
    }

    #[test]
    fn test_cut_command_refuses_empty_plan() {
        let result = build_cut_command(Path::new("a.mp4"), Path::new("b.mp4"), &[]);
        assert!(matches!(result, Err(CoreError::NothingToKeep)));
    }

    #[test]
    fn test_output_handler_captures_lines_and_tail() {
        let mut handler = FfmpegOutputHandler::for_analysis("a.mp4");
        for i in 0..25 {
            handler
                .handle_event(FfmpegEvent::Log(FfmpegLogLevel::Info, format!("line {i}")))
                .unwrap();
        }
        handler
            .handle_event(FfmpegEvent::Error("boom".to_string()))
            .unwrap();

        assert_eq!(handler.lines().len(), 26);
        let tail = handler.stderr_tail();
        assert!(tail.ends_with("boom"));
        assert!(!tail.contains("line 5\n"));
        assert_eq!(tail.lines().count(), STDERR_TAIL_LINES);
    }

    fn progress_at(time: &str) -> FfmpegEvent {
        FfmpegEvent::Progress(FfmpegProgress {
            frame: 0,
            fps: 0.0,
            q: 0.0,
            size_kb: 0,
            time: time.to_string(),
            bitrate_kbps: 0.0,
            speed: 1.0,
            raw_log_message: String::new(),
        })
    }

    #[test]
    fn test_analysis_handler_tracks_decoded_position() {
        let mut handler = FfmpegOutputHandler::for_analysis("a.mp4");
        assert_eq!(handler.decoded_secs(), None);
        handler.handle_event(progress_at("00:00:10.00")).unwrap();
        handler.handle_event(progress_at("N/A")).unwrap();
        handler.handle_event(progress_at("00:01:02.50")).unwrap();
        assert_eq!(handler.decoded_secs(), Some(62.5));
        assert_eq!(handler.media_duration(), None);
    }

    #[test]
    fn test_encode_handler_does_not_capture_lines() {
        let mut handler = FfmpegOutputHandler::for_encode("a.mp4", false, Some(60.0));
        handler
            .handle_event(FfmpegEvent::Log(FfmpegLogLevel::Info, "frame info".to_string()))
            .unwrap();
        assert!(handler.lines().is_empty());
        assert_eq!(handler.stderr_tail(), "frame info");
    }
}
