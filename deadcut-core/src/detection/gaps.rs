// deadcut-core/src/detection/gaps.rs
//
// Freeze and silence detection. ffmpeg's freezedetect and silencedetect
// filters report their findings as labeled lines on stderr, e.g.
//
//   [freezedetect @ 0x...] lavfi.freezedetect.freeze_start: 10.01
//   [silencedetect @ 0x...] silence_end: 19.2 | silence_duration: 7.2
//
// This module pairs the start/end markers into intervals. The scraping is
// kept behind `GapDetector` so callers never see ffmpeg's text format.

use crate::config::DetectionParams;
use crate::error::CoreResult;
use crate::external::{FfmpegOutputHandler, FfmpegSpawner, build_analysis_command, run_ffmpeg};
use crate::processing::intervals::Interval;
use crate::utils::{get_filename_safe, parse_ffmpeg_time};

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

// A decimal timestamp; ffmpeg switches to exponent form for tiny values.
const SECONDS: &str = r"(-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)";

// Patterns are literals; compiling them cannot fail.
static FREEZE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"freeze_start:\s*{SECONDS}")).expect("valid regex"));
static FREEZE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"freeze_end:\s*{SECONDS}")).expect("valid regex"));
static SILENCE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"silence_start:\s*{SECONDS}")).expect("valid regex"));
static SILENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"silence_end:\s*{SECONDS}")).expect("valid regex"));
static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Duration:\s*(\d+:\d{2}:\d{2}(?:\.\d+)?)").expect("valid regex"));

/// The two kinds of gap ffmpeg can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapKind {
    /// Video frames that do not change.
    Freeze,
    /// Audio below the noise floor.
    Silence,
}

impl GapKind {
    fn markers(self) -> (&'static Regex, &'static Regex) {
        match self {
            Self::Freeze => (&*FREEZE_START_RE, &*FREEZE_END_RE),
            Self::Silence => (&*SILENCE_START_RE, &*SILENCE_END_RE),
        }
    }

    /// Lowercase name used in log lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Freeze => "freeze",
            Self::Silence => "silence",
        }
    }
}

/// Result of one detection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionOutput {
    pub intervals: Vec<Interval>,
    /// Input duration in seconds: the container's, or how far a complete
    /// pass decoded when the container reports none.
    pub duration: Option<f64>,
}

/// Runs one gap-detection pass over a media file.
pub trait GapDetector {
    fn detect(&self, path: &Path, kind: GapKind, params: &DetectionParams) -> CoreResult<DetectionOutput>;
}

/// `GapDetector` backed by an ffmpeg analysis run.
pub struct FfmpegGapDetector<'a, S: FfmpegSpawner> {
    spawner: &'a S,
}

impl<'a, S: FfmpegSpawner> FfmpegGapDetector<'a, S> {
    pub fn new(spawner: &'a S) -> Self {
        Self { spawner }
    }
}

impl<S: FfmpegSpawner> GapDetector for FfmpegGapDetector<'_, S> {
    fn detect(&self, path: &Path, kind: GapKind, params: &DetectionParams) -> CoreResult<DetectionOutput> {
        let cmd = match kind {
            GapKind::Freeze => {
                build_analysis_command(path, "-vf", &params.freezedetect_filter(), Some("0:v:0"))
            }
            GapKind::Silence => {
                build_analysis_command(path, "-af", &params.silencedetect_filter(), None)
            }
        };

        let label = get_filename_safe(path)?;
        let mut handler = FfmpegOutputHandler::for_analysis(label.as_str());
        let status = run_ffmpeg(self.spawner, cmd, &mut handler)?;
        if !status.success() {
            log::warn!(
                "{} detection for {} exited with {}; using the events parsed so far",
                kind.label(),
                label,
                status
            );
        }

        let intervals = parse_gap_events(kind, handler.lines());
        // A pass that ran to completion decoded the whole input.
        let duration = handler
            .media_duration()
            .or_else(|| parse_duration_line(handler.lines()))
            .or_else(|| handler.decoded_secs().filter(|_| status.success()));

        log::debug!(
            "{} detection for {}: {} interval(s), duration {:?}",
            kind.label(),
            label,
            intervals.len(),
            duration
        );
        Ok(DetectionOutput { intervals, duration })
    }
}

fn capture_seconds(re: &Regex, line: &str) -> Option<f64> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|secs| secs.max(0.0))
}

/// Pairs start/end markers of `kind` found in ffmpeg's diagnostic lines.
///
/// An end without a pending start is ignored, a second start replaces the
/// pending one, and a start left open at the end of the stream is dropped.
/// Negative timestamps clamp to zero.
pub fn parse_gap_events<I, L>(kind: GapKind, lines: I) -> Vec<Interval>
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let (start_re, end_re) = kind.markers();
    let mut intervals = Vec::new();
    let mut pending_start: Option<f64> = None;

    for line in lines {
        let line = line.as_ref();
        if let Some(start) = capture_seconds(start_re, line) {
            pending_start = Some(start);
        } else if let Some(end) = capture_seconds(end_re, line) {
            match pending_start.take() {
                Some(start) => intervals.push(Interval::new(start, end)),
                None => log::trace!("Ignoring {} end without start: {line}", kind.label()),
            }
        }
    }

    if let Some(start) = pending_start {
        log::debug!("Dropping unterminated {} starting at {start}", kind.label());
    }
    intervals
}

/// Finds the container duration in a `Duration: HH:MM:SS.xx` banner line.
pub fn parse_duration_line<I, L>(lines: I) -> Option<f64>
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    lines.into_iter().find_map(|line| {
        DURATION_RE
            .captures(line.as_ref())
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_ffmpeg_time(m.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_freeze_lines() {
        let lines = [
            "[freezedetect @ 0x5581] lavfi.freezedetect.freeze_start: 10.01",
            "[freezedetect @ 0x5581] lavfi.freezedetect.freeze_duration: 9.99",
            "[freezedetect @ 0x5581] lavfi.freezedetect.freeze_end: 20",
        ];
        assert_eq!(
            parse_gap_events(GapKind::Freeze, lines),
            vec![Interval::new(10.01, 20.0)]
        );
    }

    #[test]
    fn test_parse_silence_lines_clamps_negative_start() {
        let lines = [
            "[silencedetect @ 0x7f] silence_start: -0.0015",
            "[silencedetect @ 0x7f] silence_end: 3.5 | silence_duration: 3.5015",
        ];
        assert_eq!(
            parse_gap_events(GapKind::Silence, lines),
            vec![Interval::new(0.0, 3.5)]
        );
    }

    #[test]
    fn test_parse_exponent_timestamps() {
        let lines = [
            "[silencedetect @ 0x7f] silence_start: 2.08333e-05",
            "[silencedetect @ 0x7f] silence_end: 9.5 | silence_duration: 9.49998",
            "[silencedetect @ 0x7f] silence_start: 1.5E+01",
            "[silencedetect @ 0x7f] silence_end: 20 | silence_duration: 5",
        ];
        assert_eq!(
            parse_gap_events(GapKind::Silence, lines),
            vec![Interval::new(2.08333e-5, 9.5), Interval::new(15.0, 20.0)]
        );
    }

    #[test]
    fn test_kinds_do_not_cross_match() {
        let lines = ["silence_start: 1.0", "silence_end: 2.0"];
        assert!(parse_gap_events(GapKind::Freeze, lines).is_empty());
    }

    #[test]
    fn test_orphan_end_and_repeated_start() {
        let lines = [
            "silence_end: 1.0 | silence_duration: 1.0",
            "silence_start: 2.0",
            "silence_start: 3.0",
            "silence_end: 4.0 | silence_duration: 1.0",
            "silence_start: 9.0",
        ];
        assert_eq!(
            parse_gap_events(GapKind::Silence, lines),
            vec![Interval::new(3.0, 4.0)]
        );
    }

    #[test]
    fn test_garbage_yields_nothing() {
        let lines = ["frame=  100 fps=25", "silence_start: abc", ""];
        assert!(parse_gap_events(GapKind::Silence, lines).is_empty());
    }

    #[test]
    fn test_parse_duration_line() {
        let lines = [
            "Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'a.mp4':",
            "  Duration: 00:01:02.50, start: 0.000000, bitrate: 1205 kb/s",
        ];
        assert_eq!(parse_duration_line(lines), Some(62.5));
        assert_eq!(parse_duration_line(["  Duration: N/A, bitrate: N/A"]), None);
    }
}
