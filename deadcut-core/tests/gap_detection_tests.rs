// deadcut-core/tests/gap_detection_tests.rs

use deadcut_core::config::DetectionParams;
use deadcut_core::detection::{FfmpegGapDetector, GapDetector, GapKind, analyze_file};
use deadcut_core::external::mocks::MockFfmpegSpawner;
use deadcut_core::processing::Interval;
use deadcut_core::{CoreError, error::command_start_error};
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel};
use std::io;
use std::path::Path;

fn log_line(line: &str) -> FfmpegEvent {
    FfmpegEvent::Log(LogLevel::Info, line.to_string())
}

fn progress_at(time: &str) -> FfmpegEvent {
    FfmpegEvent::Progress(FfmpegProgress {
        frame: 0,
        fps: 0.0,
        q: 0.0,
        size_kb: 0,
        time: time.to_string(),
        bitrate_kbps: 0.0,
        speed: 40.0,
        raw_log_message: String::new(),
    })
}

#[test]
fn test_freeze_pass_command_and_parsing() {
    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation(
        &["lecture.mp4", "freezedetect=n=-60dB:d=0.5"],
        vec![
            log_line("  Duration: 00:02:00.00, start: 0.000000, bitrate: 900 kb/s"),
            log_line("[freezedetect @ 0x55] lavfi.freezedetect.freeze_start: 10"),
            log_line("[freezedetect @ 0x55] lavfi.freezedetect.freeze_duration: 10"),
            log_line("[freezedetect @ 0x55] lavfi.freezedetect.freeze_end: 20"),
            log_line("[freezedetect @ 0x55] lavfi.freezedetect.freeze_start: 40.5"),
            log_line("[freezedetect @ 0x55] lavfi.freezedetect.freeze_end: 50.25"),
        ],
        false,
    );
    let detector = FfmpegGapDetector::new(&spawner);

    let output = detector
        .detect(Path::new("/videos/lecture.mp4"), GapKind::Freeze, &DetectionParams::FREEZE)
        .unwrap();

    assert_eq!(
        output.intervals,
        vec![Interval::new(10.0, 20.0), Interval::new(40.5, 50.25)]
    );
    assert_eq!(output.duration, Some(120.0));

    let calls = spawner.get_received_calls();
    assert_eq!(calls.len(), 1);
    let args = &calls[0];
    assert!(args.windows(2).any(|w| w[0] == "-map" && w[1] == "0:v:0"));
    assert!(args.windows(2).any(|w| w[0] == "-f" && w[1] == "null"));
    assert_eq!(args.last().map(String::as_str), Some("-"));
}

#[test]
fn test_silence_pass_uses_audio_filter() {
    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation(
        &["-af", "silencedetect=noise=-30dB:d=0.5"],
        vec![
            log_line("[silencedetect @ 0x7f] silence_start: -0.002"),
            log_line("[silencedetect @ 0x7f] silence_end: 4.5 | silence_duration: 4.502"),
        ],
        false,
    );
    let detector = FfmpegGapDetector::new(&spawner);

    let output = detector
        .detect(Path::new("a.mp4"), GapKind::Silence, &DetectionParams::SILENCE)
        .unwrap();

    assert_eq!(output.intervals, vec![Interval::new(0.0, 4.5)]);
    assert_eq!(output.duration, None);
    assert!(!spawner.get_received_calls()[0].iter().any(|a| a == "-map"));
}

#[test]
fn test_nonzero_exit_keeps_parsed_events() {
    let spawner = MockFfmpegSpawner::new();
    spawner.add_exit_error_expectation(
        &["silencedetect"],
        vec![
            log_line("silence_start: 1"),
            log_line("silence_end: 3 | silence_duration: 2"),
            log_line("silence_start: 8"),
            FfmpegEvent::Error("Error while decoding stream #0:1".to_string()),
        ],
        1,
    );
    let detector = FfmpegGapDetector::new(&spawner);

    let output = detector
        .detect(Path::new("a.mp4"), GapKind::Silence, &DetectionParams::SILENCE)
        .unwrap();

    assert_eq!(output.intervals, vec![Interval::new(1.0, 3.0)]);
}

#[test]
fn test_unparseable_output_means_no_gaps() {
    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation(
        &["freezedetect"],
        vec![log_line("frame=  250 fps=120 q=-0.0 size=N/A time=00:00:10.00")],
        false,
    );
    let detector = FfmpegGapDetector::new(&spawner);

    let output = detector
        .detect(Path::new("a.mp4"), GapKind::Freeze, &DetectionParams::FREEZE)
        .unwrap();

    assert!(output.intervals.is_empty());
}

#[test]
fn test_spawn_failure_is_an_error() {
    let spawner = MockFfmpegSpawner::new();
    spawner.add_spawn_error_expectation(
        &["freezedetect"],
        command_start_error("ffmpeg", io::Error::new(io::ErrorKind::NotFound, "no ffmpeg")),
    );
    let detector = FfmpegGapDetector::new(&spawner);

    let result = detector.detect(Path::new("a.mp4"), GapKind::Freeze, &DetectionParams::FREEZE);

    assert!(matches!(result, Err(CoreError::CommandStart(..))));
}

#[test]
fn test_analyze_file_runs_both_passes() {
    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation(
        &["show.mp4", "freezedetect"],
        vec![log_line("freeze_start: 5"), log_line("freeze_end: 9")],
        false,
    );
    spawner.add_success_expectation(
        &["show.mp4", "silencedetect"],
        vec![
            log_line("  Duration: 00:00:30.50, start: 0.000000"),
            log_line("silence_start: 6"),
            log_line("silence_end: 8 | silence_duration: 2"),
        ],
        false,
    );
    let detector = FfmpegGapDetector::new(&spawner);

    let analysis = analyze_file(
        &detector,
        Path::new("show.mp4"),
        &DetectionParams::FREEZE,
        &DetectionParams::SILENCE,
    )
    .unwrap();

    assert_eq!(analysis.freezes, vec![Interval::new(5.0, 9.0)]);
    assert_eq!(analysis.silences, vec![Interval::new(6.0, 8.0)]);
    assert_eq!(analysis.duration, Some(30.5));
    assert_eq!(spawner.pending_expectations(), 0);
}

#[test]
fn test_completed_pass_without_duration_uses_decoded_position() {
    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation(
        &["stream.mp4", "freezedetect"],
        vec![
            log_line("freeze_start: 0"),
            progress_at("00:00:30.00"),
            log_line("freeze_end: 45"),
            progress_at("00:00:45.00"),
        ],
        false,
    );
    spawner.add_exit_error_expectation(
        &["stream.mp4", "silencedetect"],
        vec![log_line("silence_start: 0"), progress_at("00:00:20.00")],
        1,
    );
    let detector = FfmpegGapDetector::new(&spawner);
    let path = Path::new("stream.mp4");

    let freeze = detector.detect(path, GapKind::Freeze, &DetectionParams::FREEZE).unwrap();
    assert_eq!(freeze.intervals, vec![Interval::new(0.0, 45.0)]);
    assert_eq!(freeze.duration, Some(45.0));

    let silence = detector.detect(path, GapKind::Silence, &DetectionParams::SILENCE).unwrap();
    assert_eq!(silence.duration, None);
}
