// deadcut-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---
// Only compiled for unit tests or with the "test-mocks" feature enabled.

use super::{FfmpegProcess, FfmpegSpawner};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::os::unix::process::ExitStatusExt; // For ExitStatus::from_raw
use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex, MutexGuard};

/// Mock implementation of FfmpegProcess.
#[derive(Clone, Debug)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.clone() {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
///
/// Matches when every pattern is a substring of at least one argument.
pub struct MockFfmpegExpectation {
    pub arg_patterns: Vec<String>,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

impl MockFfmpegExpectation {
    fn matches(&self, args: &[String]) -> bool {
        self.arg_patterns
            .iter()
            .all(|pattern| args.iter().any(|arg| arg.contains(pattern.as_str())))
    }
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Shared state sits behind `Arc<Mutex<_>>` so the spawner can be used from
/// the worker pool. Each expectation is consumed by the first call it matches.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Arc<Mutex<Vec<MockFfmpegExpectation>>>,
    received_calls: Arc<Mutex<Vec<Vec<String>>>>,
    unavailable: Arc<Mutex<bool>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Builds an exit status carrying `code` the way `waitpid` reports it.
#[must_use]
pub fn exit_status_from_code(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `ensure_available` report ffmpeg as missing.
    pub fn set_unavailable(&self) {
        *lock(&self.unavailable) = true;
    }

    pub fn add_expectation_matching(
        &self,
        arg_patterns: &[&str],
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        lock(&self.expectations).push(MockFfmpegExpectation {
            arg_patterns: arg_patterns.iter().map(|p| (*p).to_string()).collect(),
            result,
            create_dummy_output,
        });
    }

    pub fn add_success_expectation(
        &self,
        arg_patterns: &[&str],
        events: Vec<FfmpegEvent>,
        create_dummy_output: bool,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: events,
            exit_status: exit_status_from_code(0),
        };
        self.add_expectation_matching(arg_patterns, Ok(process), create_dummy_output);
    }

    pub fn add_spawn_error_expectation(&self, arg_patterns: &[&str], error: CoreError) {
        self.add_expectation_matching(arg_patterns, Err(error), false);
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_patterns: &[&str],
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: events,
            exit_status: exit_status_from_code(exit_code),
        };
        self.add_expectation_matching(arg_patterns, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        lock(&self.received_calls).clone()
    }

    /// Number of expectations no call has consumed yet.
    pub fn pending_expectations(&self) -> usize {
        lock(&self.expectations).len()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        lock(&self.received_calls).push(args.clone());

        let expectation = {
            let mut expectations = lock(&self.expectations);
            let found_index = expectations.iter().position(|exp| exp.matches(&args));
            match found_index {
                Some(index) => expectations.remove(index),
                None => {
                    log::error!("MockFfmpegSpawner: No expectation found for command args: {args:?}");
                    panic!("MockFfmpegSpawner: No expectation found for command args: {args:?}");
                }
            }
        };
        log::debug!(
            "MockFfmpegSpawner: Matched expectation with patterns {:?}",
            expectation.arg_patterns
        );

        let process = expectation.result?;
        if expectation.create_dummy_output {
            if let Some(output_path_str) = args.last() {
                let output_path = PathBuf::from(output_path_str);
                if let Some(parent) = output_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&output_path, b"mock output")?;
                log::debug!("MockFfmpegSpawner created dummy output file: {}", output_path.display());
            }
        }
        Ok(process)
    }

    fn ensure_available(&self) -> CoreResult<()> {
        if *lock(&self.unavailable) {
            Err(CoreError::DependencyNotFound("ffmpeg".to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::FfmpegProcess;
    use ffmpeg_sidecar::event::LogLevel;

    fn command(args: &[&str]) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new();
        cmd.args(args);
        cmd
    }

    #[test]
    fn test_expectation_requires_all_patterns() {
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation(
            &["b.mp4", "silencedetect"],
            vec![FfmpegEvent::Log(LogLevel::Info, "second".to_string())],
            false,
        );
        spawner.add_success_expectation(
            &["a.mp4", "silencedetect"],
            vec![FfmpegEvent::Log(LogLevel::Info, "first".to_string())],
            false,
        );

        let mut process = spawner
            .spawn(command(&["-i", "in/a.mp4", "-af", "silencedetect=noise=-30dB:d=0.5"]))
            .unwrap();
        let mut seen = Vec::new();
        process
            .handle_events(|event| {
                if let FfmpegEvent::Log(_, line) = event {
                    seen.push(line);
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec!["first".to_string()]);
        assert_eq!(spawner.pending_expectations(), 1);
        assert_eq!(spawner.get_received_calls().len(), 1);
    }

    #[test]
    fn test_exit_error_expectation_reports_code() {
        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation(&["x.mp4"], Vec::new(), 1);
        let mut process = spawner.spawn(command(&["-i", "x.mp4"])).unwrap();
        let status = process.wait().unwrap();
        assert!(!status.success());
        assert_eq!(status.code(), Some(1));
    }

    #[test]
    fn test_dummy_output_is_created_at_last_argument() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("out.mp4");
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation(&["in.mp4"], Vec::new(), true);
        spawner
            .spawn(command(&["-i", "in.mp4", output.to_str().unwrap()]))
            .unwrap();
        assert!(output.is_file());
    }

    #[test]
    fn test_unavailable_spawner_fails_dependency_check() {
        let spawner = MockFfmpegSpawner::new();
        assert!(spawner.ensure_available().is_ok());
        spawner.set_unavailable();
        assert!(matches!(
            spawner.ensure_available(),
            Err(CoreError::DependencyNotFound(_))
        ));
    }
}
