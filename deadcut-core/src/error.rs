//! Error types for the deadcut-core library.
//!
//! All fallible operations in the crate return [`CoreResult`]. Failures that
//! come from ffmpeg are built through the `command_*_error` helpers so the
//! messages stay uniform across analysis and encoding.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for deadcut-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required external command not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Cut plan leaves nothing to keep: the gaps cover the whole file")]
    NothingToKeep,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Failed to process {file}: {source}")]
    JobFailed {
        file: String,
        #[source]
        source: Box<CoreError>,
    },
}

/// Result type for deadcut-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds the error for an ffmpeg process that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds the error for a failure while waiting on a spawned process.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds the error for a process that ran but exited unsuccessfully.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_failed_message_includes_file_and_cause() {
        let err = CoreError::JobFailed {
            file: "talk.mp4".to_string(),
            source: Box::new(CoreError::NothingToKeep),
        };
        let message = err.to_string();
        assert!(message.contains("talk.mp4"));
        assert!(message.contains("nothing to keep"));
    }

    #[test]
    fn test_command_start_error_keeps_command_name() {
        let err = command_start_error(
            "ffmpeg (encode)",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, CoreError::CommandStart(ref name, _) if name == "ffmpeg (encode)"));
    }
}
