// ============================================================================
// deadcut-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg CLI
//
// This module encapsulates every interaction with the ffmpeg binary: the
// spawner/process traits, command construction for analysis and encoding,
// the event handler that consumes ffmpeg's diagnostic stream, and the
// dependency check run before a batch starts.
//
// AI-ASSISTANT-INFO: External tool interactions and abstractions for ffmpeg

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains ffmpeg argument building and the event handler for runs
pub mod ffmpeg;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Scripted spawner used by tests to stand in for ffmpeg
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::{
    FfmpegOutputHandler, build_analysis_command, build_cut_command, build_transcode_command,
    ensure_success, run_ffmpeg,
};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs the command with `-version` and discards its output.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The command parts if the command is found
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<Vec<String>> {
    let version_arg = "-version";
    let direct_cmd_parts = vec![cmd_name.to_string()];

    let direct_result = Command::new(&direct_cmd_parts[0])
        .arg(version_arg)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match direct_result {
        Ok(_) => {
            log::debug!("Found dependency directly: {cmd_name}");
            Ok(direct_cmd_parts)
        }
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                log::warn!("Dependency '{cmd_name}' not found.");
                Err(CoreError::DependencyNotFound(cmd_name.to_string()))
            } else {
                log::error!("Failed to start dependency check command '{cmd_name}': {e}");
                Err(CoreError::CommandStart(cmd_name.to_string(), e))
            }
        }
    }
}
