//! Configuration structures and constants for the deadcut-core library.
//!
//! This module provides the explicit configuration passed into the batch
//! driver, replacing hard-coded directory roots with values chosen by the
//! caller.

mod builder;
mod detection;
mod encoding;

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

pub use builder::CoreConfigBuilder;
pub use detection::DetectionParams;
pub use encoding::{
    AUDIO_BITRATE, AUDIO_CODEC, ENCODE_CRF, ENCODE_LEVEL, ENCODE_MOVFLAGS, ENCODE_PRESET,
    ENCODE_PROFILE, encode_output_args,
};

// Default constants

/// Default input root, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "in";

/// Default output root, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Default number of concurrent encode jobs.
pub const DEFAULT_THREADS: usize = 3;

/// Default minimum overlap, in seconds, for a freeze/silence pair to be cut.
pub const DEFAULT_MIN_GAP_SECS: f64 = 1.5;

/// Keep segments no longer than this many seconds are dropped from the plan.
pub const SEGMENT_EPSILON_SECS: f64 = 0.001;

/// Main configuration structure for the deadcut-core library.
///
/// Created by the consumer of the library (e.g. deadcut-cli) and passed to
/// `process_videos`.
///
/// # Examples
///
/// ```rust
/// use deadcut_core::config::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(PathBuf::from("in"), PathBuf::from("out"));
/// config.threads = 4;
/// config.force_encode = true;
/// assert_eq!(config.min_gap_secs, 1.5);
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Root directory walked for archives and `.mp4` inputs
    pub input_dir: PathBuf,

    /// Root directory that mirrors the input tree with processed files
    pub output_dir: PathBuf,

    /// Number of encode jobs run in parallel (>= 1)
    pub threads: usize,

    /// Re-encode files even when no gap qualifies for removal
    pub force_encode: bool,

    /// Surface ffmpeg's own output at info level
    pub verbose: bool,

    /// Minimum overlap of a freeze and a silence, in seconds, to be cut
    pub min_gap_secs: f64,

    /// Extract `.zip` archives found under the input root before discovery
    pub extract_archives: bool,

    /// Parameters for the video freeze pass
    pub freeze_params: DetectionParams,

    /// Parameters for the audio silence pass
    pub silence_params: DetectionParams,
}

impl CoreConfig {
    /// Creates a configuration for the given roots with every other option at its default.
    #[must_use]
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ..Self::default()
        }
    }

    /// Checks the configuration before any file is touched.
    pub fn validate(&self) -> CoreResult<()> {
        if self.threads == 0 {
            return Err(CoreError::Config(
                "thread count must be at least 1".to_string(),
            ));
        }

        if !self.min_gap_secs.is_finite() || self.min_gap_secs < 0.0 {
            return Err(CoreError::Config(format!(
                "minimum gap duration must be a non-negative number of seconds, got {}",
                self.min_gap_secs
            )));
        }

        if !self.input_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "input directory '{}' does not exist or is not a directory",
                self.input_dir.display()
            )));
        }

        let input_root = resolve_root(&self.input_dir);
        let output_root = resolve_root(&self.output_dir);
        if input_root == output_root {
            return Err(CoreError::Config(format!(
                "input and output directories must differ (both are '{}')",
                self.input_dir.display()
            )));
        }

        // Outputs inside the input tree would be picked up as inputs on the next run.
        if output_root.starts_with(&input_root) || input_root.starts_with(&output_root) {
            return Err(CoreError::Config(format!(
                "input directory '{}' and output directory '{}' must not contain each other",
                self.input_dir.display(),
                self.output_dir.display()
            )));
        }

        Ok(())
    }
}

/// Canonicalizes the deepest existing ancestor of `path` and re-appends the
/// components that do not exist yet.
fn resolve_root(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();

    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return absolute,
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            threads: DEFAULT_THREADS,
            force_encode: false,
            verbose: false,
            min_gap_secs: DEFAULT_MIN_GAP_SECS,
            extract_archives: true,
            freeze_params: DetectionParams::FREEZE,
            silence_params: DetectionParams::SILENCE,
        }
    }
}
