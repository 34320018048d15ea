//! Utility functions for formatting and path handling.
//!
//! This module provides general-purpose helpers used throughout the
//! deadcut-core library: duration and byte formatting, ffmpeg timestamp
//! parsing, and the mapping from input paths to mirrored output paths.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Extension (case-insensitive) of the media files the batch processes.
pub const PROCESSABLE_EXTENSION: &str = "mp4";

/// Extension (case-insensitive) of the archives unpacked before discovery.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Returns true when the path carries the given extension, ignoring case.
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext_str| ext_str.eq_ignore_ascii_case(extension))
}

/// Checks if the given path is an existing `.mp4` file.
#[must_use]
pub fn is_processable_video(path: &Path) -> bool {
    path.is_file() && has_extension(path, PROCESSABLE_EXTENSION)
}

/// Maps an input file to its location under the output root.
///
/// The relative directory structure below `input_root` is preserved and the
/// file name is unchanged.
pub fn output_path_for(input_root: &Path, output_root: &Path, input: &Path) -> CoreResult<PathBuf> {
    let relative = input.strip_prefix(input_root).map_err(|_| {
        CoreError::PathError(format!(
            "{} is not inside input directory {}",
            input.display(),
            input_root.display()
        ))
    })?;
    Ok(output_root.join(relative))
}

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Parses FFmpeg time string (HH:MM:SS.MS) to seconds. Returns None if invalid.
#[must_use]
pub fn parse_ffmpeg_time(time: &str) -> Option<f64> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() == 3 {
        let hours = parts[0].parse::<f64>().ok()?;
        let minutes = parts[1].parse::<f64>().ok()?;
        let seconds = parts[2].parse::<f64>().ok()?;
        Some(hours * 3600.0 + minutes * 60.0 + seconds)
    } else {
        None
    }
}

/// Safely extracts filename from a path with consistent error handling.
pub fn get_filename_safe(path: &Path) -> CoreResult<String> {
    Ok(path
        .file_name()
        .ok_or_else(|| CoreError::PathError(format!("Failed to get filename for {}", path.display())))?
        .to_string_lossy()
        .to_string())
}

/// Calculates the percentage size reduction from input to output.
/// Returns 0 if input_size is 0 or the output grew.
#[must_use]
pub fn calculate_size_reduction(input_size: u64, output_size: u64) -> u64 {
    if input_size == 0 || output_size >= input_size {
        0
    } else {
        let kept = (u128::from(output_size) * 100) / u128::from(input_size);
        100 - kept as u64
    }
}
