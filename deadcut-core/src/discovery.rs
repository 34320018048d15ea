//! File discovery module for finding video files to process.
//!
//! Walks the input root recursively for `.mp4` files (case-insensitive) and
//! pairs each with its mirrored location under the output root.

use crate::error::CoreResult;
use crate::utils::{is_processable_video, output_path_for};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One discovered input and the path its result will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Finds video files eligible for processing under `input_dir`.
///
/// Subdirectories are searched. The result is sorted by path so runs are
/// reproducible; an empty list is not an error.
///
/// # Errors
///
/// * `CoreError::Walkdir` - If an error occurs during directory traversal
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir) {
        let entry = entry?;
        if entry.file_type().is_file() && is_processable_video(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Maps each input to its output and splits off the ones already done.
///
/// Returns `(pending, skipped)`; a file is skipped when its output exists.
pub fn plan_outputs(
    input_root: &Path,
    output_root: &Path,
    files: Vec<PathBuf>,
) -> CoreResult<(Vec<PlannedFile>, Vec<PlannedFile>)> {
    let mut pending = Vec::new();
    let mut skipped = Vec::new();

    for input in files {
        let output = output_path_for(input_root, output_root, &input)?;
        let planned = PlannedFile { input, output };
        if planned.output.exists() {
            log::debug!(
                "Output {} already exists, skipping {}",
                planned.output.display(),
                planned.input.display()
            );
            skipped.push(planned);
        } else {
            pending.push(planned);
        }
    }

    Ok((pending, skipped))
}
