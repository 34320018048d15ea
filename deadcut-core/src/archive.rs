//! In-place extraction of `.zip` archives found under the input root.
//!
//! Archives are collected before any is opened, so archives packed inside
//! other archives are left for the next run. A successfully extracted archive
//! is deleted; one that fails to open or extract is left where it is.

use crate::error::CoreResult;
use crate::terminal_output;
use crate::utils::{ARCHIVE_EXTENSION, has_extension};

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

/// What happened to the archives under one root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Archives extracted and deleted.
    pub extracted: Vec<PathBuf>,
    /// Archives left in place because they could not be read.
    pub skipped: Vec<PathBuf>,
}

/// Lists every `.zip` file under `root`, sorted by path.
pub fn find_archives(root: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut archives = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() && has_extension(entry.path(), ARCHIVE_EXTENSION) {
            archives.push(entry.into_path());
        }
    }
    archives.sort();
    Ok(archives)
}

/// Extracts one archive into its own directory.
///
/// Entries whose paths would escape that directory make the zip crate fail
/// the extraction.
pub fn extract_archive(archive_path: &Path) -> CoreResult<()> {
    let destination = archive_path.parent().unwrap_or_else(|| Path::new("."));
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    archive.extract(destination)?;
    Ok(())
}

/// Extracts every archive under `root` in place and deletes the ones that succeed.
///
/// Failures on individual archives are logged and skipped; only a failure to
/// walk `root` itself is returned as an error.
pub fn extract_archives(root: &Path) -> CoreResult<ArchiveSummary> {
    let mut summary = ArchiveSummary::default();

    for archive_path in find_archives(root)? {
        terminal_output::print_processing(&format!("Extracting {}", archive_path.display()));
        match extract_archive(&archive_path) {
            Ok(()) => {
                fs::remove_file(&archive_path)?;
                log::debug!("Removed extracted archive {}", archive_path.display());
                summary.extracted.push(archive_path);
            }
            Err(e) => {
                terminal_output::print_warning(&format!(
                    "Skipping archive {}: {e}",
                    archive_path.display()
                ));
                summary.skipped.push(archive_path);
            }
        }
    }

    Ok(summary)
}
