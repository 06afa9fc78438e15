//! Export of character files into a ZIP archive.
//!
//! The archive is written to a temporary file first. The caller receives an
//! [`ExportArchive`] handle and moves it to its final location with
//! [`ExportArchive::relocate`]; dropping the handle instead removes the temporary file.

use super::error::CharacterFileError;
use crate::models::{CategorySelection, CharacterSnapshot};
use chrono::{Local, NaiveDateTime};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

const EXPORT_PREFIX: &str = "quarm_characters_export_";

/// Suggested filename for an export started at `timestamp` (local time).
pub fn export_file_name(timestamp: NaiveDateTime) -> String {
    format!("{EXPORT_PREFIX}{}.zip", timestamp.format("%Y%m%d_%H%M%S"))
}

/// A finished export archive waiting in a temporary location.
#[derive(Debug)]
pub struct ExportArchive {
    temp_path: TempPath,
    file_name: String,
    entries: Vec<String>,
}

impl ExportArchive {
    /// Current (temporary) location of the archive.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Timestamped filename to offer the user.
    pub fn suggested_file_name(&self) -> &str {
        &self.file_name
    }

    /// Entry names written to the archive, in write order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Moves the archive to `destination`, overwriting any existing file.
    ///
    /// A rename is attempted first; when that fails (for example across
    /// filesystems) the archive is copied and the temporary file removed.
    ///
    /// # Errors
    ///
    /// [`CharacterFileError::ArchiveRelocationFailed`] if neither works. The
    /// temporary file is removed in that case too.
    pub fn relocate(self, destination: &Path) -> Result<PathBuf, CharacterFileError> {
        match self.temp_path.persist(destination) {
            Ok(()) => {}
            Err(err) => {
                tracing::debug!(
                    "Rename to {} failed ({}), falling back to copy",
                    destination.display(),
                    err.error
                );
                let temp_path = err.path;
                fs::copy(&temp_path, destination).map_err(|source| {
                    CharacterFileError::ArchiveRelocationFailed {
                        path: destination.to_path_buf(),
                        source,
                    }
                })?;
                drop(temp_path);
            }
        }

        tracing::info!("Export archive saved to {}", destination.display());
        Ok(destination.to_path_buf())
    }
}

/// Bundles the selected characters' files into a temporary ZIP archive.
///
/// Entries are stored flat at the archive root under their canonical filenames,
/// deflate-compressed. Names missing from `snapshot` are skipped, as are repeated
/// names and categories a character has no file for. An empty selection still
/// produces a valid (empty) archive.
///
/// # Errors
///
/// - [`CharacterFileError::SourceFileMissing`] if a recorded file vanished since the scan
/// - [`CharacterFileError::ArchiveWriteFailed`] for any other failure building the archive
pub fn export_to_archive<S: AsRef<str>>(
    selected: &[S],
    snapshot: &CharacterSnapshot,
    selection: CategorySelection,
) -> Result<ExportArchive, CharacterFileError> {
    let file_name = export_file_name(Local::now().naive_local());

    let temp_file = tempfile::Builder::new()
        .prefix(EXPORT_PREFIX)
        .suffix(".zip")
        .tempfile()
        .map_err(|err| CharacterFileError::ArchiveWriteFailed {
            path: std::env::temp_dir(),
            source: ZipError::Io(err),
        })?;
    let (file, temp_path) = temp_file.into_parts();

    let entries = write_archive(file, selected, snapshot, selection).map_err(|err| match err {
        ArchiveFailure::Missing(path) => CharacterFileError::SourceFileMissing(path),
        ArchiveFailure::Zip(source) => CharacterFileError::ArchiveWriteFailed {
            path: temp_path.to_path_buf(),
            source,
        },
    })?;

    tracing::info!(
        "Built export archive with {} file(s) at {}",
        entries.len(),
        temp_path.display()
    );

    Ok(ExportArchive {
        temp_path,
        file_name,
        entries,
    })
}

enum ArchiveFailure {
    Missing(camino::Utf8PathBuf),
    Zip(ZipError),
}

impl From<ZipError> for ArchiveFailure {
    fn from(err: ZipError) -> Self {
        ArchiveFailure::Zip(err)
    }
}

impl From<io::Error> for ArchiveFailure {
    fn from(err: io::Error) -> Self {
        ArchiveFailure::Zip(ZipError::Io(err))
    }
}

fn write_archive<S: AsRef<str>>(
    file: File,
    selected: &[S],
    snapshot: &CharacterSnapshot,
    selection: CategorySelection,
) -> Result<Vec<String>, ArchiveFailure> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for name in selected.iter().map(AsRef::as_ref) {
        if !seen.insert(name) {
            continue;
        }

        let Some(record) = snapshot.get(name) else {
            tracing::warn!("{} is not in the current scan, skipping export", name);
            continue;
        };

        for category in selection.categories() {
            let Some(source_path) = record.path(category) else {
                continue;
            };

            let mut source = match File::open(source_path) {
                Ok(source) => source,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    return Err(ArchiveFailure::Missing(source_path.to_path_buf()));
                }
                Err(err) => return Err(err.into()),
            };

            let entry_name = category.file_name(name);
            zip.start_file(entry_name.as_str(), options)?;
            io::copy(&mut source, &mut zip)?;

            tracing::debug!("Added {} to export archive", entry_name);
            entries.push(entry_name);
        }
    }

    let mut writer = zip.finish()?;
    io::Write::flush(&mut writer)?;
    Ok(entries)
}
