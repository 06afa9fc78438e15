use super::error::CharacterFileError;
use crate::models::{CategorySelection, CharacterSnapshot, FileCategory};
use camino::Utf8Path;
use std::fs::{self, OpenOptions};
use std::io;

/// Lists the canonical files of `target` that a copy with `selection` would overwrite.
///
/// Filenames are returned in category order (UI, Config, Spellsets). Nothing is
/// written; the result only feeds the confirmation prompt.
pub fn files_pending_overwrite(
    target: &str,
    directory: &Utf8Path,
    selection: CategorySelection,
) -> Vec<String> {
    selection
        .categories()
        .map(|category| category.file_name(target))
        .filter(|file_name| directory.join(file_name).exists())
        .collect()
}

/// Copies the selected categories of `source` onto `target`.
///
/// `target` does not need to exist yet; its files are created from the canonical
/// templates. Existing destination files are overwritten without asking. A category
/// the source has no file for is skipped silently.
///
/// # Arguments
///
/// * `source` - Character to copy from; must be present in `snapshot`
/// * `target` - Character to copy to (existing or new)
/// * `snapshot` - Most recent scan, used to look up the source paths
/// * `directory` - Directory the destination files are written to
/// * `selection` - Categories to copy
///
/// # Returns
///
/// Destination filenames actually written, in category order.
///
/// # Errors
///
/// - [`CharacterFileError::CharacterNotFound`] if `source` is not in the snapshot
/// - [`CharacterFileError::SourceFileMissing`] if a recorded source file vanished
/// - [`CharacterFileError::DestinationWriteFailed`] for any other copy failure
///
/// Categories copied before a failure stay copied.
pub fn copy_character_files(
    source: &str,
    target: &str,
    snapshot: &CharacterSnapshot,
    directory: &Utf8Path,
    selection: CategorySelection,
) -> Result<Vec<String>, CharacterFileError> {
    let record = snapshot
        .get(source)
        .ok_or_else(|| CharacterFileError::CharacterNotFound(source.to_string()))?;

    let mut copied = Vec::new();
    for category in selection.categories() {
        let Some(source_path) = record.path(category) else {
            tracing::debug!("{} has no {} file, skipping", source, category);
            continue;
        };

        let file_name = category.file_name(target);
        let destination = directory.join(&file_name);
        copy_preserving_mtime(source_path, &destination)?;

        tracing::debug!("Copied {} -> {}", source_path, destination);
        copied.push(file_name);
    }

    tracing::info!(
        "Copied {} file(s) from {} to {}",
        copied.len(),
        source,
        target
    );
    Ok(copied)
}

fn copy_preserving_mtime(
    source: &Utf8Path,
    destination: &Utf8Path,
) -> Result<(), CharacterFileError> {
    // Copying a file onto itself would truncate it.
    if is_same_file(source, destination) {
        tracing::debug!("{} is its own destination, leaving it untouched", source);
        return Ok(());
    }

    fs::copy(source, destination).map_err(|err| classify_copy_error(err, source, destination))?;

    if let Err(err) = apply_modified_time(source, destination) {
        tracing::warn!(
            "Could not preserve modification time on {}: {}",
            destination,
            err
        );
    }

    Ok(())
}

fn is_same_file(source: &Utf8Path, destination: &Utf8Path) -> bool {
    if source == destination {
        return true;
    }

    match (source.canonicalize_utf8(), destination.canonicalize_utf8()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn apply_modified_time(source: &Utf8Path, destination: &Utf8Path) -> io::Result<()> {
    let modified = fs::metadata(source)?.modified()?;
    OpenOptions::new()
        .write(true)
        .open(destination)?
        .set_modified(modified)
}

fn classify_copy_error(
    err: io::Error,
    source: &Utf8Path,
    destination: &Utf8Path,
) -> CharacterFileError {
    if err.kind() == io::ErrorKind::NotFound && !source.exists() {
        CharacterFileError::SourceFileMissing(source.to_path_buf())
    } else {
        CharacterFileError::DestinationWriteFailed {
            path: destination.to_path_buf(),
            source: err,
        }
    }
}
