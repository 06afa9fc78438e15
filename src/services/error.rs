use camino::Utf8PathBuf;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning, copying or exporting character files.
///
/// None of these are retried or recovered internally. A failed multi-category
/// copy leaves the categories written before the failure in place.
#[derive(Error, Debug)]
pub enum CharacterFileError {
    #[error("Failed to read directory {path}: {source}")]
    DirectoryUnreadable {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Character file no longer exists: {0}")]
    SourceFileMissing(Utf8PathBuf),

    #[error("Failed to write {path}: {source}")]
    DestinationWriteFailed {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to build export archive {path}: {source}")]
    ArchiveWriteFailed {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to move export archive to {path}: {source}")]
    ArchiveRelocationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Character {0} not found")]
    CharacterNotFound(String),
}
