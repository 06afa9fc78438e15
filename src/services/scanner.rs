//! Character file discovery.
//!
//! A scan lists the directory once, collects every character name that any of the
//! three filename templates yields, then checks each name's canonical paths on disk.
//!
//! ```ignore
//! use quarm_charmgr::services::scan_character_files;
//!
//! let snapshot = scan_character_files(Utf8Path::new("C:/Games/Quarm"))?;
//! for record in snapshot.records() {
//!     println!("{}", record.name);
//! }
//! ```

use super::error::CharacterFileError;
use crate::models::{CharacterRecord, CharacterSnapshot, FileCategory};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

/// Scans `directory` (non-recursively) for character files.
///
/// # Arguments
///
/// * `directory` - Project Quarm directory containing the `*.ini` files
///
/// # Returns
///
/// A snapshot keyed by character name. An empty directory yields an empty snapshot.
///
/// # Errors
///
/// [`CharacterFileError::DirectoryUnreadable`] if the directory cannot be listed.
/// A file that disappears between listing and verification is not an error; its
/// path is simply recorded as absent.
pub fn scan_character_files(directory: &Utf8Path) -> Result<CharacterSnapshot, CharacterFileError> {
    let file_names = list_file_names(directory)?;
    let names = collect_character_names(&file_names);

    let mut characters = BTreeMap::new();
    for name in names {
        let record = CharacterRecord {
            config_path: existing_path(directory, FileCategory::Config, name),
            ui_path: existing_path(directory, FileCategory::Ui, name),
            spellsets_path: existing_path(directory, FileCategory::Spellsets, name),
            name: name.to_string(),
        };

        if !record.has_any_file() {
            tracing::warn!("Files for {} vanished during scan, skipping", name);
            continue;
        }

        characters.insert(record.name.clone(), record);
    }

    tracing::info!("Found {} character(s) in {}", characters.len(), directory);
    Ok(CharacterSnapshot::new(directory.to_path_buf(), characters))
}

/// Distinct character names yielded by any category template, sorted.
pub fn collect_character_names(file_names: &[String]) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();

    for category in FileCategory::ALL {
        for file_name in file_names {
            if let Some(name) = category.character_name(file_name) {
                tracing::debug!("{} matches {} for {}", file_name, category, name);
                names.insert(name);
            }
        }
    }

    names
}

fn list_file_names(directory: &Utf8Path) -> Result<Vec<String>, CharacterFileError> {
    let unreadable = |source| CharacterFileError::DirectoryUnreadable {
        path: directory.to_path_buf(),
        source,
    };

    let mut file_names = Vec::new();
    for entry in fs::read_dir(directory).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        match entry.file_name().into_string() {
            Ok(file_name) => file_names.push(file_name),
            Err(raw) => tracing::debug!("Skipping non UTF-8 file name {:?}", raw),
        }
    }

    Ok(file_names)
}

fn existing_path(
    directory: &Utf8Path,
    category: FileCategory,
    name: &str,
) -> Option<Utf8PathBuf> {
    let path = category.path_in(directory, name);
    path.is_file().then_some(path)
}
