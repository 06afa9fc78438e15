//! Services module - Pure business logic for character file management.
//!
//! This module contains the core logic for discovering, copying and exporting Project Quarm
//! per-character configuration files. The services are **framework-agnostic** and have no
//! dependencies on the command line layer, making them testable and reusable.
//!
//! # Components
//!
//! - [`scan_character_files`]: Lists a directory once and classifies files into a
//!   [`CharacterSnapshot`](crate::models::CharacterSnapshot) by filename template:
//!   - `<name>_pq.proj.ini` (Config, never starting with `UI_`)
//!   - `UI_<name>_pq.proj.ini` (UI)
//!   - `<name>_spellsets.ini` (Spellsets)
//!
//! - [`files_pending_overwrite`]: Which destination files a copy would replace, for confirmation.
//!
//! - [`copy_character_files`]: Copies selected categories from one character to another
//!   (or to a new name), overwriting unconditionally.
//!
//! - [`export_to_archive`]: Bundles selected characters into a temporary ZIP archive and returns
//!   an [`ExportArchive`] handle to relocate.
//!
//! - [`CharacterFileError`]: Typed failures surfaced to the caller.
//!
//! # Design Philosophy
//!
//! The services layer is designed to be:
//! - **Stateless**: Every call receives its snapshot, directory and selection explicitly
//! - **Synchronous**: Plain blocking filesystem calls on the caller's thread
//! - **Non-reactive**: Nothing re-scans internally; callers scan again after a copy
//!
//! # Usage Example
//!
//! ```ignore
//! use quarm_charmgr::models::CategorySelection;
//! use quarm_charmgr::services::{copy_character_files, files_pending_overwrite, scan_character_files};
//!
//! let snapshot = scan_character_files(dir)?;
//! let pending = files_pending_overwrite("Beta", dir, CategorySelection::all());
//! let copied = copy_character_files("Alpha", "Beta", &snapshot, dir, CategorySelection::all())?;
//! ```

pub mod archive;
pub mod error;
pub mod scanner;
pub mod transfer;

pub use archive::{ExportArchive, export_file_name, export_to_archive};
pub use error::CharacterFileError;
pub use scanner::{collect_character_names, scan_character_files};
pub use transfer::{copy_character_files, files_pending_overwrite};
