//! Data models for the Quarm character manager.
//!
//! This module contains the core data structures used throughout the application:
//! - [`FileCategory`]: The three per-character file kinds (UI, Config, Spellsets) and their filename templates
//! - [`CategorySelection`]: Which categories a copy or export touches
//! - [`CharacterRecord`]: One character's files as verified during a scan
//! - [`CharacterSnapshot`]: The result of a scan, keyed and ordered by character name
//! - [`UserConfig`]: User preferences persisted in `settings.yaml`
//!
//! # Architecture Note
//!
//! Snapshots are plain values. Nothing watches the directory; callers scan again after
//! every copy to pick up new or overwritten files.

pub mod character;
pub mod config;

pub use character::{CategorySelection, CharacterRecord, CharacterSnapshot, FileCategory};
pub use config::{LegacyConfig, UserConfig};
