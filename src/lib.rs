// Quarm Character Manager - per-character configuration files for Project Quarm
//
// This is the library crate containing the file discovery and transfer logic.
// The binary crate (main.rs) provides the command line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{ConfigManager, DirectoryStore};
pub use models::{CategorySelection, CharacterRecord, CharacterSnapshot, FileCategory, UserConfig};
pub use services::{CharacterFileError, ExportArchive};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
