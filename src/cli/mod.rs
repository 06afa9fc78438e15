//! Command line interface.
//!
//! This module contains:
//! - [`Cli`]: clap argument definitions
//! - [`requests`]: Validation of copy/export requests before they reach the services
//! - [`commands`]: Execution of each subcommand and result output

pub mod commands;
pub mod requests;

use crate::models::CategorySelection;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use commands::{resolve_directory, run};
pub use requests::{CopyRequest, CopyTarget, ExportRequest, RequestError};

#[derive(Debug, Parser)]
#[command(name = "quarm-charmgr", version)]
#[command(about = "Copy and export Project Quarm character configuration files", long_about = None)]
pub struct Cli {
    /// Project Quarm directory (defaults to the last one used)
    #[arg(short, long, global = true)]
    pub dir: Option<Utf8PathBuf>,

    /// Log at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    /// Also print log output to the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List characters and the files they have
    List,

    /// Remember a Project Quarm directory and list its characters
    SetDir {
        /// Directory containing the character .ini files
        path: Utf8PathBuf,
    },

    /// Copy configuration files from one character to another
    Copy {
        /// Character to copy from
        source: String,

        /// Existing character to copy to
        #[arg(long = "to", value_name = "CHARACTER")]
        target: Option<String>,

        /// Name of a new character to create files for
        #[arg(long = "new", value_name = "NAME")]
        new_name: Option<String>,

        #[command(flatten)]
        categories: CategoryArgs,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export characters' files into a ZIP archive
    Export {
        /// Characters to export
        names: Vec<String>,

        /// Export every character found
        #[arg(long)]
        all_characters: bool,

        #[command(flatten)]
        categories: CategoryArgs,

        /// Archive path, or a directory to place the timestamped archive in
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// File type switches shared by copy and export.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct CategoryArgs {
    /// Include the UI layout file (UI_<name>_pq.proj.ini)
    #[arg(long)]
    pub ui: bool,

    /// Include the configuration file (<name>_pq.proj.ini)
    #[arg(long)]
    pub config: bool,

    /// Include the spellsets file (<name>_spellsets.ini)
    #[arg(long)]
    pub spellsets: bool,

    /// Include all three file types
    #[arg(short, long)]
    pub all: bool,
}

impl CategoryArgs {
    pub fn selection(&self) -> CategorySelection {
        if self.all {
            CategorySelection::all()
        } else {
            CategorySelection::new(self.ui, self.config, self.spellsets)
        }
    }
}
