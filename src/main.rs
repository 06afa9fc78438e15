//! Quarm Character Manager - command line entry point.
//!
//! # Overview
//!
//! Copies and exports Project Quarm per-character configuration files:
//! - `UI_<name>_pq.proj.ini` (UI layout)
//! - `<name>_pq.proj.ini` (client configuration)
//! - `<name>_spellsets.ini` (spell sets)
//!
//! # Execution Flow
//!
//! 1. Parse the command line
//! 2. Locate the per-user config directory and load `settings.yaml`
//! 3. Initialize logging → `<config dir>/logs/quarm-charmgr.<date>`
//! 4. Resolve the Project Quarm directory (`--dir` or the last one used)
//! 5. Scan it and run the requested subcommand

use anyhow::Result;
use clap::Parser;
use quarm_charmgr::cli::{self, Cli};
use quarm_charmgr::{APP_NAME, ConfigManager, VERSION};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::for_current_user()?;
    let user_config = config_manager.load_user_config()?;

    // Guard must live until exit so buffered log lines are flushed
    let _guard = quarm_charmgr::logging::setup_logging_with_console(
        &config_manager.log_dir(),
        APP_NAME,
        cli.debug || user_config.debug_mode,
        cli.verbose || user_config.console_logging,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let result = cli::run(cli, &config_manager);
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}
