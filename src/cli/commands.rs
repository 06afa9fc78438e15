use super::requests::{CopyRequest, ExportRequest};
use super::{CategoryArgs, Cli, Commands};
use crate::config::DirectoryStore;
use crate::models::CharacterSnapshot;
use crate::services::{
    copy_character_files, export_to_archive, files_pending_overwrite, scan_character_files,
};
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Runs the parsed command line against the directory it resolves to.
pub fn run(cli: Cli, store: &impl DirectoryStore) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::List);

    let explicit_dir = match &command {
        Commands::SetDir { path } => Some(path.clone()),
        _ => cli.dir,
    };
    let directory = resolve_directory(explicit_dir, store)?;
    let snapshot = scan_character_files(&directory)
        .with_context(|| format!("Error scanning directory {}", directory))?;

    match command {
        Commands::List | Commands::SetDir { .. } => {
            print_characters(&snapshot);
            Ok(())
        }
        Commands::Copy {
            source,
            target,
            new_name,
            categories,
            yes,
        } => run_copy(
            &snapshot,
            &directory,
            &source,
            target.as_deref(),
            new_name.as_deref(),
            categories,
            yes,
        ),
        Commands::Export {
            names,
            all_characters,
            categories,
            output,
        } => run_export(&snapshot, &names, all_characters, categories, output),
    }
}

/// Picks the working directory: the explicit one, else the saved one.
///
/// The directory must exist. Once validated it is saved for the next run; a
/// failure to save is only logged.
pub fn resolve_directory(
    explicit: Option<Utf8PathBuf>,
    store: &impl DirectoryStore,
) -> Result<Utf8PathBuf> {
    let Some(directory) = explicit.or_else(|| store.load_last_directory()) else {
        bail!("No Project Quarm directory selected. Pass one with --dir or use set-dir.");
    };

    if !directory.is_dir() {
        bail!(
            "Please select a valid Project Quarm directory. {} does not exist.",
            directory
        );
    }

    if let Err(e) = store.save_last_directory(&directory) {
        tracing::warn!("Could not remember directory {}: {:#}", directory, e);
    }

    Ok(directory)
}

fn run_copy(
    snapshot: &CharacterSnapshot,
    directory: &Utf8Path,
    source: &str,
    target: Option<&str>,
    new_name: Option<&str>,
    categories: CategoryArgs,
    yes: bool,
) -> Result<()> {
    let request = CopyRequest::new(source, target, new_name, categories.selection(), snapshot)?;

    let pending = if request.target.is_new() {
        Vec::new()
    } else {
        files_pending_overwrite(request.target.name(), directory, request.selection)
    };

    if !yes && !confirm(&request.confirmation_message(&pending))? {
        println!("Copy cancelled.");
        return Ok(());
    }

    let copied = copy_character_files(
        &request.source,
        request.target.name(),
        snapshot,
        directory,
        request.selection,
    )
    .context("An error occurred while copying files")?;

    if copied.is_empty() {
        println!(
            "No files were copied. The source character may not have the selected file types."
        );
        return Ok(());
    }

    println!("Successfully copied {} file(s):", copied.len());
    for file in &copied {
        println!("  {}", file);
    }

    // The old snapshot no longer reflects the directory
    let refreshed = scan_character_files(directory)
        .with_context(|| format!("Error scanning directory {}", directory))?;
    println!();
    print_characters(&refreshed);
    Ok(())
}

fn run_export(
    snapshot: &CharacterSnapshot,
    names: &[String],
    all_characters: bool,
    categories: CategoryArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let request = ExportRequest::new(names, all_characters, categories.selection(), snapshot)?;

    let archive = export_to_archive(&request.names, snapshot, request.selection)
        .context("An error occurred while exporting")?;
    let destination = export_destination(output.as_deref(), archive.suggested_file_name());
    let saved = archive
        .relocate(&destination)
        .context("An error occurred while exporting")?;

    println!(
        "Successfully exported {} character(s) to:\n{}",
        request.names.len(),
        saved.display()
    );
    Ok(())
}

/// Final archive path: `output` itself, or the suggested name inside it when it
/// is a directory, or the suggested name in the working directory.
pub fn export_destination(output: Option<&Path>, suggested_file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(suggested_file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(suggested_file_name),
    }
}

fn print_characters(snapshot: &CharacterSnapshot) {
    if snapshot.is_empty() {
        println!("No characters found in {}", snapshot.directory());
        return;
    }

    println!("Characters in {}:", snapshot.directory());
    let width = snapshot.names().map(str::len).max().unwrap_or(0);
    for record in snapshot.records() {
        let labels: Vec<_> = record.categories().map(|c| c.label()).collect();
        println!("  {:<width$}  {}", record.name, labels.join(", "));
    }
}

fn confirm(message: &str) -> Result<bool> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", message)?;
    write!(stdout, "Proceed? [y/N] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
