//! Integration tests for copying character files
//!
//! These tests verify:
//! - Overwrite detection before a copy
//! - Copying to existing and new characters
//! - Skipping categories the source has no file for
//! - Byte-for-byte content and modification time preservation
//! - Repeated copies producing the same result

use camino::Utf8PathBuf;
use quarm_charmgr::CategorySelection;
use quarm_charmgr::services::{
    copy_character_files, files_pending_overwrite, scan_character_files,
};
use std::fs;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn create_quarm_dir(files: &[(&str, &[u8])]) -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }
    (temp_dir, dir)
}

fn alpha_and_beta() -> (TempDir, Utf8PathBuf) {
    create_quarm_dir(&[
        ("UI_Alpha_pq.proj.ini", b"[UI]\nalpha=1\n"),
        ("Alpha_pq.proj.ini", b"[Defaults]\nalpha=1\n"),
        ("Alpha_spellsets.ini", b"[Sets]\nheal=1\n"),
        ("Beta_pq.proj.ini", b"[Defaults]\nbeta=1\n"),
    ])
}

#[test]
fn test_copy_all_categories_to_existing_character() {
    let (_temp_dir, dir) = alpha_and_beta();
    let snapshot = scan_character_files(&dir).unwrap();

    let pending = files_pending_overwrite("Beta", &dir, CategorySelection::all());
    assert_eq!(pending, vec!["Beta_pq.proj.ini"]);

    let copied =
        copy_character_files("Alpha", "Beta", &snapshot, &dir, CategorySelection::all()).unwrap();

    assert_eq!(
        copied,
        vec![
            "UI_Beta_pq.proj.ini",
            "Beta_pq.proj.ini",
            "Beta_spellsets.ini"
        ]
    );
    assert_eq!(
        fs::read(dir.join("Beta_pq.proj.ini")).unwrap(),
        b"[Defaults]\nalpha=1\n"
    );
    assert_eq!(
        fs::read(dir.join("UI_Beta_pq.proj.ini")).unwrap(),
        b"[UI]\nalpha=1\n"
    );
    assert_eq!(
        fs::read(dir.join("Beta_spellsets.ini")).unwrap(),
        b"[Sets]\nheal=1\n"
    );
}

#[test]
fn test_missing_source_category_copies_nothing() {
    let (_temp_dir, dir) = alpha_and_beta();
    let snapshot = scan_character_files(&dir).unwrap();
    let ui_only = CategorySelection::new(true, false, false);

    let copied = copy_character_files("Beta", "Gamma", &snapshot, &dir, ui_only).unwrap();

    assert!(copied.is_empty());
    assert!(!dir.join("UI_Gamma_pq.proj.ini").exists());
}

#[test]
fn test_empty_selection_is_a_no_op() {
    let (_temp_dir, dir) = alpha_and_beta();
    let snapshot = scan_character_files(&dir).unwrap();

    let copied =
        copy_character_files("Alpha", "Gamma", &snapshot, &dir, CategorySelection::none())
            .unwrap();

    assert!(copied.is_empty());
    assert_eq!(scan_character_files(&dir).unwrap().len(), 2);
}

#[test]
fn test_copy_to_new_character_then_rescan() {
    let (_temp_dir, dir) = alpha_and_beta();
    let snapshot = scan_character_files(&dir).unwrap();
    let spellsets = CategorySelection::new(false, false, true);

    assert!(files_pending_overwrite("Gamma", &dir, spellsets).is_empty());
    let copied = copy_character_files("Alpha", "Gamma", &snapshot, &dir, spellsets).unwrap();
    assert_eq!(copied, vec!["Gamma_spellsets.ini"]);

    // The old snapshot does not know about Gamma until the directory is scanned again
    assert!(!snapshot.contains("Gamma"));
    let rescanned = scan_character_files(&dir).unwrap();
    let gamma = rescanned.get("Gamma").unwrap();
    let copied_path = gamma.spellsets_path.as_ref().unwrap();
    assert_eq!(
        fs::read(copied_path).unwrap(),
        fs::read(dir.join("Alpha_spellsets.ini")).unwrap()
    );
    assert_eq!(gamma.config_path, None);
    assert_eq!(gamma.ui_path, None);
}

#[test]
fn test_repeated_copy_is_idempotent() {
    let (_temp_dir, dir) = alpha_and_beta();
    let snapshot = scan_character_files(&dir).unwrap();
    let config = CategorySelection::new(false, true, false);

    let first = copy_character_files("Alpha", "Beta", &snapshot, &dir, config).unwrap();
    let after_first = fs::read(dir.join("Beta_pq.proj.ini")).unwrap();
    let second = copy_character_files("Alpha", "Beta", &snapshot, &dir, config).unwrap();
    let after_second = fs::read(dir.join("Beta_pq.proj.ini")).unwrap();

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
    assert_eq!(after_second, b"[Defaults]\nalpha=1\n");
}

#[test]
fn test_modification_time_is_preserved() {
    let (_temp_dir, dir) = alpha_and_beta();
    let source = dir.join("Alpha_pq.proj.ini");
    let old_time = SystemTime::now() - Duration::from_secs(60 * 60 * 24 * 30);
    fs::File::options()
        .write(true)
        .open(&source)
        .unwrap()
        .set_modified(old_time)
        .unwrap();
    let snapshot = scan_character_files(&dir).unwrap();

    copy_character_files(
        "Alpha",
        "Delta",
        &snapshot,
        &dir,
        CategorySelection::new(false, true, false),
    )
    .unwrap();

    let source_mtime = fs::metadata(&source).unwrap().modified().unwrap();
    let copied_mtime = fs::metadata(dir.join("Delta_pq.proj.ini"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(source_mtime, copied_mtime);
}

#[test]
fn test_failure_keeps_earlier_categories() {
    let (_temp_dir, dir) = alpha_and_beta();
    let snapshot = scan_character_files(&dir).unwrap();
    // A directory in the way of the config destination makes that copy fail
    fs::create_dir(dir.join("Omega_pq.proj.ini")).unwrap();

    let result = copy_character_files("Alpha", "Omega", &snapshot, &dir, CategorySelection::all());

    assert!(result.is_err());
    assert!(dir.join("UI_Omega_pq.proj.ini").is_file());
    assert!(!dir.join("Omega_spellsets.ini").exists());
}
