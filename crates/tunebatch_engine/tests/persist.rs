use std::fs;

use tempfile::TempDir;
use tunebatch_engine::{ensure_output_dir, prepare_run_dir, PersistError};

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("music").join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn existing_dir_is_left_empty_after_probe() {
    let temp = TempDir::new().unwrap();
    ensure_output_dir(temp.path()).unwrap();
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn file_in_place_of_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let err = ensure_output_dir(&file_path).unwrap_err();
    let PersistError::OutputDir { path, reason } = err;
    assert_eq!(path, file_path);
    assert_eq!(reason, "path is not a directory");
}

#[test]
fn run_dir_is_nested_under_root() {
    let temp = TempDir::new().unwrap();
    let dir = prepare_run_dir(temp.path(), "YouTube_Music_Songs").unwrap();
    assert_eq!(dir, temp.path().join("YouTube_Music_Songs"));
    assert!(dir.is_dir());
}
