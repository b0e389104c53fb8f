use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("download folder {path} is not usable: {reason}")]
    OutputDir { path: PathBuf, reason: String },
}

fn unusable(dir: &Path, reason: impl ToString) -> PersistError {
    PersistError::OutputDir {
        path: dir.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Ensure `dir` exists and accepts new files; create it (and parents) if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| unusable(dir, e))?;
        if !meta.is_dir() {
            return Err(unusable(dir, "path is not a directory"));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| unusable(dir, e))?;
    }
    // Writability probe; the temp file is removed on drop.
    NamedTempFile::new_in(dir).map_err(|e| unusable(dir, e))?;
    Ok(())
}

/// Resolve the per-kind subdirectory under `root` and make sure it is usable.
pub fn prepare_run_dir(root: &Path, dir_name: &str) -> Result<PathBuf, PersistError> {
    let dir = root.join(dir_name);
    ensure_output_dir(&dir)?;
    Ok(dir)
}
