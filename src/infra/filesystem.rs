//! Filesystem operations
//!
//! The pipeline touches the filesystem only to inspect the build directory
//! and, on forced reconfiguration, to remove it.

use std::path::Path;

use crate::error::FilesystemError;

/// Check whether a directory has no entries
pub fn is_empty_dir(path: &Path) -> Result<bool, FilesystemError> {
    let mut entries = std::fs::read_dir(path).map_err(|e| FilesystemError::ReadDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(entries.next().is_none())
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}
