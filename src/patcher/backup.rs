//! One-time backup of the script before it is rewritten

use fs_extra::file::{self, CopyOptions};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::BACKUP_SUFFIX;

/// Backup copy failed; the patch still goes ahead
#[derive(Debug, Error)]
#[error("Backup failed: {source}")]
pub struct BackupError {
    pub path: PathBuf,
    #[source]
    pub source: fs_extra::error::Error,
}

/// Result of asking for a backup
#[derive(Debug)]
pub enum BackupStatus {
    Created(PathBuf),
    AlreadyExists(PathBuf),
    Failed(BackupError),
}

impl std::fmt::Display for BackupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created(path) => write!(f, "Backup created: {}", display_name(path)),
            Self::AlreadyExists(_) => write!(f, "Backup already exists"),
            Self::Failed(e) => write!(f, "{}", e),
        }
    }
}

/// `<path>.backup`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `path` to `<path>.backup` unless a backup already exists
///
/// An existing backup is never overwritten, so the first backup taken keeps
/// the original, unpatched content.
pub fn create_backup(path: &Path) -> BackupStatus {
    let backup = backup_path(path);

    if backup.exists() {
        return BackupStatus::AlreadyExists(backup);
    }

    // Default options never overwrite an existing destination
    let options = CopyOptions::new();
    if let Err(source) = file::copy(path, &backup, &options) {
        return BackupStatus::Failed(BackupError {
            path: backup,
            source,
        });
    }

    if let Err(e) = copy_mtime(path, &backup) {
        log::warn!(
            "Could not carry modification time over to {}: {}",
            backup.display(),
            e
        );
    }

    BackupStatus::Created(backup)
}

fn copy_mtime(from: &Path, to: &Path) -> std::io::Result<()> {
    let modified = fs::metadata(from)?.modified()?;
    File::options().write(true).open(to)?.set_modified(modified)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
