//! Script patching
//!
//! Each installation walks the same sequence: locate the script, read it,
//! bail out early when the buggy flag is absent, probe write access, back
//! up, then rewrite. The file is only touched in the last step.

pub mod backup;
pub mod probe;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::unity::script::{self, ScriptState};
use crate::unity::Installation;
pub use backup::{BackupError, BackupStatus};

/// Per-installation result category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Patched,
    AlreadyFixed,
    Error,
    PermissionError,
}

/// Successful end states
#[derive(Debug)]
pub enum Patched {
    /// Script rewritten
    Applied { backup: BackupStatus },
    /// Buggy flag absent, nothing written
    NothingToDo(ScriptState),
}

impl Patched {
    pub fn outcome(&self) -> PatchOutcome {
        match self {
            Self::Applied { .. } => PatchOutcome::Patched,
            Self::NothingToDo(_) => PatchOutcome::AlreadyFixed,
        }
    }
}

/// Failed end states
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Script not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Read error: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied - administrator rights required")]
    PermissionDenied(PathBuf),

    #[error("Write error: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PatchError {
    pub fn outcome(&self) -> PatchOutcome {
        match self {
            Self::PermissionDenied(_) => PatchOutcome::PermissionError,
            Self::NotFound(_) | Self::Read { .. } | Self::Write { .. } => PatchOutcome::Error,
        }
    }
}

/// Outcome category of a patch attempt, success or not
pub fn outcome_of(result: &Result<Patched, PatchError>) -> PatchOutcome {
    match result {
        Ok(p) => p.outcome(),
        Err(e) => e.outcome(),
    }
}

/// Patch the importer script of one installation
pub fn patch_installation(installation: &Installation) -> Result<Patched, PatchError> {
    patch_script(&installation.script_path())
}

/// Patch a script file in place
pub fn patch_script(path: &Path) -> Result<Patched, PatchError> {
    patch_script_with(path, probe::can_write)
}

/// Patch a script, asking `can_write` whether its directory is writable
pub fn patch_script_with<F>(path: &Path, can_write: F) -> Result<Patched, PatchError>
where
    F: Fn(&Path) -> bool,
{
    if !path.is_file() {
        return Err(PatchError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let state = ScriptState::classify(&content);
    if !state.needs_fix() {
        log::debug!("{}: {}", path.display(), state);
        return Ok(Patched::NothingToDo(state));
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    if !can_write(dir) {
        return Err(PatchError::PermissionDenied(dir.to_path_buf()));
    }

    let backup = backup::create_backup(path);

    fs::write(path, script::apply_fix(&content)).map_err(|source| PatchError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Patched::Applied { backup })
}
