//! Installation discovery
//!
//! A Unity editor install is any immediate subdirectory of a candidate root
//! that contains `Editor/Data/Tools`. Unity Hub lays editors out as
//! `<root>/<version>/Editor/...`, so the folder name doubles as the version.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config;

/// A Unity editor install discovered on disk
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Installation {
    /// Folder name, usually the editor version
    pub name: String,
    /// Installation root
    pub path: PathBuf,
}

impl Installation {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    /// Path of the Blender importer script in this install
    pub fn script_path(&self) -> PathBuf {
        config::script_path(&self.path)
    }
}

/// Scan candidate roots for installations
///
/// Roots that don't exist or can't be read contribute nothing. The same
/// directory reached through two roots is reported once.
pub fn locate<P: AsRef<Path>>(roots: &[P]) -> Vec<Installation> {
    let mut found = BTreeSet::new();

    for root in roots {
        let root = root.as_ref();
        if !root.is_dir() {
            log::debug!("Skipping missing root: {}", root.display());
            continue;
        }

        // Symlinked editor directories count as installs
        let walker = WalkDir::new(root).min_depth(1).max_depth(1).follow_links(true);
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::debug!("Failed to read entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if entry.path().join(config::TOOLS_SUBDIR).is_dir() {
                let path = normalize(entry.path());
                log::debug!("Found installation: {}", path.display());
                found.insert(Installation::new(path));
            }
        }
    }

    found.into_iter().collect()
}

/// Canonicalize when possible so overlapping roots dedupe
fn normalize(path: &Path) -> PathBuf {
    match path.canonicalize() {
        Ok(p) => strip_windows_prefix(&p),
        Err(_) => path.to_path_buf(),
    }
}

/// Strip Windows extended-length path prefix (\\?\)
fn strip_windows_prefix(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
        PathBuf::from(stripped)
    } else {
        path.to_path_buf()
    }
}
