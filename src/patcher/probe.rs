//! Write-permission probe

use std::path::Path;

/// Check whether a file can be created in `dir`
///
/// Creates a uniquely named file and removes it again. The file is owned by
/// a `NamedTempFile`, so it is deleted on every path out of this function.
pub fn can_write(dir: &Path) -> bool {
    let probe = match tempfile::Builder::new()
        .prefix(".permission_probe")
        .suffix(".tmp")
        .tempfile_in(dir)
    {
        Ok(f) => f,
        Err(e) => {
            log::debug!("Write probe failed in {}: {}", dir.display(), e);
            return false;
        }
    };

    match probe.close() {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Failed to remove probe file in {}: {}", dir.display(), e);
            false
        }
    }
}
