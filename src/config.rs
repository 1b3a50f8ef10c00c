//! Platform-specific configuration and paths

use std::path::PathBuf;

/// Directory, relative to an installation root, whose presence marks a Unity editor install
pub const TOOLS_SUBDIR: &str = "Editor/Data/Tools";

/// Bundled Blender importer script
pub const SCRIPT_NAME: &str = "Unity-BlenderToFBX.py";

/// Exporter argument that drops every action except the active one
pub const BUGGY_FLAG: &str = "bake_anim_use_all_actions=False";

/// Replacement for [`BUGGY_FLAG`]
pub const CORRECTED_FLAG: &str = "bake_anim_use_all_actions=True";

/// Suffix appended to the script path for the one-time backup copy
pub const BACKUP_SUFFIX: &str = ".backup";

/// Directories that may contain Unity editor installs, one per subdirectory
/// - Windows: Unity Hub and standalone install locations on common drives
/// - Linux: ~/Unity/Hub/Editor and /opt
/// - macOS: /Applications
pub fn candidate_roots() -> Vec<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        [
            "C:/Program Files/Unity/Hub/Editor",
            "C:/Program Files (x86)/Unity/Hub/Editor",
            "D:/Unity/Hub/Editor",
            "E:/Unity/Hub/Editor",
            "C:/Program Files/Unity",
            "C:/Program Files (x86)/Unity",
        ]
        .iter()
        .map(PathBuf::from)
        .collect()
    }

    #[cfg(target_os = "linux")]
    {
        let mut roots = Vec::new();
        if let Some(home) = dirs::home_dir() {
            roots.push(home.join("Unity").join("Hub").join("Editor"));
        }
        roots.push(PathBuf::from("/opt/Unity/Hub/Editor"));
        roots.push(PathBuf::from("/opt/unity"));
        roots
    }

    #[cfg(target_os = "macos")]
    {
        vec![
            PathBuf::from("/Applications/Unity/Hub/Editor"),
            PathBuf::from("/Applications/Unity"),
        ]
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        Vec::new()
    }
}

/// Path of the target script under an installation root
pub fn script_path(installation_root: &std::path::Path) -> PathBuf {
    installation_root.join(TOOLS_SUBDIR).join(SCRIPT_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_candidate_roots_do_not_panic() {
        let _ = candidate_roots();
    }

    #[test]
    fn test_script_path() {
        let path = script_path(Path::new("/unity/2022.3.10f1"));
        assert!(path.ends_with("Editor/Data/Tools/Unity-BlenderToFBX.py"));
        assert!(path.starts_with("/unity/2022.3.10f1"));
    }

    #[test]
    fn test_flags_differ_only_in_value() {
        let prefix = BUGGY_FLAG.trim_end_matches("False");
        assert_eq!(CORRECTED_FLAG, format!("{}True", prefix));
    }
}
