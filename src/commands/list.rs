//! List command - Show Unity installations and their script state

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use std::fs;
use std::path::PathBuf;

use unity_blender_fix::unity::{self, Installation, ScriptState};

/// Script status as seen without modifying anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatus {
    Missing,
    Unreadable,
    Read(ScriptState),
}

impl std::fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "script missing"),
            Self::Unreadable => write!(f, "unreadable"),
            Self::Read(state) => write!(f, "{}", state),
        }
    }
}

/// Inspect an installation's script
pub fn inspect(installation: &Installation) -> ScriptStatus {
    let path = installation.script_path();
    if !path.is_file() {
        return ScriptStatus::Missing;
    }

    match fs::read_to_string(&path) {
        Ok(content) => ScriptStatus::Read(ScriptState::classify(&content)),
        Err(e) => {
            log::debug!("Failed to read {}: {}", path.display(), e);
            ScriptStatus::Unreadable
        }
    }
}

/// Execute the list command
pub fn execute(roots: &[PathBuf]) -> Result<String> {
    let installations = unity::locate(roots);

    if installations.is_empty() {
        return Ok("No Unity installations found.".to_string());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Version"),
        Cell::new("Path"),
        Cell::new("Script"),
    ]);

    let mut needs_fix = 0;
    for installation in &installations {
        let status = inspect(installation);
        if status == ScriptStatus::Read(ScriptState::NeedsFix) {
            needs_fix += 1;
        }
        table.add_row(vec![
            Cell::new(&installation.name),
            Cell::new(installation.path.to_string_lossy()),
            Cell::new(status),
        ]);
    }

    Ok(format!(
        "{}\n{} installation(s), {} need fixing",
        table,
        installations.len(),
        needs_fix
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use unity_blender_fix::config;

    fn add_install(root: &std::path::Path, name: &str, script: Option<&str>) -> Installation {
        let dir = root.join(name);
        fs::create_dir_all(dir.join(config::TOOLS_SUBDIR)).unwrap();
        let installation = Installation::new(dir);
        if let Some(content) = script {
            fs::write(installation.script_path(), content).unwrap();
        }
        installation
    }

    #[test]
    fn test_inspect() {
        let root = TempDir::new().unwrap();
        let buggy = add_install(root.path(), "a", Some(config::BUGGY_FLAG));
        let fixed = add_install(root.path(), "b", Some(config::CORRECTED_FLAG));
        let missing = add_install(root.path(), "c", None);

        assert_eq!(inspect(&buggy), ScriptStatus::Read(ScriptState::NeedsFix));
        assert_eq!(inspect(&fixed), ScriptStatus::Read(ScriptState::Fixed));
        assert_eq!(inspect(&missing), ScriptStatus::Missing);
    }

    #[test]
    fn test_execute_lists_without_writing() {
        let root = TempDir::new().unwrap();
        let buggy = add_install(root.path(), "2022.3.10f1", Some(config::BUGGY_FLAG));

        let output = execute(&[root.path().to_path_buf()]).unwrap();
        assert!(output.contains("2022.3.10f1"));
        assert!(output.contains("needs fix"));
        assert!(output.contains("1 installation(s), 1 need fixing"));
        assert_eq!(
            fs::read_to_string(buggy.script_path()).unwrap(),
            config::BUGGY_FLAG
        );
    }

    #[test]
    fn test_execute_empty() {
        let output = execute(&[PathBuf::from("/nonexistent/unity/root")]).unwrap();
        assert_eq!(output, "No Unity installations found.");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ScriptStatus::Missing.to_string(), "script missing");
        assert_eq!(
            ScriptStatus::Read(ScriptState::Fixed).to_string(),
            "fixed"
        );
    }
}
