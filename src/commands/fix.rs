//! Fix command - Patch every Unity installation found

use anyhow::Result;
use owo_colors::OwoColorize;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use super::utils;
use unity_blender_fix::config::BUGGY_FLAG;
use unity_blender_fix::elevation::{Elevator, RestartOutcome};
use unity_blender_fix::patcher::{self, BackupStatus, PatchOutcome, Patched};
use unity_blender_fix::report::Tally;
use unity_blender_fix::unity::{self, Installation, ScriptState};

/// Options for the fix command
#[derive(Debug)]
pub struct FixOptions {
    /// Directories scanned for installations
    pub roots: Vec<PathBuf>,
    /// Answer yes to the elevation prompt
    pub yes: bool,
    /// Wait for Enter before exiting
    pub pause: bool,
    /// Arguments forwarded to an elevated relaunch
    pub relaunch_args: Vec<OsString>,
}

/// Execute the fix command
pub fn execute(options: &FixOptions, elevator: &dyn Elevator) -> Result<()> {
    let mut out = io::stdout();
    if run(&mut out, options, elevator)? {
        // The elevated process owns the run from here
        return Ok(());
    }
    utils::pause(options.pause)
}

/// Locate, patch and report; returns true when an elevated relaunch took over
pub fn run<W: Write>(out: &mut W, options: &FixOptions, elevator: &dyn Elevator) -> Result<bool> {
    writeln!(out, "{}", "Unity Blender Animation Fix Tool".green())?;
    writeln!(out, "Fixes {} bug in Unity's Blender importer", BUGGY_FLAG)?;
    writeln!(out, "{}", "-".repeat(60))?;

    let installations = unity::locate(options.roots.as_slice());

    if installations.is_empty() {
        writeln!(out, "{}", "ERROR: No Unity installations found!".red())?;
        writeln!(out, "Make sure Unity is installed via Unity Hub, or pass --root <DIR>.")?;
        return Ok(false);
    }

    writeln!(out, "Found {} Unity installation(s):", installations.len())?;
    for installation in &installations {
        writeln!(
            out,
            "  {}: {}",
            installation.name,
            installation.path.display().dimmed()
        )?;
    }
    writeln!(out)?;

    let tally = patch_all(out, &installations)?;

    writeln!(out)?;
    writeln!(out, "{}", tally.summary())?;

    offer_restart(out, &tally, options, elevator)
}

/// Ask for an elevated relaunch when permission errors occurred
///
/// Returns true once a relaunch has been requested; the caller must then
/// exit without further output.
pub fn offer_restart<W: Write>(
    out: &mut W,
    tally: &Tally,
    options: &FixOptions,
    elevator: &dyn Elevator,
) -> Result<bool> {
    if !tally.needs_elevation() {
        return Ok(false);
    }
    if !options.yes && !utils::confirm("Attempt to restart as administrator?")? {
        return Ok(false);
    }

    writeln!(out, "Attempting to restart with administrator privileges...")?;
    match elevator.restart_elevated(&options.relaunch_args) {
        Ok(RestartOutcome::Launched) => return Ok(true),
        Ok(RestartOutcome::AlreadyElevated) => {
            writeln!(
                out,
                "{} Already running as administrator; a restart would not help.",
                "Note:".yellow()
            )?;
        }
        Ok(RestartOutcome::Unsupported) => {
            writeln!(
                out,
                "{} Restarting with elevated privileges is not supported on this platform.",
                "Failed:".red()
            )?;
        }
        Err(e) => {
            writeln!(out, "{} {}", "Failed to restart as administrator:".red(), e)?;
        }
    }

    Ok(false)
}

/// Patch each installation in turn and count the outcomes
pub fn patch_all<W: Write>(out: &mut W, installations: &[Installation]) -> Result<Tally> {
    let mut tally = Tally::default();
    for installation in installations {
        tally.record(patch_one(out, installation)?);
    }
    Ok(tally)
}

fn patch_one<W: Write>(out: &mut W, installation: &Installation) -> Result<PatchOutcome> {
    writeln!(out, "Processing Unity {}...", installation.name)?;

    let result = patcher::patch_installation(installation);
    match &result {
        Ok(Patched::Applied { backup }) => {
            match backup {
                BackupStatus::Failed(_) => writeln!(out, "  {} {}", "Warning:".yellow(), backup)?,
                _ => writeln!(out, "  {}", backup)?,
            }
            writeln!(out, "  {}", "Successfully patched!".green())?;
        }
        Ok(Patched::NothingToDo(ScriptState::Unrecognized)) => {
            writeln!(out, "  Already patched or different format")?;
            log::warn!(
                "Neither form of the flag found in {}",
                installation.script_path().display()
            );
        }
        Ok(Patched::NothingToDo(_)) => {
            writeln!(out, "  Already patched")?;
        }
        Err(e) => {
            writeln!(out, "  {}", e.to_string().red())?;
        }
    }

    Ok(patcher::outcome_of(&result))
}
