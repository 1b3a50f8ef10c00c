//! Run-level tally and summary

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::patcher::PatchOutcome;

/// Outcome counters for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    pub patched: usize,
    pub already_fixed: usize,
    pub permission_errors: usize,
    pub errors: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: PatchOutcome) {
        match outcome {
            PatchOutcome::Patched => self.patched += 1,
            PatchOutcome::AlreadyFixed => self.already_fixed += 1,
            PatchOutcome::PermissionError => self.permission_errors += 1,
            PatchOutcome::Error => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.patched + self.already_fixed + self.permission_errors + self.errors
    }

    /// Whether an elevated retry could help
    pub fn needs_elevation(&self) -> bool {
        self.permission_errors > 0
    }

    /// Render the counts plus any follow-up guidance
    pub fn summary(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![Cell::new("Result"), Cell::new("Count")]);

        for (label, count) in [
            ("Successfully patched", self.patched),
            ("Already fixed", self.already_fixed),
            ("Permission errors", self.permission_errors),
            ("Other errors", self.errors),
        ] {
            table.add_row(vec![Cell::new(label), Cell::new(count)]);
        }

        let mut out = format!("RESULTS SUMMARY\n{}\n", table);

        if self.total() == 0 {
            out.push_str("\nNo Unity installations processed.\n");
        } else if self.patched > 0 {
            out.push_str(&format!(
                "\nSUCCESS! {} Unity installation(s) fixed.\n\
                 Your Blender files will now export all animations to Unity.\n",
                self.patched
            ));
        }

        if self.permission_errors > 0 {
            out.push_str(&permission_help());
        }

        out
    }
}

fn permission_help() -> String {
    let mut out = String::from("\nTo fix permission errors:\n");
    out.push_str("1. Close Unity and Unity Hub completely\n");
    if cfg!(windows) {
        out.push_str("2. Right-click this program and select 'Run as administrator'\n");
        out.push_str("3. Or run from an administrator command prompt\n");
    } else {
        out.push_str("2. Re-run with a user that can write to the Unity install (e.g. with sudo)\n");
    }
    out
}
