//! Blender importer script inspection
//!
//! Detection is an exact substring match on the exporter argument. Scripts
//! that contain neither the buggy nor the corrected form are left alone.

use crate::config::{BUGGY_FLAG, CORRECTED_FLAG};

/// What the importer script says about the animation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptState {
    /// Buggy flag present
    NeedsFix,
    /// Only the corrected flag present
    Fixed,
    /// Neither form present
    Unrecognized,
}

impl ScriptState {
    pub fn classify(content: &str) -> Self {
        if content.contains(BUGGY_FLAG) {
            Self::NeedsFix
        } else if content.contains(CORRECTED_FLAG) {
            Self::Fixed
        } else {
            Self::Unrecognized
        }
    }

    pub fn needs_fix(self) -> bool {
        self == Self::NeedsFix
    }
}

impl std::fmt::Display for ScriptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NeedsFix => write!(f, "needs fix"),
            Self::Fixed => write!(f, "fixed"),
            Self::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Replace every occurrence of the buggy flag with the corrected one
pub fn apply_fix(content: &str) -> String {
    content.replace(BUGGY_FLAG, CORRECTED_FLAG)
}
