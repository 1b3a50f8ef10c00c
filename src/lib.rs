//! unity-blender-fix library
//!
//! Finds local Unity editor installs and rewrites the bundled Blender
//! importer script so FBX exports include every animation action.
//!
//! # Disclaimer
//!
//! This tool is not affiliated with or endorsed by Unity Technologies or the
//! Blender Foundation. It only edits files inside Unity installs on your
//! machine and keeps a `.backup` copy of the original script.

pub mod config;
pub mod elevation;
pub mod patcher;
pub mod report;
pub mod unity;
