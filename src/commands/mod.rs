//! CLI commands

pub mod fix;
pub mod list;
pub mod utils;
