//! Core Unity installation operations

pub mod installation;
pub mod script;

pub use installation::{locate, Installation};
pub use script::ScriptState;
