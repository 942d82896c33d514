/// Shared kernel - error taxonomy, result aliases and file safety checks
pub mod error;
mod result;
pub mod security;

pub use result::{Result, SbomResult};
