//! Core utilities shared by the automap crates.
//!
//! This crate holds the write side of generation (files and how they are
//! persisted) and the case conversions used for generated names.

mod file;
mod utils;

// File operations
pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::{to_pascal_case, to_snake_case, to_upper_snake_case};
