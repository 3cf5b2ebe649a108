//! Files written by the Rust backend.

mod mod_rs;
mod type_rs;

pub use mod_rs::ModRs;
pub use type_rs::TypeRs;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by automap. Do not edit by hand.";
