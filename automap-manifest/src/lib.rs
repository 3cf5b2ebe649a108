//! Parsing and validation of `automap.toml`.
//!
//! The manifest is the host-side description of the model: every declared
//! type with its fields, field type expressions, and the optional
//! `[types.mapper]` table that marks a type for generation. Errors carry
//! source spans and render through [`miette`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod type_expr;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    AutomapToml, FieldDecl, GeneratorConfig, Manifest, MapperDecl, NestedDecl, ParseContext,
    TypeDecl, parse_manifest,
};
pub use type_expr::{SCALAR_TYPES, TypeExpr, TypeExprError};

/// Parse an automap.toml from a string (uses "automap.toml" as the filename)
pub fn parse_str(content: &str) -> Result<Manifest> {
    parse_manifest(content, "automap.toml")
}
