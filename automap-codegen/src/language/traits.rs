//! Language-agnostic backend traits.

use std::path::Path;

use eyre::Result;
use serde::Serialize;

use crate::mapping::FieldType;

/// A backend that turns synthesized type shapes into source files.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "rust")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "rs")
    fn file_extension(&self) -> &'static str;

    /// Render every file without writing anything.
    fn preview(&self) -> Vec<PreviewFile>;

    /// Write every file under `output_dir`, overwriting earlier output.
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Files touched by one [`LanguageCodegen::generate`] call, relative to the
/// output directory.
#[derive(Debug, Default, Serialize)]
pub struct GenerateResult {
    pub written: Vec<String>,
    /// Files whose content was already up to date.
    pub unchanged: Vec<String>,
}

impl GenerateResult {
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    pub content: String,
}

/// Maps field types of a synthesized shape to type strings of one language.
pub trait TypeMapper {
    fn language(&self) -> &'static str;

    /// The type of a field that always holds a value.
    fn map_type(&self, ty: &FieldType) -> String;

    /// The type of a field that may hold no value.
    fn map_optional_type(&self, ty: &FieldType) -> String {
        format!("Option<{}>", self.map_type(ty))
    }
}
