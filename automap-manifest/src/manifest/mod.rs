//! Manifest types and parsing for automap.toml files.

mod file;
mod parse;
mod validate;

pub use file::AutomapToml;
pub use parse::parse_manifest;
use serde::{Deserialize, Serialize};
pub use validate::ParseContext;

/// Root manifest for automap.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Output settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Declared model types, in declaration order
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl Manifest {
    /// Find a type by its fully-qualified name.
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|ty| ty.name == name)
    }

    /// Types carrying a `[types.mapper]` table.
    pub fn annotated(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.iter().filter(|ty| ty.mapper.is_some())
    }
}

/// The `[generator]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Rust path of the generated module tree
    #[serde(default = "default_module_root")]
    pub module_root: String,

    /// Rust path prefix under which hand-written source types live
    #[serde(default = "default_source_root")]
    pub source_root: String,

    /// Package prefix dropped when turning packages into module paths
    #[serde(default)]
    pub package_root: Option<String>,

    /// Derives placed on every generated struct
    #[serde(default = "default_derives")]
    pub derives: Vec<String>,

    /// Spaces per indentation level in generated code
    #[serde(default = "default_indent")]
    pub indent: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_root: default_module_root(),
            source_root: default_source_root(),
            package_root: None,
            derives: default_derives(),
            indent: default_indent(),
        }
    }
}

fn default_module_root() -> String {
    "crate::generated".to_string()
}

fn default_source_root() -> String {
    "crate".to_string()
}

fn default_derives() -> Vec<String> {
    ["Debug", "Clone", "PartialEq"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_indent() -> u8 {
    4
}

/// One `[[types]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    /// Fully-qualified dotted name, e.g. `com.example.model.ApiCity`
    pub name: String,

    #[serde(default)]
    pub superclass: Option<String>,

    /// Whether the type defines a post-mapping hook
    #[serde(default)]
    pub has_map_hook: bool,

    #[serde(default)]
    pub nested: Option<NestedDecl>,

    #[serde(default)]
    pub fields: Vec<FieldDecl>,

    #[serde(default)]
    pub mapper: Option<MapperDecl>,
}

impl TypeDecl {
    /// The last segment of the dotted name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Everything before the last dot, or "" for the default package.
    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(pkg, _)| pkg)
    }
}

/// Enclosing-type information for a nested declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NestedDecl {
    /// Simple name of the enclosing type (dotted for deeper nesting)
    pub outer: String,

    #[serde(rename = "static", default = "default_true")]
    pub is_static: bool,

    #[serde(default)]
    pub private: bool,
}

fn default_true() -> bool {
    true
}

/// One field of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,

    /// Type expression, see [`TypeExpr`](crate::TypeExpr)
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub private: bool,

    /// Rust path of a `TypeAdapter` used instead of the built-in codec
    #[serde(default)]
    pub adapter: Option<String>,

    /// Version the field was introduced in
    #[serde(default)]
    pub since: u32,
}

/// The `[types.mapper]` table marking a type as annotated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MapperDecl {
    #[serde(default)]
    pub map_from: Option<String>,

    #[serde(default)]
    pub target_name: Option<String>,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub extend: bool,

    #[serde(default)]
    pub wire_encoded: bool,

    #[serde(default)]
    pub version: u32,
}

impl Default for MapperDecl {
    fn default() -> Self {
        Self {
            map_from: None,
            target_name: None,
            prefix: default_prefix(),
            extend: false,
            wire_encoded: false,
            version: 0,
        }
    }
}

fn default_prefix() -> String {
    "FD".to_string()
}
