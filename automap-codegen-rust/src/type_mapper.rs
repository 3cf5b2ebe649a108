//! Rust type mapper implementation.

use automap_codegen::{
    generation::ImportCollector,
    language::TypeMapper,
    mapping::{FieldShape, FieldType},
};
use automap_ir::PlatformKind;

use crate::layout::ModuleLayout;

pub(crate) const RUNTIME: &str = "automap_runtime";
const COLLECTIONS: &str = "std::collections";

/// Maps field types to Rust type syntax.
///
/// Declared types are written as full paths; runtime and std types by
/// their simple name, with [`collect_imports`](Self::collect_imports)
/// recording the `use` they need.
#[derive(Debug, Clone, Copy)]
pub struct RustTypeMapper<'a> {
    layout: &'a ModuleLayout,
}

impl<'a> RustTypeMapper<'a> {
    pub fn new(layout: &'a ModuleLayout) -> Self {
        Self { layout }
    }

    /// The declared type of a struct field.
    pub fn field_type(&self, field: &FieldShape) -> String {
        if field.optional {
            self.map_optional_type(&field.ty)
        } else {
            self.map_type(&field.ty)
        }
    }

    /// Record the imports `ty` needs.
    pub fn collect_imports(&self, ty: &FieldType, imports: &mut ImportCollector) {
        match ty {
            FieldType::Sequence { element, .. } | FieldType::Array { element } => {
                self.collect_imports(element, imports);
            }
            FieldType::Map { key, value } => {
                imports.add(COLLECTIONS, "BTreeMap");
                self.collect_imports(key, imports);
                self.collect_imports(value, imports);
            }
            FieldType::Platform { platform } => match platform {
                PlatformKind::Size => imports.add(RUNTIME, "Size"),
                PlatformKind::SizeF => imports.add(RUNTIME, "SizeF"),
                PlatformKind::SparseBoolArray => imports.add(COLLECTIONS, "BTreeMap"),
                PlatformKind::Bundle => {
                    imports.add(COLLECTIONS, "BTreeMap");
                    imports.add(RUNTIME, "Value");
                }
            },
            _ => {}
        }
    }
}

impl TypeMapper for RustTypeMapper<'_> {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn map_type(&self, ty: &FieldType) -> String {
        match ty {
            FieldType::Scalar { scalar } | FieldType::Boxed { scalar } => {
                scalar.keyword().to_string()
            }
            FieldType::Text => "String".to_string(),
            FieldType::Enum { path } => self.layout.enum_path(path),
            FieldType::Sequence { element, .. } | FieldType::Array { element } => {
                format!("Vec<{}>", self.map_type(element))
            }
            FieldType::Map { key, value } => {
                format!("BTreeMap<{}, {}>", self.map_type(key), self.map_type(value))
            }
            FieldType::Platform { platform } => match platform {
                PlatformKind::Size => "Size",
                PlatformKind::SizeF => "SizeF",
                PlatformKind::SparseBoolArray => "BTreeMap<i32, bool>",
                PlatformKind::Bundle => "BTreeMap<String, Value>",
            }
            .to_string(),
            FieldType::Blob => "Vec<u8>".to_string(),
            FieldType::Mapped { target } => self.layout.target_path(target),
            FieldType::Source { name } => self.layout.source_path(name),
            FieldType::Opaque { path } => path.clone(),
        }
    }
}
