//! Type and field descriptors.

use serde::Serialize;

use crate::{QualifiedName, SemanticType, TypeId};

/// Prefix used to synthesize target names when none is declared.
pub const DEFAULT_PREFIX: &str = "FD";

/// A single declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: SemanticType,
    pub nullable: bool,
    pub private: bool,
    /// Path of a custom adapter that replaces the codec table for this field.
    pub adapter: Option<String>,
    /// Wire version the field was introduced in. Recorded but not consumed.
    pub introduced_version: u32,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            private: false,
            adapter: None,
            introduced_version: 0,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn adapter(mut self, adapter: impl Into<String>) -> Self {
        self.adapter = Some(adapter.into());
        self
    }

    pub fn since(mut self, version: u32) -> Self {
        self.introduced_version = version;
        self
    }
}

/// Where a type is declared relative to other types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Nesting {
    #[default]
    TopLevel,
    Nested {
        outer: String,
        is_static: bool,
        is_private: bool,
    },
}

/// Generation settings attached to an annotated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapperSpec {
    /// The source type this declaration maps from.
    pub map_from: Option<TypeId>,
    /// Explicit target name, simple or fully qualified.
    pub target_name: Option<String>,
    pub prefix: String,
    /// The generated type for `map_from` extends this declaration.
    pub extend: bool,
    pub wire_encoded: bool,
    /// Inert wire version.
    pub version: u32,
}

impl Default for MapperSpec {
    fn default() -> Self {
        Self {
            map_from: None,
            target_name: None,
            prefix: DEFAULT_PREFIX.to_string(),
            extend: false,
            wire_encoded: false,
            version: 0,
        }
    }
}

/// A declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub name: QualifiedName,
    /// Own fields in declaration order; inherited fields are not repeated here.
    pub fields: Vec<FieldDescriptor>,
    pub superclass: Option<TypeId>,
    pub nesting: Nesting,
    /// The declaration provides a post-mapping hook.
    pub has_map_hook: bool,
    /// Present when the type is annotated for generation.
    pub mapper: Option<MapperSpec>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            superclass: None,
            nesting: Nesting::TopLevel,
            has_map_hook: false,
            mapper: None,
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn superclass(mut self, id: TypeId) -> Self {
        self.superclass = Some(id);
        self
    }

    pub fn nesting(mut self, nesting: Nesting) -> Self {
        self.nesting = nesting;
        self
    }

    pub fn map_hook(mut self) -> Self {
        self.has_map_hook = true;
        self
    }

    pub fn mapper(mut self, mapper: MapperSpec) -> Self {
        self.mapper = Some(mapper);
        self
    }

    pub fn is_annotated(&self) -> bool {
        self.mapper.is_some()
    }

    /// The source type this declaration maps from, if any.
    pub fn map_from(&self) -> Option<TypeId> {
        self.mapper.as_ref().and_then(|m| m.map_from)
    }
}
