//! Semantic type categories for declared fields.
//!
//! [`SemanticType`] is a closed union: every field type the generator accepts
//! falls into exactly one variant, and both the wire codec and the mapping
//! strategy are chosen by matching on it.

use serde::Serialize;

use crate::TypeId;

/// Fixed-width scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Bool,
    Char,
    F32,
    F64,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 12] = [
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::Bool,
        Self::Char,
        Self::F32,
        Self::F64,
    ];

    /// The keyword used for this scalar in declarations (`i32`, `bool`, ...).
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// Collection kinds recognized by name.
///
/// `Other` keeps the declared name of a kind outside the supported set so
/// that it can be reported instead of silently mapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CollectionKind {
    List,
    Collection,
    ArrayList,
    Set,
    Other(String),
}

impl CollectionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "List" => Self::List,
            "Collection" => Self::Collection,
            "ArrayList" => Self::ArrayList,
            "Set" => Self::Set,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::List => "List",
            Self::Collection => "Collection",
            Self::ArrayList => "ArrayList",
            Self::Set => "Set",
            Self::Other(name) => name,
        }
    }
}

/// Platform containers with a dedicated wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlatformKind {
    Size,
    SizeF,
    SparseBoolArray,
    Bundle,
}

impl PlatformKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Size" => Some(Self::Size),
            "SizeF" => Some(Self::SizeF),
            "SparseBoolArray" => Some(Self::SparseBoolArray),
            "Bundle" => Some(Self::Bundle),
            _ => None,
        }
    }
}

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SemanticType {
    /// A primitive scalar; never null.
    Scalar { scalar: ScalarKind },
    /// A boxed scalar; may be null.
    Boxed { scalar: ScalarKind },
    Text,
    /// An enumeration identified by its path.
    Enum { path: String },
    /// An ordered sequence or set.
    Collection {
        collection: CollectionKind,
        element: Box<SemanticType>,
    },
    Map {
        key: Box<SemanticType>,
        value: Box<SemanticType>,
    },
    /// A fixed-size array.
    Array { element: Box<SemanticType> },
    Platform { platform: PlatformKind },
    /// An opaque binary blob.
    Blob,
    /// Another declared type.
    Declared { id: TypeId },
    /// Anything else, identified by its path.
    Opaque { path: String },
}

impl SemanticType {
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar { scalar: kind }
    }

    pub fn collection(collection: CollectionKind, element: SemanticType) -> Self {
        Self::Collection {
            collection,
            element: Box::new(element),
        }
    }

    pub fn array(element: SemanticType) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    pub fn map(key: SemanticType, value: SemanticType) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn declared(id: TypeId) -> Self {
        Self::Declared { id }
    }

    /// The declared type referenced directly by this type, if any.
    pub fn as_declared(&self) -> Option<TypeId> {
        match self {
            Self::Declared { id } => Some(*id),
            _ => None,
        }
    }

    /// The element type for collections and arrays, or the value type for maps.
    pub fn element(&self) -> Option<&SemanticType> {
        match self {
            Self::Collection { element, .. } | Self::Array { element } => Some(element),
            Self::Map { value, .. } => Some(value),
            _ => None,
        }
    }

    /// True for primitive scalars, which carry no null state.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }

    /// Collect every declared type reachable through element and key/value
    /// positions, in declaration order.
    pub fn referenced_types(&self, out: &mut Vec<TypeId>) {
        match self {
            Self::Declared { id } => out.push(*id),
            Self::Collection { element, .. } | Self::Array { element } => {
                element.referenced_types(out)
            }
            Self::Map { key, value } => {
                key.referenced_types(out);
                value.referenced_types(out);
            }
            Self::Scalar { .. }
            | Self::Boxed { .. }
            | Self::Text
            | Self::Enum { .. }
            | Self::Platform { .. }
            | Self::Blob
            | Self::Opaque { .. } => {}
        }
    }
}
