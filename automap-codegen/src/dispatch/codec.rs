//! The closed dispatch table from semantic type to wire primitive.
//!
//! Every [`SemanticType`] category resolves to exactly one
//! [`WirePrimitive`]. The encode and decode directives for a field are both
//! derived from that single table entry, so whatever is written is read
//! back with the same primitive and width.

use automap_ir::{CollectionKind, PlatformKind, ScalarKind, SemanticType};
use serde::Serialize;

use super::CoverageError;

/// A paired read/write primitive of the runtime wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WirePrimitive {
    Int,
    Long,
    Float,
    Double,
    Bool,
    Char,
    String,
    Enum,
    /// A sequence or array whose elements are enums.
    EnumList,
    List,
    Set,
    Map,
    BoolArray,
    ByteArray,
    CharArray,
    IntArray,
    LongArray,
    StringArray,
    Array,
    Parcelable,
    Size,
    SizeF,
    SparseBoolArray,
    Bundle,
    Blob,
    /// Tagged dynamic value, the fallback for otherwise untyped fields.
    Value,
}

impl WirePrimitive {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "string",
            Self::Enum => "enum",
            Self::EnumList => "enum_list",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::BoolArray => "bool_array",
            Self::ByteArray => "byte_array",
            Self::CharArray => "char_array",
            Self::IntArray => "int_array",
            Self::LongArray => "long_array",
            Self::StringArray => "string_array",
            Self::Array => "array",
            Self::Parcelable => "parcelable",
            Self::Size => "size",
            Self::SizeF => "size_f",
            Self::SparseBoolArray => "sparse_bool_array",
            Self::Bundle => "bundle",
            Self::Blob => "blob",
            Self::Value => "value",
        }
    }

    /// `WireWriter` method for this primitive.
    pub fn write_method(&self) -> String {
        format!("write_{}", self.name())
    }

    /// `WireReader` method for this primitive.
    pub fn read_method(&self) -> String {
        format!("read_{}", self.name())
    }

    /// How the writer takes its argument.
    pub fn operand(&self) -> Operand {
        match self {
            Self::Int | Self::Long | Self::Float | Self::Double | Self::Bool | Self::Char => {
                Operand::Value
            }
            Self::String => Operand::Str,
            Self::EnumList
            | Self::List
            | Self::Set
            | Self::BoolArray
            | Self::ByteArray
            | Self::CharArray
            | Self::IntArray
            | Self::LongArray
            | Self::StringArray
            | Self::Array
            | Self::Blob => Operand::Slice,
            Self::Enum
            | Self::Map
            | Self::Parcelable
            | Self::Size
            | Self::SizeF
            | Self::SparseBoolArray
            | Self::Bundle => Operand::Ref,
            Self::Value => Operand::Dynamic,
        }
    }

    /// Whether the reader returns `Option<T>` for this primitive.
    pub fn reads_optional(&self) -> bool {
        !matches!(self.operand(), Operand::Value | Operand::Dynamic)
    }
}

/// Argument shape of a writer method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// Passed by value.
    Value,
    /// `Option<&str>`
    Str,
    /// `Option<&[T]>`
    Slice,
    /// `Option<&T>`
    Ref,
    /// `&T` where `T: Dynamic`, nullability included.
    Dynamic,
}

/// Numeric conversion between a field's scalar and its wire primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conversion {
    None,
    /// Lossless widening on write, narrowing `as` cast on read.
    Widen { to: ScalarKind, from: ScalarKind },
    /// Bit-preserving `as` cast both ways.
    Bitcast { to: ScalarKind, from: ScalarKind },
}

/// How to write one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeOp {
    pub primitive: WirePrimitive,
    pub conversion: Conversion,
    /// The field holds `Option<T>`.
    pub optional: bool,
}

/// How to read one field back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodeOp {
    pub primitive: WirePrimitive,
    pub conversion: Conversion,
    /// A `None` from the reader is an error for this field.
    pub required: bool,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    primitive: WirePrimitive,
    conversion: Conversion,
}

impl Entry {
    fn plain(primitive: WirePrimitive) -> Self {
        Self {
            primitive,
            conversion: Conversion::None,
        }
    }
}

/// Encode directive for a field of type `ty`.
pub fn encode_directive(ty: &SemanticType, nullable: bool) -> Result<EncodeOp, CoverageError> {
    let entry = entry(ty, nullable)?;
    Ok(EncodeOp {
        primitive: entry.primitive,
        conversion: entry.conversion,
        optional: holds_option(ty, nullable),
    })
}

/// Decode directive for a field of type `ty`, paired with [`encode_directive`].
pub fn decode_directive(ty: &SemanticType, nullable: bool) -> Result<DecodeOp, CoverageError> {
    let entry = entry(ty, nullable)?;
    Ok(DecodeOp {
        primitive: entry.primitive,
        conversion: entry.conversion,
        required: entry.primitive.reads_optional() && !nullable,
    })
}

/// Whether the field's value is `Option<T>` in generated code.
pub fn holds_option(ty: &SemanticType, nullable: bool) -> bool {
    nullable && !ty.is_primitive()
}

fn entry(ty: &SemanticType, nullable: bool) -> Result<Entry, CoverageError> {
    use WirePrimitive as P;

    let entry = match ty {
        SemanticType::Scalar { scalar } => scalar_entry(*scalar),
        SemanticType::Boxed { .. } if nullable => Entry::plain(P::Value),
        SemanticType::Boxed { scalar } => scalar_entry(*scalar),
        SemanticType::Text => Entry::plain(P::String),
        SemanticType::Enum { .. } => Entry::plain(P::Enum),
        SemanticType::Collection {
            collection,
            element,
        } => {
            let primitive = match collection {
                CollectionKind::List | CollectionKind::Collection | CollectionKind::ArrayList => {
                    P::List
                }
                CollectionKind::Set => P::Set,
                CollectionKind::Other(kind) => {
                    return Err(CoverageError::UnsupportedCollection { kind: kind.clone() });
                }
            };
            if matches!(element.as_ref(), SemanticType::Enum { .. }) {
                return Ok(Entry::plain(P::EnumList));
            }
            check_element(element)?;
            Entry::plain(primitive)
        }
        SemanticType::Map { key, value } => {
            check_key(key)?;
            check_element(value)?;
            Entry::plain(P::Map)
        }
        SemanticType::Array { element } => match element.as_ref() {
            SemanticType::Scalar { scalar } => match scalar {
                ScalarKind::Bool => Entry::plain(P::BoolArray),
                ScalarKind::U8 => Entry::plain(P::ByteArray),
                ScalarKind::Char => Entry::plain(P::CharArray),
                ScalarKind::I32 => Entry::plain(P::IntArray),
                ScalarKind::I64 => Entry::plain(P::LongArray),
                _ => Entry::plain(P::Array),
            },
            SemanticType::Text => Entry::plain(P::StringArray),
            SemanticType::Enum { .. } => Entry::plain(P::EnumList),
            other => {
                check_element(other)?;
                Entry::plain(P::Array)
            }
        },
        SemanticType::Platform { platform } => Entry::plain(match platform {
            PlatformKind::Size => P::Size,
            PlatformKind::SizeF => P::SizeF,
            PlatformKind::SparseBoolArray => P::SparseBoolArray,
            PlatformKind::Bundle => P::Bundle,
        }),
        SemanticType::Blob => Entry::plain(P::Blob),
        SemanticType::Declared { .. } => Entry::plain(P::Parcelable),
        SemanticType::Opaque { .. } => Entry::plain(P::Value),
    };
    Ok(entry)
}

fn scalar_entry(scalar: ScalarKind) -> Entry {
    use WirePrimitive as P;

    let widen = |to| Conversion::Widen { to, from: scalar };
    match scalar {
        ScalarKind::I8 | ScalarKind::I16 | ScalarKind::U8 | ScalarKind::U16 => Entry {
            primitive: P::Int,
            conversion: widen(ScalarKind::I32),
        },
        ScalarKind::I32 => Entry::plain(P::Int),
        ScalarKind::I64 => Entry::plain(P::Long),
        ScalarKind::U32 => Entry {
            primitive: P::Long,
            conversion: widen(ScalarKind::I64),
        },
        ScalarKind::U64 => Entry {
            primitive: P::Long,
            conversion: Conversion::Bitcast {
                to: ScalarKind::I64,
                from: scalar,
            },
        },
        ScalarKind::F32 => Entry::plain(P::Float),
        ScalarKind::F64 => Entry::plain(P::Double),
        ScalarKind::Bool => Entry::plain(P::Bool),
        ScalarKind::Char => Entry::plain(P::Char),
    }
}

/// Element, array slot and map value positions are encoded through the
/// element's own `Parcel` implementation. Enums have none, so only a
/// sequence or array directly holding them is covered, by `enum_list`.
fn check_element(ty: &SemanticType) -> Result<(), CoverageError> {
    match ty {
        SemanticType::Scalar { .. }
        | SemanticType::Boxed { .. }
        | SemanticType::Text
        | SemanticType::Platform { .. }
        | SemanticType::Blob
        | SemanticType::Declared { .. } => Ok(()),
        SemanticType::Collection {
            collection: CollectionKind::Other(kind),
            ..
        } => Err(CoverageError::UnsupportedCollection { kind: kind.clone() }),
        SemanticType::Collection { element, .. } | SemanticType::Array { element } => {
            check_element(element)
        }
        SemanticType::Map { key, value } => {
            check_key(key)?;
            check_element(value)
        }
        SemanticType::Enum { path } => Err(CoverageError::EnumElement { path: path.clone() }),
        SemanticType::Opaque { path } => Err(CoverageError::OpaqueElement { path: path.clone() }),
    }
}

/// Map keys must be totally ordered.
pub(crate) fn check_key(ty: &SemanticType) -> Result<(), CoverageError> {
    match ty {
        SemanticType::Scalar { scalar } | SemanticType::Boxed { scalar } if !scalar.is_float() => {
            Ok(())
        }
        SemanticType::Text => Ok(()),
        other => Err(CoverageError::MapKey {
            key: describe(other),
        }),
    }
}

/// Short human-readable name of a semantic type for diagnostics.
pub(crate) fn describe(ty: &SemanticType) -> String {
    match ty {
        SemanticType::Scalar { scalar } => scalar.keyword().to_string(),
        SemanticType::Boxed { scalar } => format!("Boxed<{}>", scalar.keyword()),
        SemanticType::Text => "String".to_string(),
        SemanticType::Enum { path } => format!("Enum<{path}>"),
        SemanticType::Collection {
            collection,
            element,
        } => format!("{}<{}>", collection.name(), describe(element)),
        SemanticType::Map { key, value } => format!("Map<{}, {}>", describe(key), describe(value)),
        SemanticType::Array { element } => format!("[{}]", describe(element)),
        SemanticType::Platform { platform } => format!("{platform:?}"),
        SemanticType::Blob => "Blob".to_string(),
        SemanticType::Declared { id } => format!("declared type {id}"),
        SemanticType::Opaque { path } => path.clone(),
    }
}
