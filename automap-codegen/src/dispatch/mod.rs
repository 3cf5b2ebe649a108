//! Type dispatch: codec directives per semantic type category.
//!
//! - [`encode_directive`] / [`decode_directive`] - the paired wire table
//! - [`FieldCodec`] - table entry or custom adapter for one field
//! - [`AdapterNames`] - deduplicated adapter constants of one generated type
//! - [`CoverageError`] - a category the tables do not cover

mod adapters;
mod codec;

use automap_ir::{CollectionKind, FieldDescriptor, SemanticType};
use serde::Serialize;
use thiserror::Error;

pub use adapters::{AdapterConst, AdapterNames, WIRE_VERSION};
pub use codec::{
    Conversion, DecodeOp, EncodeOp, Operand, WirePrimitive, decode_directive, encode_directive,
    holds_option,
};

/// A semantic type outside the closed dispatch tables.
///
/// Coverage errors are not local to one type and abort the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    #[error("unsupported collection kind '{kind}' (expected List, Collection, ArrayList, Set or Map)")]
    UnsupportedCollection { kind: String },

    #[error("enum '{path}' can only be encoded directly inside a collection or array")]
    EnumElement { path: String },

    #[error("opaque type '{path}' cannot be encoded as a collection, array or map element")]
    OpaqueElement { path: String },

    #[error("map key '{key}' is not an ordered key type (integers, bool, char or String)")]
    MapKey { key: String },

    #[error("'{shape}' nests mapped types more than one level deep")]
    NestedMapped { shape: String },
}

/// How one field is written and read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldCodec {
    /// Built-in table entry.
    Table { encode: EncodeOp, decode: DecodeOp },
    /// Custom adapter bypassing the table.
    Adapter { constant: String, path: String },
}

impl FieldCodec {
    /// Select the codec for `field`, allocating its adapter constant if any.
    pub fn for_field(
        field: &FieldDescriptor,
        adapters: &mut AdapterNames,
    ) -> Result<Self, CoverageError> {
        if let Some(path) = &field.adapter {
            return Ok(Self::Adapter {
                constant: adapters.constant_for(path),
                path: path.clone(),
            });
        }
        Ok(Self::Table {
            encode: encode_directive(&field.ty, field.nullable)?,
            decode: decode_directive(&field.ty, field.nullable)?,
        })
    }
}

/// Structural checks that apply whether or not a type is wire-encoded:
/// every collection kind is recognized and every map key is ordered.
pub fn check_shape(ty: &SemanticType) -> Result<(), CoverageError> {
    match ty {
        SemanticType::Collection {
            collection: CollectionKind::Other(kind),
            ..
        } => Err(CoverageError::UnsupportedCollection { kind: kind.clone() }),
        SemanticType::Collection { element, .. } | SemanticType::Array { element } => {
            check_shape(element)
        }
        SemanticType::Map { key, value } => {
            codec::check_key(key)?;
            check_shape(value)
        }
        SemanticType::Scalar { .. }
        | SemanticType::Boxed { .. }
        | SemanticType::Text
        | SemanticType::Enum { .. }
        | SemanticType::Platform { .. }
        | SemanticType::Blob
        | SemanticType::Declared { .. }
        | SemanticType::Opaque { .. } => Ok(()),
    }
}

pub(crate) use codec::describe;
