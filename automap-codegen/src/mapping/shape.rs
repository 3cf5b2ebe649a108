//! Language-neutral shape of one generated type.
//!
//! A [`TypeShape`] is everything a language backend needs to emit a type:
//! the field list with target-side types, the codec directive per field
//! when the type is wire-encoded, and the mapping step per field when the
//! type maps from a source.

use automap_ir::{
    CollectionKind, PlatformKind, QualifiedName, Registry, ScalarKind, SemanticType, TypeId,
};
use serde::Serialize;
use thiserror::Error;

use super::{
    MappingContext, MappingPlan,
    fields::{Origin, field_list},
};
use crate::dispatch::{
    AdapterConst, AdapterNames, CoverageError, FieldCodec, check_shape, describe, holds_option,
};

/// Synthesis failure for one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("field '{field}' of '{owner}': {error}")]
    Coverage {
        field: String,
        owner: String,
        #[source]
        error: CoverageError,
    },

    #[error("field '{field}' of '{owner}' refers to '{dependency}', which has no generated type")]
    Unplanned {
        field: String,
        owner: String,
        dependency: String,
    },
}

/// A field's type as seen from the generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldType {
    Scalar { scalar: ScalarKind },
    Boxed { scalar: ScalarKind },
    Text,
    Enum { path: String },
    Sequence {
        collection: CollectionKind,
        element: Box<FieldType>,
    },
    Map {
        key: Box<FieldType>,
        value: Box<FieldType>,
    },
    Array { element: Box<FieldType> },
    Platform { platform: PlatformKind },
    Blob,
    /// A generated type.
    Mapped { target: QualifiedName },
    /// A declared type used as is, without a generated counterpart.
    Source { name: QualifiedName },
    Opaque { path: String },
}

/// How `map_from` fills one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStep {
    /// Same type on both sides.
    Copy,
    /// `Target::map_from` on a direct nested value; a missing value is an error.
    Nested,
    /// Element-wise into a sequence; a missing source becomes empty.
    Sequence,
    /// Element-wise into an array; a missing source stays missing.
    Array,
    /// Value-wise into a map; a missing source becomes empty.
    Map,
    /// The source has no such field; the base's default is used.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldShape {
    pub name: String,
    pub ty: FieldType,
    /// Held as `Option<T>`.
    pub optional: bool,
    /// Version the field was introduced in, 0 when unversioned.
    pub since: u32,
    pub step: Option<MapStep>,
    pub codec: Option<FieldCodec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireShape {
    pub version: u32,
    pub adapters: Vec<AdapterConst>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapFromShape {
    pub source: QualifiedName,
    /// Base whose post-mapping hook runs last.
    pub hook: Option<QualifiedName>,
}

/// One generated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeShape {
    pub source: QualifiedName,
    pub target: QualifiedName,
    pub base: Option<QualifiedName>,
    pub fields: Vec<FieldShape>,
    pub wire: Option<WireShape>,
    pub map_from: Option<MapFromShape>,
}

impl TypeShape {
    /// Synthesize the shape for one plan entry.
    pub fn build(
        registry: &Registry,
        mappings: &MappingContext,
        plan: &MappingPlan,
    ) -> Result<Self, ShapeError> {
        let mut adapters = AdapterNames::new();
        let mut fields = Vec::new();

        for listed in field_list(registry, plan.source, plan.base) {
            let field = listed.field;
            let owner = registry.get(listed.owner).name.to_string();
            let coverage = |error| ShapeError::Coverage {
                field: field.name.clone(),
                owner: owner.clone(),
                error,
            };

            check_shape(&field.ty).map_err(coverage)?;
            let ty = FieldType::lower(&field.ty, listed.origin, registry, mappings).map_err(
                |dependency| ShapeError::Unplanned {
                    field: field.name.clone(),
                    owner: owner.clone(),
                    dependency,
                },
            )?;
            let step = if plan.maps_from {
                Some(map_step(&field.ty, listed.origin).map_err(coverage)?)
            } else {
                None
            };
            let codec = if plan.wire_encoded {
                Some(FieldCodec::for_field(field, &mut adapters).map_err(coverage)?)
            } else {
                None
            };

            fields.push(FieldShape {
                name: field.name.clone(),
                ty,
                optional: holds_option(&field.ty, field.nullable),
                since: field.introduced_version,
                step,
                codec,
            });
        }

        Ok(Self {
            source: plan.source_name.clone(),
            target: plan.target.clone(),
            base: plan.base_name.clone(),
            fields,
            wire: plan.wire_encoded.then(|| WireShape {
                version: plan.version,
                adapters: adapters.into_consts(),
            }),
            map_from: plan.maps_from.then(|| MapFromShape {
                source: plan.source_name.clone(),
                hook: if plan.invoke_hook {
                    plan.base_name.clone()
                } else {
                    None
                },
            }),
        })
    }

    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl FieldType {
    /// Lower a declared field type. Declared types from the source side
    /// become their generated target; the error is the name of a declared
    /// type with no plan.
    fn lower(
        ty: &SemanticType,
        origin: Origin,
        registry: &Registry,
        mappings: &MappingContext,
    ) -> Result<Self, String> {
        let lower = |inner: &SemanticType| -> Result<Box<Self>, String> {
            Self::lower(inner, origin, registry, mappings).map(Box::new)
        };

        Ok(match ty {
            SemanticType::Scalar { scalar } => Self::Scalar { scalar: *scalar },
            SemanticType::Boxed { scalar } => Self::Boxed { scalar: *scalar },
            SemanticType::Text => Self::Text,
            SemanticType::Enum { path } => Self::Enum { path: path.clone() },
            SemanticType::Collection {
                collection,
                element,
            } => Self::Sequence {
                collection: collection.clone(),
                element: lower(element)?,
            },
            SemanticType::Map { key, value } => Self::Map {
                key: lower(key)?,
                value: lower(value)?,
            },
            SemanticType::Array { element } => Self::Array {
                element: lower(element)?,
            },
            SemanticType::Platform { platform } => Self::Platform {
                platform: *platform,
            },
            SemanticType::Blob => Self::Blob,
            SemanticType::Declared { id } => declared(*id, origin, registry, mappings)?,
            SemanticType::Opaque { path } => Self::Opaque { path: path.clone() },
        })
    }
}

fn declared(
    id: TypeId,
    origin: Origin,
    registry: &Registry,
    mappings: &MappingContext,
) -> Result<FieldType, String> {
    let name = &registry.get(id).name;
    match origin {
        Origin::Base => Ok(FieldType::Source { name: name.clone() }),
        Origin::Source => mappings
            .target_of(id)
            .map(|target| FieldType::Mapped {
                target: target.clone(),
            })
            .ok_or_else(|| name.to_string()),
    }
}

/// Choose the mapping step from the field's declared shape.
///
/// Only one level of element-wise remapping is supported: a mapped type
/// inside a collection inside a collection is a coverage error.
fn map_step(ty: &SemanticType, origin: Origin) -> Result<MapStep, CoverageError> {
    if origin == Origin::Base {
        return Ok(MapStep::Default);
    }

    let element_step = |element: &SemanticType, step: MapStep| {
        if element.as_declared().is_some() {
            Ok(step)
        } else if references_declared(element) {
            Err(CoverageError::NestedMapped {
                shape: describe(ty),
            })
        } else {
            Ok(MapStep::Copy)
        }
    };

    match ty {
        SemanticType::Declared { .. } => Ok(MapStep::Nested),
        SemanticType::Collection { element, .. } => element_step(element, MapStep::Sequence),
        SemanticType::Array { element } => element_step(element, MapStep::Array),
        SemanticType::Map { value, .. } => element_step(value, MapStep::Map),
        _ => Ok(MapStep::Copy),
    }
}

fn references_declared(ty: &SemanticType) -> bool {
    let mut referenced = Vec::new();
    ty.referenced_types(&mut referenced);
    !referenced.is_empty()
}
