//! Lower phase - builds the type registry from the manifest.
//!
//! Names are resolved in two passes: every declared type gets its
//! [`TypeId`] first, then field types, superclasses and `map_from`
//! references are resolved against that table. Forward references are
//! therefore fine.

use std::collections::HashMap;

use automap_ir::{
    CollectionKind, FieldDescriptor, MapperSpec, Nesting, PlatformKind, QualifiedName, Registry,
    ScalarKind, SemanticType, TypeDescriptor, TypeId,
};
use automap_manifest::{FieldDecl, Manifest, MapperDecl, TypeDecl, TypeExpr};
use eyre::Result;
use thiserror::Error;
use tracing::debug;

use crate::pipeline::{CompilationContext, Phase};

/// A name in the manifest that does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    #[error("field '{field}' of '{owner}' has unknown type '{name}'")]
    UnknownType {
        owner: String,
        field: String,
        name: String,
    },

    #[error("'{owner}' maps from unknown type '{name}'")]
    UnknownMapFrom { owner: String, name: String },

    #[error("'{owner}' extends unknown type '{name}'")]
    UnknownSuperclass { owner: String, name: String },

    #[error("superclass cycle: {}", .path.join(" -> "))]
    SuperclassCycle { path: Vec<String> },

    #[error("field '{field}' of '{owner}': {message}")]
    InvalidType {
        owner: String,
        field: String,
        message: String,
    },
}

/// Phase that lowers the manifest into a [`Registry`].
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Resolve declared names and build the type registry"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        match lower_manifest(&ctx.manifest) {
            Ok(registry) => {
                debug!(types = registry.len(), "registry built");
                ctx.registry = Some(registry);
                Ok(())
            }
            Err(errors) => {
                let messages = errors.iter().map(ToString::to_string).collect();
                Err(ctx.abort(self.name(), "lowering failed", messages))
            }
        }
    }
}

/// Declared names to ids.
struct Names<'a> {
    by_name: HashMap<&'a str, TypeId>,
}

impl<'a> Names<'a> {
    fn new(manifest: &'a Manifest) -> Self {
        let by_name = manifest
            .types
            .iter()
            .enumerate()
            .map(|(i, ty)| (ty.name.as_str(), TypeId::new(i)))
            .collect();
        Self { by_name }
    }

    /// Resolve `name` as written inside `package`: an exact match first,
    /// then a simple name within the declaring package.
    fn resolve(&self, name: &str, package: &str) -> Option<TypeId> {
        if let Some(id) = self.by_name.get(name) {
            return Some(*id);
        }
        if package.is_empty() || name.contains('.') {
            return None;
        }
        let qualified = QualifiedName::in_package(package, name);
        self.by_name.get(qualified.as_str()).copied()
    }
}

/// Lower a manifest, collecting every resolution error.
pub fn lower_manifest(manifest: &Manifest) -> Result<Registry, Vec<LowerError>> {
    let names = Names::new(manifest);
    let mut errors = Vec::new();
    let mut types = Vec::with_capacity(manifest.types.len());

    for decl in &manifest.types {
        types.push(lower_type(decl, &names, &mut errors));
    }
    if errors.is_empty() {
        errors.extend(superclass_cycles(&types));
    }

    if errors.is_empty() {
        Ok(Registry::new(types))
    } else {
        Err(errors)
    }
}

fn lower_type(decl: &TypeDecl, names: &Names<'_>, errors: &mut Vec<LowerError>) -> TypeDescriptor {
    let package = decl.package();
    let mut ty = TypeDescriptor::new(decl.name.as_str());

    if let Some(superclass) = &decl.superclass {
        match names.resolve(superclass, package) {
            Some(id) => ty = ty.superclass(id),
            None => errors.push(LowerError::UnknownSuperclass {
                owner: decl.name.clone(),
                name: superclass.clone(),
            }),
        }
    }
    if let Some(nested) = &decl.nested {
        ty = ty.nesting(Nesting::Nested {
            outer: nested.outer.clone(),
            is_static: nested.is_static,
            is_private: nested.private,
        });
    }
    if decl.has_map_hook {
        ty = ty.map_hook();
    }

    for field in &decl.fields {
        match lower_field(decl, field, names) {
            Ok(field) => ty = ty.field(field),
            Err(err) => errors.push(err),
        }
    }

    if let Some(mapper) = &decl.mapper {
        ty = ty.mapper(lower_mapper(decl, mapper, names, errors));
    }
    ty
}

fn lower_field(
    decl: &TypeDecl,
    field: &FieldDecl,
    names: &Names<'_>,
) -> Result<FieldDescriptor, LowerError> {
    let expr = TypeExpr::parse(&field.ty).map_err(|err| LowerError::InvalidType {
        owner: decl.name.clone(),
        field: field.name.clone(),
        message: err.to_string(),
    })?;
    let ty = lower_expr(&expr, decl.package(), names).map_err(|name| LowerError::UnknownType {
        owner: decl.name.clone(),
        field: field.name.clone(),
        name,
    })?;

    let mut lowered = FieldDescriptor::new(field.name.as_str(), ty).since(field.since);
    if field.nullable {
        lowered = lowered.nullable();
    }
    if field.private {
        lowered = lowered.private();
    }
    if let Some(adapter) = &field.adapter {
        lowered = lowered.adapter(adapter.as_str());
    }
    Ok(lowered)
}

fn lower_mapper(
    decl: &TypeDecl,
    mapper: &MapperDecl,
    names: &Names<'_>,
    errors: &mut Vec<LowerError>,
) -> MapperSpec {
    let map_from = mapper.map_from.as_ref().and_then(|name| {
        let id = names.resolve(name, decl.package());
        if id.is_none() {
            errors.push(LowerError::UnknownMapFrom {
                owner: decl.name.clone(),
                name: name.clone(),
            });
        }
        id
    });

    MapperSpec {
        map_from,
        target_name: mapper.target_name.clone(),
        prefix: mapper.prefix.clone(),
        extend: mapper.extend,
        wire_encoded: mapper.wire_encoded,
        version: mapper.version,
    }
}

/// Lower a type expression. The error is the first name that resolves to
/// nothing.
fn lower_expr(expr: &TypeExpr, package: &str, names: &Names<'_>) -> Result<SemanticType, String> {
    match expr {
        TypeExpr::Named(name) => lower_named(name, package, names),
        TypeExpr::Array(element) => Ok(SemanticType::array(lower_expr(element, package, names)?)),
        TypeExpr::Generic { name, args } => match (name.as_str(), args.as_slice()) {
            ("Boxed", [TypeExpr::Named(keyword)]) => ScalarKind::from_keyword(keyword)
                .map(|scalar| SemanticType::Boxed { scalar })
                .ok_or_else(|| keyword.clone()),
            ("Enum", [TypeExpr::Named(path)]) => Ok(SemanticType::Enum {
                path: enum_path(path, package),
            }),
            ("Map", [key, value]) => Ok(SemanticType::map(
                lower_expr(key, package, names)?,
                lower_expr(value, package, names)?,
            )),
            (_, [element]) => Ok(SemanticType::collection(
                CollectionKind::from_name(name),
                lower_expr(element, package, names)?,
            )),
            _ => Err(expr.to_string()),
        },
    }
}

fn lower_named(name: &str, package: &str, names: &Names<'_>) -> Result<SemanticType, String> {
    if let Some(scalar) = ScalarKind::from_keyword(name) {
        return Ok(SemanticType::scalar(scalar));
    }
    if let Some(platform) = PlatformKind::from_name(name) {
        return Ok(SemanticType::Platform { platform });
    }
    match name {
        "String" => return Ok(SemanticType::Text),
        "Blob" => return Ok(SemanticType::Blob),
        _ => {}
    }
    if name.contains("::") {
        return Ok(SemanticType::Opaque {
            path: name.to_string(),
        });
    }
    names
        .resolve(name, package)
        .map(SemanticType::declared)
        .ok_or_else(|| name.to_string())
}

/// Enum paths are kept as written when qualified, otherwise placed in the
/// declaring package.
fn enum_path(path: &str, package: &str) -> String {
    if path.contains("::") || path.contains('.') {
        path.to_string()
    } else {
        QualifiedName::in_package(package, path).to_string()
    }
}

/// Superclass chains that loop, each reported once from its lowest id.
fn superclass_cycles(types: &[TypeDescriptor]) -> Vec<LowerError> {
    let mut errors = Vec::new();
    for (start, ty) in types.iter().enumerate() {
        let mut path = vec![start];
        let mut current = ty.superclass;
        while let Some(parent) = current.map(|id| id.index()) {
            if parent == start {
                if path.iter().all(|&i| i >= start) {
                    path.push(start);
                    errors.push(LowerError::SuperclassCycle {
                        path: path.iter().map(|&i| types[i].name.to_string()).collect(),
                    });
                }
                break;
            }
            if path.contains(&parent) {
                break;
            }
            path.push(parent);
            current = types[parent].superclass;
        }
    }
    errors
}
