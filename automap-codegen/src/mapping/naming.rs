//! Target naming and the immutable per-run [`MappingContext`].

use std::collections::HashMap;

use automap_ir::{DEFAULT_PREFIX, MapperSpec, Nesting, QualifiedName, Registry, TypeDescriptor, TypeId};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use thiserror::Error;

use super::{Mode, Roots};
use crate::dependency::{DependencyGraph, GenerationPlan};

/// A naming conflict. Each rejects the type it names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error(
        "target name '{target}' for '{type_name}' is the generated default name; remove it or choose another"
    )]
    Ambiguous {
        type_id: TypeId,
        type_name: String,
        target: String,
    },

    #[error("'{type_name}' would generate '{target}', which is already generated for '{other}'")]
    DuplicateTarget {
        type_id: TypeId,
        type_name: String,
        target: String,
        other: String,
    },

    #[error("'{type_name}' would generate '{target}', which is a declared type")]
    CollidesWithDeclared {
        type_id: TypeId,
        type_name: String,
        target: String,
    },
}

impl NamingError {
    /// The type whose generation this error rejects.
    pub fn type_id(&self) -> TypeId {
        match self {
            Self::Ambiguous { type_id, .. }
            | Self::DuplicateTarget { type_id, .. }
            | Self::CollidesWithDeclared { type_id, .. } => *type_id,
        }
    }
}

/// Resolved generation settings of one planned type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingPlan {
    pub source: TypeId,
    pub source_name: QualifiedName,
    /// Package-qualified name of the generated type.
    pub target: QualifiedName,
    /// Hand-written base the generated type extends.
    pub base: Option<TypeId>,
    pub base_name: Option<QualifiedName>,
    /// The base's post-mapping hook runs at the end of `map_from`.
    pub invoke_hook: bool,
    pub wire_encoded: bool,
    /// A `map_from` transform is generated.
    pub maps_from: bool,
    /// Inert wire version.
    pub version: u32,
}

/// Resolve the target name of every planned type that is not rejected.
///
/// Types are named in plan order, so when two types would share a target
/// name the one later in the plan is the one reported.
pub fn resolve_names(
    registry: &Registry,
    roots: &Roots,
    plan: &GenerationPlan,
    rejected: &IndexSet<TypeId>,
) -> (Vec<(TypeId, QualifiedName)>, Vec<NamingError>) {
    let mut named = Vec::new();
    let mut errors = Vec::new();
    let mut taken: HashMap<QualifiedName, TypeId> = HashMap::new();

    for id in plan.iter().filter(|id| !rejected.contains(id)) {
        let ty = registry.get(id);
        let target = match target_name(registry, roots, id) {
            Ok(target) => target,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };

        if registry.lookup(target.as_str()).is_some() {
            errors.push(NamingError::CollidesWithDeclared {
                type_id: id,
                type_name: ty.name.to_string(),
                target: target.to_string(),
            });
            continue;
        }
        if let Some(other) = taken.get(&target) {
            errors.push(NamingError::DuplicateTarget {
                type_id: id,
                type_name: ty.name.to_string(),
                target: target.to_string(),
                other: registry.get(*other).name.to_string(),
            });
            continue;
        }

        taken.insert(target.clone(), id);
        named.push((id, target));
    }

    (named, errors)
}

/// The mapper settings that govern `id`: its own mapper for roots, the
/// primary mapper for everything discovered in mapping mode.
fn policy<'a>(registry: &'a Registry, roots: &Roots, id: TypeId) -> Option<&'a TypeDescriptor> {
    roots
        .entry(id)
        .map(|e| e.mapper)
        .or(roots.primary())
        .map(|mapper| registry.get(mapper))
}

fn target_name(registry: &Registry, roots: &Roots, id: TypeId) -> Result<QualifiedName, NamingError> {
    let source = registry.get(id);

    if let Some(entry) = roots.entry(id) {
        let mapper = registry.get(entry.mapper);
        if let Some(spec) = &mapper.mapper
            && let Some(name) = &spec.target_name
        {
            return explicit_name(id, source, spec, name, mapper.name.package());
        }
    }

    let policy = policy(registry, roots, id);
    let package = policy.map_or(source.name.package(), |m| m.name.package());

    if let Some(spec) = &source.mapper
        && let Some(name) = &spec.target_name
    {
        return explicit_name(id, source, spec, name, package);
    }

    let prefix = policy
        .and_then(|m| m.mapper.as_ref())
        .map_or(DEFAULT_PREFIX, |spec| spec.prefix.as_str());
    Ok(QualifiedName::in_package(package, &default_simple_name(source, prefix)))
}

fn explicit_name(
    id: TypeId,
    source: &TypeDescriptor,
    spec: &MapperSpec,
    name: &str,
    package: &str,
) -> Result<QualifiedName, NamingError> {
    let target = if name.contains('.') {
        QualifiedName::new(name)
    } else {
        QualifiedName::in_package(package, name)
    };
    if target.simple_name() == default_simple_name(source, &spec.prefix) {
        return Err(NamingError::Ambiguous {
            type_id: id,
            type_name: source.name.to_string(),
            target: name.to_string(),
        });
    }
    Ok(target)
}

/// `Outer` + prefix + simple name, e.g. `RestaurantFDKitchen`.
pub fn default_simple_name(ty: &TypeDescriptor, prefix: &str) -> String {
    let outer = match &ty.nesting {
        Nesting::TopLevel => String::new(),
        Nesting::Nested { outer, .. } => outer.replace('.', ""),
    };
    format!("{outer}{prefix}{}", ty.name.simple_name())
}

/// Immutable naming and policy lookup, built once per run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MappingContext {
    plans: IndexMap<TypeId, MappingPlan>,
}

impl MappingContext {
    /// Build plans for named types, in plan order.
    ///
    /// Wire encoding starts from each type's governing mapper and then
    /// spreads to every dependency of a wire-encoded type.
    pub fn new(
        registry: &Registry,
        roots: &Roots,
        graph: &DependencyGraph,
        plan: &GenerationPlan,
        named: Vec<(TypeId, QualifiedName)>,
    ) -> Self {
        let targets: HashMap<TypeId, QualifiedName> = named.into_iter().collect();

        let mut wire: HashMap<TypeId, bool> = targets
            .keys()
            .map(|id| {
                let encoded = policy(registry, roots, *id)
                    .and_then(|m| m.mapper.as_ref())
                    .is_some_and(|spec| spec.wire_encoded);
                (*id, encoded)
            })
            .collect();
        // Dependents come before their dependencies in reverse plan order.
        for id in plan.iter().rev() {
            if wire.get(&id).copied().unwrap_or(false) {
                for dep in graph.dependencies(id) {
                    if let Some(flag) = wire.get_mut(&dep) {
                        *flag = true;
                    }
                }
            }
        }

        let maps_from = matches!(roots.mode, Mode::Mapping { .. });
        let plans = plan
            .iter()
            .filter_map(|id| {
                let target = targets.get(&id)?.clone();
                let base = roots.base_of(id);
                let version = policy(registry, roots, id)
                    .and_then(|m| m.mapper.as_ref())
                    .map_or(0, |spec| spec.version);
                Some((
                    id,
                    MappingPlan {
                        source: id,
                        source_name: registry.get(id).name.clone(),
                        target,
                        base,
                        base_name: base.map(|b| registry.get(b).name.clone()),
                        invoke_hook: base.is_some_and(|b| registry.get(b).has_map_hook),
                        wire_encoded: wire.get(&id).copied().unwrap_or(false),
                        maps_from,
                        version,
                    },
                ))
            })
            .collect();

        Self { plans }
    }

    /// The generated name for source type `id`.
    pub fn target_of(&self, id: TypeId) -> Option<&QualifiedName> {
        self.plans.get(&id).map(|p| &p.target)
    }

    pub fn plan(&self, id: TypeId) -> Option<&MappingPlan> {
        self.plans.get(&id)
    }

    /// Plans in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &MappingPlan> {
        self.plans.values()
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.plans.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
