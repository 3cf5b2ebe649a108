//! The field list of a generated type.

use std::collections::HashSet;

use automap_ir::{FieldDescriptor, Registry, TypeId};

/// Where a listed field comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Declared on the source type or one of its ancestors.
    Source,
    /// Declared only on the extended base or its ancestors.
    Base,
}

/// One field of a generated type, with the type that declares it.
#[derive(Debug, Clone, Copy)]
pub struct ListedField<'a> {
    pub field: &'a FieldDescriptor,
    pub owner: TypeId,
    pub origin: Origin,
}

/// Fields of `id` including inherited ones, ancestor first, with owners.
pub fn owned_fields(registry: &Registry, id: TypeId) -> Vec<(TypeId, &FieldDescriptor)> {
    let mut chain = registry.ancestors(id);
    chain.reverse();
    chain.push(id);
    chain
        .into_iter()
        .flat_map(move |owner| registry.get(owner).fields.iter().map(move |f| (owner, f)))
        .collect()
}

/// The fields of the type generated for `source`.
///
/// Base-only fields come first, then the source's fields in declaration
/// order. A base field shadowed by a source field of the same name is
/// dropped.
pub fn field_list(registry: &Registry, source: TypeId, base: Option<TypeId>) -> Vec<ListedField<'_>> {
    let source_fields = owned_fields(registry, source);
    let source_names: HashSet<&str> = source_fields.iter().map(|(_, f)| f.name.as_str()).collect();

    let mut listed = Vec::new();
    if let Some(base) = base {
        listed.extend(
            owned_fields(registry, base)
                .into_iter()
                .filter(|(_, f)| !source_names.contains(f.name.as_str()))
                .map(|(owner, field)| ListedField {
                    field,
                    owner,
                    origin: Origin::Base,
                }),
        );
    }
    listed.extend(source_fields.into_iter().map(|(owner, field)| ListedField {
        field,
        owner,
        origin: Origin::Source,
    }));
    listed
}
