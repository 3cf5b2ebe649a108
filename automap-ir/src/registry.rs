//! Arena of type descriptors for one generation run.

use std::{collections::HashMap, fmt};

use serde::Serialize;

use crate::{FieldDescriptor, TypeDescriptor};

/// Index of a [`TypeDescriptor`] inside a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeId(usize);

impl TypeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns every declared type for the duration of a run.
///
/// A descriptor's [`TypeId`] is its position in the vector the registry was
/// built from, so callers resolve names to ids before building.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    types: Vec<TypeDescriptor>,
    #[serde(skip)]
    by_name: HashMap<String, TypeId>,
}

impl Registry {
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        let by_name = types
            .iter()
            .enumerate()
            .map(|(i, ty)| (ty.name.as_str().to_string(), TypeId(i)))
            .collect();
        Self { types, by_name }
    }

    pub fn get(&self, id: TypeId) -> &TypeDescriptor {
        &self.types[id.0]
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.0 < self.types.len()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDescriptor)> {
        self.types.iter().enumerate().map(|(i, ty)| (TypeId(i), ty))
    }

    /// The superclass chain of `id`, nearest ancestor first.
    ///
    /// Stops early if the chain loops back on itself.
    pub fn ancestors(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).superclass;
        while let Some(parent) = current {
            if parent == id || chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = self.get(parent).superclass;
        }
        chain
    }

    /// Fields of `id` including inherited ones, ancestor fields first.
    pub fn effective_fields(&self, id: TypeId) -> Vec<&FieldDescriptor> {
        let mut fields = Vec::new();
        for ancestor in self.ancestors(id).into_iter().rev() {
            fields.extend(self.get(ancestor).fields.iter());
        }
        fields.extend(self.get(id).fields.iter());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScalarKind, SemanticType};

    fn int_field(name: &str) -> FieldDescriptor {
        FieldDescriptor::new(name, SemanticType::scalar(ScalarKind::I32))
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = Registry::new(vec![
            TypeDescriptor::new("a.First"),
            TypeDescriptor::new("a.Second"),
        ]);
        assert_eq!(registry.lookup("a.Second"), Some(TypeId::new(1)));
        assert_eq!(registry.lookup("a.Third"), None);
        assert_eq!(registry.get(TypeId::new(0)).name.as_str(), "a.First");
    }

    #[test]
    fn test_effective_fields_are_ancestor_first() {
        let registry = Registry::new(vec![
            TypeDescriptor::new("a.Base").field(int_field("base_id")),
            TypeDescriptor::new("a.Middle")
                .superclass(TypeId::new(0))
                .field(int_field("middle_id")),
            TypeDescriptor::new("a.Leaf")
                .superclass(TypeId::new(1))
                .field(int_field("leaf_id")),
        ]);

        let names: Vec<_> = registry
            .effective_fields(TypeId::new(2))
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["base_id", "middle_id", "leaf_id"]);
    }

    #[test]
    fn test_ancestors_stop_on_loop() {
        let registry = Registry::new(vec![
            TypeDescriptor::new("a.A").superclass(TypeId::new(1)),
            TypeDescriptor::new("a.B").superclass(TypeId::new(0)),
        ]);
        assert_eq!(registry.ancestors(TypeId::new(0)), vec![TypeId::new(1)]);
    }
}
