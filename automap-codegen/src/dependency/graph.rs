//! Dependency discovery over the type registry.

use automap_ir::{Registry, TypeId};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Directed edges "type depends on type", keyed in discovery order.
///
/// A node's dependencies are the declared types referenced by its fields,
/// inherited fields included, after unwrapping collection, array and map
/// element types. Primitive, boxed, platform and opaque types never
/// produce edges.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyGraph {
    edges: IndexMap<TypeId, IndexSet<TypeId>>,
}

impl DependencyGraph {
    /// Discover every type reachable from `roots`.
    ///
    /// Each type is explored once per run; a reference back to an explored
    /// type still records the edge, so cycles survive into the graph where
    /// the resolver reports them.
    pub fn build(registry: &Registry, roots: impl IntoIterator<Item = TypeId>) -> Self {
        let mut graph = Self::default();
        let mut worklist = Vec::new();

        for root in roots {
            worklist.push(root);
            while let Some(id) = worklist.pop() {
                if graph.edges.contains_key(&id) {
                    continue;
                }

                let deps = direct_dependencies(registry, id);
                // Reverse so the first referenced type is explored first.
                worklist.extend(
                    deps.iter()
                        .rev()
                        .filter(|dep| !graph.edges.contains_key(*dep))
                        .copied(),
                );
                graph.edges.insert(id, deps);
            }
        }

        graph
    }

    /// All nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.edges.keys().copied()
    }

    /// Direct dependencies of `id` in field order.
    pub fn dependencies(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.edges.get(&id).into_iter().flatten().copied()
    }

    /// The `index`-th direct dependency of `id`.
    pub fn dependency_at(&self, id: TypeId, index: usize) -> Option<TypeId> {
        self.edges
            .get(&id)
            .and_then(|deps| deps.get_index(index))
            .copied()
    }

    /// Nodes with a direct edge to `id`, in discovery order.
    pub fn dependents(&self, id: TypeId) -> Vec<TypeId> {
        self.edges
            .iter()
            .filter(|(_, deps)| deps.contains(&id))
            .map(|(from, _)| *from)
            .collect()
    }

    /// Every edge as `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (TypeId, TypeId)> + '_ {
        self.edges
            .iter()
            .flat_map(|(from, deps)| deps.iter().map(move |to| (*from, *to)))
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.edges.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }
}

fn direct_dependencies(registry: &Registry, id: TypeId) -> IndexSet<TypeId> {
    let mut referenced = Vec::new();
    for field in registry.effective_fields(id) {
        field.ty.referenced_types(&mut referenced);
    }
    referenced.into_iter().collect()
}
