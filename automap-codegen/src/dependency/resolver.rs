//! Leaf-first topological ordering.

use std::collections::HashMap;

use automap_ir::{Registry, TypeId};
use serde::Serialize;
use thiserror::Error;

use super::DependencyGraph;

/// Types in generation order: every type follows all of its dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenerationPlan {
    order: Vec<TypeId>,
}

impl GenerationPlan {
    pub fn order(&self) -> &[TypeId] {
        &self.order
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = TypeId> + '_ {
        self.order.iter().copied()
    }

    pub fn position(&self, id: TypeId) -> Option<usize> {
        self.order.iter().position(|t| *t == id)
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.order.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A dependency cycle, starting and ending at the same type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dependency cycle through {} type(s)", .path.len().saturating_sub(1))]
pub struct Cycle {
    pub path: Vec<TypeId>,
}

impl Cycle {
    /// Render the cycle with type names, e.g. `a.A -> a.B -> a.A`.
    pub fn describe(&self, registry: &Registry) -> String {
        self.path
            .iter()
            .map(|id| registry.get(*id).name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Order the graph leaf-first with a depth-first post-order walk.
///
/// Nodes are started in discovery order and dependencies are followed in
/// field order, so the same graph always yields the same plan. A back edge
/// to a node still in progress is reported as a [`Cycle`].
pub fn resolve(graph: &DependencyGraph) -> Result<GenerationPlan, Cycle> {
    let mut marks: HashMap<TypeId, Mark> = HashMap::with_capacity(graph.len());
    let mut order = Vec::with_capacity(graph.len());
    // (node, index of the next dependency to visit)
    let mut stack: Vec<(TypeId, usize)> = Vec::new();

    for start in graph.nodes() {
        if marks.contains_key(&start) {
            continue;
        }
        marks.insert(start, Mark::InProgress);
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let next = graph.dependency_at(node, frame.1);
            frame.1 += 1;

            match next {
                Some(dep) => match marks.get(&dep) {
                    None => {
                        marks.insert(dep, Mark::InProgress);
                        stack.push((dep, 0));
                    }
                    Some(Mark::InProgress) => {
                        let from = stack.iter().position(|(n, _)| *n == dep).unwrap_or(0);
                        let mut path: Vec<TypeId> = stack[from..].iter().map(|(n, _)| *n).collect();
                        path.push(dep);
                        return Err(Cycle { path });
                    }
                    Some(Mark::Done) => {}
                },
                None => {
                    marks.insert(node, Mark::Done);
                    order.push(node);
                    stack.pop();
                }
            }
        }
    }

    Ok(GenerationPlan { order })
}
