//! Dependency graph construction and topological ordering.
//!
//! - [`DependencyGraph`] - edges discovered from a set of root types
//! - [`resolve`] - leaf-first [`GenerationPlan`], or the [`Cycle`] that prevents one

mod graph;
mod resolver;

pub use graph::DependencyGraph;
pub use resolver::{Cycle, GenerationPlan, resolve};
