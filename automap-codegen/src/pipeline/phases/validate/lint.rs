//! Lint trait for per-type shape checks.

use automap_ir::{Registry, TypeId};

use crate::pipeline::Diagnostic;

/// The planned type a lint looks at, with the base it extends if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintTarget {
    pub source: TypeId,
    pub base: Option<TypeId>,
}

impl LintTarget {
    /// The source followed by the base.
    pub fn types(&self) -> impl Iterator<Item = TypeId> {
        std::iter::once(self.source).chain(self.base)
    }
}

/// Name and description of a lint, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A check that can reject one planned type.
///
/// Error diagnostics reject the target; warnings are reported only.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check(&self, registry: &Registry, target: &LintTarget, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
