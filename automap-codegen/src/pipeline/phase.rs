//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// Name and description of a phase, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A step of the generation pipeline.
///
/// Built-in phases, in order: `lower`, `graph`, `resolve`, `validate`,
/// `naming`, `synthesize`.
pub trait Phase: Send + Sync {
    /// The name of this phase, used in diagnostics and plugin hooks.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error only for conditions that stop the whole run.
    /// Problems local to one type reject that type and are recorded as
    /// diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
