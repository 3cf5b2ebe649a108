//! Hooks around pipeline phases.

use eyre::Result;

use super::CompilationContext;

/// Observer called before and after every phase.
///
/// Returning an error from a hook aborts the pipeline.
///
/// # Example
///
/// ```
/// use automap_codegen::pipeline::{CompilationContext, Plugin};
///
/// struct PlanPrinter;
///
/// impl Plugin for PlanPrinter {
///     fn name(&self) -> &'static str {
///         "plan-printer"
///     }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> eyre::Result<()> {
///         if phase == "resolve" {
///             if let Some(plan) = &ctx.plan {
///                 println!("{} type(s) planned", plan.len());
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully; not called when the
    /// phase fails.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
