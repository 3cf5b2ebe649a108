//! Resolve phase - orders the dependency graph leaf-first.

use eyre::Result;
use tracing::debug;

use crate::{
    dependency::resolve,
    pipeline::{CompilationContext, Phase, context::require},
};

/// Phase that turns the dependency graph into a [`GenerationPlan`](crate::dependency::GenerationPlan).
///
/// A cycle stops the run.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Order types so that dependencies come first"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let graph = require(&ctx.graph, "dependency graph")?;
        match resolve(graph) {
            Ok(plan) => {
                debug!(types = plan.len(), "generation plan resolved");
                ctx.plan = Some(plan);
                Ok(())
            }
            Err(cycle) => {
                let registry = require(&ctx.registry, "registry")?;
                let message = cycle.describe(registry);
                Err(ctx.abort(self.name(), "dependency cycle", vec![message]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phases::{GraphPhase, LowerPhase};

    fn context(src: &str) -> CompilationContext {
        let manifest = automap_manifest::parse_str(src).expect("Failed to parse test manifest");
        let mut ctx = CompilationContext::new(manifest);
        LowerPhase.run(&mut ctx).expect("lower should succeed");
        GraphPhase.run(&mut ctx).expect("graph should succeed");
        ctx
    }

    #[test]
    fn test_plan_is_leaf_first() {
        let mut ctx = context(
            r#"
            [[types]]
            name = "a.City"
            fields = [{ name = "gps", type = "Gps" }]

            [[types]]
            name = "a.Gps"
            fields = [{ name = "lat", type = "f64" }]

            [[types]]
            name = "a.Mapper"
            [types.mapper]
            map_from = "City"
        "#,
        );

        ResolvePhase.run(&mut ctx).expect("resolve should succeed");

        let registry = ctx.registry.as_ref().unwrap();
        let names: Vec<_> = ctx
            .plan
            .as_ref()
            .unwrap()
            .iter()
            .map(|id| registry.get(id).name.as_str())
            .collect();
        assert_eq!(names, ["a.Gps", "a.City"]);
    }

    #[test]
    fn test_cycle_stops_the_run() {
        let mut ctx = context(
            r#"
            [[types]]
            name = "a.Node"
            fields = [{ name = "next", type = "Link" }]

            [[types]]
            name = "a.Link"
            fields = [{ name = "node", type = "List<Node>" }]

            [[types]]
            name = "a.Mapper"
            [types.mapper]
            map_from = "Node"
        "#,
        );

        let err = ResolvePhase.run(&mut ctx).unwrap_err();

        assert_eq!(err.to_string(), "dependency cycle:\n  - a.Node -> a.Link -> a.Node");
        assert!(ctx.plan.is_none());
        assert_eq!(ctx.error_count(), 1);
    }
}
