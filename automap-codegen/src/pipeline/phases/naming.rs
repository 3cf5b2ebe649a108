//! Naming phase - resolves target names and builds the [`MappingContext`].

use eyre::Result;
use tracing::debug;

use crate::{
    mapping::{MappingContext, resolve_names},
    pipeline::{CompilationContext, Diagnostic, Phase, context::require},
};

/// Phase that names every surviving planned type.
///
/// Before naming, every type that depends on a rejected type is rejected
/// too. Naming conflicts reject the later type, after which the same
/// propagation runs again.
pub struct NamingPhase;

impl Phase for NamingPhase {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn description(&self) -> &'static str {
        "Resolve target names and per-type generation policy"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        propagate_rejections(ctx, self.name())?;

        let rejected = ctx.rejected_ids();
        let (mut named, errors) = {
            let registry = require(&ctx.registry, "registry")?;
            let roots = require(&ctx.roots, "roots")?;
            let plan = require(&ctx.plan, "generation plan")?;
            resolve_names(registry, roots, plan, &rejected)
        };

        for err in errors {
            let id = err.type_id();
            let message = err.to_string();
            let name = ctx.type_name(id);
            ctx.add_diagnostic(Diagnostic::error(self.name(), message.clone()).at_type(name));
            ctx.reject(id, message);
        }
        propagate_rejections(ctx, self.name())?;
        named.retain(|(id, _)| !ctx.is_rejected(*id));

        let registry = require(&ctx.registry, "registry")?;
        let roots = require(&ctx.roots, "roots")?;
        let graph = require(&ctx.graph, "dependency graph")?;
        let plan = require(&ctx.plan, "generation plan")?;
        let mappings = MappingContext::new(registry, roots, graph, plan, named);

        debug!(named = mappings.len(), rejected = ctx.rejected.len(), "target names resolved");
        ctx.mappings = Some(mappings);
        Ok(())
    }
}

/// Reject every planned type that depends on a rejected one.
///
/// Walking the plan leaf-first sees dependencies before their dependents,
/// so one pass covers transitive dependents.
fn propagate_rejections(ctx: &mut CompilationContext, phase: &str) -> Result<()> {
    let mut skipped = Vec::new();
    {
        let graph = require(&ctx.graph, "dependency graph")?;
        let plan = require(&ctx.plan, "generation plan")?;
        let mut rejected = ctx.rejected_ids();
        for id in plan.iter() {
            if rejected.contains(&id) {
                continue;
            }
            if let Some(dep) = graph.dependencies(id).find(|dep| rejected.contains(dep)) {
                rejected.insert(id);
                skipped.push((id, dep));
            }
        }
    }

    for (id, dep) in skipped {
        let name = ctx.type_name(id);
        let dep_name = ctx.type_name(dep);
        ctx.add_diagnostic(
            Diagnostic::warning(phase, format!("skipped '{name}': depends on rejected '{dep_name}'"))
                .at_type(&name),
        );
        ctx.reject(id, format!("depends on rejected '{dep_name}'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phases::{GraphPhase, LowerPhase, ResolvePhase, ValidatePhase};

    fn run(src: &str) -> CompilationContext {
        let manifest = automap_manifest::parse_str(src).expect("Failed to parse test manifest");
        let mut ctx = CompilationContext::new(manifest);
        LowerPhase.run(&mut ctx).expect("lower should succeed");
        GraphPhase.run(&mut ctx).expect("graph should succeed");
        ResolvePhase.run(&mut ctx).expect("resolve should succeed");
        ValidatePhase::new().run(&mut ctx).expect("validate should succeed");
        NamingPhase.run(&mut ctx).expect("naming should succeed");
        ctx
    }

    fn target(ctx: &CompilationContext, source: &str) -> Option<String> {
        let registry = ctx.registry.as_ref().unwrap();
        let id = registry.lookup(source)?;
        ctx.mappings.as_ref()?.target_of(id).map(ToString::to_string)
    }

    #[test]
    fn test_default_names() {
        let ctx = run(
            r#"
            [[types]]
            name = "api.City"
            fields = [{ name = "gps", type = "Gps" }]

            [[types]]
            name = "api.Gps"
            fields = [{ name = "lat", type = "f64" }]

            [[types]]
            name = "model.CityMapper"
            [types.mapper]
            map_from = "api.City"
            target_name = "City"
        "#,
        );

        assert_eq!(target(&ctx, "api.City").as_deref(), Some("model.City"));
        assert_eq!(target(&ctx, "api.Gps").as_deref(), Some("model.FDGps"));
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_rejection_propagates_to_dependents() {
        let ctx = run(
            r#"
            [[types]]
            name = "a.Menu"
            fields = [{ name = "city", type = "City" }]

            [[types]]
            name = "a.City"
            fields = [{ name = "gps", type = "Gps" }]

            [[types]]
            name = "a.Gps"
            fields = [{ name = "lat", type = "f64", private = true }]

            [[types]]
            name = "a.Other"
            fields = [{ name = "id", type = "i32" }]

            [[types]]
            name = "b.MenuMapper"
            [types.mapper]
            map_from = "a.Menu"

            [[types]]
            name = "b.OtherMapper"
            [types.mapper]
            map_from = "a.Other"
        "#,
        );

        assert_eq!(target(&ctx, "a.Gps"), None);
        assert_eq!(target(&ctx, "a.City"), None);
        assert_eq!(target(&ctx, "a.Menu"), None);
        assert_eq!(target(&ctx, "a.Other").as_deref(), Some("b.FDOther"));

        let skipped: Vec<_> = ctx.warnings().map(|d| d.message.as_str()).collect();
        assert_eq!(
            skipped,
            [
                "skipped 'a.City': depends on rejected 'a.Gps'",
                "skipped 'a.Menu': depends on rejected 'a.City'",
            ]
        );
    }

    #[test]
    fn test_ambiguous_target_name_rejects() {
        let ctx = run(
            r#"
            [[types]]
            name = "a.City"
            fields = [{ name = "id", type = "i32" }]

            [[types]]
            name = "a.Mapper"
            [types.mapper]
            map_from = "City"
            target_name = "FDCity"
        "#,
        );

        let registry = ctx.registry.as_ref().unwrap();
        assert!(ctx.is_rejected(registry.lookup("a.City").unwrap()));
        assert_eq!(ctx.error_count(), 1);
        assert!(ctx.mappings.as_ref().unwrap().is_empty());
    }
}
