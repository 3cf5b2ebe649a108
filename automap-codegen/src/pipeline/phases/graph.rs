//! Graph phase - selects roots and discovers dependencies.

use eyre::Result;
use tracing::debug;

use crate::{
    dependency::DependencyGraph,
    mapping::{Mode, Roots},
    pipeline::{CompilationContext, Diagnostic, Phase, context::require},
};

/// Phase that picks the root types and builds the [`DependencyGraph`].
pub struct GraphPhase;

impl Phase for GraphPhase {
    fn name(&self) -> &'static str {
        "graph"
    }

    fn description(&self) -> &'static str {
        "Select root types and build the dependency graph"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let registry = require(&ctx.registry, "registry")?;
        let roots = Roots::select(registry);
        let graph = DependencyGraph::build(registry, roots.sources());

        let mut diagnostics = Vec::new();
        for duplicate in roots.duplicates() {
            let mapper = &registry.get(duplicate.mapper).name;
            let source = &registry.get(duplicate.source).name;
            let owner = roots
                .entry(duplicate.source)
                .map(|e| registry.get(e.mapper).name.to_string())
                .unwrap_or_default();
            diagnostics.push(
                Diagnostic::error(
                    self.name(),
                    format!("'{source}' is already mapped by '{owner}'; mapper '{mapper}' ignored"),
                )
                .at_type(mapper),
            );
        }
        if roots.is_empty() {
            diagnostics.push(Diagnostic::info(self.name(), "no annotated types; nothing to generate"));
        }

        debug!(
            mode = match roots.mode {
                Mode::Mapping { .. } => "mapping",
                Mode::Standalone => "standalone",
            },
            roots = roots.len(),
            nodes = graph.len(),
            edges = graph.edge_count(),
            "dependency graph built"
        );

        ctx.diagnostics.extend(diagnostics);
        ctx.roots = Some(roots);
        ctx.graph = Some(graph);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use automap_ir::TypeId;

    use super::*;
    use crate::pipeline::phases::LowerPhase;

    fn run(src: &str) -> CompilationContext {
        let manifest = automap_manifest::parse_str(src).expect("Failed to parse test manifest");
        let mut ctx = CompilationContext::new(manifest);
        LowerPhase.run(&mut ctx).expect("lower should succeed");
        GraphPhase.run(&mut ctx).expect("graph should succeed");
        ctx
    }

    #[test]
    fn test_graph_from_mapped_roots() {
        let ctx = run(
            r#"
            [[types]]
            name = "a.ApiCity"
            fields = [{ name = "gps", type = "ApiGps" }]

            [[types]]
            name = "a.ApiGps"
            fields = [{ name = "lat", type = "f64" }]

            [[types]]
            name = "a.CityMapper"
            [types.mapper]
            map_from = "ApiCity"
        "#,
        );

        let graph = ctx.graph.as_ref().unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(
            graph.dependencies(TypeId::new(0)).collect::<Vec<_>>(),
            [TypeId::new(1)]
        );
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_duplicate_mapper_is_an_error() {
        let ctx = run(
            r#"
            [[types]]
            name = "a.ApiCity"
            fields = [{ name = "id", type = "i32" }]

            [[types]]
            name = "a.First"
            [types.mapper]
            map_from = "ApiCity"

            [[types]]
            name = "a.Second"
            [types.mapper]
            map_from = "ApiCity"
        "#,
        );

        let errors: Vec<_> = ctx.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("already mapped by 'a.First'"));
        assert_eq!(errors[0].location.as_deref(), Some("types.a.Second"));
    }

    #[test]
    fn test_no_annotated_types_is_info() {
        let ctx = run(
            r#"
            [[types]]
            name = "a.Plain"
            fields = [{ name = "id", type = "i32" }]
        "#,
        );

        assert!(ctx.graph.as_ref().unwrap().is_empty());
        assert!(!ctx.has_errors());
        assert_eq!(ctx.diagnostics.len(), 1);
    }
}
