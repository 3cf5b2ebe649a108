//! Synthesize phase - builds one [`TypeShape`] per named type.

use eyre::Result;
use tracing::debug;

use crate::{
    mapping::TypeShape,
    pipeline::{CompilationContext, Phase, context::require},
};

/// Phase that synthesizes the language-neutral shape of every generated
/// type, in plan order.
///
/// Coverage errors are not local to one type and stop the run.
pub struct SynthesizePhase;

impl Phase for SynthesizePhase {
    fn name(&self) -> &'static str {
        "synthesize"
    }

    fn description(&self) -> &'static str {
        "Build field lists, codecs and mapping steps for every generated type"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let registry = require(&ctx.registry, "registry")?;
        let mappings = require(&ctx.mappings, "mapping context")?;

        let mut shapes = Vec::with_capacity(mappings.len());
        let mut errors = Vec::new();
        for plan in mappings.iter() {
            match TypeShape::build(registry, mappings, plan) {
                Ok(shape) => {
                    debug!(
                        source = %shape.source,
                        target = %shape.target,
                        fields = shape.fields.len(),
                        wire = shape.wire.is_some(),
                        "type synthesized"
                    );
                    shapes.push(shape);
                }
                Err(err) => errors.push(err.to_string()),
            }
        }

        if !errors.is_empty() {
            return Err(ctx.abort(self.name(), "coverage error(s)", errors));
        }
        ctx.shapes = shapes;
        Ok(())
    }
}
