//! Validate phase - runs shape lints on every planned type.

mod lint;
pub mod lints;

use eyre::Result;
pub use lint::{Lint, LintInfo, LintTarget};
pub use lints::{AnnotatedAncestorLint, EmptyFieldsLint, NestedAccessLint, PrivateFieldLint};
use tracing::debug;

use crate::pipeline::{CompilationContext, Phase, context::require};

/// Phase that checks planned types with configurable lints.
///
/// A type with an error diagnostic is rejected; the run continues for the
/// others.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with the built-in lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(PrivateFieldLint),
                Box::new(EmptyFieldsLint),
                Box::new(NestedAccessLint),
                Box::new(AnnotatedAncestorLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check the shape of every planned type"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let registry = require(&ctx.registry, "registry")?;
        let roots = require(&ctx.roots, "roots")?;
        let plan = require(&ctx.plan, "generation plan")?;

        let mut rejections = Vec::new();
        for source in plan.iter() {
            let target = LintTarget {
                source,
                base: roots.base_of(source),
            };
            let mut found = Vec::new();
            for lint in &self.lints {
                lint.check(registry, &target, &mut found);
            }
            if let Some(first) = found.iter().find(|d| d.severity.is_error()) {
                rejections.push((source, first.message.clone()));
            }
            ctx.diagnostics.append(&mut found);
        }

        debug!(rejected = rejections.len(), "shape lints done");
        for (id, reason) in rejections {
            ctx.reject(id, reason);
        }
        Ok(())
    }
}
