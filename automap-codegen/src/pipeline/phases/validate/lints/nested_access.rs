//! Lint for nested declarations the generated code cannot reach.

use automap_ir::{Nesting, Registry};

use super::super::{Lint, LintTarget};
use crate::pipeline::Diagnostic;

/// Nested sources and bases must be static and not private.
pub struct NestedAccessLint;

impl Lint for NestedAccessLint {
    fn name(&self) -> &'static str {
        "nested-access"
    }

    fn description(&self) -> &'static str {
        "Nested types must be static and visible"
    }

    fn check(&self, registry: &Registry, target: &LintTarget, diagnostics: &mut Vec<Diagnostic>) {
        for id in target.types() {
            let ty = registry.get(id);
            let Nesting::Nested {
                outer,
                is_static,
                is_private,
            } = &ty.nesting
            else {
                continue;
            };

            let problem = match (is_static, is_private) {
                (false, true) => "private and not static",
                (false, false) => "not static",
                (true, true) => "private",
                (true, false) => continue,
            };
            diagnostics.push(
                Diagnostic::error(
                    "validate",
                    format!("'{}' is nested in '{outer}' but is {problem}", ty.name),
                )
                .at_type(&ty.name),
            );
        }
    }
}
