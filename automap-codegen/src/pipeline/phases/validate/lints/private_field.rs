//! Lint for private fields.

use automap_ir::Registry;

use super::super::{Lint, LintTarget};
use crate::{mapping::fields::field_list, pipeline::Diagnostic};

/// Rejects types whose field list, inherited and base fields included,
/// has a private field.
pub struct PrivateFieldLint;

impl Lint for PrivateFieldLint {
    fn name(&self) -> &'static str {
        "private-field"
    }

    fn description(&self) -> &'static str {
        "Every field in the generated field list must be accessible"
    }

    fn check(&self, registry: &Registry, target: &LintTarget, diagnostics: &mut Vec<Diagnostic>) {
        for listed in field_list(registry, target.source, target.base) {
            if listed.field.private {
                let owner = &registry.get(listed.owner).name;
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("field '{}' of '{owner}' is private", listed.field.name),
                    )
                    .at_field(owner, &listed.field.name),
                );
            }
        }
    }
}
