//! Lint for types with nothing to generate.

use automap_ir::Registry;

use super::super::{Lint, LintTarget};
use crate::{mapping::fields::field_list, pipeline::Diagnostic};

pub struct EmptyFieldsLint;

impl Lint for EmptyFieldsLint {
    fn name(&self) -> &'static str {
        "empty-fields"
    }

    fn description(&self) -> &'static str {
        "A generated type needs at least one field"
    }

    fn check(&self, registry: &Registry, target: &LintTarget, diagnostics: &mut Vec<Diagnostic>) {
        if field_list(registry, target.source, target.base).is_empty() {
            let name = &registry.get(target.source).name;
            diagnostics.push(
                Diagnostic::error("validate", format!("'{name}' has no eligible fields"))
                    .at_type(name),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use automap_ir::TypeId;

    use super::{super::lower, *};

    #[test]
    fn test_empty_type() {
        let registry = lower(
            r#"
            [[types]]
            name = "a.Empty"
        "#,
        );
        let target = LintTarget {
            source: TypeId::new(0),
            base: None,
        };

        let mut diagnostics = Vec::new();
        EmptyFieldsLint.check(&registry, &target, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("no eligible fields"));
    }

    #[test]
    fn test_base_fields_count() {
        let registry = lower(
            r#"
            [[types]]
            name = "a.Empty"

            [[types]]
            name = "a.Base"
            fields = [{ name = "label", type = "String" }]
        "#,
        );
        let target = LintTarget {
            source: TypeId::new(0),
            base: Some(TypeId::new(1)),
        };

        let mut diagnostics = Vec::new();
        EmptyFieldsLint.check(&registry, &target, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
