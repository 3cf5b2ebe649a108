//! Lint for annotated types that inherit from annotated types.

use automap_ir::Registry;

use super::super::{Lint, LintTarget};
use crate::pipeline::Diagnostic;

pub struct AnnotatedAncestorLint;

impl Lint for AnnotatedAncestorLint {
    fn name(&self) -> &'static str {
        "annotated-ancestor"
    }

    fn description(&self) -> &'static str {
        "An annotated type may not extend another annotated type"
    }

    fn check(&self, registry: &Registry, target: &LintTarget, diagnostics: &mut Vec<Diagnostic>) {
        for id in target.types() {
            let ty = registry.get(id);
            if !ty.is_annotated() {
                continue;
            }
            if let Some(ancestor) = registry
                .ancestors(id)
                .into_iter()
                .find(|a| registry.get(*a).is_annotated())
            {
                let ancestor = &registry.get(ancestor).name;
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("'{}' extends annotated type '{ancestor}'", ty.name),
                    )
                    .at_type(&ty.name),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use automap_ir::TypeId;

    use super::{super::lower, *};

    #[test]
    fn test_annotated_grandparent() {
        let registry = lower(
            r#"
            [[types]]
            name = "a.Root"
            fields = [{ name = "id", type = "i32" }]
            [types.mapper]

            [[types]]
            name = "a.Middle"
            superclass = "Root"

            [[types]]
            name = "a.Leaf"
            superclass = "Middle"
            [types.mapper]
        "#,
        );
        let target = LintTarget {
            source: TypeId::new(2),
            base: None,
        };

        let mut diagnostics = Vec::new();
        AnnotatedAncestorLint.check(&registry, &target, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'a.Root'"));
    }

    #[test]
    fn test_unannotated_source_is_skipped() {
        let registry = lower(
            r#"
            [[types]]
            name = "a.Root"
            fields = [{ name = "id", type = "i32" }]
            [types.mapper]

            [[types]]
            name = "a.Child"
            superclass = "Root"
        "#,
        );
        let target = LintTarget {
            source: TypeId::new(1),
            base: None,
        };

        let mut diagnostics = Vec::new();
        AnnotatedAncestorLint.check(&registry, &target, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
