//! Built-in shape lints.

mod annotated_ancestor;
mod empty_fields;
mod nested_access;
mod private_field;

pub use annotated_ancestor::AnnotatedAncestorLint;
pub use empty_fields::EmptyFieldsLint;
pub use nested_access::NestedAccessLint;
pub use private_field::PrivateFieldLint;

#[cfg(test)]
pub(crate) fn lower(src: &str) -> automap_ir::Registry {
    let manifest = automap_manifest::parse_str(src).expect("Failed to parse test manifest");
    crate::pipeline::phases::lower_manifest(&manifest).expect("lowering should succeed")
}
