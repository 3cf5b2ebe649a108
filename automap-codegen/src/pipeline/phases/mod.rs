//! Built-in pipeline phases, in execution order:
//!
//! - [`LowerPhase`] - manifest to type registry
//! - [`GraphPhase`] - root selection and dependency discovery
//! - [`ResolvePhase`] - leaf-first generation plan
//! - [`ValidatePhase`] - per-type shape lints
//! - [`NamingPhase`] - target names and the mapping context
//! - [`SynthesizePhase`] - one type shape per generated type

mod graph;
mod lower;
mod naming;
mod resolve;
mod synthesize;
mod validate;

pub use graph::GraphPhase;
pub use lower::{LowerError, LowerPhase, lower_manifest};
pub use naming::NamingPhase;
pub use resolve::ResolvePhase;
pub use synthesize::SynthesizePhase;
pub use validate::{
    AnnotatedAncestorLint, EmptyFieldsLint, Lint, LintInfo, LintTarget, NestedAccessLint,
    PrivateFieldLint, ValidatePhase,
};
