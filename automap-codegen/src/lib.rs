//! The automap generator core.
//!
//! Given a manifest of declared types, this crate decides what to generate
//! and in which order; language backends such as `automap-codegen-rust`
//! turn the result into source files.
//!
//! # Module Organization
//!
//! - [`pipeline`] - phases, diagnostics and plugins ([`pipeline::Pipeline`])
//! - [`dependency`] - dependency graph and leaf-first resolution
//! - [`dispatch`] - the closed codec table and custom adapters
//! - [`mapping`] - roots, naming policy and synthesized type shapes
//! - [`builder`] - indentation-aware text building for backends
//! - [`generation`] - import collection for backends
//! - [`language`] - backend traits
//! - [`testing`] - compile checks for generated code (feature-gated)

pub mod builder;
pub mod dependency;
pub mod dispatch;
pub mod generation;
pub mod language;
pub mod mapping;
pub mod pipeline;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
