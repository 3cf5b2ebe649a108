//! The generation pipeline.
//!
//! A [`Pipeline`] runs the built-in phases over one manifest, sharing a
//! [`CompilationContext`]:
//!
//! ```text
//! lower → graph → resolve → validate → naming → synthesize
//! ```
//!
//! Plugins observe the context before and after every phase. Problems local
//! to one type reject that type (and its dependents) and are recorded as
//! [`Diagnostic`]s; cycles, coverage errors and unresolved names stop the
//! run with an error.
//!
//! # Example
//!
//! ```ignore
//! use automap_codegen::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(manifest)?;
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//! let generator = automap_codegen_rust::Generator::from_context(&ctx);
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
