//! Language backend abstractions.
//!
//! - [`LanguageCodegen`] - main trait for language backends
//! - [`TypeMapper`] - field types to language type strings
//! - [`GenerateResult`] / [`PreviewFile`] - what a backend produced

mod traits;

pub use traits::{GenerateResult, LanguageCodegen, PreviewFile, TypeMapper};
