//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - renders fragments as indented text
//! - [`CodeFragment`] - intermediate representation for code pieces
//! - [`Renderable`] - trait for nodes that convert to fragments
//! - [`Indent`] - indentation configuration

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
