//! Rust AST builders for the items of a generated file.
//!
//! Each builder implements [`Renderable`](automap_codegen::builder::Renderable)
//! and is rendered through a `CodeBuilder`.

mod fns;
mod impls;
mod structs;

pub use fns::{Fn, Param};
pub use impls::{Const, Impl};
pub use structs::{Field, Struct};
