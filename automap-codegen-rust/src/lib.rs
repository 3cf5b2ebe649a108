//! Rust backend for automap.
//!
//! Turns the type shapes synthesized by `automap-codegen` into Rust
//! source: one file per generated type holding the struct, its
//! constructor, `map_from` and the `automap_runtime::Parcel` impl, plus
//! the `mod.rs` files that re-export them.

mod generator;
mod layout;
mod render;
mod rust_file;
mod type_mapper;

pub mod ast;
pub mod files;

pub use ast::{Const, Field, Fn, Impl, Param, Struct};
pub use automap_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use generator::Generator;
pub use layout::{ModuleLayout, module_ident};
pub use render::TypeRenderer;
pub use rust_file::{RawCode, RustFile, Use};
pub use type_mapper::RustTypeMapper;
