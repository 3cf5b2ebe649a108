//! Type descriptor model for the automap generator.
//!
//! This crate holds the in-memory representation of declared model types that
//! every later stage of the generator works on.
//!
//! # Architecture
//!
//! ```text
//! automap.toml → automap-manifest (parsing) → automap-ir (registry) → codegen
//! ```
//!
//! Types live in a [`Registry`] arena and refer to each other through
//! [`TypeId`] indices resolved once at registration time. Descriptors are
//! immutable after the registry is built.

mod descriptor;
mod name;
mod registry;
mod semantic;

pub use descriptor::{DEFAULT_PREFIX, FieldDescriptor, MapperSpec, Nesting, TypeDescriptor};
pub use name::QualifiedName;
pub use registry::{Registry, TypeId};
pub use semantic::{CollectionKind, PlatformKind, ScalarKind, SemanticType};
