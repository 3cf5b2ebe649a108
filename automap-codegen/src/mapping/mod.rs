//! Mapping synthesis: roots, target naming and generated type shapes.
//!
//! - [`Roots`] - root selection and the primary mapper
//! - [`resolve_names`] / [`MappingContext`] - target names and per-type policy
//! - [`TypeShape`] - the language-neutral result handed to a backend

pub mod fields;
mod naming;
mod roots;
mod shape;

pub use naming::{MappingContext, MappingPlan, NamingError, default_simple_name, resolve_names};
pub use roots::{Mode, RootEntry, Roots};
pub use shape::{FieldShape, FieldType, MapFromShape, MapStep, ShapeError, TypeShape, WireShape};
