//! Runtime support for code generated by automap.
//!
//! Generated types depend on this crate for two things:
//!
//! - a sequential, tagless binary encoding ([`WireWriter`], [`WireReader`],
//!   [`Parcel`]) in which field position is the only identity
//! - helpers used by generated `map_from` functions ([`map_each`],
//!   [`nested`], [`MapHook`], ...)
//!
//! # Example
//!
//! ```
//! use automap_runtime::{Parcel, WireError, WireReader, WireWriter, required};
//!
//! #[derive(Debug, PartialEq)]
//! struct City {
//!     name: String,
//!     id: i32,
//! }
//!
//! impl Parcel for City {
//!     fn encode(&self, writer: &mut WireWriter) {
//!         writer.write_string(Some(&*self.name));
//!         writer.write_int(self.id);
//!     }
//!
//!     fn decode(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
//!         let name = required(reader.read_string()?, "name")?;
//!         let id = reader.read_int()?;
//!         Ok(Self { name, id })
//!     }
//! }
//!
//! let city = City { name: "Berlin".into(), id: 7 };
//! assert_eq!(City::from_bytes(&city.to_bytes()).unwrap(), city);
//! ```

mod error;
mod mapping;
mod parcel;
mod platform;
mod reader;
mod value;
mod writer;

pub use error::{MapError, WireError};
pub use mapping::{
    MapHook, map_each, map_each_or_empty, map_each_or_none, map_values, map_values_or_empty,
    nested,
};
pub use parcel::{Parcel, TypeAdapter, WireEnum, narrow, required};
pub use platform::{Size, SizeF};
pub use reader::WireReader;
pub use value::{Dynamic, Value};
pub use writer::WireWriter;
