//! Output helpers shared by language backends.

mod imports;

pub use imports::ImportCollector;
