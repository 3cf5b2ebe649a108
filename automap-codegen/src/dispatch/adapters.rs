//! Per-type allocation of custom adapter constants.

use automap_core::to_upper_snake_case;
use indexmap::IndexMap;
use serde::Serialize;

/// Name of the wire version constant emitted on every wire-encoded type.
pub const WIRE_VERSION: &str = "WIRE_VERSION";

/// One shared adapter instance of a generated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterConst {
    /// Rust path of the adapter type.
    pub path: String,
    /// Name of the associated constant holding the instance.
    pub constant: String,
}

/// Hands out one constant per distinct adapter path.
///
/// Names are the UPPER_SNAKE_CASE form of the adapter's simple name. A name
/// already taken, including [`WIRE_VERSION`], gets `_` appended until it is
/// free.
#[derive(Debug, Clone, Default)]
pub struct AdapterNames {
    by_path: IndexMap<String, String>,
}

impl AdapterNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// The constant for `path`, allocating it on first use.
    pub fn constant_for(&mut self, path: &str) -> String {
        if let Some(existing) = self.by_path.get(path) {
            return existing.clone();
        }

        let simple = path.rsplit("::").next().unwrap_or(path);
        let mut name = to_upper_snake_case(simple);
        while name == WIRE_VERSION || self.by_path.values().any(|taken| *taken == name) {
            name.push('_');
        }
        self.by_path.insert(path.to_string(), name.clone());
        name
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Allocated constants in first-use order.
    pub fn into_consts(self) -> Vec<AdapterConst> {
        self.by_path
            .into_iter()
            .map(|(path, constant)| AdapterConst { path, constant })
            .collect()
    }
}
