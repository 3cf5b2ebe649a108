//! Import collection for generated files.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks the symbols a generated file uses, grouped by module.
///
/// Modules keep insertion order and symbols are sorted, so the rendered
/// block is the same on every run.
///
/// # Example
///
/// ```
/// use automap_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("automap_runtime", "WireWriter");
/// imports.add("automap_runtime", "Parcel");
/// imports.add("std::collections", "BTreeMap");
///
/// assert_eq!(
///     imports.rust_use_lines(),
///     [
///         "use automap_runtime::{Parcel, WireWriter};",
///         "use std::collections::BTreeMap;",
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Add a full path such as `std::collections::BTreeMap`, split at the
    /// last `::`. Paths without a module are ignored.
    pub fn add_path(&mut self, path: &str) {
        if let Some((module, symbol)) = path.rsplit_once("::") {
            self.add(module, symbol);
        }
    }

    pub fn merge(&mut self, other: &ImportCollector) {
        for (module, symbols) in &other.imports {
            let entry = self.imports.entry(module.clone()).or_default();
            entry.extend(symbols.iter().cloned());
        }
    }

    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// One Rust `use` declaration per module.
    pub fn rust_use_lines(&self) -> Vec<String> {
        self.imports
            .iter()
            .filter(|(_, symbols)| !symbols.is_empty())
            .map(|(module, symbols)| {
                if symbols.len() == 1 {
                    let symbol = symbols.iter().next().map_or("", String::as_str);
                    format!("use {module}::{symbol};")
                } else {
                    let joined: Vec<&str> = symbols.iter().map(String::as_str).collect();
                    format!("use {module}::{{{}}};", joined.join(", "))
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}
