use std::path::{Path, PathBuf};

use automap_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{RawCode, RustFile, layout::module_ident};

/// The `mod.rs` of one generated module: child modules, then one private
/// module per type with its re-export.
#[derive(Debug, Clone, Default)]
pub struct ModRs {
    /// Module directories below the output directory; empty for the root.
    pub modules: Vec<String>,
    pub children: Vec<String>,
    /// `(file stem, type name)` per generated type.
    pub types: Vec<(String, String)>,
}

impl ModRs {
    pub fn new(modules: Vec<String>) -> Self {
        Self {
            modules,
            ..Self::default()
        }
    }
}

impl GeneratedFile for ModRs {
    fn path(&self, base: &Path) -> PathBuf {
        self.modules
            .iter()
            .fold(base.to_path_buf(), |dir, module| dir.join(module))
            .join("mod.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::generated(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        let children = self
            .children
            .iter()
            .map(|child| format!("pub mod {};", module_ident(child)));
        let mods = self
            .types
            .iter()
            .map(|(stem, _)| format!("mod {};", module_ident(stem)));
        let uses = self
            .types
            .iter()
            .map(|(stem, name)| format!("pub use {}::{name};", module_ident(stem)));

        RustFile::new()
            .add(RawCode::lines(children))
            .add(RawCode::lines(mods))
            .add(RawCode::lines(uses))
            .render()
    }
}
