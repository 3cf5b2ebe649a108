use std::path::{Path, PathBuf};

use automap_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;

/// The file of one generated type, e.g. `model/fd_gps.rs`.
pub struct TypeRs {
    /// Module directories below the output directory.
    pub modules: Vec<String>,
    pub stem: String,
    pub content: String,
}

impl TypeRs {
    pub fn new(modules: Vec<String>, stem: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            modules,
            stem: stem.into(),
            content: content.into(),
        }
    }
}

impl GeneratedFile for TypeRs {
    fn path(&self, base: &Path) -> PathBuf {
        self.modules
            .iter()
            .fold(base.to_path_buf(), |dir, module| dir.join(module))
            .join(format!("{}.rs", self.stem))
    }

    fn rules(&self) -> FileRules {
        FileRules::generated(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_follows_modules() {
        let file = TypeRs::new(vec!["model".into(), "geo".into()], "fd_gps", "");
        assert_eq!(
            file.path(Path::new("out")),
            Path::new("out").join("model").join("geo").join("fd_gps.rs")
        );
        assert_eq!(file.path(Path::new("")), Path::new("model/geo/fd_gps.rs"));
    }
}
