//! Where generated and hand-written types live in the Rust module tree.

use automap_core::to_snake_case;
use automap_ir::QualifiedName;
use automap_manifest::GeneratorConfig;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// A module name as written in Rust source, raw when it is a keyword.
pub fn module_ident(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Maps dotted packages onto Rust modules.
///
/// A package `com.example.model` with package root `com.example` becomes
/// the module `model`, under `module_root` for generated types and under
/// `source_root` for declared ones.
#[derive(Debug, Clone)]
pub struct ModuleLayout {
    module_root: String,
    source_root: String,
    package_root: Option<String>,
}

impl ModuleLayout {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            module_root: config.module_root.clone(),
            source_root: config.source_root.clone(),
            package_root: config.package_root.clone(),
        }
    }

    /// Module names for the package of `name`, below the package root.
    pub fn modules(&self, name: &QualifiedName) -> Vec<String> {
        let package = name.package();
        let relative = match &self.package_root {
            Some(root) if package == root => "",
            Some(root) => package
                .strip_prefix(root.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(package),
            None => package,
        };
        relative
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(to_snake_case)
            .collect()
    }

    /// Rust path of a generated type.
    pub fn target_path(&self, name: &QualifiedName) -> String {
        self.path_in(&self.module_root, name)
    }

    /// Rust path of a declared, hand-written type.
    pub fn source_path(&self, name: &QualifiedName) -> String {
        self.path_in(&self.source_root, name)
    }

    /// Rust path of an enum named in a field type: Rust paths are kept,
    /// dotted names are declared types.
    pub fn enum_path(&self, path: &str) -> String {
        if path.contains("::") {
            path.to_string()
        } else {
            self.source_path(&QualifiedName::new(path))
        }
    }

    /// File stem of a generated type.
    pub fn file_stem(&self, name: &QualifiedName) -> String {
        to_snake_case(name.simple_name())
    }

    fn path_in(&self, root: &str, name: &QualifiedName) -> String {
        let mut segments: Vec<String> = Vec::new();
        if !root.is_empty() {
            segments.push(root.to_string());
        }
        segments.extend(self.modules(name).iter().map(|m| module_ident(m)));
        segments.push(name.simple_name().to_string());
        segments.join("::")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(package_root: Option<&str>) -> ModuleLayout {
        ModuleLayout::new(&GeneratorConfig {
            package_root: package_root.map(String::from),
            ..GeneratorConfig::default()
        })
    }

    #[test]
    fn test_package_root_is_dropped() {
        let layout = layout(Some("com.example"));
        let name = QualifiedName::new("com.example.model.City");
        assert_eq!(layout.modules(&name), ["model"]);
        assert_eq!(layout.target_path(&name), "crate::generated::model::City");
        assert_eq!(layout.source_path(&name), "crate::model::City");
    }

    #[test]
    fn test_types_at_the_package_root() {
        let layout = layout(Some("com.example"));
        let name = QualifiedName::new("com.example.City");
        assert!(layout.modules(&name).is_empty());
        assert_eq!(layout.target_path(&name), "crate::generated::City");
    }

    #[test]
    fn test_unrelated_package_keeps_every_segment() {
        let layout = layout(Some("com.example"));
        let name = QualifiedName::new("org.other.Gps");
        assert_eq!(layout.modules(&name), ["org", "other"]);

        let name = QualifiedName::new("com.examples.Gps");
        assert_eq!(layout.modules(&name), ["com", "examples"]);
    }

    #[test]
    fn test_keyword_modules_are_raw() {
        let layout = layout(None);
        let name = QualifiedName::new("app.type.Kind");
        assert_eq!(layout.source_path(&name), "crate::app::r#type::Kind");
        assert_eq!(module_ident("model"), "model");
    }

    #[test]
    fn test_enum_paths() {
        let layout = layout(Some("com.example"));
        assert_eq!(layout.enum_path("crate::Cuisine"), "crate::Cuisine");
        assert_eq!(layout.enum_path("com.example.food.Cuisine"), "crate::food::Cuisine");
    }

    #[test]
    fn test_file_stem() {
        let layout = layout(None);
        assert_eq!(layout.file_stem(&QualifiedName::new("model.FDApiGps")), "fd_api_gps");
    }
}
