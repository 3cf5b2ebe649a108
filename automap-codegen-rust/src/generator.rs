use std::{
    collections::BTreeMap,
    path::{Component, Path},
};

use automap_codegen::{
    builder::Indent,
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    mapping::TypeShape,
    pipeline::CompilationContext,
};
use automap_core::{File, GeneratedFile, WriteResult};
use automap_manifest::GeneratorConfig;
use eyre::Result;

use crate::{
    files::{ModRs, TypeRs},
    layout::ModuleLayout,
    render::TypeRenderer,
};

/// Rust code generator: one file per synthesized type plus the `mod.rs`
/// tree that re-exports them.
pub struct Generator<'a> {
    shapes: &'a [TypeShape],
    layout: ModuleLayout,
    derives: &'a [String],
    indent: Indent,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.preview_files()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        self.generate_files(output_dir)
    }
}

impl<'a> Generator<'a> {
    pub fn new(shapes: &'a [TypeShape], config: &'a GeneratorConfig) -> Self {
        Self {
            shapes,
            layout: ModuleLayout::new(config),
            derives: &config.derives,
            indent: Indent::Spaces(config.indent),
        }
    }

    /// Generator for the shapes of a finished pipeline run.
    pub fn from_context(ctx: &'a CompilationContext) -> Self {
        Self::new(&ctx.shapes, &ctx.manifest.generator)
    }

    /// Every file, type files in plan order followed by `mod.rs` files
    /// from the root down.
    fn files(&self) -> Vec<Box<dyn GeneratedFile>> {
        let mut modules: BTreeMap<Vec<String>, ModRs> = BTreeMap::new();
        modules.insert(Vec::new(), ModRs::new(Vec::new()));
        let mut files: Vec<Box<dyn GeneratedFile>> = Vec::new();

        for shape in self.shapes {
            let path = self.layout.modules(&shape.target);
            for depth in 0..path.len() {
                let parent = modules
                    .entry(path[..depth].to_vec())
                    .or_insert_with(|| ModRs::new(path[..depth].to_vec()));
                if !parent.children.contains(&path[depth]) {
                    parent.children.push(path[depth].clone());
                }
            }

            let stem = self.layout.file_stem(&shape.target);
            modules
                .entry(path.clone())
                .or_insert_with(|| ModRs::new(path.clone()))
                .types
                .push((stem.clone(), shape.target.simple_name().to_string()));

            let content = TypeRenderer::new(shape, &self.layout, self.derives).render(self.indent);
            files.push(Box::new(TypeRs::new(path, stem, content)));
        }

        files.extend(
            modules
                .into_values()
                .map(|m| Box::new(m) as Box<dyn GeneratedFile>),
        );
        files
    }

    /// Preview generated files without writing to disk
    fn preview_files(&self) -> Vec<PreviewFile> {
        self.files()
            .iter()
            .map(|file| {
                let path = file.path(Path::new(""));
                let rendered = File::new(&path, file.render()).with_rules(file.rules());
                PreviewFile {
                    path: display_path(&path),
                    content: rendered.content(),
                }
            })
            .collect()
    }

    fn generate_files(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();
        for file in self.files() {
            let relative = display_path(&file.path(Path::new("")));
            match file.write(output_dir)? {
                WriteResult::Written => result.written.push(relative),
                WriteResult::Unchanged => result.unchanged.push(relative),
            }
        }
        Ok(result)
    }
}

/// A relative path with `/` separators on every platform.
fn display_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
