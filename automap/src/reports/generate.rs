//! Generate command report data structures.

use std::path::PathBuf;

use super::{
    Rejection,
    output::{Output, Report},
};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,

    /// Types left out of generation.
    pub rejected: Vec<Rejection>,

    /// Generated type names in generation order.
    pub types: Vec<String>,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

impl GenerateReport {
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Files whose content changed, relative to the output directory.
    pub written: Vec<String>,
    /// Files already up to date.
    pub unchanged: Vec<String>,
    /// Path to pipeline snapshots, if they were requested.
    pub snapshot_dir: Option<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
        self.render_rejected(out);
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(dir) = &written.snapshot_dir {
            out.key_value("Pipeline snapshots written to", &dir.display().to_string());
            out.newline();
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        out.section(&format!("Types ({})", self.types.len()));
        for name in &self.types {
            out.list_item(name);
        }
        out.newline();

        out.key_value("Generated", &written.output_dir.display().to_string());
        if !written.written.is_empty() {
            out.newline();
            out.section("Written");
            for path in &written.written {
                out.added_item(path);
            }
        }
        if !written.unchanged.is_empty() {
            out.preformatted(&format!("{} files unchanged", written.unchanged.len()));
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }

    fn render_rejected(&self, out: &mut dyn Output) {
        if self.rejected.is_empty() {
            return;
        }
        out.newline();
        for rejection in &self.rejected {
            out.error(&format!("'{}' was not generated: {}", rejection.name, rejection.reason));
        }
    }
}
