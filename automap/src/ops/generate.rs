//! Generate operation - code generation from manifest.

use std::path::Path;

use automap_codegen::{
    language::LanguageCodegen,
    pipeline::{Pipeline, SnapshotPlugin},
};
use automap_codegen_rust::Generator;
use automap_manifest::Manifest;
use eyre::{Context, Result};
use tracing::debug;

use super::{describe, rejections};
use crate::reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory of the generated root module.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Where to write per-phase pipeline snapshots, if anywhere.
    pub snapshot_dir: Option<&'a Path>,
}

/// Execute the generate operation.
///
/// Types rejected by the pipeline are left out; every other planned type
/// is generated.
pub fn generate(manifest: &Manifest, opts: GenerateOptions<'_>) -> Result<GenerateReport> {
    let mut pipeline = Pipeline::new();
    if let Some(dir) = opts.snapshot_dir {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }
    let ctx = pipeline.run(manifest.clone()).wrap_err("Pipeline failed")?;
    debug!(
        types = ctx.shapes.len(),
        rejected = ctx.rejected.len(),
        "pipeline finished"
    );

    let generator = Generator::from_context(&ctx);
    let result = if opts.dry_run {
        let files = generator
            .preview()
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let written = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to generate code")?;
        debug!(
            written = written.written.len(),
            unchanged = written.unchanged.len(),
            "files written"
        );
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written: written.written,
            unchanged: written.unchanged,
            snapshot_dir: opts.snapshot_dir.map(Path::to_path_buf),
        })
    };

    Ok(GenerateReport {
        warnings: ctx.warnings().map(describe).collect(),
        rejected: rejections(&ctx),
        types: ctx.shapes.iter().map(|s| s.target.to_string()).collect(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::ops::fixtures;

    #[test]
    fn test_generate_writes_module_tree() {
        let dir = TempDir::new().unwrap();
        let report = generate(
            &fixtures::city(),
            GenerateOptions {
                output_dir: dir.path(),
                dry_run: false,
                snapshot_dir: None,
            },
        )
        .unwrap();

        assert_eq!(report.types, ["model.FDApiGps", "model.City"]);
        assert!(!report.has_rejections());
        assert!(dir.path().join("mod.rs").exists());
        assert!(dir.path().join("model/city.rs").exists());
        assert!(dir.path().join("model/fd_api_gps.rs").exists());

        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written result");
        };
        assert_eq!(written.written.len(), 4);
        assert!(written.unchanged.is_empty());
    }

    #[test]
    fn test_second_run_leaves_files_unchanged() {
        let dir = TempDir::new().unwrap();
        let opts = || GenerateOptions {
            output_dir: dir.path(),
            dry_run: false,
            snapshot_dir: None,
        };
        generate(&fixtures::city(), opts()).unwrap();
        let report = generate(&fixtures::city(), opts()).unwrap();

        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written result");
        };
        assert!(written.written.is_empty());
        assert_eq!(written.unchanged.len(), 4);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("generated");
        let report = generate(
            &fixtures::city(),
            GenerateOptions {
                output_dir: &output,
                dry_run: true,
                snapshot_dir: None,
            },
        )
        .unwrap();

        assert!(!output.exists());
        let GenerationResult::Preview(preview) = &report.result else {
            panic!("expected preview result");
        };
        assert_eq!(preview.files.len(), 4);
        assert_eq!(preview.files[0].path, "model/fd_api_gps.rs");
    }

    #[test]
    fn test_snapshots_written_per_phase() {
        let dir = TempDir::new().unwrap();
        let snapshots = dir.path().join("snapshots");
        generate(
            &fixtures::city(),
            GenerateOptions {
                output_dir: &dir.path().join("generated"),
                dry_run: true,
                snapshot_dir: Some(&snapshots),
            },
        )
        .unwrap();

        assert!(snapshots.join("lower.json").exists());
        assert!(snapshots.join("synthesize.json").exists());
    }

    #[test]
    fn test_rejected_types_are_reported_and_skipped() {
        let dir = TempDir::new().unwrap();
        let report = generate(
            &fixtures::city_with_private_gps(),
            GenerateOptions {
                output_dir: dir.path(),
                dry_run: false,
                snapshot_dir: None,
            },
        )
        .unwrap();

        assert!(report.has_rejections());
        assert_eq!(report.rejected[0].name, "api.ApiGps");
        assert!(report.types.is_empty());
        assert!(!dir.path().join("model").exists());
    }
}
