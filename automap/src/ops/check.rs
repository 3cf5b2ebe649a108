//! Check operation - manifest validation.

use std::path::Path;

use automap_codegen::pipeline::{Pipeline, Severity};
use automap_manifest::Manifest;
use eyre::{Context, Result};

use super::{describe, rejections};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline to validate the manifest and returns diagnostics with
/// the generation order.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let pipeline = Pipeline::new();
    let ctx = pipeline
        .run(manifest.clone())
        .wrap_err("Validation failed")?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = describe(diag);
        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        errors,
        warnings,
        infos,
        order: ctx.shapes.iter().map(|s| s.target.to_string()).collect(),
        rejected: rejections(&ctx),
    })
}
