//! Plugin that records the pipeline state after each phase.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard},
};

use automap_ir::{Registry, TypeId};
use eyre::{Result, WrapErr};
use indexmap::IndexMap;
use serde::Serialize;

use super::{CompilationContext, Diagnostic, Plugin};
use crate::{
    dependency::{DependencyGraph, GenerationPlan},
    mapping::{MappingContext, Roots, TypeShape},
};

/// The pipeline state after one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<Registry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roots: Option<Roots>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<DependencyGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<GenerationPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<MappingContext>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<TypeShape>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub rejected: IndexMap<TypeId, String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Captures a [`PhaseSnapshot`] after every phase, optionally writing each
/// one to `<dir>/<phase>.json` as it is taken.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".automap/debug"));
/// let ctx = pipeline.run(manifest)?;
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.read().clone()
    }

    /// Write every snapshot taken so far to `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        for snapshot in self.read().iter() {
            write_snapshot(dir.as_ref(), snapshot)?;
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<PhaseSnapshot>> {
        self.snapshots.read().unwrap_or_else(|e| e.into_inner())
    }

    fn capture(&self, phase: &str, ctx: &CompilationContext) -> PhaseSnapshot {
        PhaseSnapshot {
            phase: phase.to_string(),
            registry: ctx.registry.clone(),
            roots: ctx.roots.clone(),
            graph: ctx.graph.clone(),
            plan: ctx.plan.clone(),
            mappings: ctx.mappings.clone(),
            shapes: ctx.shapes.clone(),
            rejected: ctx.rejected.clone(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = self.capture(phase, ctx);
        if let Some(dir) = &self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }
        self.snapshots
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(snapshot);
        Ok(())
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir).wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
