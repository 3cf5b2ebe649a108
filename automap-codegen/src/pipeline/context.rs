//! Compilation context passed through pipeline phases.

use automap_ir::{Registry, TypeId};
use automap_manifest::Manifest;
use eyre::{Result, eyre};
use indexmap::{IndexMap, IndexSet};
use tracing::warn;

use super::diagnostic::{Diagnostic, Severity};
use crate::{
    dependency::{DependencyGraph, GenerationPlan},
    mapping::{MappingContext, Roots, TypeShape},
};

/// Context passed through all pipeline phases.
///
/// Each phase fills in its slot; later phases read the earlier ones.
#[derive(Debug)]
pub struct CompilationContext {
    /// The manifest being compiled.
    pub manifest: Manifest,
    /// Declared types (populated by LowerPhase).
    pub registry: Option<Registry>,
    /// Root selection (populated by GraphPhase).
    pub roots: Option<Roots>,
    /// Dependency edges (populated by GraphPhase).
    pub graph: Option<DependencyGraph>,
    /// Leaf-first order (populated by ResolvePhase).
    pub plan: Option<GenerationPlan>,
    /// Target names and per-type policy (populated by NamingPhase).
    pub mappings: Option<MappingContext>,
    /// One shape per generated type, in plan order (populated by SynthesizePhase).
    pub shapes: Vec<TypeShape>,
    /// Types that will not be generated, with the reason.
    pub rejected: IndexMap<TypeId, String>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            registry: None,
            roots: None,
            graph: None,
            plan: None,
            mappings: None,
            shapes: Vec::new(),
            rejected: IndexMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Exclude a type from generation. The first reason recorded wins.
    pub fn reject(&mut self, id: TypeId, reason: impl Into<String>) {
        let reason = reason.into();
        if !self.rejected.contains_key(&id) {
            warn!(type_id = %id, %reason, "type rejected");
            self.rejected.insert(id, reason);
        }
    }

    pub fn is_rejected(&self, id: TypeId) -> bool {
        self.rejected.contains_key(&id)
    }

    pub fn rejected_ids(&self) -> IndexSet<TypeId> {
        self.rejected.keys().copied().collect()
    }

    /// Record the messages of a fatal condition and build the error that
    /// stops the pipeline.
    pub fn abort(&mut self, phase: &str, headline: &str, messages: Vec<String>) -> eyre::Report {
        let mut text = format!("{headline}:");
        for message in messages {
            text.push_str("\n  - ");
            text.push_str(&message);
            self.add_error(phase, message);
        }
        eyre!(text)
    }

    /// Type name for diagnostics, falling back to the id before lowering.
    pub fn type_name(&self, id: TypeId) -> String {
        match &self.registry {
            Some(registry) if registry.contains(id) => registry.get(id).name.to_string(),
            _ => id.to_string(),
        }
    }
}

/// Borrow a phase output, failing if its phase has not run.
pub(crate) fn require<'a, T>(slot: &'a Option<T>, what: &str) -> Result<&'a T> {
    slot.as_ref()
        .ok_or_else(|| eyre!("{what} not set - did the earlier phases run?"))
}
