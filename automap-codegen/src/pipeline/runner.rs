//! Pipeline orchestrator.

use automap_manifest::Manifest;
use eyre::Result;
use tracing::debug;

use super::{
    CompilationContext, Phase, PhaseInfo, Plugin,
    phases::{GraphPhase, LowerPhase, NamingPhase, ResolvePhase, SynthesizePhase, ValidatePhase},
};

/// Runs the built-in phases, then any extra phases, calling plugin hooks
/// around each one.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::with_output_dir(".automap/debug"))
///     .phase(MyReportPhase);
///
/// let ctx = pipeline.run(manifest)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the lints run by the validate phase.
    pub fn validate_with(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Every phase this pipeline will run, in order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.builtin()
            .into_iter()
            .map(|phase| phase.info())
            .chain(self.phases.iter().map(|phase| phase.info()))
            .collect()
    }

    /// Run the pipeline on a manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally. Diagnostics recorded
    /// up to that point are part of the error message only; use a plugin
    /// to observe the context of a failed run.
    pub fn run(&self, manifest: Manifest) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(manifest);

        for phase in self.builtin() {
            self.run_phase(phase, &mut ctx)?;
        }
        for phase in &self.phases {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn builtin(&self) -> [&dyn Phase; 6] {
        [
            &LowerPhase,
            &GraphPhase,
            &ResolvePhase,
            &self.validate,
            &NamingPhase,
            &SynthesizePhase,
        ]
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        debug!(phase = phase_name, "running phase");
        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
