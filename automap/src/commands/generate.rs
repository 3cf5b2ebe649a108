use std::path::PathBuf;

use automap_manifest::AutomapToml;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to automap.toml (defaults to ./automap.toml)
    #[arg(short, long, default_value = "automap.toml")]
    pub config: PathBuf,

    /// Output directory for the generated module
    #[arg(short, long, default_value = "src/generated")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot of the pipeline state after every phase
    #[arg(long, value_name = "DIR")]
    pub snapshots: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let automap_toml = AutomapToml::open(&self.config).unwrap_or_exit();
        let report = ops::generate(
            automap_toml.manifest(),
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
                snapshot_dir: self.snapshots.as_deref(),
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if report.has_rejections() {
            std::process::exit(1);
        }
        Ok(())
    }
}
