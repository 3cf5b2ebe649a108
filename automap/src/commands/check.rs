use std::path::PathBuf;

use automap_manifest::AutomapToml;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to automap.toml (defaults to ./automap.toml)
    #[arg(short, long, default_value = "automap.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let automap_toml = AutomapToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(automap_toml.manifest(), automap_toml.path())?;

        report.render(&mut TerminalOutput::new());
        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
