use std::path::PathBuf;

use automap_manifest::AutomapToml;
use clap::Args;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PlanCommand {
    /// Path to automap.toml (defaults to ./automap.toml)
    #[arg(short, long, default_value = "automap.toml")]
    pub config: PathBuf,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

impl PlanCommand {
    pub fn run(&self) -> Result<()> {
        let automap_toml = AutomapToml::open(&self.config).unwrap_or_exit();
        let report = ops::plan(automap_toml.manifest())?;

        if self.json {
            let json = serde_json::to_string_pretty(&report).wrap_err("Failed to serialize plan")?;
            println!("{json}");
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
