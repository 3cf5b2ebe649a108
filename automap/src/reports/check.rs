//! Check command report data structures.

use std::path::PathBuf;

use super::{
    Rejection,
    output::{Output, Report},
};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
    /// Generated type names in generation order.
    pub order: Vec<String>,
    pub rejected: Vec<Rejection>,
}

impl CheckReport {
    /// Whether the check passed (no errors, nothing rejected).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.rejected.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
            out.newline();
        }

        out.section(&format!(
            "{} type{} in generation order",
            self.order.len(),
            if self.order.len() == 1 { "" } else { "s" }
        ));
        for (i, name) in self.order.iter().enumerate() {
            out.numbered_item(i + 1, name);
        }
    }
}
