//! Plan command report data structures.

use serde::Serialize;

use super::output::{Output, Report};

/// The generation plan, leaf-first.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub entries: Vec<PlanEntry>,
    pub rejected: Vec<Rejection>,
}

/// One type that will be generated.
#[derive(Debug, Serialize)]
pub struct PlanEntry {
    pub source: String,
    pub target: String,
    pub wire_encoded: bool,
    /// Wire version, `0` when not wire-encoded.
    pub version: u32,
    /// Hand-written base the generated type extends.
    pub base: Option<String>,
    /// Whether `map_from` ends with the base's hook.
    pub hook: bool,
}

/// A type left out of generation.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub name: String,
    pub reason: String,
}

impl PlanEntry {
    fn describe(&self) -> String {
        let mut text = format!("{} -> {}", self.source, self.target);
        if self.wire_encoded {
            text.push_str(&format!(" [wire v{}]", self.version));
        }
        if let Some(base) = &self.base {
            text.push_str(&format!(" extends {base}"));
            if self.hook {
                text.push_str(" (hook)");
            }
        }
        text
    }
}

impl Report for PlanReport {
    fn render(&self, out: &mut dyn Output) {
        out.section(&format!("Generation order ({})", self.entries.len()));
        for (i, entry) in self.entries.iter().enumerate() {
            out.numbered_item(i + 1, &entry.describe());
        }

        if !self.rejected.is_empty() {
            out.newline();
            out.section(&format!("Rejected ({})", self.rejected.len()));
            for rejection in &self.rejected {
                out.list_item(&format!("{}: {}", rejection.name, rejection.reason));
            }
        }
    }
}
