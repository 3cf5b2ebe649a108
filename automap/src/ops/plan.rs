//! Plan operation - what would be generated, without rendering.

use automap_codegen::pipeline::Pipeline;
use automap_manifest::Manifest;
use eyre::{Context, Result};

use super::rejections;
use crate::reports::{PlanEntry, PlanReport};

/// Execute the plan operation.
pub fn plan(manifest: &Manifest) -> Result<PlanReport> {
    let ctx = Pipeline::new()
        .run(manifest.clone())
        .wrap_err("Pipeline failed")?;

    let entries = ctx
        .shapes
        .iter()
        .map(|shape| PlanEntry {
            source: shape.source.to_string(),
            target: shape.target.to_string(),
            wire_encoded: shape.wire.is_some(),
            version: shape.wire.as_ref().map_or(0, |w| w.version),
            base: shape.base.as_ref().map(ToString::to_string),
            hook: shape.map_from.as_ref().is_some_and(|m| m.hook.is_some()),
        })
        .collect();

    Ok(PlanReport {
        entries,
        rejected: rejections(&ctx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fixtures;

    #[test]
    fn test_plan_is_leaf_first() {
        let report = plan(&fixtures::city()).unwrap();
        let targets: Vec<&str> = report.entries.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, ["model.FDApiGps", "model.City"]);
        assert!(report.entries.iter().all(|e| e.wire_encoded));
        assert_eq!(report.entries[1].source, "api.ApiCity");
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_plan_json_shape() {
        let report = plan(&fixtures::city()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"][0]["target"], "model.FDApiGps");
        assert_eq!(json["entries"][0]["base"], serde_json::Value::Null);
        assert_eq!(json["rejected"], serde_json::json!([]));
    }
}
