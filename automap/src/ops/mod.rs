//! Core operations.
//!
//! This module contains the business logic for automap commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod plan;

use automap_codegen::pipeline::{CompilationContext, Diagnostic};
pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use plan::plan;

use crate::reports::Rejection;

/// A diagnostic as printed, with its location on a second line.
fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}

/// Rejected types by name, in rejection order.
fn rejections(ctx: &CompilationContext) -> Vec<Rejection> {
    ctx.rejected
        .iter()
        .map(|(id, reason)| Rejection {
            name: ctx.type_name(*id),
            reason: reason.clone(),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use automap_manifest::Manifest;

    /// A mapper over `ApiCity`, which references `ApiGps`.
    pub fn city() -> Manifest {
        automap_manifest::parse_str(
            r#"
            [[types]]
            name = "api.ApiCity"
            fields = [
                { name = "name", type = "String", nullable = true },
                { name = "gps", type = "ApiGps" },
            ]

            [[types]]
            name = "api.ApiGps"
            fields = [{ name = "lat", type = "f64" }, { name = "lng", type = "f64" }]

            [[types]]
            name = "model.CityMapper"
            [types.mapper]
            map_from = "api.ApiCity"
            target_name = "City"
            wire_encoded = true
            "#,
        )
        .expect("Failed to parse test manifest")
    }

    /// Like [`city`], but `ApiGps` has a private field.
    pub fn city_with_private_gps() -> Manifest {
        automap_manifest::parse_str(
            r#"
            [[types]]
            name = "api.ApiCity"
            fields = [{ name = "gps", type = "ApiGps" }]

            [[types]]
            name = "api.ApiGps"
            fields = [{ name = "lat", type = "f64", private = true }]

            [[types]]
            name = "model.CityMapper"
            [types.mapper]
            map_from = "api.ApiCity"
            "#,
        )
        .expect("Failed to parse test manifest")
    }
}
