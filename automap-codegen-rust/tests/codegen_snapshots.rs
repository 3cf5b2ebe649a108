//! Snapshot tests for Rust code generation.
//!
//! These tests run the full pipeline on a manifest and check the rendered
//! files. Run `cargo insta review` to update snapshots when making
//! intentional changes.

use automap_codegen::pipeline::Pipeline;
use automap_codegen_rust::{Generator, LanguageCodegen};

/// Run the pipeline and render every file, keeping generation order.
fn generate_files(manifest_toml: &str) -> Vec<(String, String)> {
    let manifest = automap_manifest::parse_str(manifest_toml).expect("Failed to parse manifest");
    let ctx = Pipeline::new().run(manifest).expect("pipeline should succeed");
    Generator::from_context(&ctx)
        .preview()
        .into_iter()
        .map(|f| (f.path, f.content))
        .collect()
}

fn get_file<'a>(files: &'a [(String, String)], path: &str) -> &'a str {
    files
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, c)| c.as_str())
        .unwrap_or_else(|| panic!("{path} not generated"))
}

const CITY: &str = r#"
    [generator]
    package_root = "com.example"

    [[types]]
    name = "com.example.api.ApiCity"
    fields = [
        { name = "name", type = "String", nullable = true },
        { name = "id", type = "i32" },
        { name = "gps", type = "ApiGps" },
    ]

    [[types]]
    name = "com.example.api.ApiGps"
    fields = [{ name = "lat", type = "f64" }, { name = "lng", type = "f64" }]

    [[types]]
    name = "com.example.model.CityMapper"
    [types.mapper]
    map_from = "com.example.api.ApiCity"
    target_name = "City"
    wire_encoded = true
    version = 1
"#;

#[test]
fn test_files_follow_generation_order() {
    let files = generate_files(CITY);
    let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        paths,
        ["model/fd_api_gps.rs", "model/city.rs", "mod.rs", "model/mod.rs"]
    );
}

#[test]
fn test_city_type() {
    let files = generate_files(CITY);
    insta::assert_snapshot!("city_rs", get_file(&files, "model/city.rs"));
}

#[test]
fn test_model_module() {
    let files = generate_files(CITY);
    insta::assert_snapshot!("model_mod_rs", get_file(&files, "model/mod.rs"));
}

#[test]
fn test_root_module() {
    let files = generate_files(CITY);
    assert_eq!(
        get_file(&files, "mod.rs"),
        "// @generated by automap. Do not edit by hand.\n\npub mod model;\n"
    );
}

#[test]
fn test_dependency_is_wire_encoded_too() {
    let files = generate_files(CITY);
    let gps = get_file(&files, "model/fd_api_gps.rs");
    assert!(gps.contains("pub const WIRE_VERSION: u32 = 1;"));
    assert!(gps.contains("impl Parcel for FDApiGps {"));
    assert!(gps.contains("        writer.write_double(self.lat);\n        writer.write_double(self.lng);\n"));
    assert!(gps.contains("pub fn map_from(source: &crate::api::ApiGps) -> Result<Self, MapError> {"));
}

#[test]
fn test_collections_and_arrays() {
    let files = generate_files(
        r#"
        [[types]]
        name = "api.RestaurantSet"
        fields = [
            { name = "restaurants", type = "List<Restaurant>", nullable = true },
            { name = "featured", type = "[Restaurant]", nullable = true },
            { name = "by_name", type = "Map<String, Restaurant>" },
            { name = "tags", type = "Set<String>" },
        ]

        [[types]]
        name = "api.Restaurant"
        fields = [{ name = "name", type = "String" }]

        [[types]]
        name = "model.Mapper"
        [types.mapper]
        map_from = "api.RestaurantSet"
        "#,
    );

    let set = get_file(&files, "model/fd_restaurant_set.rs");
    assert!(set.contains(
        "use std::collections::BTreeMap;\nuse automap_runtime::{MapError, map_each_or_empty, map_each_or_none, map_values};\n"
    ));
    assert!(set.contains("    pub restaurants: Option<Vec<crate::generated::model::FDRestaurant>>,\n"));
    assert!(set.contains("    pub by_name: BTreeMap<String, crate::generated::model::FDRestaurant>,\n"));
    assert!(set.contains(
        "restaurants: Some(map_each_or_empty(source.restaurants.as_deref(), crate::generated::model::FDRestaurant::map_from)?),"
    ));
    assert!(set.contains(
        "featured: map_each_or_none(source.featured.as_deref(), crate::generated::model::FDRestaurant::map_from)?,"
    ));
    assert!(set.contains(
        "by_name: map_values(&source.by_name, crate::generated::model::FDRestaurant::map_from)?,"
    ));
    assert!(set.contains("tags: source.tags.clone(),"));
    assert!(!set.contains("Parcel"));
}

#[test]
fn test_extended_base_runs_hook_last() {
    let files = generate_files(
        r#"
        [[types]]
        name = "api.ApiCity"
        fields = [{ name = "name", type = "String" }]

        [[types]]
        name = "model.City"
        has_map_hook = true
        fields = [{ name = "visits", type = "u32" }]
        [types.mapper]
        map_from = "api.ApiCity"
        extend = true
        "#,
    );

    let city = get_file(&files, "model/fd_api_city.rs");
    assert!(city.contains("/// Mapped from `api.ApiCity`, extending `City`.\n"));
    assert!(city.contains("pub struct FDApiCity {\n    pub visits: u32,\n    pub name: String,\n}"));
    assert!(city.contains(
        "        let mut target = Self {\n            visits: Default::default(),\n            name: source.name.clone(),\n        };\n        <crate::model::City as MapHook<Self>>::after_map(&mut target);\n        Ok(target)\n"
    ));
}

#[test]
fn test_adapters_and_value_fallback() {
    let files = generate_files(
        r#"
        [[types]]
        name = "api.Event"
        fields = [
            { name = "starts", type = "crate::time::Date", adapter = "crate::time::DateAdapter" },
            { name = "ends", type = "crate::time::Date", adapter = "crate::time::DateAdapter", since = 2 },
            { name = "attendees", type = "Boxed<i32>", nullable = true },
            { name = "extra", type = "crate::meta::Extra" },
        ]

        [[types]]
        name = "model.EventMapper"
        [types.mapper]
        map_from = "api.Event"
        wire_encoded = true
        "#,
    );

    let event = get_file(&files, "model/fd_event.rs");
    assert_eq!(event.matches("pub const DATE_ADAPTER").count(), 1);
    assert!(event.contains(
        "    pub const DATE_ADAPTER: crate::time::DateAdapter = crate::time::DateAdapter;\n"
    ));
    assert!(event.contains("    /// Since wire version 2.\n    pub ends: crate::time::Date,\n"));
    assert!(event.contains("    pub attendees: Option<i32>,\n"));
    assert!(event.contains("        TypeAdapter::encode(&Self::DATE_ADAPTER, &self.ends, writer);\n"));
    assert!(event.contains("        writer.write_value(&self.attendees);\n"));
    assert!(event.contains("        writer.write_value(&self.extra);\n"));
    assert!(event.contains("            attendees: reader.read_value()?,\n"));
}

#[test]
fn test_standalone_copies() {
    let files = generate_files(
        r#"
        [generator]
        derives = ["Debug"]
        indent = 2

        [[types]]
        name = "notes.Memo"
        fields = [{ name = "text", type = "String" }, { name = "pinned", type = "bool" }]
        [types.mapper]
        prefix = ""
        target_name = "MemoCopy"
        "#,
    );

    let memo = get_file(&files, "notes/memo_copy.rs");
    assert!(memo.contains("/// Generated copy of `notes.Memo`.\n#[derive(Debug)]\npub struct MemoCopy {\n  pub text: String,\n"));
    assert!(memo.contains("  pub fn new(text: String, pinned: bool) -> Self {\n"));
    assert!(!memo.contains("map_from"));
    assert!(!memo.contains("use "));
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(generate_files(CITY), generate_files(CITY));
}
