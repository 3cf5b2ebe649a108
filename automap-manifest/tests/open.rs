use std::fs;

use automap_manifest::{AutomapToml, Error, TypeExpr};
use tempfile::TempDir;

const RESTAURANTS: &str = r#"
[generator]
module_root = "crate::generated"
source_root = "crate::model"
package_root = "com.example"

[[types]]
name = "com.example.api.Dish"
fields = [
  { name = "name", type = "String" },
  { name = "price", type = "Boxed<i32>", nullable = true },
]

[[types]]
name = "com.example.api.Restaurant"
fields = [
  { name = "name", type = "String" },
  { name = "dishes", type = "List<Dish>", nullable = true },
  { name = "tags", type = "Set<String>" },
  { name = "opened", type = "crate::time::Date", adapter = "crate::time::DateAdapter", since = 2 },
]

[[types]]
name = "com.example.model.RestaurantBase"
has_map_hook = true
fields = [{ name = "menu_size", type = "i32" }]

[types.mapper]
map_from = "com.example.api.Restaurant"
target_name = "Restaurant"
extend = true
"#;

#[test]
fn test_open_reads_and_parses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("automap.toml");
    fs::write(&path, RESTAURANTS).unwrap();

    let file = AutomapToml::open(&path).unwrap();
    assert_eq!(file.path(), path);
    assert_eq!(file.dir(), dir.path());
    assert_eq!(file.content(), RESTAURANTS);

    let manifest = file.manifest();
    assert_eq!(manifest.generator.source_root, "crate::model");
    assert_eq!(manifest.generator.package_root.as_deref(), Some("com.example"));
    assert_eq!(manifest.annotated().count(), 1);

    let restaurant = manifest.find_type("com.example.api.Restaurant").unwrap();
    let opened = &restaurant.fields[3];
    assert_eq!(opened.since, 2);
    assert_eq!(opened.adapter.as_deref(), Some("crate::time::DateAdapter"));
    assert_eq!(
        TypeExpr::parse(&restaurant.fields[1].ty).unwrap().to_string(),
        "List<Dish>"
    );
}

#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = AutomapToml::open(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn test_error_source_uses_file_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[types]]\nname = \"a.fn\"\n").unwrap();

    let err = AutomapToml::open(&path).unwrap_err();
    let Error::ReservedKeyword { src, span, .. } = *err else {
        panic!("expected a reserved keyword error");
    };
    assert!(miette::SourceCode::read_span(&src, &span.unwrap(), 0, 0).is_ok());
    assert_eq!(src.name(), path.display().to_string());
}

#[test]
fn test_manifest_serializes_to_json() {
    let manifest = automap_manifest::parse_str(RESTAURANTS).unwrap();
    let json = serde_json::to_value(&manifest).unwrap();
    assert_eq!(json["types"][2]["mapper"]["prefix"], "FD");
    assert_eq!(json["types"][0]["fields"][1]["type"], "Boxed<i32>");
}
