//! Integration tests that build and run generated code.
//!
//! Each test generates into `src/generated` of a scratch crate whose
//! `lib.rs` holds the hand-written source types, then runs cargo over it.
//! Scratch crates that carry a `#[cfg(test)]` module are run with
//! `cargo test`, so their round trips and byte layouts execute against the
//! real runtime.

use std::{fs, path::Path};

use automap_codegen::{
    pipeline::Pipeline,
    testing::{CompileChecker, RustChecker, RustTester, assert_generates_valid_code},
};
use automap_codegen_rust::{Generator, LanguageCodegen};

/// Generate from a manifest next to `lib_rs` and hand the crate to `checker`.
fn assert_generated_crate(manifest_toml: &str, lib_rs: &str, checker: &impl CompileChecker) {
    let manifest = automap_manifest::parse_str(manifest_toml).expect("Failed to parse manifest");
    let ctx = Pipeline::new().run(manifest).expect("pipeline should succeed");

    assert_generates_valid_code(
        |dir: &Path| {
            let runtime = Path::new(env!("CARGO_MANIFEST_DIR")).join("../automap-runtime");
            fs::write(
                dir.join("Cargo.toml"),
                format!(
                    "[package]\nname = \"scratch\"\nversion = \"0.1.0\"\nedition = \"2024\"\n\n\
                     [dependencies]\nautomap-runtime = {{ path = {:?} }}\n\n[workspace]\n",
                    runtime.display().to_string()
                ),
            )?;
            fs::create_dir_all(dir.join("src"))?;
            fs::write(dir.join("src/lib.rs"), lib_rs)?;
            Generator::from_context(&ctx).generate(&dir.join("src/generated"))?;
            Ok(())
        },
        checker,
    );
}

#[test]
#[ignore = "runs cargo test on a scratch crate"]
fn test_wire_encoded_city_round_trips() {
    assert_generated_crate(
        r#"
        [generator]
        package_root = "com.example"

        [[types]]
        name = "com.example.api.ApiCity"
        fields = [
            { name = "name", type = "String", nullable = true },
            { name = "id", type = "i32" },
            { name = "gps", type = "ApiGps" },
            { name = "visits", type = "u16" },
            { name = "tags", type = "List<String>" },
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
        "#,
        r#"
        pub mod api {
            pub struct ApiCity {
                pub name: Option<String>,
                pub id: i32,
                pub gps: ApiGps,
                pub visits: u16,
                pub tags: Vec<String>,
            }

            pub struct ApiGps {
                pub lat: f64,
                pub lng: f64,
            }
        }

        pub mod generated;

        #[cfg(test)]
        mod tests {
            use automap_runtime::{Parcel, WireError};

            use crate::{
                api::{ApiCity, ApiGps},
                generated::model::{City, FDApiGps},
            };

            fn lyon() -> ApiCity {
                ApiCity {
                    name: Some("Lyon".to_string()),
                    id: 69,
                    gps: ApiGps { lat: 45.76, lng: 4.83 },
                    visits: 40_000,
                    tags: vec!["food".to_string(), "silk".to_string()],
                }
            }

            #[test]
            fn city_survives_the_wire() {
                let city = City::map_from(&lyon()).unwrap();
                assert_eq!(city.gps, FDApiGps::new(45.76, 4.83));
                assert_eq!(City::from_bytes(&city.to_bytes()), Ok(city));
            }

            #[test]
            fn nameless_city_survives_the_wire() {
                let mut source = lyon();
                source.name = None;
                let city = City::map_from(&source).unwrap();
                assert_eq!(City::from_bytes(&city.to_bytes()), Ok(city));
            }

            #[test]
            fn trailing_bytes_are_rejected() {
                let mut bytes = City::map_from(&lyon()).unwrap().to_bytes();
                bytes.push(0);
                assert_eq!(City::from_bytes(&bytes), Err(WireError::TrailingBytes(1)));
            }
        }
        "#,
        &RustTester,
    );
}

#[test]
#[ignore = "runs cargo test on a scratch crate"]
fn test_kitchen_wire_layout() {
    assert_generated_crate(
        r#"
        [[types]]
        name = "api.Kitchen"
        fields = [
            { name = "name", type = "String" },
            { name = "id", type = "i32" },
            { name = "cuisine", type = "Enum<crate::api::Cuisine>" },
        ]

        [[types]]
        name = "api.Menu"
        fields = [
            { name = "courses", type = "List<Enum<crate::api::Cuisine>>" },
            { name = "kitchen", type = "Kitchen" },
        ]

        [[types]]
        name = "model.KitchenMapper"
        [types.mapper]
        map_from = "api.Kitchen"
        target_name = "Kitchen"
        wire_encoded = true

        [[types]]
        name = "model.MenuMapper"
        [types.mapper]
        map_from = "api.Menu"
        target_name = "Menu"
        wire_encoded = true
        "#,
        r#"
        pub mod api {
            use automap_runtime::WireEnum;

            #[derive(Debug, Clone, Copy, PartialEq)]
            pub enum Cuisine {
                Thai,
                Mexican,
            }

            impl WireEnum for Cuisine {
                fn name(&self) -> &'static str {
                    match self {
                        Cuisine::Thai => "THAI",
                        Cuisine::Mexican => "MEXICAN",
                    }
                }

                fn from_name(name: &str) -> Option<Self> {
                    match name {
                        "THAI" => Some(Cuisine::Thai),
                        "MEXICAN" => Some(Cuisine::Mexican),
                        _ => None,
                    }
                }
            }

            pub struct Kitchen {
                pub name: String,
                pub id: i32,
                pub cuisine: Cuisine,
            }

            pub struct Menu {
                pub courses: Vec<Cuisine>,
                pub kitchen: Kitchen,
            }
        }

        pub mod generated;

        #[cfg(test)]
        mod tests {
            use automap_runtime::{Parcel, WireError};

            use crate::{
                api::{self, Cuisine},
                generated::model::{Kitchen, Menu},
            };

            fn basil() -> api::Kitchen {
                api::Kitchen {
                    name: "Basil".to_string(),
                    id: 7,
                    cuisine: Cuisine::Thai,
                }
            }

            #[test]
            fn kitchen_fields_are_written_in_order() {
                let kitchen = Kitchen::map_from(&basil()).unwrap();

                let mut expected = Vec::new();
                expected.extend_from_slice(&5i32.to_le_bytes());
                expected.extend_from_slice(b"Basil");
                expected.extend_from_slice(&7i32.to_le_bytes());
                expected.extend_from_slice(&4i32.to_le_bytes());
                expected.extend_from_slice(b"THAI");

                assert_eq!(kitchen.to_bytes(), expected);
                assert_eq!(Kitchen::from_bytes(&expected), Ok(kitchen));
            }

            #[test]
            fn unknown_cuisine_is_rejected() {
                let mut bytes = Vec::new();
                bytes.extend_from_slice(&5i32.to_le_bytes());
                bytes.extend_from_slice(b"Basil");
                bytes.extend_from_slice(&7i32.to_le_bytes());
                bytes.extend_from_slice(&6i32.to_le_bytes());
                bytes.extend_from_slice(b"FUSION");

                assert_eq!(
                    Kitchen::from_bytes(&bytes),
                    Err(WireError::UnknownVariant { name: "FUSION".to_string() })
                );
            }

            #[test]
            fn menu_of_cuisines_survives_the_wire() {
                let menu = Menu::map_from(&api::Menu {
                    courses: vec![Cuisine::Mexican, Cuisine::Thai, Cuisine::Mexican],
                    kitchen: basil(),
                })
                .unwrap();
                assert_eq!(menu.courses.len(), 3);
                assert_eq!(Menu::from_bytes(&menu.to_bytes()), Ok(menu));
            }
        }
        "#,
        &RustTester,
    );
}

#[test]
#[ignore = "runs cargo test on a scratch crate"]
fn test_null_policy_of_map_from() {
    assert_generated_crate(
        r#"
        [[types]]
        name = "api.RestaurantSet"
        fields = [
            { name = "restaurants", type = "List<Restaurant>", nullable = true },
            { name = "featured", type = "[Restaurant]", nullable = true },
            { name = "flagship", type = "Restaurant", nullable = true },
            { name = "by_name", type = "Map<String, Restaurant>" },
        ]

        [[types]]
        name = "api.Restaurant"
        fields = [{ name = "name", type = "String" }]

        [[types]]
        name = "model.Directory"
        has_map_hook = true
        fields = [{ name = "total", type = "u32" }]
        [types.mapper]
        map_from = "api.RestaurantSet"
        extend = true
        "#,
        r#"
        pub mod api {
            pub struct RestaurantSet {
                pub restaurants: Option<Vec<Restaurant>>,
                pub featured: Option<Vec<Restaurant>>,
                pub flagship: Option<Restaurant>,
                pub by_name: std::collections::BTreeMap<String, Restaurant>,
            }

            pub struct Restaurant {
                pub name: String,
            }
        }

        pub mod model {
            use crate::generated::model::FDRestaurantSet;

            pub struct Directory;

            impl automap_runtime::MapHook<FDRestaurantSet> for Directory {
                fn after_map(target: &mut FDRestaurantSet) {
                    target.total = target.by_name.len() as u32;
                }
            }
        }

        pub mod generated;

        #[cfg(test)]
        mod tests {
            use std::collections::BTreeMap;

            use automap_runtime::MapError;

            use crate::{
                api::{Restaurant, RestaurantSet},
                generated::model::{FDRestaurant, FDRestaurantSet},
            };

            fn restaurant(name: &str) -> Restaurant {
                Restaurant { name: name.to_string() }
            }

            fn empty_set() -> RestaurantSet {
                RestaurantSet {
                    restaurants: None,
                    featured: None,
                    flagship: Some(restaurant("Basil")),
                    by_name: BTreeMap::new(),
                }
            }

            #[test]
            fn missing_sequence_becomes_empty_and_missing_array_stays_none() {
                let set = FDRestaurantSet::map_from(&empty_set()).unwrap();
                assert_eq!(set.restaurants, Some(Vec::new()));
                assert_eq!(set.featured, None);
                assert_eq!(set.total, 0);
            }

            #[test]
            fn missing_nested_value_is_an_error() {
                let mut source = empty_set();
                source.flagship = None;
                assert_eq!(
                    FDRestaurantSet::map_from(&source),
                    Err(MapError::NullNested { field: "flagship" })
                );
            }

            #[test]
            fn present_values_are_remapped_and_hook_runs_last() {
                let mut source = empty_set();
                source.featured = Some(vec![restaurant("Taco")]);
                source.by_name.insert("basil".to_string(), restaurant("Basil"));
                source.by_name.insert("taco".to_string(), restaurant("Taco"));

                let set = FDRestaurantSet::map_from(&source).unwrap();
                assert_eq!(
                    set.featured,
                    Some(vec![FDRestaurant::new("Taco".to_string())])
                );
                assert_eq!(set.flagship, Some(FDRestaurant::new("Basil".to_string())));
                assert_eq!(set.total, 2);
            }
        }
        "#,
        &RustTester,
    );
}

#[test]
#[ignore = "runs cargo check on a scratch crate"]
fn test_standalone_copies_compile() {
    assert_generated_crate(
        r#"
        [[types]]
        name = "notes.Memo"
        fields = [{ name = "text", type = "String" }, { name = "pinned", type = "bool" }]
        [types.mapper]
        prefix = ""
        target_name = "MemoCopy"
        "#,
        "pub mod generated;\n",
        &RustChecker,
    );
}
