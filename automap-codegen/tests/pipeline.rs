//! End-to-end runs of the generation pipeline.

use automap_codegen::{
    dispatch::{FieldCodec, WirePrimitive},
    mapping::{FieldType, MapStep},
    pipeline::{CompilationContext, Pipeline},
};

fn run(src: &str) -> CompilationContext {
    let manifest = automap_manifest::parse_str(src).expect("Failed to parse test manifest");
    Pipeline::new().run(manifest).expect("pipeline should succeed")
}

fn run_err(src: &str) -> String {
    let manifest = automap_manifest::parse_str(src).expect("Failed to parse test manifest");
    match Pipeline::new().run(manifest) {
        Ok(_) => panic!("pipeline should fail"),
        Err(err) => err.to_string(),
    }
}

fn plan_names(ctx: &CompilationContext) -> Vec<String> {
    let registry = ctx.registry.as_ref().unwrap();
    ctx.plan
        .as_ref()
        .unwrap()
        .iter()
        .map(|id| registry.get(id).name.to_string())
        .collect()
}

fn targets(ctx: &CompilationContext) -> Vec<&str> {
    ctx.shapes.iter().map(|s| s.target.as_str()).collect()
}

#[test]
fn city_is_generated_after_gps() {
    let ctx = run(r#"
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
    "#);

    assert_eq!(
        plan_names(&ctx),
        ["com.example.api.ApiGps", "com.example.api.ApiCity"]
    );
    assert_eq!(
        targets(&ctx),
        ["com.example.model.FDApiGps", "com.example.model.City"]
    );

    let city = &ctx.shapes[1];
    let gps = city.field("gps").unwrap();
    assert_eq!(gps.step, Some(MapStep::Nested));
    assert!(matches!(&gps.ty, FieldType::Mapped { target } if target.as_str() == "com.example.model.FDApiGps"));
    assert_eq!(city.field("id").unwrap().step, Some(MapStep::Copy));
    assert!(ctx.diagnostics.is_empty());
}

#[test]
fn source_target_name_lands_in_mapper_package() {
    let ctx = run(r#"
        [[types]]
        name = "m.ApiRestaurant"
        fields = [{ name = "city", type = "m.location.ApiCity" }]

        [[types]]
        name = "m.location.ApiCity"
        fields = [{ name = "name", type = "String" }]
        [types.mapper]
        target_name = "City"

        [[types]]
        name = "m.RestaurantMapper"
        [types.mapper]
        map_from = "m.ApiRestaurant"
        target_name = "Restaurant"
    "#);

    assert_eq!(targets(&ctx), ["m.City", "m.Restaurant"]);
}

#[test]
fn restaurant_set_remaps_only_mapped_elements() {
    let ctx = run(r#"
        [[types]]
        name = "api.RestaurantSet"
        fields = [
            { name = "restaurants", type = "List<Restaurant>" },
            { name = "tags", type = "List<String>" },
        ]

        [[types]]
        name = "api.Restaurant"
        fields = [{ name = "name", type = "String" }]

        [[types]]
        name = "model.Mapper"
        [types.mapper]
        map_from = "api.RestaurantSet"
    "#);

    let set = ctx.shapes.last().unwrap();
    assert_eq!(set.target.as_str(), "model.FDRestaurantSet");
    assert_eq!(set.field("restaurants").unwrap().step, Some(MapStep::Sequence));
    assert_eq!(set.field("tags").unwrap().step, Some(MapStep::Copy));
}

#[test]
fn unsupported_collection_names_the_kind() {
    let message = run_err(r#"
        [[types]]
        name = "api.Kitchen"
        fields = [{ name = "orders", type = "Queue<String>" }]

        [[types]]
        name = "model.Mapper"
        [types.mapper]
        map_from = "api.Kitchen"
    "#);

    assert!(message.starts_with("coverage error(s):"), "{message}");
    assert!(message.contains("unsupported collection kind 'Queue'"), "{message}");
}

#[test]
fn wire_fields_follow_declaration_order() {
    let ctx = run(r#"
        [[types]]
        name = "api.Dish"
        fields = [
            { name = "name", type = "String" },
            { name = "calories", type = "i32" },
            { name = "course", type = "Enum<crate::api::Course>" },
            { name = "pairings", type = "List<Enum<crate::api::Course>>" },
        ]

        [[types]]
        name = "model.Mapper"
        [types.mapper]
        map_from = "api.Dish"
        wire_encoded = true
    "#);

    let dish = &ctx.shapes[0];
    let primitives: Vec<_> = dish
        .fields
        .iter()
        .map(|f| match &f.codec {
            Some(FieldCodec::Table { encode, decode }) => {
                assert_eq!(encode.primitive, decode.primitive);
                encode.primitive
            }
            other => panic!("unexpected codec {other:?}"),
        })
        .collect();
    assert_eq!(
        primitives,
        [
            WirePrimitive::String,
            WirePrimitive::Int,
            WirePrimitive::Enum,
            WirePrimitive::EnumList
        ]
    );
    assert_eq!(dish.wire.as_ref().unwrap().version, 0);
}

#[test]
fn wire_encoding_spreads_to_dependencies() {
    let ctx = run(r#"
        [[types]]
        name = "api.City"
        fields = [{ name = "gps", type = "Gps" }]

        [[types]]
        name = "api.Gps"
        fields = [{ name = "lat", type = "f64" }]

        [[types]]
        name = "api.Other"
        fields = [{ name = "id", type = "i32" }]

        [[types]]
        name = "model.CityMapper"
        [types.mapper]
        map_from = "api.City"
        wire_encoded = true

        [[types]]
        name = "model.OtherMapper"
        [types.mapper]
        map_from = "api.Other"
    "#);

    let wire: Vec<_> = ctx
        .shapes
        .iter()
        .map(|s| (s.target.as_str(), s.wire.is_some()))
        .collect();
    assert_eq!(
        wire,
        [
            ("model.FDGps", true),
            ("model.FDCity", true),
            ("model.FDOther", false),
        ]
    );
}

#[test]
fn runs_are_deterministic() {
    let src = r#"
        [[types]]
        name = "api.Menu"
        fields = [
            { name = "dishes", type = "List<Dish>" },
            { name = "chef", type = "Person" },
            { name = "address", type = "Address" },
        ]

        [[types]]
        name = "api.Dish"
        fields = [{ name = "name", type = "String" }, { name = "by", type = "Person" }]

        [[types]]
        name = "api.Person"
        fields = [{ name = "address", type = "Address" }]

        [[types]]
        name = "api.Address"
        fields = [{ name = "street", type = "String" }]

        [[types]]
        name = "model.Mapper"
        [types.mapper]
        map_from = "api.Menu"
        wire_encoded = true
    "#;

    let first = run(src);
    let second = run(src);

    assert_eq!(plan_names(&first), plan_names(&second));
    assert_eq!(first.shapes, second.shapes);
    assert_eq!(
        plan_names(&first),
        ["api.Address", "api.Person", "api.Dish", "api.Menu"]
    );
}

#[test]
fn extended_base_with_hook() {
    let ctx = run(r#"
        [[types]]
        name = "api.Restaurant"
        fields = [{ name = "name", type = "String" }]

        [[types]]
        name = "model.RestaurantBase"
        has_map_hook = true
        fields = [{ name = "display_name", type = "String" }]
        [types.mapper]
        map_from = "api.Restaurant"
        target_name = "Restaurant"
        extend = true
    "#);

    let restaurant = &ctx.shapes[0];
    let names: Vec<_> = restaurant.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["display_name", "name"]);
    assert_eq!(
        restaurant.field("display_name").unwrap().step,
        Some(MapStep::Default)
    );
    let map_from = restaurant.map_from.as_ref().unwrap();
    assert_eq!(
        map_from.hook.as_ref().map(|h| h.as_str()),
        Some("model.RestaurantBase")
    );
}

#[test]
fn rejected_types_take_their_dependents_along() {
    let ctx = run(r#"
        [[types]]
        name = "api.City"
        fields = [{ name = "gps", type = "Gps" }]

        [[types]]
        name = "api.Gps"
        nested = { outer = "Geo", static = false }
        fields = [{ name = "lat", type = "f64" }]

        [[types]]
        name = "api.Tag"
        fields = [{ name = "label", type = "String" }]

        [[types]]
        name = "model.CityMapper"
        [types.mapper]
        map_from = "api.City"

        [[types]]
        name = "model.TagMapper"
        [types.mapper]
        map_from = "api.Tag"
    "#);

    assert_eq!(targets(&ctx), ["model.FDTag"]);
    assert_eq!(ctx.error_count(), 1);
    assert_eq!(ctx.warning_count(), 1);
    assert_eq!(ctx.rejected.len(), 2);
}

#[test]
fn cycles_are_reported() {
    let message = run_err(r#"
        [[types]]
        name = "api.Person"
        fields = [{ name = "friends", type = "List<Person>" }]

        [[types]]
        name = "model.Mapper"
        [types.mapper]
        map_from = "api.Person"
    "#);

    assert_eq!(message, "dependency cycle:\n  - api.Person -> api.Person");
}

#[test]
fn standalone_types_generate_copies() {
    let ctx = run(r#"
        [[types]]
        name = "model.Address"
        nested = { outer = "Person" }
        fields = [{ name = "street", type = "String" }]
        [types.mapper]
        wire_encoded = true

        [[types]]
        name = "model.Note"
        fields = [{ name = "text", type = "String" }]
        [types.mapper]
        target_name = "Memo"
    "#);

    assert_eq!(targets(&ctx), ["model.PersonFDAddress", "model.Memo"]);
    assert!(ctx.shapes.iter().all(|s| s.map_from.is_none()));
    assert!(ctx.shapes[0].wire.is_some());
    assert!(ctx.shapes[1].wire.is_none());
}
