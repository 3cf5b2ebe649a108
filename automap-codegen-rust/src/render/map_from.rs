//! The generated `map_from` constructor.
//!
//! Null handling per step: a missing nested value fails with
//! `MapError::NullNested`, a missing collection or map becomes empty, a
//! missing array stays `None`.

use automap_codegen::{
    builder::CodeFragment,
    generation::ImportCollector,
    language::TypeMapper,
    mapping::{FieldShape, FieldType, MapFromShape, MapStep},
};

use super::codec::struct_literal;
use crate::{
    ast::{Fn, Param},
    layout::ModuleLayout,
    type_mapper::{RUNTIME, RustTypeMapper},
};

pub(crate) fn map_from_fn(
    shape: &MapFromShape,
    fields: &[FieldShape],
    layout: &ModuleLayout,
    imports: &mut ImportCollector,
) -> Fn {
    imports.add(RUNTIME, "MapError");
    let mapper = RustTypeMapper::new(layout);

    let reads_source = fields
        .iter()
        .any(|f| !matches!(f.step, Some(MapStep::Default) | None));
    let values = fields
        .iter()
        .map(|field| {
            CodeFragment::line(format!(
                "{}: {},",
                field.name,
                map_expr(field, &mapper, imports)
            ))
        })
        .collect();

    let function = Fn::new("map_from")
        .doc(format!(
            "Map `{}` onto this type field by field.",
            shape.source.simple_name()
        ))
        .param(Param::new(
            if reads_source { "source" } else { "_source" },
            format!("&{}", layout.source_path(&shape.source)),
        ))
        .returns("Result<Self, MapError>");

    match &shape.hook {
        Some(base) => {
            imports.add(RUNTIME, "MapHook");
            function
                .body_fragment(struct_literal("let mut target = Self", values, ";"))
                .body_line(format!(
                    "<{} as MapHook<Self>>::after_map(&mut target);",
                    layout.source_path(base)
                ))
                .body_line("Ok(target)")
        }
        None => function.body_fragment(struct_literal("Ok(Self", values, ")")),
    }
}

fn map_expr(field: &FieldShape, mapper: &RustTypeMapper<'_>, imports: &mut ImportCollector) -> String {
    let source = format!("source.{}", field.name);
    let Some(step) = field.step else {
        return source;
    };
    let mut helper = |name: &str| imports.add(RUNTIME, name);

    match step {
        MapStep::Copy if is_copy(&field.ty) => source,
        MapStep::Copy => format!("{source}.clone()"),
        MapStep::Default => "Default::default()".to_string(),
        MapStep::Nested => {
            let target = mapper.map_type(&field.ty);
            if field.optional {
                helper("nested");
                format!(
                    "Some({target}::map_from(nested({source}.as_ref(), \"{}\")?)?)",
                    field.name
                )
            } else {
                format!("{target}::map_from(&{source})?")
            }
        }
        MapStep::Sequence => {
            let element = element_type(&field.ty, mapper);
            if field.optional {
                helper("map_each_or_empty");
                format!("Some(map_each_or_empty({source}.as_deref(), {element}::map_from)?)")
            } else {
                helper("map_each");
                format!("map_each(&{source}, {element}::map_from)?")
            }
        }
        MapStep::Array => {
            let element = element_type(&field.ty, mapper);
            if field.optional {
                helper("map_each_or_none");
                format!("map_each_or_none({source}.as_deref(), {element}::map_from)?")
            } else {
                helper("map_each");
                format!("map_each(&{source}, {element}::map_from)?")
            }
        }
        MapStep::Map => {
            let value = element_type(&field.ty, mapper);
            if field.optional {
                helper("map_values_or_empty");
                format!("Some(map_values_or_empty({source}.as_ref(), {value}::map_from)?)")
            } else {
                helper("map_values");
                format!("map_values(&{source}, {value}::map_from)?")
            }
        }
    }
}

/// The remapped element of a sequence or array, or value of a map.
fn element_type(ty: &FieldType, mapper: &RustTypeMapper<'_>) -> String {
    match ty {
        FieldType::Sequence { element, .. } | FieldType::Array { element } => {
            mapper.map_type(element)
        }
        FieldType::Map { value, .. } => mapper.map_type(value),
        other => mapper.map_type(other),
    }
}

fn is_copy(ty: &FieldType) -> bool {
    matches!(ty, FieldType::Scalar { .. } | FieldType::Boxed { .. })
}
