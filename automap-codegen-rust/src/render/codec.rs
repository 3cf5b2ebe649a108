//! `Parcel` impl bodies from the codec directives of each field.

use automap_codegen::{
    builder::CodeFragment,
    dispatch::{Conversion, FieldCodec, Operand},
    generation::ImportCollector,
    mapping::FieldShape,
};

use crate::{
    ast::{Fn, Impl, Param},
    type_mapper::RUNTIME,
};

/// The `impl Parcel for Target` block.
pub(crate) fn parcel_impl(
    type_name: &str,
    fields: &[FieldShape],
    imports: &mut ImportCollector,
) -> Impl {
    for symbol in ["Parcel", "WireError", "WireReader", "WireWriter"] {
        imports.add(RUNTIME, symbol);
    }

    let mut encode = Fn::new("encode")
        .private()
        .param(Param::new("&self", ""))
        .param(Param::new(
            if fields.is_empty() { "_writer" } else { "writer" },
            "&mut WireWriter",
        ));
    let mut values = Vec::new();
    for field in fields {
        let Some(codec) = &field.codec else { continue };
        encode = encode.body_line(encode_stmt(&field.name, codec, imports));
        values.push(CodeFragment::line(format!(
            "{}: {},",
            field.name,
            decode_expr(&field.name, codec, imports)
        )));
    }

    let decode = Fn::new("decode")
        .private()
        .param(Param::new(
            if fields.is_empty() { "_reader" } else { "reader" },
            "&mut WireReader<'_>",
        ))
        .returns("Result<Self, WireError>")
        .body_fragment(struct_literal("Ok(Self", values, ")"));

    Impl::new(type_name)
        .for_trait("Parcel")
        .method(encode)
        .method(decode)
}

/// `Self { a: .., b: .. }` wrapped in `open`/`close`, on one line when empty.
pub(crate) fn struct_literal(open: &str, values: Vec<CodeFragment>, close: &str) -> CodeFragment {
    if values.is_empty() {
        CodeFragment::line(format!("{open} {{}}{close}"))
    } else {
        CodeFragment::block(format!("{open} {{"), values, Some(format!("}}{close}")))
    }
}

fn encode_stmt(name: &str, codec: &FieldCodec, imports: &mut ImportCollector) -> String {
    let value = format!("self.{name}");
    match codec {
        FieldCodec::Adapter { constant, .. } => {
            imports.add(RUNTIME, "TypeAdapter");
            format!("TypeAdapter::encode(&Self::{constant}, &{value}, writer);")
        }
        FieldCodec::Table { encode, .. } => {
            let arg = match (encode.primitive.operand(), encode.optional) {
                (Operand::Value, _) => widen(value, encode.conversion),
                (Operand::Str | Operand::Slice, true) => format!("{value}.as_deref()"),
                (Operand::Str, false) => format!("Some({value}.as_str())"),
                (Operand::Slice, false) => format!("Some({value}.as_slice())"),
                (Operand::Ref, true) => format!("{value}.as_ref()"),
                (Operand::Ref, false) => format!("Some(&{value})"),
                (Operand::Dynamic, _) => format!("&{value}"),
            };
            format!("writer.{}({arg});", encode.primitive.write_method())
        }
    }
}

fn decode_expr(name: &str, codec: &FieldCodec, imports: &mut ImportCollector) -> String {
    match codec {
        FieldCodec::Adapter { constant, .. } => {
            imports.add(RUNTIME, "TypeAdapter");
            format!("TypeAdapter::decode(&Self::{constant}, reader)?")
        }
        FieldCodec::Table { decode, .. } => {
            let read = narrow(
                format!("reader.{}()?", decode.primitive.read_method()),
                decode.conversion,
                imports,
            );
            if decode.required {
                imports.add(RUNTIME, "required");
                format!("required({read}, \"{name}\")?")
            } else {
                read
            }
        }
    }
}

fn widen(value: String, conversion: Conversion) -> String {
    match conversion {
        Conversion::None => value,
        Conversion::Widen { to, .. } => format!("{}::from({value})", to.keyword()),
        Conversion::Bitcast { to, .. } => format!("{value} as {}", to.keyword()),
    }
}

/// Widened values are range-checked on the way back; bitcasts are not.
fn narrow(read: String, conversion: Conversion, imports: &mut ImportCollector) -> String {
    match conversion {
        Conversion::None => read,
        Conversion::Widen { from, .. } => {
            imports.add(RUNTIME, "narrow");
            format!("narrow::<{}>({read})?", from.keyword())
        }
        Conversion::Bitcast { from, .. } => format!("{read} as {}", from.keyword()),
    }
}

#[cfg(test)]
mod tests {
    use automap_codegen::{
        builder::CodeBuilder,
        dispatch::{decode_directive, encode_directive},
    };
    use automap_ir::{CollectionKind, ScalarKind, SemanticType};

    use super::*;

    fn table(ty: &SemanticType, nullable: bool) -> FieldCodec {
        FieldCodec::Table {
            encode: encode_directive(ty, nullable).unwrap(),
            decode: decode_directive(ty, nullable).unwrap(),
        }
    }

    fn encode(ty: &SemanticType, nullable: bool) -> String {
        encode_stmt("x", &table(ty, nullable), &mut ImportCollector::new())
    }

    fn decode(ty: &SemanticType, nullable: bool) -> String {
        decode_expr("x", &table(ty, nullable), &mut ImportCollector::new())
    }

    #[test]
    fn test_scalar_conversions() {
        let byte = SemanticType::scalar(ScalarKind::U8);
        assert_eq!(encode(&byte, false), "writer.write_int(i32::from(self.x));");
        assert_eq!(decode(&byte, false), "narrow::<u8>(reader.read_int()?)?");

        let unsigned = SemanticType::scalar(ScalarKind::U64);
        assert_eq!(encode(&unsigned, false), "writer.write_long(self.x as i64);");
        assert_eq!(decode(&unsigned, false), "reader.read_long()? as u64");

        let mut imports = ImportCollector::new();
        decode_expr("x", &table(&SemanticType::scalar(ScalarKind::U32), false), &mut imports);
        assert!(imports.has_symbol("automap_runtime", "narrow"));

        let float = SemanticType::scalar(ScalarKind::F32);
        assert_eq!(encode(&float, false), "writer.write_float(self.x);");
        assert_eq!(decode(&float, false), "reader.read_float()?");
    }

    #[test]
    fn test_nullability_of_references() {
        assert_eq!(
            encode(&SemanticType::Text, true),
            "writer.write_string(self.x.as_deref());"
        );
        assert_eq!(decode(&SemanticType::Text, true), "reader.read_string()?");
        assert_eq!(
            encode(&SemanticType::Text, false),
            "writer.write_string(Some(self.x.as_str()));"
        );
        assert_eq!(
            decode(&SemanticType::Text, false),
            "required(reader.read_string()?, \"x\")?"
        );

        let ints = SemanticType::array(SemanticType::scalar(ScalarKind::I32));
        assert_eq!(
            encode(&ints, false),
            "writer.write_int_array(Some(self.x.as_slice()));"
        );
        let enumeration = SemanticType::Enum {
            path: "crate::Cuisine".to_string(),
        };
        assert_eq!(encode(&enumeration, false), "writer.write_enum(Some(&self.x));");
        assert_eq!(encode(&enumeration, true), "writer.write_enum(self.x.as_ref());");

        let menu = SemanticType::collection(CollectionKind::List, enumeration);
        assert_eq!(
            encode(&menu, false),
            "writer.write_enum_list(Some(self.x.as_slice()));"
        );
        assert_eq!(encode(&menu, true), "writer.write_enum_list(self.x.as_deref());");
        assert_eq!(
            decode(&menu, false),
            "required(reader.read_enum_list()?, \"x\")?"
        );
    }

    #[test]
    fn test_value_fallback() {
        let boxed = SemanticType::Boxed {
            scalar: ScalarKind::I64,
        };
        assert_eq!(encode(&boxed, true), "writer.write_value(&self.x);");
        assert_eq!(decode(&boxed, true), "reader.read_value()?");
    }

    #[test]
    fn test_adapter_codec() {
        let codec = FieldCodec::Adapter {
            constant: "DATE_ADAPTER".to_string(),
            path: "crate::time::DateAdapter".to_string(),
        };
        let mut imports = ImportCollector::new();
        assert_eq!(
            encode_stmt("opened", &codec, &mut imports),
            "TypeAdapter::encode(&Self::DATE_ADAPTER, &self.opened, writer);"
        );
        assert_eq!(
            decode_expr("opened", &codec, &mut imports),
            "TypeAdapter::decode(&Self::DATE_ADAPTER, reader)?"
        );
        assert!(imports.has_symbol("automap_runtime", "TypeAdapter"));
    }

    #[test]
    fn test_struct_literal() {
        let mut builder = CodeBuilder::rust();
        builder.apply_fragment(struct_literal("Ok(Self", Vec::new(), ")"));
        builder.apply_fragment(struct_literal(
            "Ok(Self",
            vec![CodeFragment::line("id: 1,")],
            ")",
        ));
        assert_eq!(builder.build(), "Ok(Self {})\nOk(Self {\n    id: 1,\n})\n");
    }
}
