//! Rendering of one synthesized [`TypeShape`] as a Rust source file.
//!
//! A generated file holds, in order: the struct, an inherent impl with the
//! wire constants, `new` and `map_from`, then the `Parcel` impl when the
//! type is wire-encoded.

mod codec;
mod map_from;

use automap_codegen::{
    builder::{CodeFragment, Indent},
    dispatch::WIRE_VERSION,
    generation::ImportCollector,
    mapping::TypeShape,
};

use crate::{
    RustFile,
    ast::{Const, Field, Fn, Impl, Param, Struct},
    layout::ModuleLayout,
    type_mapper::RustTypeMapper,
};

/// Parameters above this count trip `clippy::too_many_arguments`.
const MAX_PARAMS: usize = 7;

/// Renders the file of one generated type.
pub struct TypeRenderer<'a> {
    shape: &'a TypeShape,
    layout: &'a ModuleLayout,
    derives: &'a [String],
}

impl<'a> TypeRenderer<'a> {
    pub fn new(shape: &'a TypeShape, layout: &'a ModuleLayout, derives: &'a [String]) -> Self {
        Self {
            shape,
            layout,
            derives,
        }
    }

    pub fn render(&self, indent: Indent) -> String {
        self.file().render_with_indent(indent)
    }

    fn file(&self) -> RustFile {
        let mut imports = ImportCollector::new();
        let mapper = RustTypeMapper::new(self.layout);
        for field in &self.shape.fields {
            mapper.collect_imports(&field.ty, &mut imports);
        }

        let name = self.shape.target.simple_name();
        let declaration = self.struct_decl(&mapper);
        let inherent = self.inherent_impl(&mapper, &mut imports);
        let parcel = self
            .shape
            .wire
            .as_ref()
            .map(|_| codec::parcel_impl(name, &self.shape.fields, &mut imports));

        let mut file = RustFile::new()
            .imports(&imports)
            .add(declaration)
            .add(inherent);
        if let Some(parcel) = parcel {
            file = file.add(parcel);
        }
        file
    }

    fn struct_decl(&self, mapper: &RustTypeMapper<'_>) -> Struct {
        let shape = self.shape;
        let doc = match (&shape.map_from, &shape.base) {
            (Some(_), Some(base)) => format!(
                "Mapped from `{}`, extending `{}`.",
                shape.source,
                base.simple_name()
            ),
            (Some(_), None) => format!("Mapped from `{}`.", shape.source),
            (None, _) => format!("Generated copy of `{}`.", shape.source),
        };

        shape.fields.iter().fold(
            Struct::new(shape.target.simple_name())
                .doc(doc)
                .derives(self.derives.iter().cloned()),
            |decl, field| {
                let mut member = Field::new(&field.name, mapper.field_type(field));
                if field.since > 0 {
                    member = member.doc(format!("Since wire version {}.", field.since));
                }
                decl.field(member)
            },
        )
    }

    fn inherent_impl(&self, mapper: &RustTypeMapper<'_>, imports: &mut ImportCollector) -> Impl {
        let shape = self.shape;
        let mut block = Impl::new(shape.target.simple_name());

        if let Some(wire) = &shape.wire {
            block = block.constant(
                Const::new(WIRE_VERSION, "u32", wire.version.to_string())
                    .doc("Version of the wire layout. Not written to the wire."),
            );
            for adapter in &wire.adapters {
                block = block.constant(Const::new(&adapter.constant, &adapter.path, &adapter.path));
            }
        }

        block = block.method(self.constructor(mapper));
        if let Some(map_from) = &shape.map_from {
            block = block.method(map_from::map_from_fn(
                map_from,
                &shape.fields,
                self.layout,
                imports,
            ));
        }
        block
    }

    fn constructor(&self, mapper: &RustTypeMapper<'_>) -> Fn {
        let fields = &self.shape.fields;
        let mut function = Fn::new("new").returns("Self");
        if fields.len() > MAX_PARAMS {
            function = function.attr("allow(clippy::too_many_arguments)");
        }
        for field in fields {
            function = function.param(Param::new(&field.name, mapper.field_type(field)));
        }

        let values = fields
            .iter()
            .map(|f| CodeFragment::line(format!("{},", f.name)))
            .collect();
        function.body_fragment(codec::struct_literal("Self", values, ""))
    }
}
