//! Manifest parsing from files and strings.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
    str::FromStr,
};

use miette::SourceSpan;

use super::{
    FieldDecl, Manifest, TypeDecl,
    validate::{ParseContext, quote_offset},
};
use crate::{Error, Result, TypeExpr, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "automap.toml")
    }
}

impl Manifest {
    /// Parse an automap.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse an automap.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    let generator = &manifest.generator;
    let generator_ctx = ctx.push("generator");
    generator_ctx.validate_rust_path(&generator.module_root, "module root")?;
    generator_ctx.validate_rust_path(&generator.source_root, "source root")?;
    if let Some(package_root) = &generator.package_root {
        generator_ctx.validate_dotted(package_root, "package root")?;
    }
    for derive in &generator.derives {
        generator_ctx.validate_rust_path(derive, "derive")?;
    }
    if generator.indent == 0 || generator.indent > 8 {
        return Err(ctx.source_context().validation_error(
            format!("indent must be between 1 and 8, found {}", generator.indent),
            ctx.src()
                .find("indent")
                .map(|pos| SourceSpan::from((pos, "indent".len()))),
        ));
    }

    let mut seen: HashMap<&str, Option<SourceSpan>> = HashMap::new();
    let mut cursor = 0;
    for ty in &manifest.types {
        let span = ctx.anchored(cursor).find_name_span(&ty.name);
        if let Some(span) = span {
            cursor = span.offset() + span.len();
        }
        let type_ctx = ctx.push(&ty.name).anchored(span.map_or(cursor, quote_offset));

        if let Some(first_span) = seen.insert(&ty.name, span) {
            return Err(Box::new(Error::DuplicateType {
                src: ctx.source_context().named_source(),
                first_span,
                second_span: span,
                name: ty.name.clone(),
            }));
        }

        validate_type(&type_ctx, ty)?;
    }
    Ok(())
}

fn validate_type(ctx: &ParseContext<'_>, ty: &TypeDecl) -> Result<()> {
    ctx.validate_dotted(&ty.name, "type")?;
    if let Some(superclass) = &ty.superclass {
        ctx.validate_dotted(superclass, "superclass")?;
    }
    if let Some(nested) = &ty.nested {
        ctx.validate_dotted(&nested.outer, "enclosing type")?;
    }
    if let Some(mapper) = &ty.mapper {
        if let Some(map_from) = &mapper.map_from {
            ctx.validate_dotted(map_from, "map_from type")?;
        }
        if let Some(target) = &mapper.target_name {
            ctx.validate_dotted(target, "target name")?;
        }
        if !mapper.prefix.is_empty() {
            ctx.validate_name(&mapper.prefix, "prefix")?;
        }
    }

    let mut names: HashSet<&str> = HashSet::new();
    for field in &ty.fields {
        let span = ctx.find_name_span(&field.name);
        let field_ctx = ctx.anchored(span.map_or(ctx.anchor(), quote_offset));
        if !names.insert(&field.name) {
            let second =
                span.and_then(|s| field_ctx.anchored(s.offset() + 1).find_name_span(&field.name));
            return Err(Box::new(Error::DuplicateField {
                src: ctx.source_context().named_source(),
                span: second.or(span),
                type_name: ty.name.clone(),
                field: field.name.clone(),
            }));
        }
        field_ctx.validate_name(&field.name, "field")?;
        validate_field(&field_ctx, field)?;
    }
    Ok(())
}

fn validate_field(ctx: &ParseContext<'_>, field: &FieldDecl) -> Result<()> {
    let expr = TypeExpr::parse(&field.ty).map_err(|e| {
        ctx.source_context().invalid_type_error(
            &field.ty,
            &field.name,
            e.to_string(),
            ctx.find_span(&field.ty),
        )
    })?;

    if field.nullable && expr.is_scalar() {
        return Err(ctx.source_context().validation_error(
            format!(
                "field '{}' has primitive type '{}' and cannot be nullable; use Boxed<{}>",
                field.name, field.ty, field.ty
            ),
            ctx.find_span(&field.ty),
        ));
    }

    if let Some(adapter) = &field.adapter {
        ctx.validate_rust_path(adapter, "adapter")?;
    }
    Ok(())
}
