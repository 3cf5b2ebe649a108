//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Besides the source, the context remembers the path through the
/// manifest (for messages) and an anchor offset: spans are searched from
/// the anchor onward, so a field name is located inside its own
/// `[[types]]` entry rather than at its first occurrence in the file.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
    anchor: usize,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
            anchor: 0,
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
            anchor: self.anchor,
        }
    }

    /// Return a context that searches spans from `offset` onward.
    pub fn anchored(&self, offset: usize) -> Self {
        Self {
            source: Arc::clone(&self.source),
            path: self.path.clone(),
            anchor: offset,
        }
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "field in 'com.example.City'" or just "type" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find a quoted string value at or after the anchor.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), value, self.anchor)
    }

    /// Find a `name = "value"` entry at or after the anchor.
    pub fn find_name_span(&self, value: &str) -> Option<SourceSpan> {
        find_declaration_span(self.source.src(), value, self.anchor)
    }

    /// Validate that a name is a valid Rust identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        self.validate_name_at(name, kind, self.find_name_span(name).or(self.find_span(name)))
    }

    /// Validate every segment of a dotted name such as `com.example.City`.
    pub fn validate_dotted(&self, name: &str, kind: &str) -> Result<()> {
        let span = self.find_span(name);
        for segment in name.split('.') {
            self.validate_name_at(segment, kind, span)?;
        }
        Ok(())
    }

    /// Validate a Rust path such as `crate::time::DateAdapter`.
    pub fn validate_rust_path(&self, path: &str, kind: &str) -> Result<()> {
        let span = self.find_span(path);
        for (i, segment) in path.split("::").enumerate() {
            if i == 0 && PATH_ROOTS.contains(&segment) {
                continue;
            }
            self.validate_name_at(segment, kind, span)?;
        }
        Ok(())
    }

    fn validate_name_at(&self, name: &str, kind: &str, span: Option<SourceSpan>) -> Result<()> {
        if is_rust_keyword(name) {
            return Err(self
                .source
                .reserved_keyword_error(name, self.context_for(kind), span));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                span,
            ));
        }

        Ok(())
    }
}

/// Keywords allowed as the first segment of a Rust path.
const PATH_ROOTS: &[&str] = &["crate", "self", "super"];

/// Rust reserved keywords that cannot be used as identifiers
/// Source: https://doc.rust-lang.org/reference/keywords.html
pub(crate) const RUST_KEYWORDS: &[&str] = &[
    // Strict keywords
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
    // Reserved keywords
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
    // Weak keywords
    "union",
];

/// Check if a name is a Rust reserved keyword
pub(crate) fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Offset of the opening quote before a value span, so that a context
/// anchored there still finds the quoted value itself.
pub(crate) fn quote_offset(span: SourceSpan) -> usize {
    span.offset().saturating_sub(1)
}

/// Find the span of a quoted value in the TOML source, starting at `from`.
pub(crate) fn find_value_span(src: &str, value: &str, from: usize) -> Option<SourceSpan> {
    let rest = src.get(from..)?;
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = rest.find(&pattern) {
            // +1 to skip the opening quote
            return Some(SourceSpan::from((from + pos + 1, value.len())));
        }
    }
    None
}

/// Find the span of a `name = "value"` entry, starting at `from`.
pub(crate) fn find_declaration_span(src: &str, value: &str, from: usize) -> Option<SourceSpan> {
    let rest = src.get(from..)?;
    let patterns = [
        format!("name = \"{value}\""),
        format!("name=\"{value}\""),
        format!("name = '{value}'"),
        format!("name='{value}'"),
    ];
    patterns.iter().find_map(|pattern| {
        rest.find(pattern.as_str()).map(|pos| {
            let value_start = pattern.len() - value.len() - 1;
            SourceSpan::from((from + pos + value_start, value.len()))
        })
    })
}

/// Validate that a name is a valid Rust identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }

    if is_rust_keyword(name) {
        return Some("name is a Rust reserved keyword");
    }

    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if name == "_" {
        return Some("name cannot be a lone underscore");
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}
