//! Structured Rust file generation: imports, then body items.

use automap_codegen::{
    builder::{CodeBuilder, CodeFragment, Indent, Renderable},
    generation::ImportCollector,
};

/// A Rust use statement.
#[derive(Debug, Clone)]
pub struct Use {
    module: String,
    symbols: Vec<String>,
}

impl Use {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbols: Vec::new(),
        }
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    pub fn symbols(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    fn format(&self) -> String {
        match self.symbols.as_slice() {
            [] => format!("use {};", self.module),
            [symbol] => format!("use {}::{};", self.module, symbol),
            symbols => format!("use {}::{{{}}};", self.module, symbols.join(", ")),
        }
    }
}

impl Renderable for Use {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.format())]
    }
}

/// Literal lines of code.
#[derive(Debug, Clone)]
pub struct RawCode {
    lines: Vec<String>,
}

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            lines: code.into().lines().map(String::from).collect(),
        }
    }

    pub fn lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.lines.iter().map(CodeFragment::line).collect()
    }
}

/// A Rust source file: use statements, a blank line, then body items
/// separated by blank lines.
///
/// # Example
///
/// ```
/// use automap_codegen_rust::{RawCode, RustFile, Use};
///
/// let file = RustFile::new()
///     .use_stmt(Use::new("automap_runtime").symbol("Parcel"))
///     .add(RawCode::new("pub struct City {}"))
///     .render();
///
/// assert_eq!(file, "use automap_runtime::Parcel;\n\npub struct City {}\n");
/// ```
#[derive(Debug, Default)]
pub struct RustFile {
    uses: Vec<Use>,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_stmt(mut self, use_stmt: Use) -> Self {
        self.uses.push(use_stmt);
        self
    }

    /// One use statement per module of `imports`, in insertion order.
    pub fn imports(mut self, imports: &ImportCollector) -> Self {
        for (module, symbols) in imports.iter() {
            self.uses.push(Use::new(module).symbols(symbols.iter().cloned()));
        }
        self
    }

    /// Add a body element.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        let fragments = node.to_fragments();
        if !fragments.is_empty() {
            self.body.push(fragments);
        }
        self
    }

    pub fn render(&self) -> String {
        self.render_with_indent(Indent::RUST)
    }

    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);

        for use_stmt in &self.uses {
            builder.emit(use_stmt);
        }
        if !self.uses.is_empty() && !self.body.is_empty() {
            builder.push_blank();
        }
        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty() && self.body.is_empty()
    }
}
