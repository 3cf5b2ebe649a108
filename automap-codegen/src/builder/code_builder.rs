//! Indenting text sink for [`CodeFragment`]s.

use super::{CodeFragment, Indent, Renderable};

/// Turns fragments into text, indenting every block body one level.
///
/// ```
/// use automap_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::rust();
/// builder.emit(&CodeFragment::braced(
///     "fn main() {",
///     vec![CodeFragment::line("println!(\"Hello, world!\");")],
/// ));
///
/// assert_eq!(builder.build(), "fn main() {\n    println!(\"Hello, world!\");\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// 4-space indentation.
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Emit a [`Renderable`] node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => self.push_line(&s),
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.indent_level += 1;
                for f in body {
                    self.apply_fragment(f);
                }
                self.indent_level = self.indent_level.saturating_sub(1);
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Doc(text) => {
                for line in text.lines() {
                    if line.is_empty() {
                        self.push_line("///");
                    } else {
                        self.push_line(&format!("/// {line}"));
                    }
                }
            }
        }
    }

    pub fn build(self) -> String {
        self.buffer
    }

    /// Empty lines carry no indentation.
    fn push_line(&mut self, s: &str) {
        if !s.is_empty() {
            for _ in 0..self.indent_level {
                self.buffer.push_str(self.indent.as_str());
            }
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
    }
}
