//! Rust impl block builder.

use automap_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::Fn;

/// An associated constant.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    ty: String,
    value: String,
    doc: Option<String>,
}

impl Const {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            value: value.into(),
            doc: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc.clone()));
        }
        fragments.push(CodeFragment::line(format!(
            "pub const {}: {} = {};",
            self.name, self.ty, self.value
        )));
        fragments
    }
}

/// Builder for Rust impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    trait_name: Option<String>,
    consts: Vec<Const>,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            trait_name: None,
            consts: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Create an impl block for a trait.
    pub fn for_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.trait_name = Some(trait_name.into());
        self
    }

    pub fn constant(mut self, constant: Const) -> Self {
        self.consts.push(constant);
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.consts.is_empty() && self.methods.is_empty()
    }

    /// Build the impl block as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }

    fn format_header(&self) -> String {
        match &self.trait_name {
            Some(trait_name) => format!("impl {} for {} {{", trait_name, self.type_name),
            None => format!("impl {} {{", self.type_name),
        }
    }

    /// Constants first, then methods, one blank line between items.
    fn body_fragments(&self) -> Vec<CodeFragment> {
        let items = self
            .consts
            .iter()
            .map(Renderable::to_fragments)
            .chain(self.methods.iter().map(Renderable::to_fragments));

        let mut fragments = Vec::new();
        for (i, item) in items.enumerate() {
            if i > 0 {
                fragments.push(CodeFragment::Blank);
            }
            fragments.extend(item);
        }
        fragments
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(
            self.format_header(),
            self.body_fragments(),
        )]
    }
}
