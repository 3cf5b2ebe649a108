//! Field type expressions such as `List<com.example.Dish>` or `[u8]`.

use std::fmt;

use thiserror::Error;

/// Scalar keywords accepted as field types and inside `Boxed<T>`.
pub const SCALAR_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "bool", "char", "f32", "f64",
];

/// A parsed field type, before names are resolved against declared types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A scalar keyword, a builtin name, a declared type or a Rust path.
    Named(String),
    /// `Name<A, B, ...>`
    Generic { name: String, args: Vec<TypeExpr> },
    /// `[T]`
    Array(Box<TypeExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeExprError {
    #[error("type is empty")]
    Empty,
    #[error("unexpected '{found}' at offset {pos}")]
    Unexpected { found: char, pos: usize },
    #[error("unexpected end of type")]
    UnexpectedEnd,
    #[error("'{name}' takes {expected} type argument(s), found {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("'{name}' does not take type arguments")]
    NotGeneric { name: String },
    #[error("Boxed<T> requires a scalar, found '{found}'")]
    BoxedNonScalar { found: String },
    #[error("Enum<T> requires a path, found '{found}'")]
    EnumNonPath { found: String },
}

impl TypeExpr {
    pub fn parse(input: &str) -> Result<Self, TypeExprError> {
        if input.trim().is_empty() {
            return Err(TypeExprError::Empty);
        }
        let mut parser = Parser { src: input, pos: 0 };
        let expr = parser.expr()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(expr),
            Some(found) => Err(TypeExprError::Unexpected {
                found,
                pos: parser.pos,
            }),
        }
    }

    /// Whether this is a bare scalar keyword such as `i32`.
    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeExpr::Named(name) if SCALAR_TYPES.contains(&name.as_str()))
    }

    fn check_shape(name: &str, args: &[TypeExpr]) -> Result<(), TypeExprError> {
        let expected = match name {
            "Map" => 2,
            _ if SCALAR_TYPES.contains(&name) => {
                return Err(TypeExprError::NotGeneric {
                    name: name.to_string(),
                });
            }
            _ => 1,
        };
        if args.len() != expected {
            return Err(TypeExprError::Arity {
                name: name.to_string(),
                expected,
                found: args.len(),
            });
        }
        match (name, &args[0]) {
            ("Boxed", arg) if !arg.is_scalar() => Err(TypeExprError::BoxedNonScalar {
                found: arg.to_string(),
            }),
            ("Enum", TypeExpr::Named(_)) => Ok(()),
            ("Enum", arg) => Err(TypeExprError::EnumNonPath {
                found: arg.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Generic { name, args } => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeExpr::Array(element) => write!(f, "[{element}]"),
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn expr(&mut self) -> Result<TypeExpr, TypeExprError> {
        self.skip_ws();
        if self.eat('[') {
            let element = self.expr()?;
            self.expect(']')?;
            return Ok(TypeExpr::Array(Box::new(element)));
        }

        let name = self.path()?;
        self.skip_ws();
        if !self.eat('<') {
            return Ok(TypeExpr::Named(name));
        }

        let mut args = vec![self.expr()?];
        loop {
            self.skip_ws();
            if self.eat(',') {
                args.push(self.expr()?);
            } else {
                self.expect('>')?;
                break;
            }
        }
        TypeExpr::check_shape(&name, &args)?;
        Ok(TypeExpr::Generic { name, args })
    }

    /// A dotted or `::`-separated name.
    fn path(&mut self) -> Result<String, TypeExprError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            Some(found) => {
                return Err(TypeExprError::Unexpected {
                    found,
                    pos: self.pos,
                });
            }
            None => return Err(TypeExprError::UnexpectedEnd),
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                self.pos += 1;
            } else if c == ':' && self.src[self.pos..].starts_with("::") {
                self.pos += 2;
            } else if c == ':' {
                return Err(TypeExprError::Unexpected { found: c, pos: self.pos });
            } else {
                break;
            }
        }
        let path = &self.src[start..self.pos];
        if path.ends_with(['.', ':']) || path.contains("..") {
            return Err(TypeExprError::UnexpectedEnd);
        }
        Ok(path.to_string())
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeExprError> {
        self.skip_ws();
        if self.eat(expected) {
            return Ok(());
        }
        match self.peek() {
            Some(found) => Err(TypeExprError::Unexpected {
                found,
                pos: self.pos,
            }),
            None => Err(TypeExprError::UnexpectedEnd),
        }
    }
}
