use std::string::FromUtf8Error;

use thiserror::Error;

/// Failure while decoding wire data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("unexpected end of input: needed {needed} byte(s), {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("invalid length prefix {0}")]
    InvalidLength(i32),

    #[error("invalid presence flag {0}")]
    InvalidPresence(i32),

    #[error("invalid UTF-8 in string")]
    Utf8(#[from] FromUtf8Error),

    #[error("invalid char code point {0:#x}")]
    InvalidChar(i32),

    #[error("unknown enum variant `{name}`")]
    UnknownVariant { name: String },

    #[error("wire value {value} does not fit in `{target}`")]
    OutOfRange { value: i64, target: &'static str },

    #[error("unknown value tag {0}")]
    UnknownTag(i32),

    #[error("null value for non-nullable field `{field}`")]
    UnexpectedNull { field: &'static str },

    #[error("dynamic value cannot be read as `{expected}`")]
    TypeMismatch { expected: &'static str },

    #[error("{0} trailing byte(s) after decoding")]
    TrailingBytes(usize),
}

/// Failure while mapping a source value to its target type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("nested field `{field}` is null")]
    NullNested { field: &'static str },
}
