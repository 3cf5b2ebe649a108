//! Indentation configuration for generated code.

const SPACES: &str = "        ";

/// Indentation width of generated code, at most 8 spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
}

impl Indent {
    /// 4-space indentation, the rustfmt default.
    pub const RUST: Self = Self::Spaces(4);

    /// String for one indent level. Widths above 8 are clamped.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(width) => &SPACES[..usize::from(*width).min(SPACES.len())],
        }
    }
}
