//! Fully-qualified type names.

use std::fmt;

use serde::Serialize;

/// A dot-separated, fully-qualified type name such as `com.example.City`.
///
/// The last segment is the simple name; everything before it is the package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Join a package and a simple name. An empty package yields the bare name.
    pub fn in_package(package: &str, simple_name: &str) -> Self {
        if package.is_empty() {
            Self(simple_name.to_string())
        } else {
            Self(format!("{}.{}", package, simple_name))
        }
    }

    /// The package part, or `""` for names without a dot.
    pub fn package(&self) -> &str {
        match self.0.rfind('.') {
            Some(pos) => &self.0[..pos],
            None => "",
        }
    }

    /// The last segment.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(pos) => &self.0[pos + 1..],
            None => &self.0,
        }
    }

    /// Package segments in order, empty for names without a package.
    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        self.package().split('.').filter(|s| !s.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
