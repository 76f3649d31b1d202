use std::fmt;

use crate::TypeHash;

/// A `::`-separated library path such as `lang::reflect::PropertyRef0`.
///
/// ```
/// use lateinit_core::QualifiedName;
///
/// let name = QualifiedName::from("lang::reflect::PropertyRef0");
/// assert_eq!(name.simple_name(), "PropertyRef0");
/// assert_eq!(name.namespace(), ["lang", "reflect"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    name: String,
    namespace: Vec<String>,
}

impl QualifiedName {
    /// Split on `::`; empty segments, including a leading `::`, are dropped.
    pub fn from_qualified_string(s: &str) -> Self {
        let mut segments: Vec<String> = s
            .split("::")
            .filter(|seg| !seg.is_empty())
            .map(str::to_string)
            .collect();
        let name = segments.pop().unwrap_or_default();
        Self {
            name,
            namespace: segments,
        }
    }

    pub fn simple_name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// A name in the same namespace.
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: self.namespace.clone(),
        }
    }

    /// Hash of the rendered path; declared classes use the same identity.
    pub fn to_type_hash(&self) -> TypeHash {
        TypeHash::from_name(&self.to_string())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.namespace {
            write!(f, "{segment}::")?;
        }
        f.write_str(&self.name)
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}
