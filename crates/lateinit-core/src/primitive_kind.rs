//! Primitive value kinds.

use std::fmt;

/// Built-in value types with no null representation.
///
/// A deferred-init declaration may never have one of these types: the
/// null sentinel needs a reference representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Get the source-level name of this primitive type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "Boolean",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::Int8 => "Byte",
            PrimitiveKind::Int16 => "Short",
            PrimitiveKind::Int32 => "Int",
            PrimitiveKind::Int64 => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
