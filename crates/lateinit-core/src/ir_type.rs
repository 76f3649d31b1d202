//! Static types as seen by IR passes.

use std::fmt;

use crate::{PrimitiveKind, TypeHash};

/// Qualified name of the root reference type.
pub const ANY_TYPE_NAME: &str = "lang::Any";
/// Qualified name of the string type.
pub const STRING_TYPE_NAME: &str = "lang::String";

/// The static type of a declaration or expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    /// A value type with no null representation.
    Primitive(PrimitiveKind),
    /// A class type, identified by the hash of its qualified name.
    Reference { class: TypeHash, nullable: bool },
    /// The type of expressions that never complete normally.
    Nothing,
    /// The type of expressions evaluated only for their effect.
    Unit,
}

impl IrType {
    /// A non-null reference to the class with the given qualified name.
    pub fn class(qualified_name: &str) -> Self {
        IrType::Reference {
            class: TypeHash::from_name(qualified_name),
            nullable: false,
        }
    }

    /// `lang::Any`
    pub fn any() -> Self {
        Self::class(ANY_TYPE_NAME)
    }

    /// `lang::String`
    pub fn string() -> Self {
        Self::class(STRING_TYPE_NAME)
    }

    /// `lang::Any?`, the type of the null literal.
    pub fn nullable_any() -> Self {
        Self::any().make_nullable()
    }

    /// Whether this is a primitive value type.
    pub const fn is_primitive(&self) -> bool {
        matches!(self, IrType::Primitive(_))
    }

    /// Whether null is a member of this type.
    pub const fn is_nullable(&self) -> bool {
        matches!(self, IrType::Reference { nullable: true, .. })
    }

    /// The nullable variant of a reference type; other types are returned unchanged.
    pub const fn make_nullable(self) -> Self {
        match self {
            IrType::Reference { class, .. } => IrType::Reference {
                class,
                nullable: true,
            },
            other => other,
        }
    }

    /// The non-null variant of a reference type; other types are returned unchanged.
    pub const fn make_not_null(self) -> Self {
        match self {
            IrType::Reference { class, .. } => IrType::Reference {
                class,
                nullable: false,
            },
            other => other,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Primitive(kind) => write!(f, "{kind}"),
            IrType::Reference { class, nullable } => {
                if *class == TypeHash::from_name(ANY_TYPE_NAME) {
                    write!(f, "Any")?;
                } else if *class == TypeHash::from_name(STRING_TYPE_NAME) {
                    write!(f, "String")?;
                } else {
                    write!(f, "ref({class})")?;
                }
                if *nullable {
                    write!(f, "?")?;
                }
                Ok(())
            }
            IrType::Nothing => write!(f, "Nothing"),
            IrType::Unit => write!(f, "Unit"),
        }
    }
}
