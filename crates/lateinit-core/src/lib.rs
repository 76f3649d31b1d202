//! Core definitions shared by every crate of the workspace.
//!
//! - [`Span`]: source positions carried by IR nodes
//! - [`TypeHash`]: deterministic identity of types, functions and accessors
//! - [`QualifiedName`]: by-name keys used for library symbol resolution
//! - [`IrType`], [`PrimitiveKind`]: the static types the lowering inspects
//! - [`DeclFlags`]: declaration modifiers assigned by the front end
//! - [`error`]: per-phase error enums

pub mod error;
pub mod flags;
pub mod ir_type;
pub mod primitive_kind;
pub mod qualified_name;
pub mod span;
pub mod type_hash;

pub use error::{LoweringError, RegistrationError};
pub use flags::DeclFlags;
pub use ir_type::IrType;
pub use primitive_kind::PrimitiveKind;
pub use qualified_name::QualifiedName;
pub use span::Span;
pub use type_hash::TypeHash;
