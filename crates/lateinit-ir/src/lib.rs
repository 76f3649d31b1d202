//! Arena-backed IR for one compilation unit.
//!
//! Declarations and expressions live in two arenas owned by a
//! [`CompilationUnit`] and are referenced through [`DeclId`] and [`ExprId`]
//! handles. Many use sites may name the same declaration; rewriting a node
//! replaces the contents of its arena slot, so every reference observes the
//! new node without any shared mutable aliasing.
//!
//! ## Modules
//!
//! - [`ids`]: arena handles
//! - [`decl`]: declaration nodes
//! - [`expr`]: expression nodes
//! - [`unit`]: the per-unit arenas
//! - [`builder`]: position-anchored node construction
//! - [`accessors`]: default property accessor synthesis
//! - [`visit`]: child enumeration used by traversals
//! - [`format`]: textual dumps for tests and debugging

pub mod accessors;
pub mod builder;
pub mod decl;
pub mod expr;
pub mod format;
pub mod ids;
pub mod unit;
pub mod visit;

pub use accessors::{PropertyParts, declare_class, declare_function, declare_property};
pub use builder::IrBuilder;
pub use decl::{
    ClassDecl, DeclKind, Declaration, FieldDecl, FunctionDecl, ParameterDecl, PropertyDecl,
    VariableDecl,
};
pub use expr::{BinaryOp, Callee, Constant, Expr, ExprKind};
pub use format::{LibraryNames, format_expr, format_unit};
pub use ids::{DeclId, ExprId};
pub use unit::CompilationUnit;
