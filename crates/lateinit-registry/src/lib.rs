//! Library symbol registry.
//!
//! Library symbols are declared outside any compilation unit. IR refers to
//! them by [`TypeHash`](lateinit_core::TypeHash); passes resolve the ones
//! they need by qualified name through a [`SymbolRegistry`].

mod entry;
mod registry;
pub mod stdlib;

pub use entry::{FunctionEntry, PropertyEntry, TypeEntry, type_identity};
pub use registry::SymbolRegistry;
