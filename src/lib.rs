//! Deferred-initialization lowering.
//!
//! Variables and properties declared without an initializer, to be
//! assigned before first use, are lowered to nullable storage holding a
//! null sentinel. Every access is guarded by a check that raises an
//! uninitialized-access error at run time.
//!
//! The workspace is split into:
//!
//! - [`core`]: spans, type hashes, qualified names, IR types, errors
//! - [`ir`]: the arena-backed IR, its builder and textual dump
//! - [`registry`]: library symbols, including the standard library
//! - [`lowering`]: the pass itself
//! - [`interp`]: an evaluator that runs lowered units
//!
//! # Example
//!
//! ```
//! use lateinit::prelude::*;
//!
//! let session = Session::new(LoweringOptions::default().with_property_name_in_assertion(true))?;
//!
//! let mut unit = CompilationUnit::new("demo");
//! let parts = declare_property(
//!     &mut unit,
//!     None,
//!     "token",
//!     IrType::string(),
//!     DeclFlags::DEFERRED_INIT | DeclFlags::MUTABLE,
//!     Span::new(1, 1, 5),
//! );
//! session.lower(&mut unit)?;
//!
//! let mut interp = session.interpreter(&unit);
//! let err = interp.call_function(parts.getter, Vec::new()).unwrap_err();
//! assert_eq!(err.to_string(), "lateinit property token has not been initialized");
//! # Ok::<(), lateinit::Error>(())
//! ```

mod error;
mod session;

pub use error::{Error, Result};
pub use session::{Session, lower_unit};

pub use lateinit_core as core;
pub use lateinit_interp as interp;
pub use lateinit_ir as ir;
pub use lateinit_lowering as lowering;
pub use lateinit_registry as registry;

pub mod prelude {
    pub use crate::{Error, Result, Session, lower_unit};
    pub use lateinit_core::{DeclFlags, IrType, LoweringError, PrimitiveKind, Span, TypeHash};
    pub use lateinit_interp::{Interpreter, InterpreterOptions, RuntimeError, Value};
    pub use lateinit_ir::{
        Callee, CompilationUnit, DeclId, Declaration, ExprId, ExprKind, IrBuilder, PropertyParts,
        declare_class, declare_function, declare_property, format_unit,
    };
    pub use lateinit_lowering::{DeferredInitLowering, LoweringOptions, LoweringPass, LoweringStats};
    pub use lateinit_registry::{SymbolRegistry, stdlib};
}
