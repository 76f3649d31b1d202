//! A tree-walking evaluator for compilation units.
//!
//! It runs lowered (and unlowered) IR directly, which makes the runtime
//! contract of the deferred-initialization lowering observable: premature
//! reads raise [`RuntimeError::UninitializedPropertyAccess`], assigned values
//! read back unchanged.

mod error;
mod interpreter;
mod value;

pub use error::RuntimeError;
pub use interpreter::{Interpreter, InterpreterOptions};
pub use value::{Object, ObjectRef, Value};
