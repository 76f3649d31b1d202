use thiserror::Error;

use lateinit_core::TypeHash;

/// Failures while evaluating a unit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Raised by generated code on access to an unassigned deferred-init
    /// declaration. `name` is present when the lowering was asked to pass it.
    #[error("{}", uninitialized_message(.name))]
    UninitializedPropertyAccess { name: Option<String> },

    /// A library call that the lowering should have replaced.
    #[error("intrinsic '{name}' reached the evaluator unlowered")]
    UnloweredIntrinsic { name: String },

    #[error("unknown library function {0}")]
    UnknownLibraryFunction(TypeHash),

    /// A local read before any assignment or initializer.
    #[error("variable '{name}' is not bound")]
    UnboundValue { name: String },

    /// An instance field accessed without an object.
    #[error("field '{name}' needs a receiver")]
    MissingReceiver { name: String },

    #[error("function '{name}' has no body")]
    NoBody { name: String },

    #[error("'{name}' is not a {expected}")]
    UnexpectedDeclaration { name: String, expected: &'static str },

    #[error("function '{function}' expects {expected} arguments, got {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("operator {op} cannot be applied to {operands}")]
    TypeMismatch { op: &'static str, operands: String },

    #[error("call depth exceeded {limit}")]
    CallDepthExceeded { limit: usize },
}

fn uninitialized_message(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("lateinit property {name} has not been initialized"),
        None => "lateinit property has not been initialized".to_string(),
    }
}
