//! Error types shared across the workspace.
//!
//! ```text
//! RegistrationError - library symbol registration
//! LoweringError     - compiler-internal invariant violations found while lowering
//! ```
//!
//! Runtime failures raised by generated code are not compiler errors; the
//! evaluator defines its own error type for them.

use thiserror::Error;

use crate::{IrType, Span};

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while populating a symbol registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A type with this name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A function with this name and signature already exists.
    #[error("duplicate function: {0}")]
    DuplicateFunction(String),

    /// A property with this name and receiver already exists.
    #[error("duplicate property: {0}")]
    DuplicateProperty(String),

    /// A referenced type was not registered first.
    #[error("type not found: {0}")]
    TypeNotFound(String),
}

// ============================================================================
// Lowering Errors
// ============================================================================

/// Invariant violations detected by the deferred-initialization lowering.
///
/// Each of these means an earlier phase accepted a program it should have
/// rejected. None of them is recoverable: the unit being lowered must not
/// reach code generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoweringError {
    /// A deferred-init variable already carries an initializer.
    #[error("at {span}: deferred-init variable '{name}' must not have an initializer")]
    InitializerPresent { name: String, span: Span },

    /// The backing field of a deferred-init property already carries an initializer.
    #[error("at {span}: deferred-init property '{name}' must not have an initializer")]
    BackingFieldInitialized { name: String, span: Span },

    /// A deferred-init declaration has a primitive type.
    #[error("at {span}: deferred-init is not allowed on primitive type {ty} ('{name}')")]
    PrimitiveDeferredInit { name: String, ty: IrType, span: Span },

    /// A deferred-init property declares an extension receiver.
    #[error("at {span}: deferred-init is not allowed on extension property '{name}'")]
    ExtensionDeferredInit { name: String, span: Span },

    /// The receiver of an is-initialized query is not a bare property reference.
    #[error("at {span}: is-initialized receiver must be a property reference")]
    MalformedIsInitializedReceiver { span: Span },

    /// A deferred-init property has no backing field to hold the sentinel.
    #[error("at {span}: deferred-init property '{name}' has no backing field")]
    MissingBackingField { name: String, span: Span },

    /// A deferred-init property has no getter to guard.
    #[error("at {span}: deferred-init property '{name}' has no getter")]
    MissingGetter { name: String, span: Span },

    /// A handle points at a declaration of the wrong kind.
    #[error("at {span}: '{name}' is not a {expected}")]
    UnexpectedDeclaration {
        name: String,
        expected: &'static str,
        span: Span,
    },

    /// A well-known library symbol did not resolve to exactly one candidate.
    #[error("well-known symbol '{name}' resolved to {candidates} candidates, expected exactly one")]
    WellKnownSymbol { name: String, candidates: usize },
}

impl LoweringError {
    /// Source position of the offending node, if the error has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            LoweringError::InitializerPresent { span, .. }
            | LoweringError::BackingFieldInitialized { span, .. }
            | LoweringError::PrimitiveDeferredInit { span, .. }
            | LoweringError::ExtensionDeferredInit { span, .. }
            | LoweringError::MalformedIsInitializedReceiver { span }
            | LoweringError::MissingBackingField { span, .. }
            | LoweringError::MissingGetter { span, .. }
            | LoweringError::UnexpectedDeclaration { span, .. } => Some(*span),
            LoweringError::WellKnownSymbol { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrimitiveKind;

    #[test]
    fn lowering_error_display() {
        let err = LoweringError::PrimitiveDeferredInit {
            name: "count".into(),
            ty: IrType::Primitive(PrimitiveKind::Int32),
            span: Span::new(4, 9, 5),
        };
        assert_eq!(
            err.to_string(),
            "at 4:9: deferred-init is not allowed on primitive type Int ('count')"
        );
        assert_eq!(err.span(), Some(Span::new(4, 9, 5)));
    }

    #[test]
    fn well_known_symbol_has_no_span() {
        let err = LoweringError::WellKnownSymbol {
            name: "lang::isInitialized".into(),
            candidates: 0,
        };
        assert!(err.span().is_none());
        assert!(err.to_string().contains("0 candidates"));
    }

    #[test]
    fn registration_error_display() {
        let err = RegistrationError::DuplicateType("lang::String".into());
        assert_eq!(err.to_string(), "duplicate type: lang::String");
    }
}
