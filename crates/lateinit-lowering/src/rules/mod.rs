//! The rewrite rules, one per construct.

mod declaration;
mod property;
mod read;
mod reflective;
mod throw;

use lateinit_core::{IrType, LoweringError, Span};

/// The null sentinel needs a reference representation.
fn ensure_reference(name: &str, ty: IrType, span: Span) -> Result<(), LoweringError> {
    if ty.is_primitive() {
        return Err(LoweringError::PrimitiveDeferredInit {
            name: name.to_string(),
            ty,
            span,
        });
    }
    Ok(())
}
