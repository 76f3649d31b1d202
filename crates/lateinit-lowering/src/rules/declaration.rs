//! Deferred-init variables start out holding null.

use lateinit_core::LoweringError;
use lateinit_ir::{DeclId, IrBuilder};
use tracing::debug;

use super::ensure_reference;
use crate::driver::Lowerer;

impl Lowerer<'_> {
    pub(crate) fn lower_variable(&mut self, id: DeclId) -> Result<(), LoweringError> {
        let decl = self.unit.decl(id);
        let (name, span) = (decl.name.clone(), decl.span);
        let Some(variable) = decl.as_variable() else {
            return Err(LoweringError::UnexpectedDeclaration {
                name,
                expected: "variable",
                span,
            });
        };
        if variable.initializer.is_some() {
            return Err(LoweringError::InitializerPresent { name, span });
        }
        let ty = variable.ty;
        ensure_reference(&name, ty, span)?;

        let null = IrBuilder::new(&mut *self.unit, span).null(ty);
        if let Some(variable) = self.unit.decl_mut(id).as_variable_mut() {
            variable.initializer = Some(null);
        }

        self.stats.variables += 1;
        debug!(rule = "declaration", %name, %span, "initialized deferred-init variable with null");
        Ok(())
    }
}
