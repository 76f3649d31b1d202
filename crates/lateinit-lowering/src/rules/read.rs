//! Every read of a deferred-init variable is checked.
//!
//! There is no flow analysis: a read that is provably preceded by an
//! assignment is still guarded.

use lateinit_core::LoweringError;
use lateinit_ir::{DeclId, ExprId, ExprKind, IrBuilder};
use tracing::debug;

use super::ensure_reference;
use super::throw::throw_uninitialized;
use crate::driver::Lowerer;

impl Lowerer<'_> {
    /// `x` becomes `{ if (x == null) throw(x); x }` in the same slot.
    pub(crate) fn lower_read(&mut self, id: ExprId, variable: DeclId) -> Result<(), LoweringError> {
        let read = self.unit.expr(id);
        let (span, result_ty) = (read.span, read.ty);
        let decl = self.unit.decl(variable);
        let name = decl.name.clone();
        let Some(local) = decl.as_variable() else {
            return Err(LoweringError::UnexpectedDeclaration {
                name,
                expected: "variable",
                span,
            });
        };
        ensure_reference(&name, local.ty, span)?;

        let (symbols, options) = (self.symbols, self.options);
        let mut b = IrBuilder::new(&mut *self.unit, span);
        let tested = b.get_value(variable);
        let test = b.equals_null(tested);
        let fail = throw_uninitialized(&mut b, symbols, options, &name);
        let check = b.if_then(test, fail);
        let value = b.get_value(variable);
        let guarded = b.node(ExprKind::Block(vec![check, value]), result_ty);
        self.unit.replace_expr(id, guarded);

        self.stats.reads += 1;
        debug!(rule = "read", %name, %span, "guarded deferred-init read");
        Ok(())
    }
}
