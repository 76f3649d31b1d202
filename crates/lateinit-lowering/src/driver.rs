//! Tree traversal.
//!
//! Children are lowered before their parent, so a rule always sees
//! already-lowered operands. Nodes a rule synthesizes are written into
//! fresh or replaced slots that the traversal has already passed and are
//! never lowered again.

use lateinit_core::LoweringError;
use lateinit_ir::{Callee, CompilationUnit, DeclId, DeclKind, ExprId, ExprKind};

use crate::{LoweringOptions, LoweringStats, WellKnownSymbols};

pub(crate) struct Lowerer<'a> {
    pub(crate) unit: &'a mut CompilationUnit,
    pub(crate) symbols: &'a WellKnownSymbols,
    pub(crate) options: &'a LoweringOptions,
    pub(crate) stats: LoweringStats,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(
        unit: &'a mut CompilationUnit,
        symbols: &'a WellKnownSymbols,
        options: &'a LoweringOptions,
    ) -> Self {
        Self {
            unit,
            symbols,
            options,
            stats: LoweringStats::default(),
        }
    }

    pub(crate) fn finish(self) -> LoweringStats {
        self.stats
    }

    pub(crate) fn lower_decl(&mut self, id: DeclId) -> Result<(), LoweringError> {
        let children = self.unit.decl(id).children();
        for decl in children.decls {
            self.lower_decl(decl)?;
        }
        for expr in children.exprs {
            self.lower_expr(expr)?;
        }

        let decl = self.unit.decl(id);
        if !decl.is_deferred_init() {
            return Ok(());
        }
        match decl.kind {
            DeclKind::Variable(_) => self.lower_variable(id),
            // fake overrides forward to the real declaration, which is lowered on its own
            DeclKind::Property(_) if !decl.flags.is_fake_override() => self.lower_property(id),
            DeclKind::Property(_)
            | DeclKind::Field(_)
            | DeclKind::Function(_)
            | DeclKind::Parameter(_)
            | DeclKind::Class(_) => Ok(()),
        }
    }

    fn lower_expr(&mut self, id: ExprId) -> Result<(), LoweringError> {
        if let ExprKind::Declare(decl) = self.unit.expr(id).kind {
            return self.lower_decl(decl);
        }
        for child in self.unit.expr(id).kind.children() {
            self.lower_expr(child)?;
        }

        match self.unit.expr(id).kind {
            ExprKind::GetValue(decl) if self.is_deferred_variable(decl) => {
                self.lower_read(id, decl)
            }
            ExprKind::Call {
                callee: Callee::Library(hash),
                ..
            } if hash == self.symbols.is_initialized_getter => self.lower_query(id),
            // Declare was handled above, the rest have no rule
            ExprKind::GetValue(_)
            | ExprKind::Call { .. }
            | ExprKind::Const(_)
            | ExprKind::SetValue { .. }
            | ExprKind::GetField { .. }
            | ExprKind::SetField { .. }
            | ExprKind::PropertyReference { .. }
            | ExprKind::Block(_)
            | ExprKind::If { .. }
            | ExprKind::Binary { .. }
            | ExprKind::Declare(_)
            | ExprKind::Return { .. }
            | ExprKind::Construct { .. } => Ok(()),
        }
    }

    fn is_deferred_variable(&self, id: DeclId) -> bool {
        let decl = self.unit.decl(id);
        decl.is_deferred_init() && matches!(decl.kind, DeclKind::Variable(_))
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::testing::pass;
    use crate::{LoweringOptions, LoweringPass, LoweringStats};
    use lateinit_core::{DeclFlags, IrType, PrimitiveKind, Span};
    use lateinit_ir::{CompilationUnit, Declaration, declare_class, declare_property};

    #[test]
    fn fake_override_property_is_skipped() {
        let mut unit = CompilationUnit::new("t");
        let class = declare_class(&mut unit, "app::Derived", Span::new(1, 1, 7));
        // a primitive type would be fatal if the property rule ran
        declare_property(
            &mut unit,
            Some(class),
            "count",
            IrType::Primitive(PrimitiveKind::Int32),
            DeclFlags::DEFERRED_INIT | DeclFlags::MUTABLE | DeclFlags::FAKE_OVERRIDE,
            Span::new(2, 5, 5),
        );

        let stats = pass(LoweringOptions::default()).lower(&mut unit).unwrap();
        assert_eq!(stats, LoweringStats::default());
    }

    #[test]
    fn deferred_flag_on_other_declarations_is_ignored() {
        let mut unit = CompilationUnit::new("t");
        let flags = DeclFlags::DEFERRED_INIT;
        let int = IrType::Primitive(PrimitiveKind::Int32);
        let function = unit.alloc_decl(
            Declaration::function("f", IrType::Unit, Span::new(1, 1, 1)).with_flags(flags),
        );
        let param =
            unit.alloc_decl(Declaration::parameter("p", int, 0, Span::default()).with_flags(flags));
        unit.add_top_level(function);
        unit.add_top_level(param);

        let stats = pass(LoweringOptions::default()).lower(&mut unit).unwrap();
        assert_eq!(stats.total(), 0);
    }
}
