//! `ref.isInitialized` compares the backing field against null.

use lateinit_core::{IrType, LoweringError, PrimitiveKind};
use lateinit_ir::{BinaryOp, ExprId, ExprKind, IrBuilder};
use tracing::debug;

use super::ensure_reference;
use crate::driver::Lowerer;

impl Lowerer<'_> {
    /// Replace a call of the `isInitialized` getter by `receiver.field != null`.
    ///
    /// The property reference's bound receiver is moved into the field read,
    /// so it is evaluated exactly once.
    pub(crate) fn lower_query(&mut self, id: ExprId) -> Result<(), LoweringError> {
        let call = self.unit.expr(id);
        let span = call.span;
        let ExprKind::Call {
            extension_receiver, ..
        } = call.kind
        else {
            return Ok(());
        };
        let malformed = LoweringError::MalformedIsInitializedReceiver { span };
        let Some(reference) = extension_receiver else {
            return Err(malformed);
        };
        let ExprKind::PropertyReference {
            property,
            dispatch_receiver,
            extension_receiver: bound_extension,
        } = self.unit.expr(reference).kind
        else {
            return Err(malformed);
        };

        let decl = self.unit.decl(property);
        let name = decl.name.clone();
        if bound_extension.is_some() {
            return Err(LoweringError::ExtensionDeferredInit { name, span });
        }
        let Some(target) = decl.as_property() else {
            return Err(LoweringError::UnexpectedDeclaration {
                name,
                expected: "property",
                span,
            });
        };
        ensure_reference(&name, target.ty, span)?;
        let Some(field) = target.backing_field else {
            return Err(LoweringError::MissingBackingField { name, span });
        };

        if let ExprKind::PropertyReference {
            dispatch_receiver, ..
        } = &mut self.unit.expr_mut(reference).kind
        {
            dispatch_receiver.take();
        }

        let mut b = IrBuilder::new(&mut *self.unit, span);
        let value = b.get_field(field, dispatch_receiver);
        let null = b.null(IrType::nullable_any());
        let compare = b.node(
            ExprKind::Binary {
                op: BinaryOp::Ne,
                lhs: value,
                rhs: null,
            },
            IrType::Primitive(PrimitiveKind::Bool),
        );
        self.unit.replace_expr(id, compare);

        self.stats.queries += 1;
        debug!(rule = "reflective", %name, %span, "lowered isInitialized query");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::testing::{dump, pass};
    use crate::{LoweringError, LoweringOptions, LoweringPass};
    use lateinit_core::{DeclFlags, IrType, PrimitiveKind, Span, TypeHash};
    use lateinit_ir::{
        Callee, CompilationUnit, DeclId, ExprId, ExprKind, IrBuilder, PropertyParts,
        declare_class, declare_function, declare_property,
    };
    use lateinit_registry::stdlib;

    /// ```text
    /// class Holder {
    ///     lateinit var name: String
    ///     fun check(): Boolean = this::name.isInitialized
    /// }
    /// ```
    fn holder(ty: IrType) -> (CompilationUnit, PropertyParts, DeclId) {
        let mut unit = CompilationUnit::new("t");
        let class = declare_class(&mut unit, "app::Holder", Span::new(1, 1, 6));
        let parts = declare_property(
            &mut unit,
            Some(class),
            "name",
            ty,
            DeclFlags::DEFERRED_INIT | DeclFlags::MUTABLE,
            Span::new(2, 5, 4),
        );
        let check = declare_function(
            &mut unit,
            Some(class),
            "check",
            IrType::Primitive(PrimitiveKind::Bool),
            Span::new(3, 5, 5),
        );
        (unit, parts, check)
    }

    fn query(
        unit: &mut CompilationUnit,
        function: DeclId,
        reference: impl FnOnce(&mut IrBuilder<'_>) -> ExprId,
    ) -> ExprId {
        let getter = pass(LoweringOptions::default()).symbols().is_initialized_getter;
        let mut b = IrBuilder::new(unit, Span::new(3, 20, 13));
        let receiver = reference(&mut b);
        let call = b.call_with_receivers(
            Callee::Library(getter),
            IrType::Primitive(PrimitiveKind::Bool),
            None,
            Some(receiver),
            Vec::new(),
        );
        let ret = b.ret(function, Some(call));
        let body = b.block(IrType::Unit, vec![ret]);
        if let Some(f) = unit.decl_mut(function).as_function_mut() {
            f.body = Some(body);
        }
        call
    }

    fn this_of(unit: &CompilationUnit, function: DeclId) -> DeclId {
        unit[function].as_function().unwrap().dispatch_receiver.unwrap()
    }

    fn ref0() -> IrType {
        IrType::class(stdlib::PROPERTY_REF0)
    }

    #[test]
    fn query_becomes_field_comparison() {
        let (mut unit, parts, check) = holder(IrType::string());
        let this = this_of(&unit, check);
        let call = query(&mut unit, check, |b| {
            let receiver = b.get_value(this);
            b.property_reference(parts.property, Some(receiver), ref0())
        });

        let stats = pass(LoweringOptions::default()).lower(&mut unit).unwrap();
        assert_eq!(stats.queries, 1);

        let ExprKind::Binary { lhs, .. } = unit[call].kind else {
            panic!("expected comparison");
        };
        let ExprKind::GetField { field, receiver } = unit[lhs].kind else {
            panic!("expected field read");
        };
        assert_eq!(field, parts.field);
        assert_eq!(unit[receiver.unwrap()].kind, ExprKind::GetValue(this));
        assert_eq!(unit[call].ty, IrType::Primitive(PrimitiveKind::Bool));
        assert!(dump(&unit).contains("fun check(): Boolean { return (this.#name != null) }"));
        assert_eq!(unit.find_shared_node(), None);
    }

    #[test]
    fn receiver_must_be_property_reference() {
        let (mut unit, _, check) = holder(IrType::string());
        query(&mut unit, check, |b| b.null(ref0()));

        let err = pass(LoweringOptions::default()).lower(&mut unit).unwrap_err();
        assert_eq!(
            err,
            LoweringError::MalformedIsInitializedReceiver {
                span: Span::new(3, 20, 13)
            }
        );
    }

    #[test]
    fn extension_bound_reference_is_fatal() {
        let (mut unit, parts, check) = holder(IrType::string());
        query(&mut unit, check, |b| {
            let ext = b.string("receiver");
            b.expr(
                ExprKind::PropertyReference {
                    property: parts.property,
                    dispatch_receiver: None,
                    extension_receiver: Some(ext),
                },
                ref0(),
            )
        });

        let err = pass(LoweringOptions::default()).lower(&mut unit).unwrap_err();
        assert!(
            matches!(err, LoweringError::ExtensionDeferredInit { ref name, .. } if name == "name")
        );
    }

    #[test]
    fn primitive_property_is_fatal() {
        let (mut unit, parts, check) = holder(IrType::Primitive(PrimitiveKind::Int64));
        let this = this_of(&unit, check);
        query(&mut unit, check, |b| {
            let receiver = b.get_value(this);
            b.property_reference(parts.property, Some(receiver), ref0())
        });

        let err = pass(LoweringOptions::default()).lower(&mut unit).unwrap_err();
        assert!(matches!(err, LoweringError::PrimitiveDeferredInit { .. }));
    }

    #[test]
    fn other_library_calls_are_untouched() {
        let (mut unit, _, check) = holder(IrType::string());
        let call = {
            let mut b = IrBuilder::new(&mut unit, Span::default());
            b.call(
                Callee::Library(TypeHash::from_function("lang::println", &[])),
                IrType::Unit,
                Vec::new(),
            )
        };
        if let Some(f) = unit.decl_mut(check).as_function_mut() {
            f.body = Some(call);
        }

        pass(LoweringOptions::default()).lower(&mut unit).unwrap();
        assert!(matches!(unit[call].kind, ExprKind::Call { .. }));
    }
}
