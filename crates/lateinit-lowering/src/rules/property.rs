//! Deferred-init properties: a guarded getter over a null-initialized field.

use lateinit_core::{IrType, LoweringError};
use lateinit_ir::{DeclId, IrBuilder};
use tracing::debug;

use super::ensure_reference;
use super::throw::throw_uninitialized;
use crate::driver::Lowerer;

impl Lowerer<'_> {
    pub(crate) fn lower_property(&mut self, id: DeclId) -> Result<(), LoweringError> {
        let decl = self.unit.decl(id);
        let (name, span) = (decl.name.clone(), decl.span);
        if decl.flags.is_extension() {
            return Err(LoweringError::ExtensionDeferredInit { name, span });
        }
        let Some(property) = decl.as_property() else {
            return Err(LoweringError::UnexpectedDeclaration {
                name,
                expected: "property",
                span,
            });
        };
        let Some(field) = property.backing_field else {
            return Err(LoweringError::MissingBackingField { name, span });
        };
        let Some(getter) = property.getter else {
            return Err(LoweringError::MissingGetter { name, span });
        };

        let field_decl = self.unit.decl(field);
        let Some(storage) = field_decl.as_field() else {
            return Err(LoweringError::UnexpectedDeclaration {
                name: field_decl.name.clone(),
                expected: "field",
                span: field_decl.span,
            });
        };
        let (field_ty, field_name, existing) =
            (storage.ty, field_decl.name.clone(), storage.initializer);
        ensure_reference(&name, field_ty, span)?;

        self.guard_getter(getter, field, &field_name)?;

        if existing.is_some() {
            return Err(LoweringError::BackingFieldInitialized { name, span });
        }
        let null = IrBuilder::new(&mut *self.unit, span).null(field_ty);
        if let Some(storage) = self.unit.decl_mut(field).as_field_mut() {
            storage.initializer = Some(null);
        }

        self.stats.properties += 1;
        debug!(rule = "property", %name, %span, "lowered deferred-init property");
        Ok(())
    }

    /// Replace the getter body with
    /// `{ val tmp = this.field; if (tmp != null) return tmp else throw(name) }`.
    ///
    /// The field is read once, into the temporary.
    fn guard_getter(
        &mut self,
        getter: DeclId,
        field: DeclId,
        name: &str,
    ) -> Result<(), LoweringError> {
        let decl = self.unit.decl(getter);
        let span = decl.span;
        let Some(function) = decl.as_function() else {
            return Err(LoweringError::UnexpectedDeclaration {
                name: decl.name.clone(),
                expected: "function",
                span,
            });
        };
        let receiver = function.dispatch_receiver;

        let (symbols, options) = (self.symbols, self.options);
        let mut b = IrBuilder::new(&mut *self.unit, span);
        let this = receiver.map(|r| b.get_value(r));
        let current = b.get_field(field, this);
        let (tmp, declare) = b.temporary(current);
        let tested = b.get_value(tmp);
        let test = b.not_equals_null(tested);
        let result = b.get_value(tmp);
        let ret = b.ret(getter, Some(result));
        let fail = throw_uninitialized(&mut b, symbols, options, name);
        let choice = b.if_then_else(IrType::Nothing, test, ret, fail);
        let body = b.block(IrType::Unit, vec![declare, choice]);

        if let Some(function) = self.unit.decl_mut(getter).as_function_mut() {
            function.body = Some(body);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::testing::{dump, pass};
    use crate::{LoweringError, LoweringOptions, LoweringPass};
    use lateinit_core::{DeclFlags, IrType, PrimitiveKind, Span};
    use lateinit_ir::{CompilationUnit, Constant, ExprKind, IrBuilder, PropertyParts};
    use lateinit_ir::{declare_class, declare_property};

    fn member(flags: DeclFlags, ty: IrType) -> (CompilationUnit, PropertyParts) {
        let mut unit = CompilationUnit::new("t");
        let class = declare_class(&mut unit, "app::Holder", Span::new(1, 1, 6));
        let parts = declare_property(&mut unit, Some(class), "name", ty, flags, Span::new(2, 5, 4));
        (unit, parts)
    }

    fn deferred() -> DeclFlags {
        DeclFlags::DEFERRED_INIT | DeclFlags::MUTABLE
    }

    #[test]
    fn getter_and_field_are_rewritten() {
        let (mut unit, parts) = member(deferred(), IrType::string());
        let options = LoweringOptions::new().with_property_name_in_assertion(true);

        let stats = pass(options).lower(&mut unit).unwrap();
        assert_eq!(stats.properties, 1);
        assert_eq!(stats.total(), 1);

        let init = unit[parts.field].as_field().unwrap().initializer.unwrap();
        assert_eq!(unit[init].kind, ExprKind::Const(Constant::Null));
        assert_eq!(unit[init].span, Span::new(2, 5, 4));

        let text = dump(&unit);
        let tmp = text
            .split("val ")
            .nth(1)
            .and_then(|rest| rest.split(':').next())
            .unwrap()
            .to_string();
        let expected = format!(
            "class Holder {{\n  \
             lateinit var name: String\n    \
             field name: String = null\n    \
             fun <get-name>(): String {{ val {tmp}: String = this.#name; \
             if (({tmp} != null)) return {tmp} \
             else throwUninitializedPropertyAccessException(\"name\") }}\n    \
             fun <set-name>(value: String): Unit {{ this.#name = value }}\n\
             }}\n"
        );
        assert_eq!(text, expected);
        assert_eq!(unit.find_shared_node(), None);
    }

    #[test]
    fn top_level_getter_reads_static_field() {
        let mut unit = CompilationUnit::new("t");
        let parts = declare_property(
            &mut unit,
            None,
            "config",
            IrType::string(),
            deferred(),
            Span::new(1, 1, 6),
        );
        pass(LoweringOptions::default()).lower(&mut unit).unwrap();

        let text = dump(&unit);
        assert!(text.contains("= #config;"), "{text}");
        assert!(text.contains("else throwUninitializedPropertyAccessException() }"));
        assert!(unit[parts.field].as_field().unwrap().initializer.is_some());
    }

    #[test]
    fn extension_property_is_fatal() {
        let (mut unit, _) = member(deferred() | DeclFlags::EXTENSION, IrType::string());
        let err = pass(LoweringOptions::default()).lower(&mut unit).unwrap_err();
        assert_eq!(
            err,
            LoweringError::ExtensionDeferredInit {
                name: "name".into(),
                span: Span::new(2, 5, 4)
            }
        );
    }

    #[test]
    fn fake_override_is_skipped() {
        let (mut unit, parts) = member(deferred() | DeclFlags::FAKE_OVERRIDE, IrType::string());
        let stats = pass(LoweringOptions::default()).lower(&mut unit).unwrap();
        assert_eq!(stats.total(), 0);
        assert!(unit[parts.field].as_field().unwrap().initializer.is_none());
    }

    #[test]
    fn primitive_property_is_fatal() {
        let int = IrType::Primitive(PrimitiveKind::Int32);
        let (mut unit, _) = member(deferred(), int);
        let err = pass(LoweringOptions::default()).lower(&mut unit).unwrap_err();
        assert_eq!(
            err.to_string(),
            "at 2:5: deferred-init is not allowed on primitive type Int ('name')"
        );
    }

    #[test]
    fn initialized_backing_field_is_fatal() {
        let (mut unit, parts) = member(deferred(), IrType::string());
        let init = IrBuilder::new(&mut unit, Span::default()).string("eager");
        if let Some(f) = unit.decl_mut(parts.field).as_field_mut() {
            f.initializer = Some(init);
        }
        let err = pass(LoweringOptions::default()).lower(&mut unit).unwrap_err();
        assert!(matches!(err, LoweringError::BackingFieldInitialized { .. }));
    }

    #[test]
    fn missing_backing_field_is_fatal() {
        let (mut unit, parts) = member(deferred(), IrType::string());
        if let Some(p) = unit.decl_mut(parts.property).as_property_mut() {
            p.backing_field = None;
        }
        let err = pass(LoweringOptions::default()).lower(&mut unit).unwrap_err();
        assert!(matches!(err, LoweringError::MissingBackingField { .. }));
    }

    #[test]
    fn missing_getter_is_fatal() {
        let (mut unit, parts) = member(deferred(), IrType::string());
        if let Some(p) = unit.decl_mut(parts.property).as_property_mut() {
            p.getter = None;
        }
        let err = pass(LoweringOptions::default()).lower(&mut unit).unwrap_err();
        assert!(matches!(err, LoweringError::MissingGetter { .. }));
    }
}
