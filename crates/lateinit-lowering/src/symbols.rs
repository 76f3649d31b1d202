//! Library symbols the pass rewrites or emits calls to.

use lateinit_core::{LoweringError, QualifiedName, TypeHash};
use lateinit_registry::{SymbolRegistry, stdlib};
use tracing::trace;

/// Hashes of the well-known library symbols, resolved once per pass
/// instance and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownSymbols {
    /// Getter of `isInitialized` on a receiver-less property reference;
    /// calls to it are the reflective query.
    pub is_initialized_getter: TypeHash,
    /// `throwUninitializedPropertyAccessException`
    pub throw_uninitialized: TypeHash,
}

impl WellKnownSymbols {
    /// Resolve the symbols by name.
    ///
    /// `isInitialized` is contributed once per reference kind; exactly one
    /// candidate must take a `PropertyRef0` extension receiver.
    pub fn resolve(registry: &SymbolRegistry) -> Result<Self, LoweringError> {
        let ref0 = TypeHash::from_name(stdlib::PROPERTY_REF0);
        let candidates: Vec<_> = registry
            .contributed_properties(&QualifiedName::from(stdlib::IS_INITIALIZED))
            .iter()
            .filter(|p| p.extension_receiver == Some(ref0))
            .collect();
        let [property] = candidates.as_slice() else {
            return Err(LoweringError::WellKnownSymbol {
                name: stdlib::IS_INITIALIZED.to_string(),
                candidates: candidates.len(),
            });
        };
        let getter = property
            .getter
            .filter(|&g| registry.function(g).is_some())
            .ok_or_else(|| LoweringError::WellKnownSymbol {
                name: format!("{}.getter", stdlib::IS_INITIALIZED),
                candidates: 0,
            })?;

        let throw_name = QualifiedName::from(stdlib::THROW_UNINITIALIZED);
        let throw = match registry.functions_named(&throw_name) {
            [throw] => throw.hash,
            overloads => {
                return Err(LoweringError::WellKnownSymbol {
                    name: stdlib::THROW_UNINITIALIZED.to_string(),
                    candidates: overloads.len(),
                });
            }
        };

        let symbols = Self {
            is_initialized_getter: getter,
            throw_uninitialized: throw,
        };
        trace!(?symbols, "resolved well-known symbols");
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lateinit_core::{IrType, PrimitiveKind};
    use lateinit_registry::{FunctionEntry, PropertyEntry, TypeEntry};

    #[test]
    fn resolves_against_standard_library() {
        let registry = SymbolRegistry::with_standard_library();
        let symbols = WellKnownSymbols::resolve(&registry).unwrap();

        let getter = registry.function(symbols.is_initialized_getter).unwrap();
        assert_eq!(getter.name.simple_name(), "<get-isInitialized>");
        assert!(getter.property.is_some());
        assert_eq!(
            getter.extension_receiver,
            Some(TypeHash::from_name(stdlib::PROPERTY_REF0))
        );
        assert_eq!(
            registry.function(symbols.throw_uninitialized).unwrap().return_type,
            IrType::Nothing
        );
    }

    #[test]
    fn missing_property_is_fatal() {
        let registry = SymbolRegistry::new();
        let err = WellKnownSymbols::resolve(&registry).unwrap_err();
        assert_eq!(
            err,
            LoweringError::WellKnownSymbol {
                name: stdlib::IS_INITIALIZED.into(),
                candidates: 0
            }
        );
    }

    #[test]
    fn wrong_receiver_only_is_fatal() {
        let mut registry = SymbolRegistry::new();
        let ref1 = TypeEntry::new(stdlib::PROPERTY_REF1);
        let ref1_hash = ref1.type_hash;
        registry.register_type(ref1).unwrap();
        registry
            .register_property(PropertyEntry::extension(
                stdlib::IS_INITIALIZED,
                ref1_hash,
                IrType::Primitive(PrimitiveKind::Bool),
            ))
            .unwrap();

        assert!(matches!(
            WellKnownSymbols::resolve(&registry),
            Err(LoweringError::WellKnownSymbol { candidates: 0, .. })
        ));
    }

    #[test]
    fn ambiguous_throw_function_is_fatal() {
        let mut registry = SymbolRegistry::with_standard_library();
        registry
            .register_function(FunctionEntry::new(
                stdlib::THROW_UNINITIALIZED,
                Vec::new(),
                IrType::Nothing,
            ))
            .unwrap();

        let err = WellKnownSymbols::resolve(&registry).unwrap_err();
        assert_eq!(
            err,
            LoweringError::WellKnownSymbol {
                name: stdlib::THROW_UNINITIALIZED.into(),
                candidates: 2
            }
        );
    }
}
