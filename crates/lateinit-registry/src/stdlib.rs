//! The standard library symbols the deferred-initialization lowering needs.

use lateinit_core::{IrType, PrimitiveKind, RegistrationError, TypeHash};

use crate::{FunctionEntry, PropertyEntry, SymbolRegistry, TypeEntry};

pub const ANY: &str = "lang::Any";
pub const STRING: &str = "lang::String";
/// Reflective reference to a property with no unbound receiver.
pub const PROPERTY_REF0: &str = "lang::reflect::PropertyRef0";
/// Reflective reference to a property with one unbound receiver.
pub const PROPERTY_REF1: &str = "lang::reflect::PropertyRef1";
/// Extension property answering whether a deferred-init property was assigned.
pub const IS_INITIALIZED: &str = "lang::isInitialized";
/// Runtime function raised on premature access.
pub const THROW_UNINITIALIZED: &str = "lang::throwUninitializedPropertyAccessException";

impl SymbolRegistry {
    /// A registry pre-populated with the standard library.
    pub fn with_standard_library() -> Self {
        let mut registry = Self::new();
        // the names are fixed and distinct, so registration cannot collide
        if let Err(err) = registry.register_standard_library() {
            unreachable!("standard library registration failed: {err}");
        }
        registry
    }

    /// Register the standard library symbols into this registry.
    pub fn register_standard_library(&mut self) -> Result<(), RegistrationError> {
        for name in [ANY, STRING, PROPERTY_REF0, PROPERTY_REF1] {
            self.register_type(TypeEntry::new(name))?;
        }

        let bool_ty = IrType::Primitive(PrimitiveKind::Bool);
        for receiver in [PROPERTY_REF0, PROPERTY_REF1] {
            self.register_property(PropertyEntry::extension(
                IS_INITIALIZED,
                TypeHash::from_name(receiver),
                bool_ty,
            ))?;
        }

        self.register_function(FunctionEntry::new(
            THROW_UNINITIALIZED,
            vec![IrType::string().make_nullable()],
            IrType::Nothing,
        ))
    }
}
