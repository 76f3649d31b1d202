use lateinit_core::IrType;
use lateinit_ir::{Callee, ExprId, IrBuilder};

use crate::{LoweringOptions, WellKnownSymbols};

/// `throwUninitializedPropertyAccessException(name)`, typed `Nothing`.
///
/// The name argument is only passed when the options ask for it.
pub(super) fn throw_uninitialized(
    b: &mut IrBuilder<'_>,
    symbols: &WellKnownSymbols,
    options: &LoweringOptions,
    name: &str,
) -> ExprId {
    let args = if options.generate_property_name_in_assertion {
        vec![b.string(name)]
    } else {
        Vec::new()
    };
    b.call(Callee::Library(symbols.throw_uninitialized), IrType::Nothing, args)
}
