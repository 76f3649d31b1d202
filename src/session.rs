//! One-stop setup: a standard-library registry plus a configured pass.

use lateinit_interp::Interpreter;
use lateinit_ir::CompilationUnit;
use lateinit_lowering::{DeferredInitLowering, LoweringOptions, LoweringPass, LoweringStats};
use lateinit_registry::SymbolRegistry;
use tracing::debug;

use crate::Result;

/// A registry and the lowering pass resolved against it.
pub struct Session {
    registry: SymbolRegistry,
    pass: DeferredInitLowering,
}

impl Session {
    /// Create a session over the standard library.
    pub fn new(options: LoweringOptions) -> Result<Self> {
        Self::with_registry(SymbolRegistry::with_standard_library(), options)
    }

    /// Create a session over a caller-populated registry.
    pub fn with_registry(registry: SymbolRegistry, options: LoweringOptions) -> Result<Self> {
        let pass = DeferredInitLowering::new(&registry, options)?;
        debug!(
            types = registry.type_count(),
            functions = registry.function_count(),
            ?options,
            "session ready"
        );
        Ok(Self { registry, pass })
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    pub fn pass(&self) -> &DeferredInitLowering {
        &self.pass
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn lower(&self, unit: &mut CompilationUnit) -> Result<LoweringStats> {
        Ok(self.pass.lower(unit)?)
    }

    /// An evaluator for `unit` over this session's registry.
    pub fn interpreter<'a>(&'a self, unit: &'a CompilationUnit) -> Interpreter<'a> {
        Interpreter::new(unit, &self.registry)
    }
}

/// Lower `unit` against the standard library.
pub fn lower_unit(unit: &mut CompilationUnit, options: LoweringOptions) -> Result<LoweringStats> {
    Session::new(options)?.lower(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use lateinit_core::{DeclFlags, IrType, PrimitiveKind, Span};
    use lateinit_ir::declare_property;

    #[test]
    fn lowering_errors_are_wrapped() {
        let mut unit = CompilationUnit::new("t");
        declare_property(
            &mut unit,
            None,
            "count",
            IrType::Primitive(PrimitiveKind::Int32),
            DeclFlags::DEFERRED_INIT,
            Span::new(1, 1, 5),
        );
        let err = lower_unit(&mut unit, LoweringOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Lowering(_)));
        assert!(err.to_string().starts_with("lowering failed: at 1:1:"));
    }

    #[test]
    fn empty_registry_cannot_host_the_pass() {
        let result = Session::with_registry(SymbolRegistry::new(), LoweringOptions::default());
        assert!(matches!(result, Err(Error::Lowering(_))));
    }
}
