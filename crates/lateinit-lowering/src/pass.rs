//! Pass entry point.

use lateinit_core::LoweringError;
use lateinit_ir::CompilationUnit;
use lateinit_registry::SymbolRegistry;
use tracing::{Level, span};

use crate::driver::Lowerer;
use crate::{LoweringOptions, WellKnownSymbols};

/// A unit-at-a-time IR transformation.
pub trait LoweringPass {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite `unit` in place.
    fn lower(&self, unit: &mut CompilationUnit) -> Result<LoweringStats, LoweringError>;
}

/// What a [`DeferredInitLowering`] run rewrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoweringStats {
    /// Deferred-init variables given a null initializer.
    pub variables: usize,
    /// Reads of deferred-init variables wrapped in a null check.
    pub reads: usize,
    /// `isInitialized` queries replaced by a field comparison.
    pub queries: usize,
    /// Deferred-init properties whose getter and backing field were rewritten.
    pub properties: usize,
}

impl LoweringStats {
    /// Total number of rewrites.
    pub fn total(&self) -> usize {
        self.variables + self.reads + self.queries + self.properties
    }
}

/// The deferred-initialization lowering.
///
/// Holds only resolved symbol hashes and options, so one instance can
/// lower any number of units, from several threads if each unit is owned
/// by one of them.
#[derive(Debug, Clone)]
pub struct DeferredInitLowering {
    symbols: WellKnownSymbols,
    options: LoweringOptions,
}

impl DeferredInitLowering {
    /// Create the pass, resolving its library symbols from `registry`.
    pub fn new(registry: &SymbolRegistry, options: LoweringOptions) -> Result<Self, LoweringError> {
        Ok(Self {
            symbols: WellKnownSymbols::resolve(registry)?,
            options,
        })
    }

    pub fn symbols(&self) -> &WellKnownSymbols {
        &self.symbols
    }

    pub fn options(&self) -> &LoweringOptions {
        &self.options
    }
}

impl LoweringPass for DeferredInitLowering {
    fn name(&self) -> &'static str {
        "deferred-init"
    }

    /// Lower every top-level declaration of `unit`.
    ///
    /// Stops at the first invariant violation; the unit is then partially
    /// rewritten and must be discarded.
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn lower(&self, unit: &mut CompilationUnit) -> Result<LoweringStats, LoweringError> {
        let _span = span!(Level::INFO, "deferred_init_lowering", unit = unit.name()).entered();

        let top_level = unit.top_level().to_vec();
        let mut lowerer = Lowerer::new(unit, &self.symbols, &self.options);
        for decl in top_level {
            lowerer.lower_decl(decl)?;
        }
        let stats = lowerer.finish();

        tracing::info!(
            variables = stats.variables,
            reads = stats.reads,
            queries = stats.queries,
            properties = stats.properties,
            "lowering complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn pass_is_shareable() {
        assert_send_sync::<DeferredInitLowering>();
    }

    #[test]
    fn empty_unit_is_untouched() {
        let registry = SymbolRegistry::with_standard_library();
        let pass = DeferredInitLowering::new(&registry, LoweringOptions::default()).unwrap();
        let mut unit = CompilationUnit::new("empty");
        assert_eq!(pass.lower(&mut unit).unwrap(), LoweringStats::default());
        assert_eq!(pass.name(), "deferred-init");
    }

    #[test]
    fn construction_fails_without_library() {
        let registry = SymbolRegistry::new();
        assert!(DeferredInitLowering::new(&registry, LoweringOptions::default()).is_err());
    }
}
