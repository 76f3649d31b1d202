//! Deferred-initialization lowering.
//!
//! A deferred-init declaration is a variable or property declared without
//! an initializer whose type has no implicit default. This pass gives it a
//! null sentinel as storage and guards every access with an explicit check
//! that raises `throwUninitializedPropertyAccessException` at run time.
//!
//! ## Rewrites
//!
//! ```text
//! lateinit var x: String          =>  lateinit var x: String = null
//! x                               =>  { if ((x == null)) throw...("x"); x }
//! this::p.isInitialized           =>  (this.#p != null)
//! fun <get-p>() { return #p }     =>  fun <get-p>() { val tmp = this.#p;
//!                                         if ((tmp != null)) return tmp else throw...("p") }
//! ```
//!
//! Violations of the front end's guarantees (an initializer already present,
//! a primitive type, an extension receiver) are reported as
//! [`LoweringError`] and stop the pass.
//!
//! ## Example
//!
//! ```
//! use lateinit_core::{DeclFlags, IrType, Span};
//! use lateinit_ir::{CompilationUnit, Declaration};
//! use lateinit_lowering::{DeferredInitLowering, LoweringOptions, LoweringPass};
//! use lateinit_registry::SymbolRegistry;
//!
//! let registry = SymbolRegistry::with_standard_library();
//! let pass = DeferredInitLowering::new(&registry, LoweringOptions::default()).unwrap();
//!
//! let mut unit = CompilationUnit::new("demo");
//! let x = unit.alloc_decl(
//!     Declaration::variable("x", IrType::string(), Span::new(1, 1, 1))
//!         .with_flags(DeclFlags::DEFERRED_INIT | DeclFlags::MUTABLE),
//! );
//! unit.add_top_level(x);
//!
//! let stats = pass.lower(&mut unit).unwrap();
//! assert_eq!(stats.variables, 1);
//! assert!(unit[x].as_variable().unwrap().initializer.is_some());
//! ```

mod driver;
mod options;
mod pass;
mod rules;
mod symbols;

pub use lateinit_core::LoweringError;
pub use options::LoweringOptions;
pub use pass::{DeferredInitLowering, LoweringPass, LoweringStats};
pub use symbols::WellKnownSymbols;
