//! Unit builders shared by the integration tests.

#![allow(dead_code)]

use lateinit::prelude::*;

/// Route pass diagnostics to the test harness; `RUST_LOG` filters them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn int() -> IrType {
    IrType::Primitive(PrimitiveKind::Int32)
}

pub fn boolean() -> IrType {
    IrType::Primitive(PrimitiveKind::Bool)
}

pub fn deferred() -> DeclFlags {
    DeclFlags::DEFERRED_INIT | DeclFlags::MUTABLE
}

fn set_body(unit: &mut CompilationUnit, function: DeclId, body: ExprId) {
    if let Some(f) = unit.decl_mut(function).as_function_mut() {
        f.body = Some(body);
    }
}

/// A class with a deferred-init `name` property, reached through a
/// top-level `next()` that counts how often it is evaluated:
///
/// ```text
/// class Holder {
///     lateinit var name: String
///     fun isNameInitialized(): Boolean = this::name.isInitialized
/// }
/// var calls: Int = 0
/// var current: Holder = Holder()
/// fun next(): Holder { calls = calls + 1; return current }
/// fun readViaNext(): String = next().name
/// fun queryViaNext(): Boolean = next()::name.isInitialized
/// fun assignViaNext(value: String) { next().name = value }
/// fun callCount(): Int = calls
/// ```
pub struct HolderProgram {
    pub unit: CompilationUnit,
    pub class: DeclId,
    pub name: PropertyParts,
    pub is_name_initialized: DeclId,
    pub next: DeclId,
    pub read_via_next: DeclId,
    pub query_via_next: DeclId,
    pub assign_via_next: DeclId,
    pub call_count: DeclId,
}

impl HolderProgram {
    pub fn build(session: &Session) -> Self {
        let is_initialized = session.pass().symbols().is_initialized_getter;
        let ref0 = IrType::class(stdlib::PROPERTY_REF0);
        let mut unit = CompilationUnit::new("holder");

        let class = declare_class(&mut unit, "app::Holder", Span::new(1, 1, 6));
        let holder_ty = IrType::class("app::Holder");
        let name = declare_property(
            &mut unit,
            Some(class),
            "name",
            IrType::string(),
            deferred(),
            Span::new(2, 5, 4),
        );

        let is_name_initialized = declare_function(
            &mut unit,
            Some(class),
            "isNameInitialized",
            boolean(),
            Span::new(3, 5, 17),
        );
        let this = unit[is_name_initialized]
            .as_function()
            .and_then(|f| f.dispatch_receiver)
            .unwrap();
        let mut b = IrBuilder::new(&mut unit, Span::new(3, 28, 24));
        let receiver = b.get_value(this);
        let reference = b.property_reference(name.property, Some(receiver), ref0);
        let query = b.call_with_receivers(
            Callee::Library(is_initialized),
            boolean(),
            None,
            Some(reference),
            Vec::new(),
        );
        let ret = b.ret(is_name_initialized, Some(query));
        let body = b.block(IrType::Unit, vec![ret]);
        set_body(&mut unit, is_name_initialized, body);

        let calls = declare_property(
            &mut unit,
            None,
            "calls",
            int(),
            DeclFlags::MUTABLE,
            Span::new(5, 1, 5),
        );
        let zero = IrBuilder::new(&mut unit, Span::new(5, 17, 1)).int(0);
        if let Some(f) = unit.decl_mut(calls.field).as_field_mut() {
            f.initializer = Some(zero);
        }

        let current = declare_property(
            &mut unit,
            None,
            "current",
            holder_ty,
            DeclFlags::MUTABLE,
            Span::new(6, 1, 7),
        );
        let instance = IrBuilder::new(&mut unit, Span::new(6, 22, 8)).construct(class);
        if let Some(f) = unit.decl_mut(current.field).as_field_mut() {
            f.initializer = Some(instance);
        }

        let next = declare_function(&mut unit, None, "next", holder_ty, Span::new(7, 1, 4));
        let mut b = IrBuilder::new(&mut unit, Span::new(7, 20, 30));
        let old = b.get_field(calls.field, None);
        let one = b.int(1);
        let incremented = b.add(old, one);
        let store = b.set_field(calls.field, None, incremented);
        let value = b.get_field(current.field, None);
        let ret = b.ret(next, Some(value));
        let body = b.block(IrType::Unit, vec![store, ret]);
        set_body(&mut unit, next, body);

        let read_via_next = declare_function(
            &mut unit,
            None,
            "readViaNext",
            IrType::string(),
            Span::new(8, 1, 11),
        );
        let mut b = IrBuilder::new(&mut unit, Span::new(8, 28, 11));
        let target = b.call(Callee::Declared(next), holder_ty, Vec::new());
        let read = b.call_with_receivers(
            Callee::Declared(name.getter),
            IrType::string(),
            Some(target),
            None,
            Vec::new(),
        );
        let ret = b.ret(read_via_next, Some(read));
        let body = b.block(IrType::Unit, vec![ret]);
        set_body(&mut unit, read_via_next, body);

        let query_via_next =
            declare_function(&mut unit, None, "queryViaNext", boolean(), Span::new(9, 1, 12));
        let mut b = IrBuilder::new(&mut unit, Span::new(9, 30, 28));
        let target = b.call(Callee::Declared(next), holder_ty, Vec::new());
        let reference = b.property_reference(name.property, Some(target), ref0);
        let query = b.call_with_receivers(
            Callee::Library(is_initialized),
            boolean(),
            None,
            Some(reference),
            Vec::new(),
        );
        let ret = b.ret(query_via_next, Some(query));
        let body = b.block(IrType::Unit, vec![ret]);
        set_body(&mut unit, query_via_next, body);

        let assign_via_next = declare_function(
            &mut unit,
            None,
            "assignViaNext",
            IrType::Unit,
            Span::new(10, 1, 13),
        );
        let value = unit.alloc_decl(Declaration::parameter(
            "value",
            IrType::string(),
            0,
            Span::new(10, 15, 5),
        ));
        if let Some(f) = unit.decl_mut(assign_via_next).as_function_mut() {
            f.params = vec![value];
        }
        let setter = name.setter.expect("mutable property has a setter");
        let mut b = IrBuilder::new(&mut unit, Span::new(10, 32, 19));
        let target = b.call(Callee::Declared(next), holder_ty, Vec::new());
        let arg = b.get_value(value);
        let assign = b.call_with_receivers(
            Callee::Declared(setter),
            IrType::Unit,
            Some(target),
            None,
            vec![arg],
        );
        let body = b.block(IrType::Unit, vec![assign]);
        set_body(&mut unit, assign_via_next, body);

        let call_count =
            declare_function(&mut unit, None, "callCount", int(), Span::new(11, 1, 9));
        let mut b = IrBuilder::new(&mut unit, Span::new(11, 21, 5));
        let count = b.get_field(calls.field, None);
        let ret = b.ret(call_count, Some(count));
        let body = b.block(IrType::Unit, vec![ret]);
        set_body(&mut unit, call_count, body);

        Self {
            unit,
            class,
            name,
            is_name_initialized,
            next,
            read_via_next,
            query_via_next,
            assign_via_next,
            call_count,
        }
    }
}

/// `fun <function>(): String { lateinit var x: String; ...; return <result> }`
///
/// `body` receives the variable and returns the statements to run before
/// returning the expression it also returns.
pub fn local_function(
    unit: &mut CompilationUnit,
    function: &str,
    body: impl FnOnce(&mut IrBuilder<'_>, DeclId) -> (Vec<ExprId>, ExprId),
) -> DeclId {
    let line = unit.decl_count() as u32 + 1;
    let f = declare_function(unit, None, function, IrType::string(), Span::new(line, 1, 3));
    let x = unit.alloc_decl(
        Declaration::variable("x", IrType::string(), Span::new(line, 20, 1))
            .with_flags(deferred()),
    );
    let mut b = IrBuilder::new(unit, Span::new(line, 30, 1));
    let declare = b.expr(ExprKind::Declare(x), IrType::Unit);
    let (stmts, result) = body(&mut b, x);
    let ret = b.ret(f, Some(result));
    let mut all = vec![declare];
    all.extend(stmts);
    all.push(ret);
    let block = b.block(IrType::Unit, all);
    set_body(unit, f, block);
    f
}
