//! Declaration helpers that mirror what the front end emits.
//!
//! A property is lowered from the start into its parts: a backing field, a
//! getter returning the field and, for mutable properties, a setter storing
//! into it. Member accessors take the instance as their dispatch receiver.

use lateinit_core::{DeclFlags, IrType, QualifiedName, Span};

use crate::{
    ClassDecl, CompilationUnit, DeclId, DeclKind, Declaration, FieldDecl, IrBuilder, PropertyDecl,
};

/// Handles of a property and the declarations it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyParts {
    pub property: DeclId,
    pub field: DeclId,
    pub getter: DeclId,
    pub setter: Option<DeclId>,
}

/// Declare a top-level class named by its qualified name.
pub fn declare_class(unit: &mut CompilationUnit, qualified_name: &str, span: Span) -> DeclId {
    let name = QualifiedName::from_qualified_string(qualified_name);
    let class = unit.alloc_decl(Declaration::new(
        name.simple_name(),
        span,
        DeclKind::Class(ClassDecl {
            type_hash: name.to_type_hash(),
            members: Vec::new(),
        }),
    ));
    unit.add_top_level(class);
    class
}

/// Declare a function in `owner`, or at top level when `owner` is `None`.
///
/// Member functions get a `this` dispatch receiver.
pub fn declare_function(
    unit: &mut CompilationUnit,
    owner: Option<DeclId>,
    name: &str,
    return_type: IrType,
    span: Span,
) -> DeclId {
    let receiver = owner.map(|class| {
        let ty = class_type(unit, class);
        unit.alloc_decl(Declaration::receiver(ty, span))
    });
    let mut decl = Declaration::function(name, return_type, span);
    if let Some(f) = decl.as_function_mut() {
        f.dispatch_receiver = receiver;
    }
    let function = unit.alloc_decl(decl);
    attach(unit, owner, function);
    function
}

/// Declare a property with a backing field and default accessors.
///
/// The field starts without an initializer; a setter is generated when
/// `flags` contains [`DeclFlags::MUTABLE`].
pub fn declare_property(
    unit: &mut CompilationUnit,
    owner: Option<DeclId>,
    name: &str,
    ty: IrType,
    flags: DeclFlags,
    span: Span,
) -> PropertyParts {
    let flags = if owner.is_none() {
        flags | DeclFlags::STATIC
    } else {
        flags
    };
    let property = unit.alloc_decl(
        Declaration::new(
            name,
            span,
            DeclKind::Property(PropertyDecl {
                ty,
                owner,
                backing_field: None,
                getter: None,
                setter: None,
            }),
        )
        .with_flags(flags),
    );

    let field = unit.alloc_decl(
        Declaration::new(
            name,
            span,
            DeclKind::Field(FieldDecl {
                ty,
                owner,
                property: Some(property),
                initializer: None,
            }),
        )
        .with_flags(flags & (DeclFlags::STATIC | DeclFlags::MUTABLE)),
    );

    let getter = declare_getter(unit, owner, property, field, name, ty, span);
    let setter = flags
        .is_mutable()
        .then(|| declare_setter(unit, owner, property, field, name, ty, span));

    if let Some(p) = unit.decl_mut(property).as_property_mut() {
        p.backing_field = Some(field);
        p.getter = Some(getter);
        p.setter = setter;
    }
    attach(unit, owner, property);

    PropertyParts {
        property,
        field,
        getter,
        setter,
    }
}

fn declare_getter(
    unit: &mut CompilationUnit,
    owner: Option<DeclId>,
    property: DeclId,
    field: DeclId,
    name: &str,
    ty: IrType,
    span: Span,
) -> DeclId {
    let receiver = owner.map(|class| {
        let ty = class_type(unit, class);
        unit.alloc_decl(Declaration::receiver(ty, span))
    });
    let mut decl = Declaration::function(format!("<get-{name}>"), ty, span);
    if let Some(f) = decl.as_function_mut() {
        f.dispatch_receiver = receiver;
        f.property = Some(property);
    }
    let getter = unit.alloc_decl(decl);

    let mut b = IrBuilder::new(unit, span);
    let this = receiver.map(|r| b.get_value(r));
    let read = b.get_field(field, this);
    let ret = b.ret(getter, Some(read));
    let body = b.block(IrType::Unit, vec![ret]);
    if let Some(f) = unit.decl_mut(getter).as_function_mut() {
        f.body = Some(body);
    }
    getter
}

fn declare_setter(
    unit: &mut CompilationUnit,
    owner: Option<DeclId>,
    property: DeclId,
    field: DeclId,
    name: &str,
    ty: IrType,
    span: Span,
) -> DeclId {
    let receiver = owner.map(|class| {
        let ty = class_type(unit, class);
        unit.alloc_decl(Declaration::receiver(ty, span))
    });
    let value = unit.alloc_decl(Declaration::parameter("value", ty, 0, span));
    let mut decl = Declaration::function(format!("<set-{name}>"), IrType::Unit, span);
    if let Some(f) = decl.as_function_mut() {
        f.dispatch_receiver = receiver;
        f.params = vec![value];
        f.property = Some(property);
    }
    let setter = unit.alloc_decl(decl);

    let mut b = IrBuilder::new(unit, span);
    let this = receiver.map(|r| b.get_value(r));
    let new_value = b.get_value(value);
    let store = b.set_field(field, this, new_value);
    let body = b.block(IrType::Unit, vec![store]);
    if let Some(f) = unit.decl_mut(setter).as_function_mut() {
        f.body = Some(body);
    }
    setter
}

fn class_type(unit: &CompilationUnit, class: DeclId) -> IrType {
    match unit.decl(class).as_class() {
        Some(c) => IrType::Reference {
            class: c.type_hash,
            nullable: false,
        },
        None => IrType::any(),
    }
}

fn attach(unit: &mut CompilationUnit, owner: Option<DeclId>, member: DeclId) {
    if let Some(class) = owner.and_then(|o| unit.decl_mut(o).as_class_mut()) {
        class.members.push(member);
        return;
    }
    unit.add_top_level(member);
}
