//! Declaration nodes.

use lateinit_core::{DeclFlags, IrType, Span, TypeHash};

use crate::{DeclId, ExprId};

/// A named declaration in a compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub span: Span,
    pub flags: DeclFlags,
    pub kind: DeclKind,
}

/// The closed set of declaration forms.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    Variable(VariableDecl),
    Property(PropertyDecl),
    Field(FieldDecl),
    Function(FunctionDecl),
    Parameter(ParameterDecl),
    Class(ClassDecl),
}

/// A local variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub ty: IrType,
    pub initializer: Option<ExprId>,
}

/// A property: storage plus accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub ty: IrType,
    /// Owning class; `None` for top-level properties.
    pub owner: Option<DeclId>,
    pub backing_field: Option<DeclId>,
    pub getter: Option<DeclId>,
    pub setter: Option<DeclId>,
}

/// A storage slot, usually the backing field of a property.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub ty: IrType,
    /// Owning class; `None` for static storage.
    pub owner: Option<DeclId>,
    /// The property this field backs, if any.
    pub property: Option<DeclId>,
    pub initializer: Option<ExprId>,
}

/// A function, including property accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub params: Vec<DeclId>,
    /// The implicit `this` parameter of member functions.
    pub dispatch_receiver: Option<DeclId>,
    pub extension_receiver: Option<DeclId>,
    pub return_type: IrType,
    pub body: Option<ExprId>,
    /// Set for property accessors.
    pub property: Option<DeclId>,
}

/// A value parameter or receiver parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub ty: IrType,
    /// Position among the value parameters; `None` for receivers.
    pub index: Option<u32>,
}

/// A class and its members.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub type_hash: TypeHash,
    pub members: Vec<DeclId>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, span: Span, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            span,
            flags: DeclFlags::empty(),
            kind,
        }
    }

    /// A local variable without initializer.
    pub fn variable(name: impl Into<String>, ty: IrType, span: Span) -> Self {
        Self::new(
            name,
            span,
            DeclKind::Variable(VariableDecl {
                ty,
                initializer: None,
            }),
        )
    }

    /// A value parameter at `index`.
    pub fn parameter(name: impl Into<String>, ty: IrType, index: u32, span: Span) -> Self {
        Self::new(
            name,
            span,
            DeclKind::Parameter(ParameterDecl {
                ty,
                index: Some(index),
            }),
        )
    }

    /// A receiver parameter (`this`).
    pub fn receiver(ty: IrType, span: Span) -> Self {
        Self::new(
            "this",
            span,
            DeclKind::Parameter(ParameterDecl { ty, index: None }),
        )
    }

    /// A function with no parameters and no body.
    pub fn function(name: impl Into<String>, return_type: IrType, span: Span) -> Self {
        Self::new(
            name,
            span,
            DeclKind::Function(FunctionDecl {
                params: Vec::new(),
                dispatch_receiver: None,
                extension_receiver: None,
                return_type,
                body: None,
                property: None,
            }),
        )
    }

    pub fn with_flags(mut self, flags: DeclFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_initializer(mut self, initializer: ExprId) -> Self {
        match &mut self.kind {
            DeclKind::Variable(v) => v.initializer = Some(initializer),
            DeclKind::Field(f) => f.initializer = Some(initializer),
            _ => {}
        }
        self
    }

    #[inline]
    pub fn is_deferred_init(&self) -> bool {
        self.flags.is_deferred_init()
    }

    /// The static type of storage-like declarations.
    pub fn ty(&self) -> Option<IrType> {
        match &self.kind {
            DeclKind::Variable(v) => Some(v.ty),
            DeclKind::Property(p) => Some(p.ty),
            DeclKind::Field(f) => Some(f.ty),
            DeclKind::Parameter(p) => Some(p.ty),
            DeclKind::Function(f) => Some(f.return_type),
            DeclKind::Class(_) => None,
        }
    }

    /// Short name of the declaration form, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            DeclKind::Variable(_) => "variable",
            DeclKind::Property(_) => "property",
            DeclKind::Field(_) => "field",
            DeclKind::Function(_) => "function",
            DeclKind::Parameter(_) => "parameter",
            DeclKind::Class(_) => "class",
        }
    }

    pub fn as_variable(&self) -> Option<&VariableDecl> {
        match &self.kind {
            DeclKind::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_variable_mut(&mut self) -> Option<&mut VariableDecl> {
        match &mut self.kind {
            DeclKind::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDecl> {
        match &self.kind {
            DeclKind::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_property_mut(&mut self) -> Option<&mut PropertyDecl> {
        match &mut self.kind {
            DeclKind::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldDecl> {
        match &self.kind {
            DeclKind::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_field_mut(&mut self) -> Option<&mut FieldDecl> {
        match &mut self.kind {
            DeclKind::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.kind {
            DeclKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionDecl> {
        match &mut self.kind {
            DeclKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDecl> {
        match &self.kind {
            DeclKind::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassDecl> {
        match &mut self.kind {
            DeclKind::Class(c) => Some(c),
            _ => None,
        }
    }
}
