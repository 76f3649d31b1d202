//! Position-anchored node construction.
//!
//! Every node an [`IrBuilder`] creates carries the builder's current span,
//! so synthesized code maps back to the source construct it replaces.
//!
//! ```
//! use lateinit_core::{IrType, Span};
//! use lateinit_ir::{CompilationUnit, Declaration, IrBuilder};
//!
//! let mut unit = CompilationUnit::new("demo");
//! let x = unit.alloc_decl(Declaration::variable("x", IrType::string(), Span::new(1, 5, 1)));
//!
//! let mut b = IrBuilder::new(&mut unit, Span::new(2, 1, 1));
//! let read = b.get_value(x);
//! let test = b.equals_null(read);
//! assert_eq!(unit.expr(test).span, Span::new(2, 1, 1));
//! ```

use lateinit_core::{IrType, PrimitiveKind, Span};

use crate::{
    BinaryOp, Callee, CompilationUnit, Constant, DeclId, Declaration, Expr, ExprId, ExprKind,
};

pub struct IrBuilder<'u> {
    unit: &'u mut CompilationUnit,
    span: Span,
}

impl<'u> IrBuilder<'u> {
    pub fn new(unit: &'u mut CompilationUnit, span: Span) -> Self {
        Self { unit, span }
    }

    /// Anchor subsequently created nodes at `span`.
    pub fn at(&mut self, span: Span) -> &mut Self {
        self.span = span;
        self
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn unit(&self) -> &CompilationUnit {
        &*self.unit
    }

    pub fn unit_mut(&mut self) -> &mut CompilationUnit {
        &mut *self.unit
    }

    /// Allocate a node of any kind at the current span.
    pub fn expr(&mut self, kind: ExprKind, ty: IrType) -> ExprId {
        self.unit.alloc_expr(Expr::new(kind, ty, self.span))
    }

    /// Build a node at the current span without allocating it, for use with
    /// [`CompilationUnit::replace_expr`].
    pub fn node(&self, kind: ExprKind, ty: IrType) -> Expr {
        Expr::new(kind, ty, self.span)
    }

    fn decl_type(&self, decl: DeclId) -> IrType {
        self.unit.decl(decl).ty().unwrap_or(IrType::Unit)
    }

    pub fn null(&mut self, ty: IrType) -> ExprId {
        self.expr(ExprKind::Const(Constant::Null), ty.make_nullable())
    }

    pub fn string(&mut self, value: impl Into<String>) -> ExprId {
        self.expr(ExprKind::Const(Constant::Str(value.into())), IrType::string())
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.expr(
            ExprKind::Const(Constant::Int(value)),
            IrType::Primitive(PrimitiveKind::Int32),
        )
    }

    pub fn get_value(&mut self, decl: DeclId) -> ExprId {
        let ty = self.decl_type(decl);
        self.expr(ExprKind::GetValue(decl), ty)
    }

    pub fn set_value(&mut self, target: DeclId, value: ExprId) -> ExprId {
        self.expr(ExprKind::SetValue { target, value }, IrType::Unit)
    }

    pub fn get_field(&mut self, field: DeclId, receiver: Option<ExprId>) -> ExprId {
        let ty = self.decl_type(field);
        self.expr(ExprKind::GetField { field, receiver }, ty)
    }

    pub fn set_field(&mut self, field: DeclId, receiver: Option<ExprId>, value: ExprId) -> ExprId {
        self.expr(
            ExprKind::SetField {
                field,
                receiver,
                value,
            },
            IrType::Unit,
        )
    }

    pub fn call(&mut self, callee: Callee, ty: IrType, args: Vec<ExprId>) -> ExprId {
        self.call_with_receivers(callee, ty, None, None, args)
    }

    pub fn call_with_receivers(
        &mut self,
        callee: Callee,
        ty: IrType,
        dispatch_receiver: Option<ExprId>,
        extension_receiver: Option<ExprId>,
        args: Vec<ExprId>,
    ) -> ExprId {
        self.expr(
            ExprKind::Call {
                callee,
                dispatch_receiver,
                extension_receiver,
                args,
            },
            ty,
        )
    }

    pub fn property_reference(
        &mut self,
        property: DeclId,
        dispatch_receiver: Option<ExprId>,
        ty: IrType,
    ) -> ExprId {
        self.expr(
            ExprKind::PropertyReference {
                property,
                dispatch_receiver,
                extension_receiver: None,
            },
            ty,
        )
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId, ty: IrType) -> ExprId {
        self.expr(ExprKind::Binary { op, lhs, rhs }, ty)
    }

    pub fn add(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        let ty = self.unit.expr(lhs).ty;
        self.binary(BinaryOp::Add, lhs, rhs, ty)
    }

    /// `value == null`
    pub fn equals_null(&mut self, value: ExprId) -> ExprId {
        let null = self.null(IrType::nullable_any());
        self.binary(
            BinaryOp::Eq,
            value,
            null,
            IrType::Primitive(PrimitiveKind::Bool),
        )
    }

    /// `value != null`
    pub fn not_equals_null(&mut self, value: ExprId) -> ExprId {
        let null = self.null(IrType::nullable_any());
        self.binary(
            BinaryOp::Ne,
            value,
            null,
            IrType::Primitive(PrimitiveKind::Bool),
        )
    }

    /// `if (condition) then_branch`, evaluated for effect.
    pub fn if_then(&mut self, condition: ExprId, then_branch: ExprId) -> ExprId {
        self.expr(
            ExprKind::If {
                condition,
                then_branch,
                else_branch: None,
            },
            IrType::Unit,
        )
    }

    pub fn if_then_else(
        &mut self,
        ty: IrType,
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    ) -> ExprId {
        self.expr(
            ExprKind::If {
                condition,
                then_branch,
                else_branch: Some(else_branch),
            },
            ty,
        )
    }

    pub fn block(&mut self, ty: IrType, statements: Vec<ExprId>) -> ExprId {
        self.expr(ExprKind::Block(statements), ty)
    }

    /// Declare a local variable initialized with `value`.
    ///
    /// Returns the variable and its declaration statement.
    pub fn declare(&mut self, name: impl Into<String>, value: ExprId) -> (DeclId, ExprId) {
        let ty = self.unit.expr(value).ty;
        let decl = self
            .unit
            .alloc_decl(Declaration::variable(name, ty, self.span).with_initializer(value));
        let stmt = self.expr(ExprKind::Declare(decl), IrType::Unit);
        (decl, stmt)
    }

    /// Evaluate `value` once into a fresh compiler temporary.
    pub fn temporary(&mut self, value: ExprId) -> (DeclId, ExprId) {
        let name = format!("tmp{}", self.unit.decl_count());
        self.declare(name, value)
    }

    pub fn ret(&mut self, function: DeclId, value: Option<ExprId>) -> ExprId {
        self.expr(ExprKind::Return { function, value }, IrType::Nothing)
    }

    pub fn construct(&mut self, class: DeclId) -> ExprId {
        let ty = match self.unit.decl(class).as_class() {
            Some(c) => IrType::Reference {
                class: c.type_hash,
                nullable: false,
            },
            None => IrType::Unit,
        };
        self.expr(ExprKind::Construct { class }, ty)
    }
}
