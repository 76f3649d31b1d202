//! Expression nodes.

use ordered_float::OrderedFloat;

use lateinit_core::{IrType, Span, TypeHash};

use crate::{DeclId, ExprId};

/// An expression with its static type and source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub span: Span,
    pub ty: IrType,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: IrType, span: Span) -> Self {
        Self { span, ty, kind }
    }
}

/// Target of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callee {
    /// A function declared in the same unit.
    Declared(DeclId),
    /// A library function, identified by its registry hash.
    Library(TypeHash),
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Null,
    Bool(bool),
    Int(i64),
    Double(OrderedFloat<f64>),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    Ne,
    Add,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Add => "+",
        }
    }
}

/// The closed set of expression forms.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Const(Constant),
    /// Read of a variable or parameter.
    GetValue(DeclId),
    /// Assignment to a variable.
    SetValue { target: DeclId, value: ExprId },
    /// Read of a field; `receiver` is absent for static storage.
    GetField {
        field: DeclId,
        receiver: Option<ExprId>,
    },
    SetField {
        field: DeclId,
        receiver: Option<ExprId>,
        value: ExprId,
    },
    Call {
        callee: Callee,
        dispatch_receiver: Option<ExprId>,
        extension_receiver: Option<ExprId>,
        args: Vec<ExprId>,
    },
    /// A first-class reference to a property, optionally bound to a receiver.
    PropertyReference {
        property: DeclId,
        dispatch_receiver: Option<ExprId>,
        extension_receiver: Option<ExprId>,
    },
    /// Statements evaluated in order; the last one is the block's value.
    Block(Vec<ExprId>),
    If {
        condition: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    /// Introduces a local declaration into the enclosing block.
    Declare(DeclId),
    Return {
        function: DeclId,
        value: Option<ExprId>,
    },
    /// Allocates an instance of a class declared in the unit.
    Construct { class: DeclId },
}

impl ExprKind {
    /// Direct sub-expressions, in evaluation order.
    ///
    /// The initializer of a `Declare`d variable is not included: it belongs
    /// to the declaration.
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            ExprKind::Const(_)
            | ExprKind::GetValue(_)
            | ExprKind::Declare(_)
            | ExprKind::Construct { .. } => Vec::new(),
            ExprKind::SetValue { value, .. } => vec![*value],
            ExprKind::GetField { receiver, .. } => receiver.iter().copied().collect(),
            ExprKind::SetField {
                receiver, value, ..
            } => receiver.iter().copied().chain(Some(*value)).collect(),
            ExprKind::Call {
                dispatch_receiver,
                extension_receiver,
                args,
                ..
            } => dispatch_receiver
                .iter()
                .chain(extension_receiver.iter())
                .chain(args.iter())
                .copied()
                .collect(),
            ExprKind::PropertyReference {
                dispatch_receiver,
                extension_receiver,
                ..
            } => dispatch_receiver
                .iter()
                .chain(extension_receiver.iter())
                .copied()
                .collect(),
            ExprKind::Block(statements) => statements.clone(),
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut children = vec![*condition, *then_branch];
                children.extend(else_branch);
                children
            }
            ExprKind::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            ExprKind::Return { value, .. } => value.iter().copied().collect(),
        }
    }
}
