//! Child enumeration for tree traversals.
//!
//! The IR is a tree over the arenas: every expression has at most one
//! parent and every nested declaration one owner. [`DeclChildren`] lists
//! what a declaration owns, in the order a traversal visits it.

use rustc_hash::FxHashSet;

use crate::{CompilationUnit, DeclId, DeclKind, Declaration, ExprId, ExprKind};

/// What a declaration owns.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeclChildren {
    pub decls: Vec<DeclId>,
    pub exprs: Vec<ExprId>,
}

impl Declaration {
    /// Nested declarations and expressions owned by this declaration.
    pub fn children(&self) -> DeclChildren {
        match &self.kind {
            DeclKind::Variable(v) => DeclChildren {
                decls: Vec::new(),
                exprs: v.initializer.into_iter().collect(),
            },
            DeclKind::Property(p) => DeclChildren {
                decls: [p.backing_field, p.getter, p.setter]
                    .into_iter()
                    .flatten()
                    .collect(),
                exprs: Vec::new(),
            },
            DeclKind::Field(f) => DeclChildren {
                decls: Vec::new(),
                exprs: f.initializer.into_iter().collect(),
            },
            DeclKind::Function(f) => DeclChildren {
                decls: f
                    .dispatch_receiver
                    .iter()
                    .chain(f.extension_receiver.iter())
                    .chain(f.params.iter())
                    .copied()
                    .collect(),
                exprs: f.body.into_iter().collect(),
            },
            DeclKind::Parameter(_) => DeclChildren::default(),
            DeclKind::Class(c) => DeclChildren {
                decls: c.members.clone(),
                exprs: Vec::new(),
            },
        }
    }
}

/// A node reachable from more than one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedNode {
    Decl(DeclId),
    Expr(ExprId),
}

impl CompilationUnit {
    /// Find the first node reachable twice from the top-level declarations.
    ///
    /// A well-formed unit is a tree, so this returns `None`. Rewrites that
    /// reuse a sub-expression must move it, never duplicate the handle.
    pub fn find_shared_node(&self) -> Option<SharedNode> {
        let mut seen_decls = FxHashSet::default();
        let mut seen_exprs = FxHashSet::default();
        let mut decl_stack: Vec<DeclId> = self.top_level().iter().rev().copied().collect();
        let mut expr_stack: Vec<ExprId> = Vec::new();

        loop {
            if let Some(expr) = expr_stack.pop() {
                if !seen_exprs.insert(expr) {
                    return Some(SharedNode::Expr(expr));
                }
                let kind = &self.expr(expr).kind;
                if let ExprKind::Declare(decl) = kind {
                    decl_stack.push(*decl);
                }
                expr_stack.extend(kind.children().into_iter().rev());
                continue;
            }
            let Some(decl) = decl_stack.pop() else {
                return None;
            };
            if !seen_decls.insert(decl) {
                return Some(SharedNode::Decl(decl));
            }
            let children = self.decl(decl).children();
            decl_stack.extend(children.decls.into_iter().rev());
            expr_stack.extend(children.exprs.into_iter().rev());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Constant, Expr};
    use lateinit_core::{IrType, Span};

    fn string_const(unit: &mut CompilationUnit, s: &str) -> ExprId {
        unit.alloc_expr(Expr::new(
            ExprKind::Const(Constant::Str(s.into())),
            IrType::string(),
            Span::default(),
        ))
    }

    #[test]
    fn tree_has_no_shared_nodes() {
        let mut unit = CompilationUnit::new("tree");
        let init = string_const(&mut unit, "a");
        let var = unit.alloc_decl(
            Declaration::variable("a", IrType::string(), Span::default()).with_initializer(init),
        );
        unit.add_top_level(var);
        assert_eq!(unit.find_shared_node(), None);
    }

    #[test]
    fn duplicated_expression_is_reported() {
        let mut unit = CompilationUnit::new("dag");
        let s = string_const(&mut unit, "a");
        let block = unit.alloc_expr(Expr::new(
            ExprKind::Block(vec![s, s]),
            IrType::string(),
            Span::default(),
        ));
        let var = unit.alloc_decl(
            Declaration::variable("a", IrType::string(), Span::default()).with_initializer(block),
        );
        unit.add_top_level(var);
        assert_eq!(unit.find_shared_node(), Some(SharedNode::Expr(s)));
    }

    #[test]
    fn property_children_order() {
        let mut unit = CompilationUnit::new("p");
        let prop = crate::declare_property(
            &mut unit,
            None,
            "p",
            IrType::string(),
            lateinit_core::DeclFlags::MUTABLE,
            Span::default(),
        );
        let children = unit.decl(prop.property).children();
        assert_eq!(
            children.decls,
            vec![prop.field, prop.getter, prop.setter.unwrap()]
        );
        assert!(children.exprs.is_empty());
    }
}
