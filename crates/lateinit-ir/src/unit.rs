//! Per-unit arenas.

use std::ops::{Index, IndexMut};

use crate::{DeclId, Declaration, Expr, ExprId};

/// One compilation unit: the declaration and expression arenas plus the
/// ordered list of top-level declarations.
///
/// Nodes are never freed. A rewrite replaces the contents of a slot, so a
/// handle stays valid for the lifetime of the unit.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    name: String,
    decls: Vec<Declaration>,
    exprs: Vec<Expr>,
    top_level: Vec<DeclId>,
}

impl CompilationUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alloc_decl(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId::new(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    pub fn add_top_level(&mut self, decl: DeclId) {
        self.top_level.push(decl);
    }

    pub fn top_level(&self) -> &[DeclId] {
        &self.top_level
    }

    /// # Panics
    ///
    /// Panics if `id` was minted by another unit.
    #[inline]
    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    #[inline]
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.index()]
    }

    /// # Panics
    ///
    /// Panics if `id` was minted by another unit.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    pub fn get_decl(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    pub fn get_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    /// Replace the node stored at `id`, returning the previous one.
    pub fn replace_expr(&mut self, id: ExprId, expr: Expr) -> Expr {
        std::mem::replace(&mut self.exprs[id.index()], expr)
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId::new(i as u32), d))
    }

    /// Find a declaration by name; the first one allocated wins.
    pub fn find_decl(&self, name: &str) -> Option<DeclId> {
        self.decls().find(|(_, d)| d.name == name).map(|(id, _)| id)
    }
}

impl Index<DeclId> for CompilationUnit {
    type Output = Declaration;

    fn index(&self, id: DeclId) -> &Declaration {
        self.decl(id)
    }
}

impl IndexMut<DeclId> for CompilationUnit {
    fn index_mut(&mut self, id: DeclId) -> &mut Declaration {
        self.decl_mut(id)
    }
}

impl Index<ExprId> for CompilationUnit {
    type Output = Expr;

    fn index(&self, id: ExprId) -> &Expr {
        self.expr(id)
    }
}

impl IndexMut<ExprId> for CompilationUnit {
    fn index_mut(&mut self, id: ExprId) -> &mut Expr {
        self.expr_mut(id)
    }
}
