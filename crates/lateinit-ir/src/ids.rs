//! Arena handles.
//!
//! A handle is only meaningful for the [`CompilationUnit`](crate::CompilationUnit)
//! that minted it.

use std::fmt;

/// Handle of a declaration in a unit's declaration arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

impl DeclId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        DeclId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Handle of an expression in a unit's expression arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expr#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_display() {
        assert_eq!(DeclId::new(3).to_string(), "decl#3");
        assert_eq!(ExprId::new(7).to_string(), "expr#7");
    }

    #[test]
    fn handle_index() {
        assert_eq!(DeclId::new(12).index(), 12);
        assert_eq!(ExprId::new(0).index(), 0);
    }
}
