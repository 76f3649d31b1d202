//! Textual dumps of a unit.
//!
//! The format is line-oriented for declarations and single-line for
//! expressions, which keeps lowering tests readable:
//!
//! ```text
//! fun main(): Unit {
//!   lateinit var x: String = null
//! }
//! ```

use std::fmt::Write;

use lateinit_core::TypeHash;

use crate::{Callee, CompilationUnit, Constant, DeclId, DeclKind, ExprId, ExprKind};

/// Resolves display names of library symbols referenced by hash.
pub trait LibraryNames {
    fn library_name(&self, hash: TypeHash) -> Option<String>;
}

impl LibraryNames for () {
    fn library_name(&self, _hash: TypeHash) -> Option<String> {
        None
    }
}

/// Dump every top-level declaration of `unit`.
pub fn format_unit(unit: &CompilationUnit, names: &dyn LibraryNames) -> String {
    let mut printer = Printer {
        unit,
        names,
        out: String::new(),
    };
    for &decl in unit.top_level() {
        printer.decl(decl, 0);
    }
    printer.out
}

/// Render one expression on a single line.
pub fn format_expr(unit: &CompilationUnit, expr: ExprId, names: &dyn LibraryNames) -> String {
    let printer = Printer {
        unit,
        names,
        out: String::new(),
    };
    printer.expr(expr)
}

struct Printer<'a> {
    unit: &'a CompilationUnit,
    names: &'a dyn LibraryNames,
    out: String,
}

impl Printer<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn decl(&mut self, id: DeclId, depth: usize) {
        let unit = self.unit;
        let decl = unit.decl(id);
        let name = decl.name.as_str();
        let lateinit = if decl.is_deferred_init() { "lateinit " } else { "" };
        let keyword = if decl.flags.is_mutable() || decl.is_deferred_init() {
            "var"
        } else {
            "val"
        };
        match &decl.kind {
            DeclKind::Class(c) => {
                self.line(depth, &format!("class {name} {{"));
                for &member in &c.members {
                    self.decl(member, depth + 1);
                }
                self.line(depth, "}");
            }
            DeclKind::Property(p) => {
                let text = format!("{lateinit}{keyword} {name}: {}", p.ty);
                let parts = decl.children().decls;
                self.line(depth, &text);
                for part in parts {
                    self.decl(part, depth + 1);
                }
            }
            DeclKind::Field(f) => {
                let mut text = format!("field {name}: {}", f.ty);
                if let Some(init) = f.initializer {
                    let _ = write!(text, " = {}", self.expr(init));
                }
                self.line(depth, &text);
            }
            DeclKind::Variable(v) => {
                let mut text = format!("{lateinit}{keyword} {name}: {}", v.ty);
                if let Some(init) = v.initializer {
                    let _ = write!(text, " = {}", self.expr(init));
                }
                self.line(depth, &text);
            }
            DeclKind::Function(f) => {
                let params: Vec<String> = f
                    .params
                    .iter()
                    .map(|&p| {
                        let param = self.unit.decl(p);
                        let ty = param.ty().map(|t| t.to_string()).unwrap_or_default();
                        format!("{}: {ty}", param.name)
                    })
                    .collect();
                let mut text = format!("fun {name}({}): {}", params.join(", "), f.return_type);
                match f.body {
                    Some(body) => {
                        let _ = write!(text, " {}", self.expr(body));
                    }
                    None => text.push(';'),
                }
                self.line(depth, &text);
            }
            DeclKind::Parameter(p) => {
                self.line(depth, &format!("{name}: {}", p.ty));
            }
        }
    }

    fn name(&self, id: DeclId) -> &str {
        &self.unit.decl(id).name
    }

    fn receiver_prefix(&self, receiver: Option<ExprId>) -> String {
        receiver
            .map(|r| format!("{}.", self.expr(r)))
            .unwrap_or_default()
    }

    fn list(&self, items: &[ExprId]) -> String {
        items
            .iter()
            .map(|&e| self.expr(e))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn expr(&self, id: ExprId) -> String {
        match &self.unit.expr(id).kind {
            ExprKind::Const(c) => match c {
                Constant::Null => "null".to_string(),
                Constant::Bool(b) => b.to_string(),
                Constant::Int(i) => i.to_string(),
                Constant::Double(d) => d.to_string(),
                Constant::Str(s) => format!("{s:?}"),
            },
            ExprKind::GetValue(d) => self.name(*d).to_string(),
            ExprKind::SetValue { target, value } => {
                format!("{} = {}", self.name(*target), self.expr(*value))
            }
            ExprKind::GetField { field, receiver } => {
                format!("{}#{}", self.receiver_prefix(*receiver), self.name(*field))
            }
            ExprKind::SetField {
                field,
                receiver,
                value,
            } => format!(
                "{}#{} = {}",
                self.receiver_prefix(*receiver),
                self.name(*field),
                self.expr(*value)
            ),
            ExprKind::Call {
                callee,
                dispatch_receiver,
                extension_receiver,
                args,
            } => {
                let callee = match callee {
                    Callee::Declared(d) => self.name(*d).to_string(),
                    Callee::Library(hash) => self
                        .names
                        .library_name(*hash)
                        .unwrap_or_else(|| hash.to_string()),
                };
                format!(
                    "{}{}{}({})",
                    self.receiver_prefix(*dispatch_receiver),
                    self.receiver_prefix(*extension_receiver),
                    callee,
                    self.list(args)
                )
            }
            ExprKind::PropertyReference {
                property,
                dispatch_receiver,
                extension_receiver,
            } => {
                let receiver = dispatch_receiver.or(*extension_receiver);
                let receiver = receiver.map(|r| self.expr(r)).unwrap_or_default();
                format!("{receiver}::{}", self.name(*property))
            }
            ExprKind::Block(stmts) if stmts.is_empty() => "{ }".to_string(),
            ExprKind::Block(stmts) => {
                let stmts: Vec<String> = stmts.iter().map(|&s| self.expr(s)).collect();
                format!("{{ {} }}", stmts.join("; "))
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut text = format!(
                    "if ({}) {}",
                    self.expr(*condition),
                    self.expr(*then_branch)
                );
                if let Some(e) = else_branch {
                    let _ = write!(text, " else {}", self.expr(*e));
                }
                text
            }
            ExprKind::Binary { op, lhs, rhs } => {
                format!("({} {} {})", self.expr(*lhs), op.symbol(), self.expr(*rhs))
            }
            ExprKind::Declare(d) => {
                let decl = self.unit.decl(*d);
                let lateinit = if decl.is_deferred_init() { "lateinit " } else { "" };
                let keyword = if decl.flags.is_mutable() || decl.is_deferred_init() {
                    "var"
                } else {
                    "val"
                };
                let ty = decl.ty().map(|t| t.to_string()).unwrap_or_default();
                let mut text = format!("{lateinit}{keyword} {}: {ty}", decl.name);
                if let Some(init) = decl.as_variable().and_then(|v| v.initializer) {
                    let _ = write!(text, " = {}", self.expr(init));
                }
                text
            }
            ExprKind::Return { value, .. } => match value {
                Some(v) => format!("return {}", self.expr(*v)),
                None => "return".to_string(),
            },
            ExprKind::Construct { class } => format!("{}()", self.name(*class)),
        }
    }
}
