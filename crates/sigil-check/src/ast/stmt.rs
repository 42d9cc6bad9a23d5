//! Statement AST nodes

use super::{ClassDecl, Expr, Ident, MethodDecl, VarDecl};
use crate::common::Span;

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn var_decl(decl: VarDecl) -> Self {
        let span = decl.span;
        Self::new(StmtKind::VarDecl(decl), span)
    }

    pub fn assign(target: Ident, value: Expr, span: Span) -> Self {
        Self::new(StmtKind::Assign { target, value }, span)
    }

    pub fn show(value: Expr, span: Span) -> Self {
        Self::new(StmtKind::Show(value), span)
    }

    pub fn method(decl: MethodDecl) -> Self {
        let span = decl.span;
        Self::new(StmtKind::Method(decl), span)
    }

    pub fn class(decl: ClassDecl) -> Self {
        let span = decl.span;
        Self::new(StmtKind::Class(decl), span)
    }

    pub fn expr(value: Expr) -> Self {
        let span = value.span;
        Self::new(StmtKind::Expr(value), span)
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Variable declaration: `$x: chunk = 5;`
    VarDecl(VarDecl),

    /// Assignment: `$x = expr;`
    Assign { target: Ident, value: Expr },

    /// Show statement: `show expr;`
    Show(Expr),

    /// Method declaration
    Method(MethodDecl),

    /// Class declaration
    Class(ClassDecl),

    /// Expression statement, typically a call: `$obj.reset();`
    Expr(Expr),
}

/// Return statement closing a method body: `return expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}

impl ReturnStmt {
    pub fn new(value: Expr, span: Span) -> Self {
        Self { value, span }
    }
}
