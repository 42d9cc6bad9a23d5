//! Declaration AST nodes

use super::{Expr, Ident, ReturnStmt, Stmt, TypeRef};
use crate::common::Span;

/// `name: type`, used by parameters and class fields
#[derive(Debug, Clone, PartialEq)]
pub struct VarSignature {
    pub name: Ident,
    pub ty: TypeRef,
}

impl VarSignature {
    pub fn new(name: Ident, ty: TypeRef) -> Self {
        Self { name, ty }
    }

    pub fn span(&self) -> Span {
        self.name.span.to(self.ty.span)
    }
}

/// Variable declaration: `$x: chunk = 5;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub signature: VarSignature,
    pub init: Option<Expr>,
    pub span: Span,
}

impl VarDecl {
    pub fn new(signature: VarSignature, init: Option<Expr>, span: Span) -> Self {
        Self {
            signature,
            init,
            span,
        }
    }
}

/// Method declaration: `chunk area($w: chunk, $h: chunk) { ... return expr; }`
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: Ident,
    pub params: Vec<VarSignature>,
    pub return_type: TypeRef,
    pub body: MethodBody,
    pub span: Span,
}

/// Statements of a method followed by its optional return
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodBody {
    pub statements: Vec<Stmt>,
    pub ret: Option<ReturnStmt>,
}

impl MethodBody {
    pub fn new(statements: Vec<Stmt>, ret: Option<ReturnStmt>) -> Self {
        Self { statements, ret }
    }
}

/// Class declaration: `class Sub inherits Base { fields; methods }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Ident,
    pub parent: Option<Ident>,
    pub fields: Vec<VarSignature>,
    pub methods: Vec<MethodDecl>,
    pub span: Span,
}
