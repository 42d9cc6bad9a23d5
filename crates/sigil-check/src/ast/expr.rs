//! Expression AST nodes

use super::Ident;
use crate::common::Span;

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn chunk(value: i64, span: Span) -> Self {
        Self::new(ExprKind::Literal(Literal::Chunk(value)), span)
    }

    pub fn fraction(value: f64, span: Span) -> Self {
        Self::new(ExprKind::Literal(Literal::Fraction(value)), span)
    }

    pub fn string(value: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Literal(Literal::Str(value.into())), span)
    }

    pub fn var(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Variable(name.into()), span)
    }

    pub fn paren(inner: Expr, span: Span) -> Self {
        Self::new(ExprKind::Paren(Box::new(inner)), span)
    }

    pub fn new_instance(class: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::New(Ident::new(class, span)), span)
    }

    /// `first op rest[0].1 op rest[1].1 ...`, spanning all operands
    pub fn additive(first: Expr, rest: Vec<(AddOp, Expr)>) -> Self {
        let span = rest.iter().fold(first.span, |acc, (_, e)| acc.to(e.span));
        Self::new(
            ExprKind::Additive {
                first: Box::new(first),
                rest,
            },
            span,
        )
    }

    pub fn multiplicative(first: Expr, rest: Vec<(MulOp, Expr)>) -> Self {
        let span = rest.iter().fold(first.span, |acc, (_, e)| acc.to(e.span));
        Self::new(
            ExprKind::Multiplicative {
                first: Box::new(first),
                rest,
            },
            span,
        )
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Self::additive(left, vec![(AddOp::Add, right)])
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Self::multiplicative(left, vec![(MulOp::Mul, right)])
    }

    pub fn field(object: Ident, field: Ident, span: Span) -> Self {
        Self::new(ExprKind::FieldAccess { object, field }, span)
    }

    pub fn call(receiver: Option<Ident>, method: Ident, args: Vec<Expr>, span: Span) -> Self {
        Self::new(
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            },
            span,
        )
    }
}

/// Expression kinds
///
/// Precedence is already resolved by the parser:
/// `expression -> additive -> multiplicative -> term`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `a + b - c`; an empty `rest` is a single-operand node
    Additive {
        first: Box<Expr>,
        rest: Vec<(AddOp, Expr)>,
    },

    /// `a * b / c`; an empty `rest` is a single-operand node
    Multiplicative {
        first: Box<Expr>,
        rest: Vec<(MulOp, Expr)>,
    },

    /// Literal term
    Literal(Literal),

    /// Variable reference: `$x`
    Variable(String),

    /// Parenthesized expression: `(expr)`
    Paren(Box<Expr>),

    /// Class field access: `$obj.$field`
    FieldAccess { object: Ident, field: Ident },

    /// Method call: `$obj.method(args)` or `method(args)`
    MethodCall {
        receiver: Option<Ident>,
        method: Ident,
        args: Vec<Expr>,
    },

    /// Instantiation: `new Class()`
    New(Ident),

    /// A term the parser accepted but that has no meaning here; carries its source text
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal: 42
    Chunk(i64),
    /// Decimal literal: 3.5
    Fraction(f64),
    /// String literal: "hello"
    Str(String),
    /// Any other literal shape the grammar produced, as source text
    Other(String),
}
