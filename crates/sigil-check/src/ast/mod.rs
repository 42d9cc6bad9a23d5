//! Abstract Syntax Tree definitions
//!
//! The tree is produced by an external parser. Every node carries the
//! [`Span`](crate::common::Span) the parser recorded for it; the analyzer only
//! reads the tree.

mod types;
mod expr;
mod stmt;
mod decl;

pub use types::*;
pub use expr::*;
pub use stmt::*;
pub use decl::*;

/// A complete program: the top-level statement sequence of one source file
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}
