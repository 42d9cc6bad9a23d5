//! sigil-check - semantic analysis for the sigil language
//!
//! Takes the syntax tree produced by an external parser and checks it in a
//! single fail-fast pass.
//!
//! ## Architecture
//!
//! - **AST** (`ast/`): the tree handed over by the parser, with spans
//! - **Sema** (`sema/`): naming rules, symbol table, type inference,
//!   class compatibility and the unused-variable sweep
//! - **Driver** (`driver/`): configuration and diagnostic reporting
//! - **Common** (`common/`): errors, warnings and spans

pub mod common;
pub mod ast;
pub mod sema;
pub mod driver;

// Re-exports for convenience
pub use common::{CheckError, CheckResult, DiagnosticReporter, ErrorKind, Span, Warning};
pub use sema::{AnalysisContext, AnalysisReport, SemanticAnalyzer, Type};
pub use driver::{CheckContext, CheckerConfig, Session};
