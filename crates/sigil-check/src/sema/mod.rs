//! Semantic analysis module
//!
//! One pass over the program: declarations are validated and registered,
//! expressions are typed bottom-up, assignments are checked against the
//! class hierarchy, and names that are never read are reported at the end.

mod analyzer;
mod context;
mod names;
mod report;
mod scope;
mod types;

pub use analyzer::SemanticAnalyzer;
pub use context::AnalysisContext;
pub use names::{is_identifier, validate_class_name, validate_method_name, validate_variable_name, SIGIL};
pub use report::{AnalysisReport, ShowOutput};
pub use scope::{Ancestors, ClassInfo, InheritanceMap, MethodSig, Symbol, SymbolKind, SymbolTable};
pub use types::{BinaryContext, Type, TypeChecker};
