//! Common infrastructure shared by the AST, the analyzer and the driver

mod error;
mod span;

pub use error::{CheckError, CheckResult, DiagnosticReporter, ErrorKind, Warning};
pub use span::Span;
