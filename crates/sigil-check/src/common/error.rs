//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{Buffer, ColorChoice, StandardStream, WriteColor};
use std::fmt;
use thiserror::Error;
use super::Span;

/// Fatal semantic error. The first one raised aborts the analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("Invalid name: '{name}' at {span}. {reason}")]
    InvalidName {
        name: String,
        reason: String,
        span: Span,
    },

    #[error("{what} '{name}' already declared at {span}.")]
    Redeclaration {
        what: &'static str,
        name: String,
        span: Span,
    },

    #[error("Variable '{name}' not declared at {span}.")]
    UndeclaredVariable { name: String, span: Span },

    #[error("Unknown type '{name}' at {span}.")]
    UnknownType { name: String, span: Span },

    #[error("Class '{class}' has no member '{member}' at {span}.")]
    UnknownMember {
        class: String,
        member: String,
        span: Span,
    },

    #[error("Type mismatch: {message} at {span}.")]
    TypeMismatch { message: String, span: Span },

    #[error("Method '{method}' expects {expected} argument(s) but got {found} at {span}.")]
    ArgumentCount {
        method: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("Invalid operation at {span}: {message}.")]
    InvalidOperation { message: String, span: Span },

    #[error("Unsupported {what} at {span}.")]
    UnsupportedConstruct { what: String, span: Span },
}

/// Kind of a fatal error, independent of its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidName,
    Redeclaration,
    UndeclaredVariable,
    UnknownType,
    UnknownMember,
    TypeMismatch,
    ArgumentCount,
    InvalidOperation,
    UnsupportedConstruct,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidName => "InvalidNameError",
            ErrorKind::Redeclaration => "RedeclarationError",
            ErrorKind::UndeclaredVariable => "UndeclaredVariableError",
            ErrorKind::UnknownType => "UnknownTypeError",
            ErrorKind::UnknownMember => "UnknownMemberError",
            ErrorKind::TypeMismatch => "TypeMismatchError",
            ErrorKind::ArgumentCount => "ArgumentCountError",
            ErrorKind::InvalidOperation => "InvalidOperationError",
            ErrorKind::UnsupportedConstruct => "UnsupportedConstructError",
        };
        f.write_str(name)
    }
}

impl CheckError {
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>, span: Span) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
            span,
        }
    }

    pub fn redeclaration(what: &'static str, name: impl Into<String>, span: Span) -> Self {
        Self::Redeclaration {
            what,
            name: name.into(),
            span,
        }
    }

    pub fn undeclared(name: impl Into<String>, span: Span) -> Self {
        Self::UndeclaredVariable {
            name: name.into(),
            span,
        }
    }

    pub fn unknown_type(name: impl Into<String>, span: Span) -> Self {
        Self::UnknownType {
            name: name.into(),
            span,
        }
    }

    pub fn unknown_member(class: impl Into<String>, member: impl Into<String>, span: Span) -> Self {
        Self::UnknownMember {
            class: class.into(),
            member: member.into(),
            span,
        }
    }

    pub fn type_mismatch(message: impl Into<String>, span: Span) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            span,
        }
    }

    pub fn argument_count(method: impl Into<String>, expected: usize, found: usize, span: Span) -> Self {
        Self::ArgumentCount {
            method: method.into(),
            expected,
            found,
            span,
        }
    }

    pub fn invalid_operation(message: impl Into<String>, span: Span) -> Self {
        Self::InvalidOperation {
            message: message.into(),
            span,
        }
    }

    pub fn unsupported(what: impl Into<String>, span: Span) -> Self {
        Self::UnsupportedConstruct {
            what: what.into(),
            span,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::InvalidName { .. } => ErrorKind::InvalidName,
            CheckError::Redeclaration { .. } => ErrorKind::Redeclaration,
            CheckError::UndeclaredVariable { .. } => ErrorKind::UndeclaredVariable,
            CheckError::UnknownType { .. } => ErrorKind::UnknownType,
            CheckError::UnknownMember { .. } => ErrorKind::UnknownMember,
            CheckError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CheckError::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            CheckError::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            CheckError::UnsupportedConstruct { .. } => ErrorKind::UnsupportedConstruct,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CheckError::InvalidName { span, .. }
            | CheckError::Redeclaration { span, .. }
            | CheckError::UndeclaredVariable { span, .. }
            | CheckError::UnknownType { span, .. }
            | CheckError::UnknownMember { span, .. }
            | CheckError::TypeMismatch { span, .. }
            | CheckError::ArgumentCount { span, .. }
            | CheckError::InvalidOperation { span, .. }
            | CheckError::UnsupportedConstruct { span, .. } => *span,
        }
    }
}

pub type CheckResult<T> = Result<T, CheckError>;

/// Non-fatal diagnostic, reported only after a successful pass
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    UnusedVariable { name: String, line: usize, span: Span },
}

impl Warning {
    pub fn name(&self) -> &str {
        match self {
            Warning::UnusedVariable { name, .. } => name,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnusedVariable { name, line, .. } => write!(
                f,
                "Warning: Variable '{}' declared at line {} is declared but never used.",
                name, line
            ),
        }
    }
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report_error(&self, file_id: usize, error: &CheckError) {
        self.emit(&mut self.writer.lock(), &Self::error_diagnostic(file_id, error));
    }

    pub fn report_warning(&self, file_id: usize, warning: &Warning) {
        self.emit(&mut self.writer.lock(), &Self::warning_diagnostic(file_id, warning));
    }

    /// Render an error without colors, e.g. for snapshotting
    pub fn render_error(&self, file_id: usize, error: &CheckError) -> String {
        let mut buffer = Buffer::no_color();
        self.emit(&mut buffer, &Self::error_diagnostic(file_id, error));
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    pub fn render_warning(&self, file_id: usize, warning: &Warning) -> String {
        let mut buffer = Buffer::no_color();
        self.emit(&mut buffer, &Self::warning_diagnostic(file_id, warning));
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    fn emit(&self, writer: &mut dyn WriteColor, diagnostic: &Diagnostic<usize>) {
        let _ = term::emit(writer, &self.config, &self.files, diagnostic);
    }

    fn error_diagnostic(file_id: usize, error: &CheckError) -> Diagnostic<usize> {
        let span = error.span();
        Diagnostic::error()
            .with_code(error.kind().to_string())
            .with_message(error.to_string())
            .with_labels(vec![Label::primary(file_id, span.range())])
    }

    fn warning_diagnostic(file_id: usize, warning: &Warning) -> Diagnostic<usize> {
        match warning {
            Warning::UnusedVariable { name, span, .. } => Diagnostic::warning()
                .with_code("UnusedVariableWarning")
                .with_message(format!("variable '{}' is declared but never used", name))
                .with_labels(vec![
                    Label::primary(file_id, span.range()).with_message("declared here")
                ]),
        }
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
