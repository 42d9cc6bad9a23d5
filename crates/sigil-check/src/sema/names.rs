//! Naming rules for variables and methods

use crate::common::{CheckError, CheckResult, Span};
use regex::Regex;
use std::sync::OnceLock;

/// Leading character of every variable name
pub const SIGIL: char = '$';

const RESERVED_TYPE_NAMES: [&str; 4] = ["chunk", "fraction", "string", "none"];

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
    })
}

pub fn is_identifier(text: &str) -> bool {
    identifier_pattern().is_match(text)
}

/// Check a variable, parameter or field name: `$` followed by an identifier
pub fn validate_variable_name(name: &str, span: Span) -> CheckResult<()> {
    let Some(rest) = name.strip_prefix(SIGIL) else {
        return Err(CheckError::invalid_name(
            name,
            format!("Variable names must start with '{}'.", SIGIL),
            span,
        ));
    };

    if !is_identifier(rest) {
        return Err(CheckError::invalid_name(
            name,
            "Variable names must start with a letter or underscore and contain only alphanumeric characters.",
            span,
        ));
    }

    Ok(())
}

/// Check a method name: a plain identifier without the sigil
pub fn validate_method_name(name: &str, span: Span) -> CheckResult<()> {
    if !is_identifier(name) {
        return Err(CheckError::invalid_name(
            name,
            "Method names must be plain identifiers.",
            span,
        ));
    }
    Ok(())
}

/// Check a class name: a plain identifier that is not a built-in type name
pub fn validate_class_name(name: &str, span: Span) -> CheckResult<()> {
    if !is_identifier(name) {
        return Err(CheckError::invalid_name(
            name,
            "Class names must be plain identifiers.",
            span,
        ));
    }
    if RESERVED_TYPE_NAMES.contains(&name) {
        return Err(CheckError::invalid_name(
            name,
            format!("'{}' is a built-in type.", name),
            span,
        ));
    }
    Ok(())
}
