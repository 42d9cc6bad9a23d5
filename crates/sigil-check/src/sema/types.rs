//! Types and type compatibility

use super::scope::InheritanceMap;
use crate::common::{CheckError, CheckResult, Span};
use std::fmt;

/// A resolved type name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Integer-like primitive
    Chunk,
    /// Decimal-like primitive; chunk widens to it
    Fraction,
    Str,
    /// "No value"; only a method may produce it
    None,
    /// Nominal class type
    Class(String),
}

impl Type {
    /// Map a written type name to a type. Anything that is not a keyword is
    /// taken as a class name; whether that class exists is the caller's check.
    pub fn from_name(name: &str) -> Type {
        match name {
            "chunk" => Type::Chunk,
            "fraction" => Type::Fraction,
            "string" => Type::Str,
            "none" => Type::None,
            other => Type::Class(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Type::Chunk => "chunk",
            Type::Fraction => "fraction",
            Type::Str => "string",
            Type::None => "none",
            Type::Class(name) => name,
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            Type::Class(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Which binary node a fold belongs to, for messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryContext {
    Additive,
    Multiplicative,
}

impl fmt::Display for BinaryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryContext::Additive => f.write_str("additive"),
            BinaryContext::Multiplicative => f.write_str("multiplicative"),
        }
    }
}

/// Type compatibility and promotion rules
pub struct TypeChecker;

impl TypeChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check whether a value of type `found` may be stored where `declared`
    /// is expected: equal types, or `declared` is a known class that appears
    /// on `found`'s parent chain.
    pub fn is_compatible(&self, inheritance: &InheritanceMap, declared: &Type, found: &Type) -> bool {
        if declared == found {
            return true;
        }

        let Type::Class(target) = declared else {
            return false;
        };
        if !inheritance.contains(target) {
            return false;
        }
        let Type::Class(start) = found else {
            return false;
        };

        inheritance.ancestors(start).any(|class| class == target.as_str())
    }

    /// Widen a chunk operand to fraction when the other operand is a fraction
    pub fn promote(&self, left: Type, right: Type) -> (Type, Type) {
        match (left, right) {
            (Type::Chunk, Type::Fraction) => (Type::Fraction, Type::Fraction),
            (Type::Fraction, Type::Chunk) => (Type::Fraction, Type::Fraction),
            other => other,
        }
    }

    /// Result type of one step of a binary fold
    pub fn binary_result_type(
        &self,
        context: BinaryContext,
        left: Type,
        right: Type,
        span: Span,
    ) -> CheckResult<Type> {
        let (left, right) = self.promote(left, right);
        if left != right {
            return Err(CheckError::type_mismatch(
                format!("{} and {} are not the same in {} expression", left, right, context),
                span,
            ));
        }
        Ok(left)
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}
