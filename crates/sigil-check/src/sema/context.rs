//! Mutable state of one analysis run

use super::report::{AnalysisReport, ShowOutput};
use super::scope::{ClassInfo, InheritanceMap, MethodSig, SymbolTable};
use super::types::Type;
use crate::ast::TypeRef;
use crate::common::{CheckError, CheckResult, Warning};
use std::collections::{HashMap, HashSet};

/// Everything a single analysis reads and writes.
///
/// Created empty for each program and threaded by `&mut` through every
/// visit; nothing in it outlives the run.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    pub symbols: SymbolTable,
    pub used: HashSet<String>,
    pub inheritance: InheritanceMap,
    pub classes: HashMap<String, ClassInfo>,
    pub methods: HashMap<String, MethodSig>,
    pub outputs: Vec<ShowOutput>,
    pub warnings: Vec<Warning>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_used(&mut self, name: &str) {
        if !self.used.contains(name) {
            self.used.insert(name.to_string());
        }
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    pub fn is_known_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Resolve the type of something that holds a value (variable, parameter, field).
    /// `none` names no value type, so it is as unknown here as an undeclared class.
    pub fn resolve_value_type(&self, ty: &TypeRef) -> CheckResult<Type> {
        match Type::from_name(&ty.name) {
            Type::None => Err(CheckError::unknown_type(&ty.name, ty.span)),
            resolved => self.check_class_exists(resolved, ty),
        }
    }

    /// Resolve a method return type; `none` is allowed here
    pub fn resolve_return_type(&self, ty: &TypeRef) -> CheckResult<Type> {
        self.check_class_exists(Type::from_name(&ty.name), ty)
    }

    fn check_class_exists(&self, resolved: Type, ty: &TypeRef) -> CheckResult<Type> {
        match resolved.class_name() {
            Some(class) if !self.is_known_class(class) => {
                Err(CheckError::unknown_type(class, ty.span))
            }
            _ => Ok(resolved),
        }
    }

    /// Find a field on `class` or the nearest ancestor declaring it
    pub fn lookup_field(&self, class: &str, field: &str) -> Option<&Type> {
        self.inheritance
            .ancestors(class)
            .filter_map(|c| self.classes.get(c))
            .find_map(|info| info.field(field))
    }

    /// Find a method on `class` or the nearest ancestor declaring it
    pub fn lookup_method(&self, class: &str, method: &str) -> Option<&MethodSig> {
        self.inheritance
            .ancestors(class)
            .filter_map(|c| self.classes.get(c))
            .find(|info| info.has_method(method))
            .and_then(|_| self.methods.get(method))
    }

    pub fn into_report(self) -> AnalysisReport {
        AnalysisReport {
            outputs: self.outputs,
            warnings: self.warnings,
        }
    }
}
