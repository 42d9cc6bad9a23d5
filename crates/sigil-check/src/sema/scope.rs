//! Symbol table, inheritance map and class/method definitions

use super::types::Type;
use crate::common::Span;
use std::collections::{HashMap, HashSet};

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Type,
    /// Line of the declaration, quoted by the unused-variable warning
    pub line: usize,
    pub span: Span,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, ty: Type, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            line: span.line,
            span,
        }
    }
}

/// Kind of symbol
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable,
    Parameter { method: String },
    Field { class: String },
    Method,
    Class,
}

impl SymbolKind {
    /// Whether the symbol holds a value and therefore takes part in the
    /// unused-variable sweep
    pub fn is_variable_like(&self) -> bool {
        matches!(
            self,
            SymbolKind::Variable | SymbolKind::Parameter { .. } | SymbolKind::Field { .. }
        )
    }

    pub fn describe(&self) -> &'static str {
        match self {
            SymbolKind::Variable => "Variable",
            SymbolKind::Parameter { .. } => "Parameter",
            SymbolKind::Field { .. } => "Field",
            SymbolKind::Method => "Method",
            SymbolKind::Class => "Class",
        }
    }
}

/// The single flat scope of a program.
///
/// Iteration follows insertion order. Entries are never removed.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, symbol: Symbol) -> Result<(), String> {
        if self.index.contains_key(&symbol.name) {
            return Err(format!("symbol '{}' already defined", symbol.name));
        }
        self.index.insert(symbol.name.clone(), self.symbols.len());
        self.symbols.push(symbol);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Class name -> parent class name (or none)
#[derive(Debug, Default)]
pub struct InheritanceMap {
    parents: HashMap<String, Option<String>>,
}

impl InheritanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: impl Into<String>, parent: Option<String>) {
        self.parents.insert(class.into(), parent);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.parents.contains_key(class)
    }

    pub fn parent_of(&self, class: &str) -> Option<&str> {
        self.parents.get(class).and_then(|p| p.as_deref())
    }

    /// `start` followed by its parent, grandparent, ... up to a root
    pub fn ancestors<'a>(&'a self, start: &'a str) -> Ancestors<'a> {
        Ancestors {
            map: self,
            next: Some(start),
            visited: HashSet::new(),
        }
    }
}

/// Iterator over a parent chain; stops at a root or on a repeated class
pub struct Ancestors<'a> {
    map: &'a InheritanceMap,
    next: Option<&'a str>,
    visited: HashSet<&'a str>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let current = self.next.take()?;
        if !self.visited.insert(current) {
            return None;
        }
        self.next = self.map.parent_of(current);
        Some(current)
    }
}

/// Registered class shape
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    pub name: String,
    pub parent: Option<String>,
    pub fields: Vec<(String, Type)>,
    pub methods: Vec<String>,
    pub span: Span,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, parent: Option<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            parent,
            fields: Vec::new(),
            methods: Vec::new(),
            span,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, ty)| ty)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m == name)
    }
}

/// Registered method signature
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSig {
    pub name: String,
    pub params: Vec<(String, Type)>,
    pub return_type: Type,
    /// Declaring class, `None` for a top-level method
    pub owner: Option<String>,
}
