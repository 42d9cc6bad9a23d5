//! Results of a successful analysis

use super::types::Type;
use crate::common::{Span, Warning};
use std::fmt;

/// Placeholder for the value a `show` statement would print
#[derive(Debug, Clone, PartialEq)]
pub struct ShowOutput {
    pub ty: Type,
    pub span: Span,
}

impl fmt::Display for ShowOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output: {}", self.ty)
    }
}

/// Everything a successful run produced: show outputs in traversal order,
/// then the warnings of the unused-variable sweep
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisReport {
    pub outputs: Vec<ShowOutput>,
    pub warnings: Vec<Warning>,
}

impl AnalysisReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn unused_names(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.name()).collect()
    }

    /// The records in emission order, one per line
    pub fn lines(&self) -> Vec<String> {
        self.outputs
            .iter()
            .map(ToString::to_string)
            .chain(self.warnings.iter().map(ToString::to_string))
            .collect()
    }
}
