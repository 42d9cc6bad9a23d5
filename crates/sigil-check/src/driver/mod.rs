//! Analysis driver: configuration, diagnostics reporting and symbol dumps

use crate::ast::Program;
use crate::common::{CheckResult, DiagnosticReporter};
use crate::sema::{AnalysisContext, AnalysisReport, SemanticAnalyzer};
use std::fmt::Write;

/// Configuration options for a checking session
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub verbose: bool,
    /// Run the unused-variable sweep after a successful pass
    pub warn_unused: bool,
    pub dump_symbols: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            warn_unused: true,
            dump_symbols: false,
        }
    }
}

/// Source file being checked and where its diagnostics go
pub struct CheckContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> CheckContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self { filename, file_id, reporter }
    }
}

/// Runs the analyzer and routes its diagnostics to a reporter
pub struct Session {
    analyzer: SemanticAnalyzer,
    config: CheckerConfig,
}

impl Session {
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            analyzer: SemanticAnalyzer::new().with_unused_warnings(config.warn_unused),
            config,
        }
    }

    /// Check one program. A fatal error is reported and returned; warnings
    /// are reported and also carried in the returned report.
    pub fn check(&self, program: &Program, ctx: &CheckContext) -> CheckResult<AnalysisReport> {
        if self.config.verbose {
            eprintln!("Analyzing {}...", ctx.filename);
        }

        let mut cx = AnalysisContext::new();
        if let Err(e) = self.analyzer.analyze_into(program, &mut cx) {
            ctx.reporter.report_error(ctx.file_id, &e);
            return Err(e);
        }

        if self.config.dump_symbols {
            eprintln!("=== Symbols ===");
            eprint!("{}", symbol_dump(&cx));
            eprintln!("=== End Symbols ===\n");
        }

        for warning in &cx.warnings {
            ctx.reporter.report_warning(ctx.file_id, warning);
        }

        if self.config.verbose {
            eprintln!(
                "Checked {}: {} output(s), {} warning(s)",
                ctx.filename,
                cx.outputs.len(),
                cx.warnings.len()
            );
        }

        Ok(cx.into_report())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}

/// One line per symbol in declaration order, plus the class hierarchy
pub fn symbol_dump(cx: &AnalysisContext) -> String {
    let mut out = String::new();
    for sym in cx.symbols.iter() {
        let used = if cx.is_used(&sym.name) { "used" } else { "unused" };
        let _ = writeln!(
            out,
            "{:<10} {:<16} {:<10} line {:<4} {}",
            sym.kind.describe(),
            sym.name,
            sym.ty,
            sym.line,
            used
        );
    }
    for info in cx.symbols.iter().filter_map(|s| cx.classes.get(&s.name)) {
        let _ = match &info.parent {
            Some(parent) => writeln!(out, "class {} <: {} (line {})", info.name, parent, info.span.line),
            None => writeln!(out, "class {} (line {})", info.name, info.span.line),
        };
    }
    out
}
