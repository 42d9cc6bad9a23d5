//! Semantic analyzer - declarations, expression typing and usage tracking

use crate::ast::*;
use crate::common::{CheckError, CheckResult, Span, Warning};
use super::context::AnalysisContext;
use super::names::{validate_class_name, validate_method_name, validate_variable_name};
use super::report::{AnalysisReport, ShowOutput};
use super::scope::{ClassInfo, MethodSig, Symbol, SymbolKind};
use super::types::{BinaryContext, Type, TypeChecker};

/// Semantic analyzer for one program at a time.
///
/// The analyzer itself only carries configuration; all state of a run lives
/// in an [`AnalysisContext`], so the same analyzer can check any number of
/// programs and always produces the same diagnostics for the same tree.
pub struct SemanticAnalyzer {
    type_checker: TypeChecker,
    warn_unused: bool,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            type_checker: TypeChecker::new(),
            warn_unused: true,
        }
    }

    /// Enable or disable the unused-variable sweep
    pub fn with_unused_warnings(mut self, enabled: bool) -> Self {
        self.warn_unused = enabled;
        self
    }

    /// Analyze a program with fresh state
    pub fn analyze(&self, program: &Program) -> CheckResult<AnalysisReport> {
        let mut cx = AnalysisContext::new();
        self.analyze_into(program, &mut cx)?;
        Ok(cx.into_report())
    }

    /// Analyze a program into a caller-provided context, leaving the symbol
    /// table and inheritance map behind for inspection.
    ///
    /// Stops at the first fatal error; the context then holds whatever was
    /// registered up to that point.
    pub fn analyze_into(&self, program: &Program, cx: &mut AnalysisContext) -> CheckResult<()> {
        log::debug!("analysis start: statements={}", program.statements.len());

        self.analyze_statements(cx, &program.statements)?;

        if self.warn_unused {
            let warnings = self.unused_variables(cx);
            cx.warnings.extend(warnings);
        }

        log::debug!(
            "analysis end: symbols={} outputs={} warnings={}",
            cx.symbols.len(),
            cx.outputs.len(),
            cx.warnings.len()
        );
        Ok(())
    }

    fn analyze_statements(&self, cx: &mut AnalysisContext, statements: &[Stmt]) -> CheckResult<()> {
        for stmt in statements {
            self.analyze_stmt(cx, stmt)?;
        }
        Ok(())
    }

    fn analyze_stmt(&self, cx: &mut AnalysisContext, stmt: &Stmt) -> CheckResult<()> {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => self.analyze_var_decl(cx, decl),
            StmtKind::Assign { target, value } => self.analyze_assignment(cx, target, value, stmt.span),
            StmtKind::Show(value) => self.analyze_show(cx, value, stmt.span),
            StmtKind::Method(method) => self.analyze_method_decl(cx, method, None),
            StmtKind::Class(class) => self.analyze_class_decl(cx, class),
            StmtKind::Expr(expr) => {
                self.infer(cx, expr)?;
                Ok(())
            }
        }
    }

    // === Declarations ===

    /// Validate and register a value-holding name, returning its resolved type
    fn declare_value(
        &self,
        cx: &mut AnalysisContext,
        signature: &VarSignature,
        kind: SymbolKind,
        span: Span,
    ) -> CheckResult<Type> {
        let name = &signature.name.name;
        validate_variable_name(name, span)?;

        if cx.symbols.contains(name) {
            return Err(CheckError::redeclaration(kind.describe(), name, span));
        }

        let ty = cx.resolve_value_type(&signature.ty)?;
        log::trace!("declare {} {}: {}", kind.describe(), name, ty);

        let what = kind.describe();
        cx.symbols
            .define(Symbol::new(name.clone(), kind, ty.clone(), span))
            .map_err(|_| CheckError::redeclaration(what, name, span))?;
        Ok(ty)
    }

    fn analyze_var_decl(&self, cx: &mut AnalysisContext, decl: &VarDecl) -> CheckResult<()> {
        let declared = self.declare_value(cx, &decl.signature, SymbolKind::Variable, decl.span)?;

        // Initializers must match exactly; no widening and no subclassing
        if let Some(init) = &decl.init {
            let init_ty = self.infer(cx, init)?;
            if init_ty != declared {
                return Err(CheckError::type_mismatch(
                    format!(
                        "Cannot assign {} to {} for variable '{}'",
                        init_ty, declared, decl.signature.name.name
                    ),
                    decl.span,
                ));
            }
        }
        Ok(())
    }

    fn analyze_method_decl(
        &self,
        cx: &mut AnalysisContext,
        method: &MethodDecl,
        owner: Option<&str>,
    ) -> CheckResult<()> {
        let name = &method.name.name;
        validate_method_name(name, method.name.span)?;

        // Parameters share the global namespace
        let mut params = Vec::with_capacity(method.params.len());
        for param in &method.params {
            let kind = SymbolKind::Parameter { method: name.clone() };
            let ty = self.declare_value(cx, param, kind, param.span())?;
            params.push((param.name.name.clone(), ty));
        }

        if cx.symbols.contains(name) {
            return Err(CheckError::redeclaration("Method", name, method.span));
        }

        let return_type = cx.resolve_return_type(&method.return_type)?;
        cx.symbols
            .define(Symbol::new(name.clone(), SymbolKind::Method, return_type.clone(), method.span))
            .map_err(|_| CheckError::redeclaration("Method", name, method.span))?;
        cx.methods.insert(
            name.clone(),
            MethodSig {
                name: name.clone(),
                params,
                return_type: return_type.clone(),
                owner: owner.map(str::to_string),
            },
        );
        if let Some(class) = owner.and_then(|c| cx.classes.get_mut(c)) {
            class.methods.push(name.clone());
        }
        log::trace!("declare method {} -> {}", name, return_type);

        self.analyze_statements(cx, &method.body.statements)?;

        if let Some(ret) = &method.body.ret {
            let ret_ty = self.infer(cx, &ret.value)?;
            if ret_ty != return_type {
                return Err(CheckError::type_mismatch(
                    format!(
                        "expected {} but got {} in return statement of '{}'",
                        return_type, ret_ty, name
                    ),
                    ret.span,
                ));
            }
        }
        Ok(())
    }

    fn analyze_class_decl(&self, cx: &mut AnalysisContext, class: &ClassDecl) -> CheckResult<()> {
        let name = &class.name.name;
        validate_class_name(name, class.name.span)?;

        if cx.symbols.contains(name) {
            return Err(CheckError::redeclaration("Class", name, class.span));
        }

        // Parents must be declared first; their members are then reached by lookup
        let parent = match &class.parent {
            Some(parent) if !cx.is_known_class(&parent.name) => {
                return Err(CheckError::unknown_type(&parent.name, parent.span));
            }
            Some(parent) => Some(parent.name.clone()),
            None => None,
        };

        cx.inheritance.insert(name.clone(), parent.clone());
        cx.classes
            .insert(name.clone(), ClassInfo::new(name.clone(), parent, class.span));
        cx.symbols
            .define(Symbol::new(name.clone(), SymbolKind::Class, Type::Class(name.clone()), class.span))
            .map_err(|_| CheckError::redeclaration("Class", name, class.span))?;
        log::trace!("declare class {} parent={:?}", name, cx.inheritance.parent_of(name));

        for field in &class.fields {
            let kind = SymbolKind::Field { class: name.clone() };
            let ty = self.declare_value(cx, field, kind, field.span())?;
            if let Some(info) = cx.classes.get_mut(name) {
                info.fields.push((field.name.name.clone(), ty));
            }
        }

        for method in &class.methods {
            self.analyze_method_decl(cx, method, Some(name))?;
        }
        Ok(())
    }

    // === Statements ===

    fn analyze_assignment(
        &self,
        cx: &mut AnalysisContext,
        target: &Ident,
        value: &Expr,
        span: Span,
    ) -> CheckResult<()> {
        let declared = self.value_type(cx, target)?;
        let value_ty = self.infer(cx, value)?;

        if !self.type_checker.is_compatible(&cx.inheritance, &declared, &value_ty) {
            return Err(CheckError::type_mismatch(
                format!(
                    "Cannot assign {} to {} for variable '{}'",
                    value_ty, declared, target.name
                ),
                span,
            ));
        }
        Ok(())
    }

    fn analyze_show(&self, cx: &mut AnalysisContext, value: &Expr, span: Span) -> CheckResult<()> {
        let ty = self.infer(cx, value)?;
        if ty == Type::None {
            return Err(CheckError::invalid_operation("cannot show a 'none' value", span));
        }
        log::debug!("Output: {}", ty);
        cx.outputs.push(ShowOutput { ty, span });
        Ok(())
    }

    // === Expressions ===

    /// Infer the static type of an expression, bottom-up
    pub fn infer(&self, cx: &mut AnalysisContext, expr: &Expr) -> CheckResult<Type> {
        match &expr.kind {
            ExprKind::Additive { first, rest } => {
                let operands = rest.iter().map(|(_, e)| e);
                self.fold_binary(cx, BinaryContext::Additive, first, operands, expr.span)
            }
            ExprKind::Multiplicative { first, rest } => {
                let operands = rest.iter().map(|(_, e)| e);
                self.fold_binary(cx, BinaryContext::Multiplicative, first, operands, expr.span)
            }
            ExprKind::Literal(literal) => self.literal_type(literal, expr.span),
            ExprKind::Variable(name) => {
                self.value_type(cx, &Ident::new(name.clone(), expr.span))
            }
            ExprKind::Paren(inner) => self.infer(cx, inner),
            ExprKind::FieldAccess { object, field } => self.infer_field_access(cx, object, field),
            ExprKind::MethodCall { receiver, method, args } => {
                self.infer_method_call(cx, receiver.as_ref(), method, args, expr.span)
            }
            ExprKind::New(class) => {
                if !cx.is_known_class(&class.name) {
                    return Err(CheckError::unknown_type(&class.name, class.span));
                }
                Ok(Type::Class(class.name.clone()))
            }
            ExprKind::Unsupported(text) => {
                Err(CheckError::unsupported(format!("term: {}", text), expr.span))
            }
        }
    }

    /// Left-to-right fold; the running type becomes the next left operand
    fn fold_binary<'e>(
        &self,
        cx: &mut AnalysisContext,
        context: BinaryContext,
        first: &Expr,
        rest: impl Iterator<Item = &'e Expr>,
        span: Span,
    ) -> CheckResult<Type> {
        let mut left = self.infer(cx, first)?;
        for operand in rest {
            let right = self.infer(cx, operand)?;
            left = self.type_checker.binary_result_type(context, left, right, span)?;
        }
        Ok(left)
    }

    fn literal_type(&self, literal: &Literal, span: Span) -> CheckResult<Type> {
        match literal {
            Literal::Chunk(_) => Ok(Type::Chunk),
            Literal::Fraction(_) => Ok(Type::Fraction),
            Literal::Str(_) => Ok(Type::Str),
            Literal::Other(text) => {
                Err(CheckError::unsupported(format!("literal: {}", text), span))
            }
        }
    }

    /// Look up a value-holding name, mark it used and return its declared type
    fn value_type(&self, cx: &mut AnalysisContext, ident: &Ident) -> CheckResult<Type> {
        let symbol = cx
            .symbols
            .lookup(&ident.name)
            .ok_or_else(|| CheckError::undeclared(&ident.name, ident.span))?;

        if !symbol.kind.is_variable_like() {
            return Err(CheckError::invalid_operation(
                format!("{} '{}' is not a value", symbol.kind.describe(), ident.name),
                ident.span,
            ));
        }

        let ty = symbol.ty.clone();
        cx.mark_used(&ident.name);
        Ok(ty)
    }

    /// Class of the value a member access goes through
    fn receiver_class(&self, cx: &mut AnalysisContext, receiver: &Ident) -> CheckResult<String> {
        match self.value_type(cx, receiver)? {
            Type::Class(class) => Ok(class),
            other => Err(CheckError::invalid_operation(
                format!("'{}' has type {} which has no members", receiver.name, other),
                receiver.span,
            )),
        }
    }

    fn infer_field_access(
        &self,
        cx: &mut AnalysisContext,
        object: &Ident,
        field: &Ident,
    ) -> CheckResult<Type> {
        let class = self.receiver_class(cx, object)?;
        let ty = cx
            .lookup_field(&class, &field.name)
            .cloned()
            .ok_or_else(|| CheckError::unknown_member(&class, &field.name, field.span))?;
        cx.mark_used(&field.name);
        Ok(ty)
    }

    fn infer_method_call(
        &self,
        cx: &mut AnalysisContext,
        receiver: Option<&Ident>,
        method: &Ident,
        args: &[Expr],
        span: Span,
    ) -> CheckResult<Type> {
        let sig = match receiver {
            Some(receiver) => {
                let class = self.receiver_class(cx, receiver)?;
                cx.lookup_method(&class, &method.name)
                    .cloned()
                    .ok_or_else(|| CheckError::unknown_member(&class, &method.name, method.span))?
            }
            None => cx
                .methods
                .get(&method.name)
                .filter(|sig| sig.owner.is_none())
                .cloned()
                .ok_or_else(|| CheckError::undeclared(&method.name, method.span))?,
        };

        if args.len() != sig.params.len() {
            return Err(CheckError::argument_count(&sig.name, sig.params.len(), args.len(), span));
        }

        for (arg, (param, param_ty)) in args.iter().zip(&sig.params) {
            let arg_ty = self.infer(cx, arg)?;
            if !self.type_checker.is_compatible(&cx.inheritance, param_ty, &arg_ty) {
                return Err(CheckError::type_mismatch(
                    format!(
                        "cannot pass {} as {} for parameter '{}' in call to '{}'",
                        arg_ty, param_ty, param, sig.name
                    ),
                    arg.span,
                ));
            }
        }

        Ok(sig.return_type)
    }

    // === Usage ===

    /// Variable-like symbols never read, in declaration order
    fn unused_variables(&self, cx: &AnalysisContext) -> Vec<Warning> {
        cx.symbols
            .iter()
            .filter(|sym| sym.kind.is_variable_like() && !cx.is_used(&sym.name))
            .map(|sym| Warning::UnusedVariable {
                name: sym.name.clone(),
                line: sym.line,
                span: sym.span,
            })
            .collect()
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
