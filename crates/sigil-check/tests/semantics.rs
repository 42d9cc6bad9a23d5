//! End-to-end checks of the analyzer over hand-built syntax trees

use pretty_assertions::assert_eq;
use sigil_check::ast::*;
use sigil_check::{AnalysisReport, CheckResult, ErrorKind, SemanticAnalyzer, Span, Type, Warning};

fn at(line: usize, column: usize) -> Span {
    Span::at(line, column)
}

fn sig(name: &str, ty: &str, line: usize) -> VarSignature {
    VarSignature::new(Ident::new(name, at(line, 0)), TypeRef::new(ty, at(line, name.len() + 2)))
}

fn decl(name: &str, ty: &str, init: Option<Expr>, line: usize) -> Stmt {
    Stmt::var_decl(VarDecl::new(sig(name, ty, line), init, at(line, 0)))
}

fn assign(name: &str, value: Expr, line: usize) -> Stmt {
    Stmt::assign(Ident::new(name, at(line, 0)), value, at(line, 0))
}

fn show(value: Expr, line: usize) -> Stmt {
    Stmt::show(value, at(line, 0))
}

fn var(name: &str, line: usize) -> Expr {
    Expr::var(name, at(line, 10))
}

fn method(
    name: &str,
    params: Vec<VarSignature>,
    ret_ty: &str,
    statements: Vec<Stmt>,
    ret: Option<Expr>,
    line: usize,
) -> MethodDecl {
    MethodDecl {
        name: Ident::new(name, at(line, ret_ty.len() + 1)),
        params,
        return_type: TypeRef::new(ret_ty, at(line, 0)),
        body: MethodBody::new(statements, ret.map(|e| ReturnStmt::new(e, at(line + 1, 4)))),
        span: at(line, 0),
    }
}

fn class(
    name: &str,
    parent: Option<&str>,
    fields: Vec<VarSignature>,
    methods: Vec<MethodDecl>,
    line: usize,
) -> Stmt {
    Stmt::class(ClassDecl {
        name: Ident::new(name, at(line, 6)),
        parent: parent.map(|p| Ident::new(p, at(line, 20))),
        fields,
        methods,
        span: at(line, 0),
    })
}

fn call(receiver: Option<&str>, name: &str, args: Vec<Expr>, line: usize) -> Expr {
    Expr::call(
        receiver.map(|r| Ident::new(r, at(line, 5))),
        Ident::new(name, at(line, 8)),
        args,
        at(line, 5),
    )
}

fn analyze(statements: Vec<Stmt>) -> CheckResult<AnalysisReport> {
    SemanticAnalyzer::new().analyze(&Program::new(statements))
}

fn error_kind(statements: Vec<Stmt>) -> ErrorKind {
    analyze(statements).unwrap_err().kind()
}

// === Naming and declarations ===

#[test]
fn names_without_sigil_are_rejected() {
    for name in ["x", "count", "_tmp", "value$"] {
        let err = analyze(vec![decl(name, "chunk", None, 1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
        assert!(err.to_string().contains("line 1, column 0"), "{}", err);
    }
}

#[test]
fn names_with_bad_identifier_are_rejected() {
    for name in ["$", "$9lives", "$a-b"] {
        assert_eq!(error_kind(vec![decl(name, "chunk", None, 1)]), ErrorKind::InvalidName);
    }
}

#[test]
fn second_declaration_is_a_redeclaration() {
    let err = analyze(vec![
        decl("$x", "chunk", None, 1),
        decl("$x", "string", None, 2),
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Redeclaration);
    assert_eq!(err.span().line, 2);
}

#[test]
fn methods_and_classes_cannot_be_redeclared() {
    let twice = || Stmt::method(method("tick", vec![], "none", vec![], None, 1));
    assert_eq!(error_kind(vec![twice(), twice()]), ErrorKind::Redeclaration);

    assert_eq!(
        error_kind(vec![
            class("Shape", None, vec![], vec![], 1),
            class("Shape", None, vec![], vec![], 2),
        ]),
        ErrorKind::Redeclaration
    );
}

#[test]
fn parameters_share_the_global_namespace() {
    let err = analyze(vec![
        decl("$w", "chunk", None, 1),
        Stmt::method(method("area", vec![sig("$w", "chunk", 2)], "chunk", vec![], None, 2)),
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Redeclaration);
    assert!(err.to_string().starts_with("Parameter '$w'"));
}

#[test]
fn initializer_must_match_exactly() {
    assert!(analyze(vec![decl("$x", "chunk", Some(Expr::chunk(5, at(1, 12))), 1)]).is_ok());

    // no widening at declaration time
    let err = analyze(vec![decl("$f", "fraction", Some(Expr::chunk(5, at(1, 15))), 1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(
        err.to_string(),
        "Type mismatch: Cannot assign chunk to fraction for variable '$f' at line 1, column 0."
    );
}

#[test]
fn unknown_declared_type_is_rejected() {
    assert_eq!(error_kind(vec![decl("$p", "Point", None, 1)]), ErrorKind::UnknownType);

    let err = analyze(vec![decl("$n", "none", None, 1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownType);
    assert_eq!(err.to_string(), "Unknown type 'none' at line 1, column 4.");
}

#[test]
fn none_is_not_a_parameter_or_field_type() {
    let m = method("take", vec![sig("$nothing", "none", 1)], "chunk", vec![], None, 1);
    assert_eq!(error_kind(vec![Stmt::method(m)]), ErrorKind::UnknownType);

    let c = class("Box", None, vec![sig("$empty", "none", 2)], vec![], 1);
    assert_eq!(error_kind(vec![c]), ErrorKind::UnknownType);
}

#[test]
fn method_names_take_no_sigil() {
    let m = method("$area", vec![], "chunk", vec![], None, 1);
    let err = analyze(vec![Stmt::method(m)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidName);
    assert!(err.to_string().starts_with("Invalid name: '$area'"), "{}", err);
}

#[test]
fn class_cannot_reuse_a_builtin_type_name() {
    for name in ["chunk", "fraction", "string", "none"] {
        let err = analyze(vec![class(name, None, vec![], vec![], 1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
        assert!(err.to_string().contains("is a built-in type"), "{}", err);
    }
}

#[test]
fn class_cannot_inherit_from_itself() {
    let err = analyze(vec![class("Loop", Some("Loop"), vec![], vec![], 1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownType);
    assert_eq!(err.to_string(), "Unknown type 'Loop' at line 1, column 20.");
}

// === Usage tracking ===

#[test]
fn used_variables_are_not_reported() {
    let report = analyze(vec![
        decl("$x", "chunk", Some(Expr::chunk(5, at(1, 12))), 1),
        decl("$y", "string", Some(Expr::string("a", at(2, 13))), 2),
        show(var("$x", 3), 3),
    ])
    .unwrap();

    assert_eq!(
        report.warnings,
        vec![Warning::UnusedVariable {
            name: "$y".into(),
            line: 2,
            span: at(2, 0),
        }]
    );
}

#[test]
fn assignment_target_counts_as_used() {
    let report = analyze(vec![
        decl("$x", "chunk", None, 1),
        assign("$x", Expr::chunk(3, at(2, 5)), 2),
    ])
    .unwrap();
    assert!(!report.has_warnings());
}

#[test]
fn warnings_follow_declaration_order_after_outputs() {
    let report = analyze(vec![
        decl("$b", "chunk", None, 1),
        decl("$a", "chunk", None, 2),
        show(Expr::string("hi", at(3, 5)), 3),
    ])
    .unwrap();

    assert_eq!(
        report.lines(),
        vec![
            "Output: string".to_string(),
            "Warning: Variable '$b' declared at line 1 is declared but never used.".to_string(),
            "Warning: Variable '$a' declared at line 2 is declared but never used.".to_string(),
        ]
    );
}

#[test]
fn unused_sweep_can_be_disabled() {
    let analyzer = SemanticAnalyzer::new().with_unused_warnings(false);
    let report = analyzer
        .analyze(&Program::new(vec![decl("$y", "string", None, 1)]))
        .unwrap();
    assert!(report.warnings.is_empty());
}

#[test]
fn undeclared_references_fail() {
    let err = analyze(vec![show(var("$ghost", 1), 1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UndeclaredVariable);
    assert_eq!(err.to_string(), "Variable '$ghost' not declared at line 1, column 10.");

    assert_eq!(
        error_kind(vec![assign("$ghost", Expr::chunk(1, at(1, 9)), 1)]),
        ErrorKind::UndeclaredVariable
    );
}

// === Expression typing ===

#[test]
fn chunk_promotes_to_fraction_in_either_order() {
    let one = || Expr::chunk(1, at(1, 16));
    let half = || Expr::fraction(0.5, at(1, 20));

    assert!(analyze(vec![decl("$a", "fraction", Some(Expr::add(one(), half())), 1)]).is_ok());
    assert!(analyze(vec![decl("$b", "fraction", Some(Expr::add(half(), one())), 1)]).is_ok());
    assert!(analyze(vec![decl("$c", "fraction", Some(Expr::mul(one(), half())), 1)]).is_ok());
    assert!(analyze(vec![decl("$d", "chunk", Some(Expr::mul(one(), one())), 1)]).is_ok());
}

#[test]
fn fold_carries_the_running_type() {
    // 1 - 2 + 0.5 -> fraction
    let expr = Expr::additive(
        Expr::chunk(1, at(1, 16)),
        vec![
            (AddOp::Sub, Expr::chunk(2, at(1, 20))),
            (AddOp::Add, Expr::fraction(0.5, at(1, 24))),
        ],
    );
    assert!(analyze(vec![decl("$r", "fraction", Some(expr), 1)]).is_ok());

    // 0.5 * 2 / "x" fails on the last step
    let expr = Expr::multiplicative(
        Expr::fraction(0.5, at(1, 16)),
        vec![
            (MulOp::Mul, Expr::chunk(2, at(1, 22))),
            (MulOp::Div, Expr::string("x", at(1, 26))),
        ],
    );
    let err = analyze(vec![decl("$r", "fraction", Some(expr), 1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert!(err.to_string().contains("multiplicative"));
    assert!(err.to_string().contains("fraction and string"));
}

#[test]
fn chunk_plus_string_names_both_types() {
    let expr = Expr::add(Expr::chunk(1, at(1, 13)), Expr::string("a", at(1, 17)));
    let err = analyze(vec![decl("$s", "chunk", Some(expr), 1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(
        err.to_string(),
        "Type mismatch: chunk and string are not the same in additive expression at line 1, column 13."
    );
}

#[test]
fn parenthesized_and_variable_terms() {
    let expr = Expr::mul(
        Expr::paren(Expr::add(var("$x", 2), Expr::chunk(1, at(2, 20))), at(2, 15)),
        Expr::fraction(1.5, at(2, 25)),
    );
    let report = analyze(vec![
        decl("$x", "chunk", Some(Expr::chunk(2, at(1, 12))), 1),
        show(expr, 2),
    ])
    .unwrap();
    assert_eq!(report.lines(), vec!["Output: fraction".to_string()]);
}

#[test]
fn unsupported_shapes_are_internal_errors() {
    let literal = Expr::new(ExprKind::Literal(Literal::Other("true".into())), at(1, 5));
    assert_eq!(error_kind(vec![show(literal, 1)]), ErrorKind::UnsupportedConstruct);

    let term = Expr::new(ExprKind::Unsupported("[1, 2]".into()), at(1, 5));
    let err = analyze(vec![show(term, 1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
    assert!(err.to_string().contains("[1, 2]"));
}

// === Show ===

#[test]
fn show_chunk_literal_outputs_type() {
    let report = analyze(vec![show(Expr::chunk(42, at(1, 5)), 1)]).unwrap();
    assert_eq!(report.outputs.len(), 1);
    assert_eq!(report.outputs[0].ty, Type::Chunk);
    assert_eq!(report.outputs[0].to_string(), "Output: chunk");
}

#[test]
fn show_none_is_invalid() {
    let err = analyze(vec![
        Stmt::method(method("reset", vec![], "none", vec![], None, 1)),
        show(call(None, "reset", vec![], 2), 2),
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert!(err.to_string().contains("cannot show a 'none' value"));
    assert!(err.to_string().contains("line 2, column 0"));
}

// === Classes and inheritance ===

fn shapes() -> Vec<Stmt> {
    vec![
        class("Base", None, vec![sig("$id", "chunk", 2)], vec![], 1),
        class(
            "Sub",
            Some("Base"),
            vec![sig("$label", "string", 4)],
            vec![method("describe", vec![], "string", vec![], Some(Expr::string("sub", at(6, 11))), 5)],
            3,
        ),
        class("Other", None, vec![], vec![], 7),
    ]
}

#[test]
fn subclass_assigns_to_base() {
    let mut program = shapes();
    program.push(decl("$b", "Base", None, 8));
    program.push(assign("$b", Expr::new_instance("Sub", at(9, 5)), 9));
    assert!(analyze(program).is_ok());
}

#[test]
fn unrelated_class_does_not_assign_to_base() {
    let mut program = shapes();
    program.push(decl("$b", "Base", None, 8));
    program.push(assign("$b", Expr::new_instance("Other", at(9, 5)), 9));
    let err = analyze(program).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert!(err.to_string().contains("Cannot assign Other to Base"));
}

#[test]
fn base_does_not_assign_to_subclass() {
    let mut program = shapes();
    program.push(decl("$s", "Sub", None, 8));
    program.push(assign("$s", Expr::new_instance("Base", at(9, 5)), 9));
    assert_eq!(error_kind(program), ErrorKind::TypeMismatch);
}

#[test]
fn declaration_of_base_from_subclass_requires_exact_type() {
    let mut program = shapes();
    program.push(decl("$b", "Base", Some(Expr::new_instance("Sub", at(8, 14))), 8));
    assert_eq!(error_kind(program), ErrorKind::TypeMismatch);
}

#[test]
fn parent_must_be_declared_first() {
    let err = analyze(vec![class("Sub", Some("Base"), vec![], vec![], 1)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownType);
    assert_eq!(err.to_string(), "Unknown type 'Base' at line 1, column 20.");
}

#[test]
fn new_of_unknown_class_fails() {
    assert_eq!(
        error_kind(vec![show(Expr::new_instance("Ghost", at(1, 5)), 1)]),
        ErrorKind::UnknownType
    );
}

#[test]
fn inherited_fields_and_methods_resolve() {
    let mut program = shapes();
    program.push(decl("$s", "Sub", Some(Expr::new_instance("Sub", at(8, 13))), 8));
    program.push(show(Expr::field(Ident::new("$s", at(9, 5)), Ident::new("$id", at(9, 8)), at(9, 5)), 9));
    program.push(show(Expr::field(Ident::new("$s", at(10, 5)), Ident::new("$label", at(10, 8)), at(10, 5)), 10));
    program.push(show(call(Some("$s"), "describe", vec![], 11), 11));

    let report = analyze(program).unwrap();
    assert_eq!(
        report.lines(),
        vec![
            "Output: chunk".to_string(),
            "Output: string".to_string(),
            "Output: string".to_string(),
        ]
    );
}

#[test]
fn unused_fields_are_reported() {
    let report = analyze(shapes()).unwrap();
    assert_eq!(report.unused_names(), vec!["$id", "$label"]);
}

#[test]
fn missing_member_is_reported() {
    let mut program = shapes();
    program.push(decl("$b", "Base", Some(Expr::new_instance("Base", at(8, 14))), 8));
    program.push(show(Expr::field(Ident::new("$b", at(9, 5)), Ident::new("$label", at(9, 8)), at(9, 5)), 9));
    let err = analyze(program).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownMember);
    assert_eq!(err.to_string(), "Class 'Base' has no member '$label' at line 9, column 8.");
}

#[test]
fn member_access_on_primitive_is_invalid() {
    let program = vec![
        decl("$n", "chunk", Some(Expr::chunk(1, at(1, 12))), 1),
        show(Expr::field(Ident::new("$n", at(2, 5)), Ident::new("$x", at(2, 8)), at(2, 5)), 2),
    ];
    assert_eq!(error_kind(program), ErrorKind::InvalidOperation);
}

// === Methods ===

#[test]
fn return_type_must_match() {
    let ok = method(
        "double",
        vec![sig("$v", "chunk", 1)],
        "chunk",
        vec![],
        Some(Expr::mul(var("$v", 2), Expr::chunk(2, at(2, 15)))),
        1,
    );
    let report = analyze(vec![Stmt::method(ok)]).unwrap();
    assert!(!report.has_warnings());

    let bad = method("half", vec![], "chunk", vec![], Some(Expr::fraction(0.5, at(2, 11))), 1);
    let err = analyze(vec![Stmt::method(bad)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert!(err.to_string().contains("expected chunk but got fraction"));
    assert_eq!(err.span().line, 2);
}

#[test]
fn method_without_return_is_not_checked() {
    assert!(analyze(vec![Stmt::method(method("noop", vec![], "chunk", vec![], None, 1))]).is_ok());
}

#[test]
fn method_body_is_analyzed() {
    let body = vec![show(var("$missing", 2), 2)];
    let m = method("broken", vec![], "none", body, None, 1);
    assert_eq!(error_kind(vec![Stmt::method(m)]), ErrorKind::UndeclaredVariable);
}

#[test]
fn unused_parameter_is_reported() {
    let m = method("ignore", vec![sig("$unused", "chunk", 1)], "none", vec![], None, 1);
    let report = analyze(vec![Stmt::method(m)]).unwrap();
    assert_eq!(report.unused_names(), vec!["$unused"]);
}

#[test]
fn call_arguments_are_checked() {
    let mut program = shapes();
    program.push(Stmt::method(method(
        "register",
        vec![sig("$shape", "Base", 8)],
        "chunk",
        vec![],
        Some(Expr::field(Ident::new("$shape", at(9, 11)), Ident::new("$id", at(9, 18)), at(9, 11))),
        8,
    )));

    let with_args = |args: Vec<Expr>| {
        let mut program = program.clone();
        program.push(show(call(None, "register", args, 10), 10));
        analyze(program)
    };

    let report = with_args(vec![Expr::new_instance("Sub", at(10, 14))]).unwrap();
    assert_eq!(report.outputs[0].ty, Type::Chunk);

    let err = with_args(vec![Expr::new_instance("Other", at(10, 14))]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert!(err.to_string().contains("parameter '$shape'"));

    let err = with_args(vec![]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentCount);
    assert_eq!(
        err.to_string(),
        "Method 'register' expects 1 argument(s) but got 0 at line 10, column 5."
    );
}

#[test]
fn class_methods_need_a_receiver() {
    let mut program = shapes();
    program.push(show(call(None, "describe", vec![], 8), 8));
    assert_eq!(error_kind(program), ErrorKind::UndeclaredVariable);
}

#[test]
fn expression_statement_is_typed() {
    let program = vec![
        Stmt::method(method("tick", vec![], "none", vec![], None, 1)),
        Stmt::expr(call(None, "tick", vec![], 2)),
    ];
    assert!(analyze(program).is_ok());
}

// === Run semantics ===

#[test]
fn first_error_stops_the_run() {
    let err = analyze(vec![
        decl("$x", "chunk", None, 1),
        show(var("$nope", 2), 2),
        decl("bad", "chunk", None, 3),
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UndeclaredVariable);
    assert_eq!(err.span().line, 2);
}

#[test]
fn repeated_runs_are_identical() {
    let analyzer = SemanticAnalyzer::new();
    let mut statements = shapes();
    statements.push(decl("$b", "Base", None, 8));
    statements.push(assign("$b", Expr::new_instance("Sub", at(9, 5)), 9));
    statements.push(show(Expr::add(Expr::chunk(1, at(10, 5)), Expr::fraction(2.0, at(10, 9))), 10));
    let program = Program::new(statements);

    let first = analyzer.analyze(&program);
    let second = analyzer.analyze(&program);
    assert!(first.is_ok());
    assert_eq!(first, second);

    let failing = Program::new(vec![decl("$x", "chunk", None, 1), decl("$x", "chunk", None, 2)]);
    assert_eq!(analyzer.analyze(&failing), analyzer.analyze(&failing));
}
