use satsu::{
    ast::PrimType,
    error::{Diagnostic, ErrorKind, SemaError, Span},
    interpreter::analyzer::analyze,
    load_source,
};

fn check(source: &str) -> Result<(), Diagnostic> {
    load_source(source.as_bytes()).map(drop)
}

fn assert_success(source: &str) {
    if let Err(e) = check(source) {
        panic!("program was rejected: {e}\n{source}");
    }
}

fn sema_error(source: &str) -> SemaError {
    match check(source) {
        Ok(()) => panic!("program was accepted but should be rejected:\n{source}"),
        Err(Diagnostic { error: ErrorKind::Sema(error), .. }) => error,
        Err(other) => panic!("expected a semantic error, got {other}"),
    }
}

/// Wraps statements in an entry function.
fn body(statements: &str) -> String {
    format!("func void start() {{ {statements} }}")
}

#[test]
fn well_typed_program_is_accepted() {
    assert_success("func int add(int a, int b) { return a + b; }
                    func string greet(string who) { return \"hi \" + who; }
                    func void start() {
                        var int n = add(1, 2);
                        var real r = real(n) * 1.5;
                        var string s = greet(string(n));
                        var bool b = n < 3 && s != \"\" || !(r >= 2.0);
                        for (var int i = 0; i < n; i += 1) {
                            if (i % 2 == 0) { continue; }
                            while (b) { b = false; break; }
                        }
                        n = b ? 1 : 2;
                        s = s.(0, 2) + s.(1);
                    }");
}

#[test]
fn duplicate_function_is_rejected() {
    assert_eq!(sema_error("func void f() {}\nfunc int f() { return 1; }"),
               SemaError::FunctionRedefinition { name:   "f".to_string(),
                                                 module: "<source>".to_string(),
                                                 line:   1, });
}

#[test]
fn redefinition_in_same_scope_is_rejected() {
    assert_eq!(sema_error(&body("var int x = 1; var int x = 2;")),
               SemaError::VariableRedefinition { name: "x".to_string() });
}

#[test]
fn nested_scope_may_shadow() {
    assert_success(&body("var int x = 1; { var string x = \"a\"; x = \"b\"; } x = 2;"));
    assert_success("func void f(int a) { var string a = \"shadow\"; }");
}

#[test]
fn locals_do_not_outlive_their_block() {
    assert_eq!(sema_error(&body("{ var int inner = 1; } inner = 2;")),
               SemaError::UnknownSymbol { name: "inner".to_string() });
    assert_eq!(sema_error(&body("for (var int i = 0; i < 3; i += 1) {} i = 1;")),
               SemaError::UnknownSymbol { name: "i".to_string() });
    assert_success(&body("for (var int i = 0; i < 3; i += 1) {} var int i = 7;"));
}

#[test]
fn duplicate_argument_is_rejected() {
    assert_eq!(sema_error("func void f(int a, real a) {}"),
               SemaError::DuplicateArgument { name: "a".to_string() });
}

#[test]
fn void_variables_are_rejected() {
    assert_eq!(sema_error(&body("var void x = 1;")),
               SemaError::VoidVariable { name: "x".to_string() });
    assert_eq!(sema_error("func void f(void a) {}"),
               SemaError::VoidVariable { name: "a".to_string() });
}

#[test]
fn unknown_symbol_is_located() {
    let diagnostic = check(&body("y = 1;")).unwrap_err();

    assert_eq!(diagnostic.error,
               ErrorKind::Sema(SemaError::UnknownSymbol { name: "y".to_string() }));
    assert_eq!(diagnostic.module, Some(0));
    assert_eq!(diagnostic.span, Span::new(20, 1));
}

#[test]
fn functions_are_not_values() {
    assert_eq!(sema_error("func int one() { return 1; } func void start() { var int x = one; }"),
               SemaError::FunctionAsValue { name: "one".to_string() });
    assert_eq!(sema_error("func void g() {} func void start() { g = 1; }"),
               SemaError::NotAnLvalue);
}

#[test]
fn only_functions_are_callable() {
    assert_eq!(sema_error(&body("var int x = 1; x();")), SemaError::NotCallable);
    assert_eq!(sema_error(&body("(1)(2);")), SemaError::NotCallable);
    assert_eq!(sema_error(&body("missing();")),
               SemaError::UnknownSymbol { name: "missing".to_string() });
}

#[test]
fn calls_must_match_the_declaration() {
    let add = "func int add(int a, int b) { return a + b; }";

    assert_eq!(sema_error(&format!("{add} {}", body("add(1);"))),
               SemaError::ArgumentCount { name:     "add".to_string(),
                                          expected: 2,
                                          found:    1, });
    assert_eq!(sema_error(&format!("{add} {}", body("add(1, 2.0);"))),
               SemaError::ArgumentType { name:     "add".to_string(),
                                         position: 2,
                                         expected: PrimType::Int,
                                         found:    PrimType::Real, });
}

#[test]
fn functions_may_be_called_before_their_declaration() {
    assert_success("func void start() { var int n = later(); } func int later() { return 1; }");
}

#[test]
fn operands_must_share_a_type() {
    assert_eq!(sema_error(&body("var int x = 1 + 2.0;")),
               SemaError::OperandMismatch { op:    "+",
                                            left:  PrimType::Int,
                                            right: PrimType::Real, });
}

#[test]
fn operators_reject_unsupported_types() {
    assert_eq!(sema_error(&body("var bool b = true + false;")),
               SemaError::InvalidOperand { op:    "+",
                                           found: PrimType::Bool, });
    assert_eq!(sema_error(&body("var string s = -\"a\";")),
               SemaError::InvalidOperand { op:    "-",
                                           found: PrimType::String, });
    assert_eq!(sema_error(&body("var bool b = !1;")),
               SemaError::InvalidOperand { op:    "!",
                                           found: PrimType::Int, });
    assert_eq!(sema_error(&body("var string s = \"a\" * \"b\";")),
               SemaError::InvalidOperand { op:    "*",
                                           found: PrimType::String, });
    assert_eq!(sema_error(&body("var bool b = 1 && 2;")),
               SemaError::InvalidOperand { op:    "&&",
                                           found: PrimType::Int, });
}

#[test]
fn comparisons_accept_numbers_and_strings_only() {
    assert_success(&body("var bool b = \"a\" < \"b\"; b = 1.5 == 2.5;"));
    assert_eq!(sema_error(&body("var bool b = true == false;")),
               SemaError::InvalidOperand { op:    "==",
                                           found: PrimType::Bool, });
}

#[test]
fn chained_comparison_is_rejected() {
    assert_eq!(sema_error(&body("var bool b = 1 < 2 < 3;")),
               SemaError::OperandMismatch { op:    "<",
                                            left:  PrimType::Bool,
                                            right: PrimType::Int, });
}

#[test]
fn conditions_must_be_bool() {
    let expected = SemaError::TypeMismatch { expected: PrimType::Bool,
                                             found:    PrimType::Int, };

    assert_eq!(sema_error(&body("if (1) {}")), expected);
    assert_eq!(sema_error(&body("while (1) {}")), expected);
    assert_eq!(sema_error(&body("for (var int i = 0; i; i += 1) {}")), expected);
    assert_eq!(sema_error(&body("var int x = 1 ? 2 : 3;")), expected);
}

#[test]
fn ternary_branches_must_agree() {
    assert_eq!(sema_error(&body("var int x = true ? 1 : 2.0;")),
               SemaError::TernaryMismatch { then_type: PrimType::Int,
                                            else_type: PrimType::Real, });
}

#[test]
fn assignment_targets_and_types() {
    assert_eq!(sema_error(&body("1 = 2;")), SemaError::NotAnLvalue);
    assert_eq!(sema_error(&body("var int x = 1; x = \"a\";")),
               SemaError::TypeMismatch { expected: PrimType::Int,
                                         found:    PrimType::String, });
    assert_eq!(sema_error(&body("var string s = \"a\"; s -= \"b\";")),
               SemaError::InvalidOperand { op:    "-=",
                                           found: PrimType::String, });
    assert_success(&body("var string s = \"a\"; s += \"b\"; var bool b = true; b = false;"));
}

#[test]
fn declaration_initializer_must_match() {
    assert_eq!(sema_error(&body("var real r = 1;")),
               SemaError::TypeMismatch { expected: PrimType::Real,
                                         found:    PrimType::Int, });
}

#[test]
fn initializer_cannot_see_its_own_name() {
    assert_eq!(sema_error(&body("var int x = x;")),
               SemaError::UnknownSymbol { name: "x".to_string() });
}

#[test]
fn cast_matrix() {
    assert_success(&body("var int a = int(2.5); var int b = int(\"12\"); var int c = int(true);
                          var real d = real(1); var real e = real(\"1.5\");
                          var string f = string(1); var string g = string(1.5);
                          var string h = string(false); var bool i = bool(3);"));

    assert_eq!(sema_error(&body("var int x = int(5);")),
               SemaError::InvalidCast { from: PrimType::Int,
                                        to:   PrimType::Int, });
    assert_eq!(sema_error(&body("var bool b = bool(\"yes\");")),
               SemaError::InvalidCast { from: PrimType::String,
                                        to:   PrimType::Bool, });
    assert_eq!(sema_error(&body("var real r = real(true);")),
               SemaError::InvalidCast { from: PrimType::Bool,
                                        to:   PrimType::Real, });
}

#[test]
fn return_must_match_function_type() {
    assert_eq!(sema_error("func void f() { return 1; }"), SemaError::UnexpectedReturnValue);
    assert_eq!(sema_error("func int f() { return; }"),
               SemaError::MissingReturnValue { expected: PrimType::Int });
    assert_eq!(sema_error("func int f() { return \"a\"; }"),
               SemaError::TypeMismatch { expected: PrimType::Int,
                                         found:    PrimType::String, });
}

#[test]
fn falling_off_the_end_is_allowed() {
    assert_success("func int f(bool b) { if (b) { return 1; } }");
}

#[test]
fn jumps_need_an_enclosing_loop() {
    assert_eq!(sema_error(&body("break;")), SemaError::BreakOutsideLoop);
    assert_eq!(sema_error(&body("if (true) { continue; }")), SemaError::ContinueOutsideLoop);
    assert_success(&body("while (true) { if (true) { break; } continue; }"));
    assert_eq!(sema_error(&body("while (true) {} break;")), SemaError::BreakOutsideLoop);
}

#[test]
fn integer_literal_must_fit() {
    assert_eq!(sema_error(&body("var int x = 99999999999999999999;")),
               SemaError::IntegerOutOfRange);
    assert_success(&body("var int x = 9223372036854775807;"));
}

#[test]
fn system_call_signatures() {
    assert_success(&body("var string line = system string readln(int)(0);"));

    assert_eq!(sema_error(&body("system void f(int, int, int, int, int, int, int)(1, 2, 3, 4, 5, 6, 7);")),
               SemaError::TooManySystemArguments { found: 7 });
    assert_eq!(sema_error(&body("system void f(void)(1);")),
               SemaError::VoidParameter { position: 1 });
    assert_eq!(sema_error(&body("system void f(int)();")),
               SemaError::ArgumentCount { name:     "f".to_string(),
                                          expected: 1,
                                          found:    0, });
    assert_eq!(sema_error(&body("system void f(int)(\"a\");")),
               SemaError::ArgumentType { name:     "f".to_string(),
                                         position: 1,
                                         expected: PrimType::Int,
                                         found:    PrimType::String, });
}

#[test]
fn string_access_types() {
    assert_success(&body("var string s = \"abc\"; var string c = s.(1); c = s.(0, 2);"));
    assert_eq!(sema_error(&body("var int n = 5; var string c = n.(1);")),
               SemaError::TypeMismatch { expected: PrimType::String,
                                         found:    PrimType::Int, });
    assert_eq!(sema_error(&body("var string s = \"abc\"; var string c = s.(1.0);")),
               SemaError::TypeMismatch { expected: PrimType::Int,
                                         found:    PrimType::Real, });
}

#[test]
fn void_calls_have_no_value() {
    let g = "func void g() {}";

    assert_eq!(sema_error(&format!("{g} {}", body("var int x = g();"))),
               SemaError::TypeMismatch { expected: PrimType::Int,
                                         found:    PrimType::Void, });
    assert_success(&format!("{g} {}", body("g();")));
}

#[test]
fn analysis_is_repeatable() {
    let modules = load_source(body("var int x = 1;").as_bytes()).unwrap();

    assert!(analyze(&modules).is_ok());
    assert!(analyze(&modules).is_ok());
}
