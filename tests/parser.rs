use satsu::{
    ast::{Ast, NodeKind, ROOT_NODE},
    error::{ErrorKind, ParseError, Span},
    interpreter::{
        lexer::{LexOutput, TokenKind, lex},
        parser::parse,
    },
};

fn parse_source(source: &str) -> (LexOutput, Ast) {
    let tokens = lex(source.as_bytes()).unwrap_or_else(|e| panic!("lexing failed: {e}"));
    let ast = parse(&tokens).unwrap_or_else(|e| panic!("parsing failed: {e}"));
    (tokens, ast)
}

fn parse_failure(source: &str) -> (ParseError, Span) {
    let tokens = lex(source.as_bytes()).unwrap_or_else(|e| panic!("lexing failed: {e}"));
    let diagnostic = parse(&tokens).expect_err("parsing succeeded but was expected to fail");
    match diagnostic.error {
        ErrorKind::Parse(error) => (error, diagnostic.span),
        other => panic!("expected a parse error, got {other}"),
    }
}

/// The first statement of the body of the first function.
fn first_statement(ast: &Ast) -> u32 {
    let function = ast.child(ROOT_NODE, 0);
    let body = ast.child(function, 2);
    ast.child(body, 0)
}

/// Renders an expression as an s-expression; leaves show their token text.
fn render(source: &str, tokens: &LexOutput, ast: &Ast, node: u32) -> String {
    let children = ast.children(node);
    if children.is_empty() {
        return tokens.token(ast.node(node).token).text(source.as_bytes());
    }
    let inner: Vec<String> = children.iter()
                                     .map(|&child| render(source, tokens, ast, child))
                                     .collect();
    format!("({} {})", ast.kind(node), inner.join(" "))
}

fn shape(expression: &str) -> String {
    let source = format!("func void f() {{ {expression}; }}");
    let (tokens, ast) = parse_source(&source);
    render(&source, &tokens, &ast, first_statement(&ast))
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(shape("a + b * c"), "(EADD a (EMUL b c))");
    assert_eq!(shape("(a + b) * c"), "(EMUL (EADD a b) c)");
    assert_eq!(shape("a % b - c / d"), "(ESUB (EMOD a b) (EDIV c d))");
}

#[test]
fn arithmetic_is_left_associative() {
    assert_eq!(shape("a - b - c"), "(ESUB (ESUB a b) c)");
    assert_eq!(shape("a / b * c"), "(EMUL (EDIV a b) c)");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(shape("a = b += c"), "(EASSIGN a (EADDASSIGN b c))");
    assert_eq!(shape("a *= b + 1"), "(EMULASSIGN a (EADD b 1))");
}

#[test]
fn ternary_nests_to_the_right() {
    assert_eq!(shape("a ? b : c ? d : e"), "(ETERNARY a b (ETERNARY c d e))");
    assert_eq!(shape("x = c ? a : b"), "(EASSIGN x (ETERNARY c a b))");
    assert_eq!(shape("a || b ? 1 : 2"), "(ETERNARY (EOR a b) 1 2)");
}

#[test]
fn logical_operator_precedence() {
    assert_eq!(shape("a || b && c"), "(EOR a (EAND b c))");
    assert_eq!(shape("a ^^ b || c"), "(EOR (EXOR a b) c)");
    assert_eq!(shape("a && b ^^ c"), "(EXOR (EAND a b) c)");
    assert_eq!(shape("a + 1 < b == c"), "(EEQUAL (ELESS (EADD a 1) b) c)");
}

#[test]
fn prefix_operators_bind_below_postfix() {
    assert_eq!(shape("-a * b"), "(EMUL (ENEG a) b)");
    assert_eq!(shape("!f(x)"), "(ENOT (ECALL f x))");
    assert_eq!(shape("--a"), "(ENEG (ENEG a))");
}

#[test]
fn calls_and_string_access() {
    assert_eq!(shape("f()"), "(ECALL f)");
    assert_eq!(shape("f(a, b + 1)"), "(ECALL f a (EADD b 1))");
    assert_eq!(shape("s.(1)"), "(EACCESS s 1)");
    assert_eq!(shape("s.(1, n - 1)"), "(EACCESS s 1 (ESUB n 1))");
    assert_eq!(shape("f(s.(0))"), "(ECALL f (EACCESS s 0))");
}

#[test]
fn casts_carry_their_target_type() {
    assert_eq!(shape("int(r)"), "(ECAST r int)");
    assert_eq!(shape("string(a + 1)"), "(ECAST (EADD a 1) string)");
}

#[test]
fn system_calls_list_types_then_arguments() {
    assert_eq!(shape("system int add(int, int)(1, 2)"), "(ESYSTEM int int int 1 2)");
    assert_eq!(shape("system void tick()()"), "(ESYSTEM void)");
}

#[test]
fn statement_layouts() {
    let source = "func int f(int a, string b) {
                      var int i = 0;
                      if (a < 1) { return 1; } else return;
                      while (true) break;
                      for (var int j = 0; j < 3; j += 1) continue;
                  }";
    let (_, ast) = parse_source(source);
    let function = ast.child(ROOT_NODE, 0);
    assert_eq!(ast.kind(function), NodeKind::FuncDecl);

    let args = ast.child(function, 1);
    assert_eq!(ast.kind(args), NodeKind::ArgList);
    assert_eq!(ast.children(args).len(), 2);

    let body = ast.child(function, 2);
    let kinds: Vec<NodeKind> = ast.children(body).iter().map(|&n| ast.kind(n)).collect();
    assert_eq!(kinds, [NodeKind::LocalDecl, NodeKind::CTree, NodeKind::While, NodeKind::For]);

    let branch = ast.child(body, 1);
    assert_eq!(ast.children(branch).len(), 3);
    let bare_return = ast.child(branch, 2);
    assert_eq!(ast.kind(bare_return), NodeKind::Return);
    assert!(ast.children(bare_return).is_empty());

    let for_loop = ast.child(body, 3);
    let kinds: Vec<NodeKind> = ast.children(for_loop).iter().map(|&n| ast.kind(n)).collect();
    assert_eq!(kinds,
               [NodeKind::LocalDecl, NodeKind::ELess, NodeKind::EAddAssign, NodeKind::Continue]);
}

#[test]
fn for_accepts_expression_initializer() {
    let (_, ast) = parse_source("func void f() { for (i = 0; i < 3; i += 1) {} }");
    let for_loop = first_statement(&ast);
    assert_eq!(ast.kind(ast.child(for_loop, 0)), NodeKind::EAssign);
}

#[test]
fn imports_and_functions_in_source_order() {
    let (_, ast) = parse_source("func void a() {} import io; func void b() {}");
    let kinds: Vec<NodeKind> = ast.children(ROOT_NODE).iter().map(|&n| ast.kind(n)).collect();
    assert_eq!(kinds, [NodeKind::FuncDecl, NodeKind::Import, NodeKind::FuncDecl]);
}

#[test]
fn dump_lists_every_node() {
    let (tokens, ast) = parse_source("func void start() {}");
    let dump = ast.dump(&tokens);
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines.len(), ast.len() - 1);
    assert!(lines[0].starts_with("ROOT"));
    assert!(lines[1].starts_with("  FUNCDECL"));
}

#[test]
fn missing_semicolon_is_reported_at_next_token() {
    let (error, span) = parse_failure("func void f() { x = 1 }");
    assert_eq!(error, ParseError::UnexpectedToken { found: TokenKind::RBrace });
    assert_eq!(span, Span::new(22, 1));
}

#[test]
fn top_level_statements_are_rejected() {
    let (error, _) = parse_failure("var int x = 1;");
    assert_eq!(error, ParseError::ExpectedRootElement { found: TokenKind::Var });
}

#[test]
fn trailing_comma_in_parameters_is_rejected() {
    let (error, _) = parse_failure("func void f(int a,) {}");
    assert_eq!(error, ParseError::ExpectedType { found: TokenKind::RParen });
}

#[test]
fn missing_return_type_is_rejected() {
    let (error, _) = parse_failure("func f() {}");
    assert_eq!(error, ParseError::ExpectedType { found: TokenKind::Ident });
}

#[test]
fn reserved_new_is_not_an_expression() {
    let (error, _) = parse_failure("func void f() { new; }");
    assert_eq!(error, ParseError::ExpectedExpression { found: TokenKind::New });
}

#[test]
fn missing_operand_is_rejected() {
    let (error, _) = parse_failure("func void f() { x = ; }");
    assert_eq!(error, ParseError::ExpectedExpression { found: TokenKind::Semicolon });
}

#[test]
fn unexpected_end_of_input() {
    let (error, _) = parse_failure("func void f() {");
    assert!(matches!(error, ParseError::UnexpectedEof { .. }));

    let (error, _) = parse_failure("func void f() { x = 1 + ");
    assert!(matches!(error, ParseError::UnexpectedEof { .. }));
}

#[test]
fn call_arguments_need_separators() {
    let (error, _) = parse_failure("func void f() { g(a b); }");
    assert_eq!(error, ParseError::UnexpectedToken { found: TokenKind::Ident });
}

#[test]
fn parsing_is_deterministic() {
    let source = "func int f(int a) { return a > 0 ? f(a - 1) + 1 : 0; } func void start() {}";
    let (_, first) = parse_source(source);
    let (_, second) = parse_source(source);

    assert_eq!(first, second);
}
