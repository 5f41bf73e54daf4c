use satsu::interpreter::lexer::{TokenKind, lex};

const SAMPLE: &str = "import io;
// Adds two numbers.
func int add(int a, int b) {
    return a + b; // sum
}
func void start() {
    var string s = \"five is \" + string(add(2, 3));
    s.(0, 4);
}
";

#[test]
fn tokens_reproduce_non_blank_content() {
    let tokens = lex(SAMPLE.as_bytes()).unwrap();
    let joined: String = tokens.tokens.iter().skip(1).map(|t| t.text(SAMPLE.as_bytes())).collect();

    let expected: String = SAMPLE.lines()
                                 .map(|line| line.split("//").next().unwrap_or_default())
                                 .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
                                 .collect();
    let joined: String = joined.chars().filter(|c| !c.is_whitespace()).collect();

    assert_eq!(joined, expected);
}

#[test]
fn function_declaration_token_stream() {
    let source = b"func int add(int a, int b) { return a + b; }";
    let kinds: Vec<TokenKind> = lex(source).unwrap().tokens.iter().skip(1).take(6).map(|t| t.kind).collect();

    assert_eq!(kinds,
               [TokenKind::Func,
                TokenKind::Int,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::Int,
                TokenKind::Ident]);
}

#[test]
fn dump_has_one_line_per_token() {
    let tokens = lex(b"var int x = 1;").unwrap();
    let dump = tokens.dump();

    assert_eq!(dump.lines().count(), tokens.len() - 1);
    assert!(dump.lines().next().is_some_and(|line| line.ends_with("0+3")));
}

#[test]
fn empty_source_has_only_the_null_token() {
    let tokens = lex(b"  \n\t// nothing here\n").unwrap();

    assert!(tokens.is_empty());
    assert_eq!(tokens.token(0).kind, TokenKind::Null);
    assert_eq!(tokens.token(5).kind, TokenKind::Null);
}
