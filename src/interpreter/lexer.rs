use logos::{Lexer, Logos};

use crate::{
    error::{Diagnostic, LexError, Span},
    util::num::usize_to_u32,
};

/// Longest identifier, in bytes, the lexer accepts.
pub const MAX_IDENT: usize = 63;

/// The kind of a lexical token.
///
/// Tokens carry no payload. Literal values and identifier names are read back
/// from the source bytes through the [`Token`] readers when needed.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(source = [u8], error = LexError)]
pub enum TokenKind {
    /// Kind of the sentinel token at index 0. Never produced by scanning.
    Null,
    /// Identifier tokens, such as `count` or `_tmp2`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", check_identifier)]
    Ident,
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+")]
    IntLit,
    /// Real literal tokens, such as `3.14`.
    #[regex(r"[0-9]+\.[0-9]+")]
    #[regex(r"[0-9]+\.[0-9]*\.[0-9.]*", malformed_number)]
    RealLit,
    /// String literal tokens, quotes included.
    #[token("\"", scan_string)]
    StrLit,
    /// `bool`
    #[token("bool")]
    Bool,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `for`
    #[token("for")]
    For,
    /// `func`
    #[token("func")]
    Func,
    /// `if`
    #[token("if")]
    If,
    /// `import`
    #[token("import")]
    Import,
    /// `int`
    #[token("int")]
    Int,
    /// `new`, reserved.
    #[token("new")]
    New,
    /// `real`
    #[token("real")]
    Real,
    /// `return`
    #[token("return")]
    Return,
    /// `string`
    #[token("string")]
    String,
    /// `system`
    #[token("system")]
    System,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `void`
    #[token("void")]
    Void,
    /// `while`
    #[token("while")]
    While,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `!`
    #[token("!")]
    Bang,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `+`
    #[token("+")]
    Plus,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    PipePipe,
    /// `^^`
    #[token("^^")]
    CaretCaret,
    /// `?`
    #[token("?")]
    Question,
    /// `:`
    #[token(":")]
    Colon,
    /// `=`
    #[token("=")]
    Assign,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `// Comments.` running to the end of the line.
    #[token("//", skip_comment)]
    Comment,
    /// Spaces, tabs, line breaks and feeds.
    #[regex(r"[ \t\r\n\f\v]+", logos::skip)]
    Ignored,
}

impl TokenKind {
    /// Returns a short human-readable name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "nothing",
            Self::Ident => "identifier",
            Self::IntLit => "integer literal",
            Self::RealLit => "real literal",
            Self::StrLit => "string literal",
            Self::Bool => "'bool'",
            Self::Break => "'break'",
            Self::Continue => "'continue'",
            Self::Else => "'else'",
            Self::False => "'false'",
            Self::For => "'for'",
            Self::Func => "'func'",
            Self::If => "'if'",
            Self::Import => "'import'",
            Self::Int => "'int'",
            Self::New => "'new'",
            Self::Real => "'real'",
            Self::Return => "'return'",
            Self::String => "'string'",
            Self::System => "'system'",
            Self::True => "'true'",
            Self::Var => "'var'",
            Self::Void => "'void'",
            Self::While => "'while'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Dot => "'.'",
            Self::Minus => "'-'",
            Self::Bang => "'!'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Plus => "'+'",
            Self::Less => "'<'",
            Self::LessEqual => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEqual => "'>='",
            Self::EqualEqual => "'=='",
            Self::BangEqual => "'!='",
            Self::AndAnd => "'&&'",
            Self::PipePipe => "'||'",
            Self::CaretCaret => "'^^'",
            Self::Question => "'?'",
            Self::Colon => "':'",
            Self::Assign => "'='",
            Self::PlusAssign => "'+='",
            Self::MinusAssign => "'-='",
            Self::StarAssign => "'*='",
            Self::SlashAssign => "'/='",
            Self::PercentAssign => "'%='",
            Self::Comment => "comment",
            Self::Ignored => "whitespace",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rejects identifiers longer than [`MAX_IDENT`].
fn check_identifier(lex: &Lexer<TokenKind>) -> Result<(), LexError> {
    if lex.slice().len() > MAX_IDENT {
        Err(LexError::IdentifierTooLong)
    } else {
        Ok(())
    }
}

/// Rejects numbers with more than one decimal point.
const fn malformed_number(_: &Lexer<TokenKind>) -> Result<(), LexError> {
    Err(LexError::MalformedNumber)
}

/// Consumes a string literal after its opening quote.
///
/// A backslash escapes the byte after it, whatever that byte is. Reaching the
/// end of input first consumes the rest of the source and fails, so the error
/// spans from the opening quote to the end.
fn scan_string(lex: &mut Lexer<TokenKind>) -> Result<(), LexError> {
    let rest = lex.remainder();
    let mut index = 0;

    while index < rest.len() {
        match rest[index] {
            b'\\' => index += 2,
            b'"' => {
                lex.bump(index + 1);
                return Ok(());
            },
            _ => index += 1,
        }
    }

    lex.bump(rest.len());
    Err(LexError::UnterminatedString)
}

/// Skips a line comment, leaving the terminating newline in place.
fn skip_comment(lex: &mut Lexer<TokenKind>) -> logos::Skip {
    let rest = lex.remainder();
    let length = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
    lex.bump(length);
    logos::Skip
}

/// One token: a kind and the byte range it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Byte offset of the first byte.
    pub offset: u32,
    /// Number of bytes.
    pub length: u32,
    /// The token kind.
    pub kind:   TokenKind,
}

impl Token {
    /// The sentinel token stored at index 0 of every lexer output.
    pub const NULL: Self = Self { offset: 0,
                                  length: 0,
                                  kind:   TokenKind::Null, };

    /// Returns the raw bytes of the token.
    #[must_use]
    pub fn bytes<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        let start = (self.offset as usize).min(source.len());
        let end = (start + self.length as usize).min(source.len());
        &source[start..end]
    }

    /// Returns the token text, replacing invalid UTF-8.
    ///
    /// This is how identifier names are read.
    #[must_use]
    pub fn text(&self, source: &[u8]) -> String {
        String::from_utf8_lossy(self.bytes(source)).into_owned()
    }

    /// Reads an integer literal.
    ///
    /// # Returns
    /// `None` if the literal does not fit in an `i64`.
    #[must_use]
    pub fn int_value(&self, source: &[u8]) -> Option<i64> {
        std::str::from_utf8(self.bytes(source)).ok()?.parse().ok()
    }

    /// Reads a real literal.
    #[must_use]
    pub fn real_value(&self, source: &[u8]) -> f64 {
        std::str::from_utf8(self.bytes(source)).ok()
                                               .and_then(|text| text.parse().ok())
                                               .unwrap_or(0.0)
    }

    /// Reads a string literal as raw bytes, dropping the quotes and resolving
    /// escapes.
    ///
    /// `\n`, `\t`, `\r` and `\0` become the matching control bytes; any other
    /// escaped byte stands for itself.
    ///
    /// # Example
    /// ```
    /// use satsu::interpreter::lexer::lex;
    ///
    /// let source = br#""a\tb\"c\\""#;
    /// let output = lex(source).unwrap();
    ///
    /// assert_eq!(output.token(1).string_value(source), b"a\tb\"c\\");
    /// ```
    #[must_use]
    pub fn string_value(&self, source: &[u8]) -> Vec<u8> {
        let bytes = self.bytes(source);
        let inner = bytes.get(1..bytes.len().saturating_sub(1)).unwrap_or_default();
        let mut out = Vec::with_capacity(inner.len());
        let mut escaped = inner.iter();

        while let Some(&byte) = escaped.next() {
            if byte != b'\\' {
                out.push(byte);
                continue;
            }
            match escaped.next() {
                Some(b'n') => out.push(b'\n'),
                Some(b't') => out.push(b'\t'),
                Some(b'r') => out.push(b'\r'),
                Some(b'0') => out.push(0),
                Some(&other) => out.push(other),
                None => {},
            }
        }

        out
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}+{}", self.kind, self.offset, self.length)
    }
}

/// The tokens of one source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexOutput {
    /// Tokens in source order, [`Token::NULL`] first.
    pub tokens: Vec<Token>,
}

impl LexOutput {
    /// Returns the token at `index`, or the null token past the end.
    #[must_use]
    pub fn token(&self, index: u32) -> Token {
        self.tokens.get(index as usize).copied().unwrap_or(Token::NULL)
    }

    /// Returns the number of tokens, the null token included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the output holds only the null token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    /// Renders one token per line.
    #[must_use]
    pub fn dump(&self) -> String {
        self.tokens
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, token)| format!("{index:>5} {token}\n"))
            .collect()
    }
}

/// Splits source bytes into tokens.
///
/// Whitespace and `//` comments are skipped. Keywords win over identifiers of
/// the same length and operators are matched longest first.
///
/// # Parameters
/// - `source`: The bytes to scan.
///
/// # Returns
/// The tokens, preceded by the null token.
///
/// # Errors
/// A lexing [`Diagnostic`] for the first malformed token. Unexpected bytes
/// are reported with a one-byte span.
///
/// # Example
/// ```
/// use satsu::interpreter::lexer::{TokenKind, lex};
///
/// let output = lex(b"var int x = 1; // one").unwrap();
/// let kinds: Vec<TokenKind> = output.tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Null,
///             TokenKind::Var,
///             TokenKind::Int,
///             TokenKind::Ident,
///             TokenKind::Assign,
///             TokenKind::IntLit,
///             TokenKind::Semicolon]);
/// ```
pub fn lex(source: &[u8]) -> Result<LexOutput, Diagnostic> {
    if usize_to_u32(source.len()).is_none() {
        return Err(Diagnostic::new(Span::default(), LexError::SourceTooLarge));
    }

    let mut tokens = vec![Token::NULL];
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let offset = usize_to_u32(range.start).unwrap_or(u32::MAX);
        let length = usize_to_u32(range.len()).unwrap_or(u32::MAX);

        match result {
            Ok(kind) => tokens.push(Token { offset, length, kind }),
            Err(LexError::UnexpectedByte) => {
                return Err(Diagnostic::new(Span::new(offset, 1), LexError::UnexpectedByte));
            },
            Err(error) => return Err(Diagnostic::new(Span::new(offset, length), error)),
        }
    }

    Ok(LexOutput { tokens })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kinds(source: &[u8]) -> Vec<TokenKind> {
        lex(source).unwrap().tokens.iter().skip(1).map(|t| t.kind).collect()
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(kinds(b"a+=b==c<=d"),
                   [TokenKind::Ident,
                    TokenKind::PlusAssign,
                    TokenKind::Ident,
                    TokenKind::EqualEqual,
                    TokenKind::Ident,
                    TokenKind::LessEqual,
                    TokenKind::Ident]);
    }

    #[test]
    fn keywords_need_exact_match() {
        assert_eq!(kinds(b"int integer for_ new"),
                   [TokenKind::Int, TokenKind::Ident, TokenKind::Ident, TokenKind::New]);
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(kinds(b"a // b c\nd"), [TokenKind::Ident, TokenKind::Ident]);
        assert!(kinds(b"// only").is_empty());
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let source = br#""say \"hi\"" x"#;
        let output = lex(source).unwrap();

        assert_eq!(output.token(1).kind, TokenKind::StrLit);
        assert_eq!(output.token(1).length, 12);
        assert_eq!(output.token(2).kind, TokenKind::Ident);
    }

    #[test]
    fn unterminated_string_spans_to_end() {
        let error = lex(b"x = \"abc").unwrap_err();

        assert_eq!(error.error, ErrorKind::Lex(LexError::UnterminatedString));
        assert_eq!(error.span, Span::new(4, 4));
    }

    #[test]
    fn unexpected_byte_has_unit_span() {
        let error = lex(b"a @@ b").unwrap_err();

        assert_eq!(error.error, ErrorKind::Lex(LexError::UnexpectedByte));
        assert_eq!(error.span, Span::new(2, 1));
    }

    #[test]
    fn second_decimal_point_is_rejected() {
        let error = lex(b"1.2.3").unwrap_err();

        assert_eq!(error.error, ErrorKind::Lex(LexError::MalformedNumber));
        assert_eq!(error.span, Span::new(0, 5));

        let error = lex(b"1.2.").unwrap_err();
        assert_eq!(error.error, ErrorKind::Lex(LexError::MalformedNumber));
        assert_eq!(error.span, Span::new(0, 4));

        let error = lex(b"1..2").unwrap_err();
        assert_eq!(error.error, ErrorKind::Lex(LexError::MalformedNumber));
        assert_eq!(error.span, Span::new(0, 4));

        let error = lex(b"x = 7..;").unwrap_err();
        assert_eq!(error.error, ErrorKind::Lex(LexError::MalformedNumber));
        assert_eq!(error.span, Span::new(4, 3));
    }

    #[test]
    fn long_identifier_is_rejected() {
        let name = "a".repeat(MAX_IDENT + 1);
        let error = lex(name.as_bytes()).unwrap_err();

        assert_eq!(error.error, ErrorKind::Lex(LexError::IdentifierTooLong));
        assert_eq!(error.span.length as usize, MAX_IDENT + 1);
        assert!(lex("b".repeat(MAX_IDENT).as_bytes()).is_ok());
    }

    #[test]
    fn literal_readers() {
        let source = b"12 3.25 99999999999999999999";
        let output = lex(source).unwrap();

        assert_eq!(output.token(1).int_value(source), Some(12));
        assert!((output.token(2).real_value(source) - 3.25).abs() < f64::EPSILON);
        assert_eq!(output.token(3).int_value(source), None);
    }
}
