use crate::interpreter::lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a token stream.
pub enum ParseError {
    /// A specific token was required but another one was found.
    ExpectedToken {
        /// The token kind the grammar requires here.
        expected: TokenKind,
        /// The token kind actually present.
        found:    TokenKind,
    },
    /// The token stream ended while more input was required.
    UnexpectedEof {
        /// Description of what the parser was looking for.
        expected: &'static str,
    },
    /// A top-level element other than `import` or `func` was found.
    ExpectedRootElement {
        /// The offending token kind.
        found: TokenKind,
    },
    /// A type keyword was required.
    ExpectedType {
        /// The offending token kind.
        found: TokenKind,
    },
    /// A token that cannot start an expression appeared where one was
    /// required.
    ExpectedExpression {
        /// The offending token kind.
        found: TokenKind,
    },
    /// A token that neither continues the expression nor terminates it.
    UnexpectedToken {
        /// The offending token kind.
        found: TokenKind,
    },
    /// A list element was followed by something other than `,` or the
    /// closing token.
    ExpectedSeparator {
        /// The token that closes the list.
        closing: TokenKind,
        /// The offending token kind.
        found:   TokenKind,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            },
            Self::UnexpectedEof { expected } => write!(f, "expected {expected}, found EOF"),
            Self::ExpectedRootElement { found } => {
                write!(f, "expected import or func at top level, found {found}")
            },
            Self::ExpectedType { found } => write!(f, "expected a type, found {found}"),
            Self::ExpectedExpression { found } => {
                write!(f, "expected an expression, found {found}")
            },
            Self::UnexpectedToken { found } => write!(f, "unexpected {found} in expression"),
            Self::ExpectedSeparator { closing, found } => {
                write!(f, "expected {closing} or ',', found {found}")
            },
        }
    }
}

impl std::error::Error for ParseError {}
