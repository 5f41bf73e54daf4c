use crate::interpreter::lexer::MAX_IDENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Represents all errors that can occur while scanning source bytes.
///
/// This type doubles as the error type of the token scanner, so the variant
/// produced for input no token pattern matches is the default one.
pub enum LexError {
    /// A byte that cannot begin any token.
    #[default]
    UnexpectedByte,
    /// An identifier longer than the identifier limit.
    IdentifierTooLong,
    /// A number with more than one decimal point.
    MalformedNumber,
    /// A string literal that reaches the end of input before its closing
    /// quote.
    UnterminatedString,
    /// The source is too large for 32-bit token offsets.
    SourceTooLarge,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedByte => write!(f, "unexpected character"),
            Self::IdentifierTooLong => {
                write!(f, "identifier is longer than {MAX_IDENT} bytes")
            },
            Self::MalformedNumber => write!(f, "number has more than one decimal point"),
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::SourceTooLarge => write!(f, "source is too big to lex"),
        }
    }
}

impl std::error::Error for LexError {}
