use std::fmt::Write as _;

use crate::{
    error::{ImportError, LexError, ParseError, SemaError, StartupError},
    interpreter::lexer::Token,
};

/// A byte range inside one module's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first byte.
    pub position: u32,
    /// Number of bytes covered.
    pub length:   u32,
}

impl Span {
    /// Creates a span from an offset and a length.
    #[must_use]
    pub const fn new(position: u32, length: u32) -> Self {
        Self { position, length }
    }

    /// Returns the span covered by a token.
    #[must_use]
    pub const fn of(token: &Token) -> Self {
        Self { position: token.offset,
               length:   token.length, }
    }

    /// Returns the offset one past the last byte of the span.
    #[must_use]
    pub const fn end(self) -> u32 {
        self.position.saturating_add(self.length)
    }
}

/// The typed error carried by a [`Diagnostic`], one variant per pipeline
/// stage.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// Raised by the lexer.
    Lex(LexError),
    /// Raised by the parser.
    Parse(ParseError),
    /// Raised by the import resolver.
    Import(ImportError),
    /// Raised by the semantic analyzer.
    Sema(SemaError),
    /// Raised by the executor before the entry function runs.
    Startup(StartupError),
}

impl ErrorKind {
    /// Name of the pipeline stage that produced the error.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Lex(_) => "lex",
            Self::Parse(_) => "parse",
            Self::Import(_) => "import",
            Self::Sema(_) => "semantic",
            Self::Startup(_) => "startup",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Import(e) => write!(f, "{e}"),
            Self::Sema(e) => write!(f, "{e}"),
            Self::Startup(e) => write!(f, "{e}"),
        }
    }
}

impl From<LexError> for ErrorKind {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ImportError> for ErrorKind {
    fn from(e: ImportError) -> Self {
        Self::Import(e)
    }
}

impl From<SemaError> for ErrorKind {
    fn from(e: SemaError) -> Self {
        Self::Sema(e)
    }
}

impl From<StartupError> for ErrorKind {
    fn from(e: StartupError) -> Self {
        Self::Startup(e)
    }
}

/// A located failure from any pipeline stage.
///
/// Lexer and parser diagnostics are created without a module, since those
/// stages see a single source buffer. The resolver, analyzer and executor
/// attach the index of the module whose source the span points into.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Index of the module in its module set, if known.
    pub module: Option<usize>,
    /// Location of the offending bytes.
    pub span:   Span,
    /// What went wrong.
    pub error:  ErrorKind,
}

impl Diagnostic {
    /// Creates a diagnostic that is not yet attributed to a module.
    #[must_use]
    pub fn new<E>(span: Span, error: E) -> Self
        where E: Into<ErrorKind>
    {
        Self { module: None,
               span,
               error: error.into() }
    }

    /// Attributes the diagnostic to a module.
    #[must_use]
    pub const fn in_module(mut self, module: usize) -> Self {
        self.module = Some(module);
        self
    }

    /// The human-readable message, without location.
    #[must_use]
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Renders the diagnostic as a source excerpt.
    ///
    /// The first line names the file and line, the second shows the source
    /// line, and the third underlines the offending span. Tabs are shown as
    /// two spaces so the caret stays aligned.
    ///
    /// # Parameters
    /// - `name`: Display name of the source.
    /// - `source`: The bytes `span` points into.
    ///
    /// # Example
    /// ```
    /// use satsu::error::{Diagnostic, LexError, Span};
    ///
    /// let diagnostic = Diagnostic::new(Span::new(8, 1), LexError::UnexpectedByte);
    /// let rendered = diagnostic.render("demo.ssu", b"var x\n  @ y");
    ///
    /// assert_eq!(rendered,
    ///            "demo.ssu:2: lex error: unexpected character\n 2 |   @ y\n   |   ^\n");
    /// ```
    #[must_use]
    pub fn render(&self, name: &str, source: &[u8]) -> String {
        let position = (self.span.position as usize).min(source.len());
        let start = source[..position].iter()
                                      .rposition(|&b| b == b'\n')
                                      .map_or(0, |i| i + 1);
        let end = source[position..].iter()
                                    .position(|&b| b == b'\n')
                                    .map_or(source.len(), |i| position + i);
        let line = line_of(source, position);
        let gutter = line.to_string();

        let text = &source[start..end];
        let text = text.strip_suffix(b"\r").unwrap_or(text);
        let shown = String::from_utf8_lossy(text).replace('\t', "  ");

        let column: usize = source[start..position].iter()
                                                   .map(|&b| if b == b'\t' { 2 } else { 1 })
                                                   .sum();
        let width = (self.span.length as usize).min(end - position).max(1);

        let mut out = String::new();
        let _ = writeln!(out, "{name}:{line}: {} error: {}", self.error.stage(), self.error);
        let _ = writeln!(out, " {gutter} | {shown}");
        let _ = writeln!(out,
                         " {} | {}^{}",
                         " ".repeat(gutter.len()),
                         " ".repeat(column),
                         "~".repeat(width - 1));
        out
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "{} error at {}+{}: {}",
               self.error.stage(),
               self.span.position,
               self.span.length,
               self.error)
    }
}

impl std::error::Error for Diagnostic {}

/// Returns the one-based line number holding byte `position`.
///
/// # Example
/// ```
/// use satsu::error::diagnostic::line_of;
///
/// assert_eq!(line_of(b"a\nb\nc", 0), 1);
/// assert_eq!(line_of(b"a\nb\nc", 4), 3);
/// ```
#[must_use]
pub fn line_of(source: &[u8], position: usize) -> usize {
    let position = position.min(source.len());
    source[..position].iter().filter(|&&b| b == b'\n').count() + 1
}
