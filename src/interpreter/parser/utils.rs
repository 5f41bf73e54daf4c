use crate::{
    error::{Diagnostic, ParseError, Span},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Returns the next unconsumed token, or `None` at the end of input.
    pub(in crate::interpreter::parser) fn peek(&self) -> Option<Token> {
        self.lex.tokens.get(self.position as usize).copied()
    }

    /// Returns the kind of the next unconsumed token.
    pub(in crate::interpreter::parser) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Whether the next token has the given kind.
    pub(in crate::interpreter::parser) fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consumes the next token and returns its index.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> u32 {
        let index = self.position;
        self.position += 1;
        index
    }

    /// Consumes the next token if it has the given kind.
    ///
    /// # Returns
    /// The index of the consumed token.
    ///
    /// # Errors
    /// `ExpectedToken` at the next token if it has another kind, or
    /// `UnexpectedEof` past the last token.
    pub(in crate::interpreter::parser) fn expect(&mut self, kind: TokenKind) -> ParseResult<u32> {
        match self.peek() {
            Some(token) if token.kind == kind => Ok(self.advance()),
            Some(token) => Err(self.error_here(ParseError::ExpectedToken { expected: kind,
                                                                            found:    token.kind, })),
            None => Err(self.error_at_end(kind.name())),
        }
    }

    /// Builds a diagnostic at the next token.
    pub(in crate::interpreter::parser) fn error_here(&self, error: ParseError) -> Diagnostic {
        let span = self.peek().map_or_else(|| self.end_span(), |token| Span::of(&token));
        Diagnostic::new(span, error)
    }

    /// Builds an end-of-input diagnostic.
    pub(in crate::interpreter::parser) fn error_at_end(&self, expected: &'static str) -> Diagnostic {
        Diagnostic::new(self.end_span(), ParseError::UnexpectedEof { expected })
    }

    /// The one-byte span just past the last token.
    fn end_span(&self) -> Span {
        let last = self.lex.tokens.last().copied().unwrap_or(Token::NULL);
        Span::new(Span::of(&last).end(), 1)
    }

    /// Parses a comma-separated list of items until a closing token.
    ///
    /// The opening token must already be consumed. An immediately
    /// encountered closing token produces an empty list. Each item must be
    /// followed by either a comma or the closing token, so a trailing comma
    /// is an error.
    ///
    /// Grammar (simplified): `list := (item ("," item)*)? closing`
    ///
    /// # Parameters
    /// - `closing`: The token that terminates the list.
    /// - `parse_item`: Function used to parse each list element.
    ///
    /// # Returns
    /// The parsed items, in order.
    ///
    /// # Errors
    /// - Propagates item errors.
    /// - `ExpectedSeparator` when an item is followed by anything else.
    /// - `UnexpectedEof` when the tokens run out before the closing token.
    pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
        &mut self,
        closing: TokenKind,
        mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>)
        -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.at(closing) {
            self.advance();
            return Ok(items);
        }

        loop {
            items.push(parse_item(self)?);
            match self.peek_kind() {
                Some(TokenKind::Comma) => {
                    self.advance();
                },
                Some(kind) if kind == closing => {
                    self.advance();
                    break;
                },
                Some(found) => {
                    return Err(self.error_here(ParseError::ExpectedSeparator { closing, found }));
                },
                None => return Err(self.error_at_end(closing.name())),
            }
        }

        Ok(items)
    }
}
