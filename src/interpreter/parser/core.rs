use crate::{
    ast::{Ast, NodeKind, PrimType, ROOT_NODE},
    error::{Diagnostic, ParseError},
    interpreter::lexer::{LexOutput, TokenKind},
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, Diagnostic>;

/// Builds a syntax tree from a token stream.
///
/// The parser walks the tokens with an index cursor that starts after the
/// null token and appends nodes to the arena as it goes. Parsing methods are
/// spread over the `statement` and `expression` modules.
pub struct Parser<'a> {
    /// The tokens being parsed.
    pub(in crate::interpreter::parser) lex:      &'a LexOutput,
    /// Index of the next unconsumed token.
    pub(in crate::interpreter::parser) position: u32,
    /// The tree under construction.
    pub(in crate::interpreter::parser) ast:      Ast,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first real token.
    #[must_use]
    pub fn new(lex: &'a LexOutput) -> Self {
        Self { lex,
               position: 1,
               ast: Ast::new() }
    }

    /// Parses the whole token stream as a module.
    ///
    /// Grammar: `root := (import | func)*`
    ///
    /// # Errors
    /// A parsing [`Diagnostic`] at the first token that does not fit the
    /// grammar, or at the end of input if it ends early.
    pub fn parse_root(mut self) -> ParseResult<Ast> {
        while let Some(token) = self.peek() {
            let element = match token.kind {
                TokenKind::Import => self.parse_import()?,
                TokenKind::Func => self.parse_function()?,
                found => {
                    return Err(self.error_here(ParseError::ExpectedRootElement { found }));
                },
            };
            self.ast.attach(ROOT_NODE, element);
        }

        Ok(self.ast)
    }

    /// Parses `import name;`.
    ///
    /// The node's token is the imported name.
    fn parse_import(&mut self) -> ParseResult<u32> {
        self.expect(TokenKind::Import)?;
        let name = self.expect(TokenKind::Ident)?;
        self.expect(TokenKind::Semicolon)?;

        Ok(self.ast.add_node(NodeKind::Import, name))
    }

    /// Parses `func type name(args) body`.
    ///
    /// Produces `FuncDecl(name)[Type, ArgList, body]`.
    fn parse_function(&mut self) -> ParseResult<u32> {
        self.expect(TokenKind::Func)?;
        let return_type = self.parse_type()?;
        let name = self.expect(TokenKind::Ident)?;
        let node = self.ast.add_node(NodeKind::FuncDecl, name);
        let args = self.parse_arglist()?;
        let body = self.parse_statement()?;

        self.ast.attach(node, return_type);
        self.ast.attach(node, args);
        self.ast.attach(node, body);
        Ok(node)
    }

    /// Parses a parenthesized parameter list.
    ///
    /// Grammar: `arglist := "(" (type IDENT ("," type IDENT)*)? ")"`
    ///
    /// A trailing comma is rejected.
    fn parse_arglist(&mut self) -> ParseResult<u32> {
        let open = self.expect(TokenKind::LParen)?;
        let node = self.ast.add_node(NodeKind::ArgList, open);

        let args = self.parse_comma_separated(TokenKind::RParen, |parser| {
                           let ty = parser.parse_type()?;
                           let name = parser.expect(TokenKind::Ident)?;
                           let arg = parser.ast.add_node(NodeKind::Arg, name);
                           parser.ast.attach(arg, ty);
                           Ok(arg)
                       })?;

        for arg in args {
            self.ast.attach(node, arg);
        }
        Ok(node)
    }

    /// Parses a type keyword into a `Type` node.
    pub(in crate::interpreter::parser) fn parse_type(&mut self) -> ParseResult<u32> {
        let Some(token) = self.peek() else {
            return Err(self.error_at_end("a type"));
        };
        if PrimType::from_token(token.kind).is_none() {
            return Err(self.error_here(ParseError::ExpectedType { found: token.kind }));
        }

        let index = self.advance();
        Ok(self.ast.add_node(NodeKind::Type, index))
    }
}

/// Parses a token stream into a syntax tree.
///
/// # Parameters
/// - `lex`: Output of the lexer, null token first.
///
/// # Returns
/// The tree, with node 1 as the root holding every `import` and `func`
/// element in source order.
///
/// # Errors
/// A parsing [`Diagnostic`] for the first syntax error.
///
/// # Example
/// ```
/// use satsu::{
///     ast::{NodeKind, ROOT_NODE},
///     interpreter::{lexer::lex, parser::parse},
/// };
///
/// let tokens = lex(b"import io; func void start() {}").unwrap();
/// let ast = parse(&tokens).unwrap();
/// let kinds: Vec<NodeKind> = ast.children(ROOT_NODE).iter().map(|&n| ast.kind(n)).collect();
///
/// assert_eq!(kinds, [NodeKind::Import, NodeKind::FuncDecl]);
/// ```
pub fn parse(lex: &LexOutput) -> ParseResult<Ast> {
    Parser::new(lex).parse_root()
}
