use crate::{
    ast::NodeKind,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            binding::{PREFIX_BP, led},
            core::{ParseResult, Parser},
        },
    },
};

impl Parser<'_> {
    /// Parses an expression by precedence climbing.
    ///
    /// Parsing stops, without consuming it, at the first top-level token in
    /// `terminators`, or at an operator whose left binding power is below
    /// `min_bp`. The caller decides what the terminators are, which lets the
    /// same routine parse conditions, initializers, return values and call
    /// arguments.
    ///
    /// # Parameters
    /// - `terminators`: Tokens that end the expression.
    /// - `min_bp`: Minimum left binding power an operator needs to be
    ///   absorbed into this expression.
    ///
    /// # Returns
    /// The index of the expression's top node.
    ///
    /// # Errors
    /// - `ExpectedExpression` where an operand is required but the token
    ///   cannot start one.
    /// - `UnexpectedToken` where a token neither continues the expression nor
    ///   terminates it.
    /// - `UnexpectedEof` when the tokens run out first.
    pub fn parse_expression(&mut self, terminators: &[TokenKind], min_bp: u8) -> ParseResult<u32> {
        let mut lhs = self.parse_prefix(terminators)?;

        loop {
            let Some(token) = self.peek() else {
                return Err(self.error_at_end("end of expression"));
            };
            if terminators.contains(&token.kind) {
                break;
            }
            let Some(binding) = led(token.kind) else {
                return Err(self.error_here(ParseError::UnexpectedToken { found: token.kind }));
            };
            if binding.left < min_bp {
                break;
            }

            let operator = self.advance();
            let node = self.ast.add_node(binding.kind, operator);
            self.ast.attach(node, lhs);

            match binding.kind {
                NodeKind::ECall => {
                    let args = self.parse_arguments()?;
                    for arg in args {
                        self.ast.attach(node, arg);
                    }
                },
                NodeKind::EAccess => {
                    self.expect(TokenKind::LParen)?;
                    let start = self.parse_expression(&[TokenKind::Comma, TokenKind::RParen], 0)?;
                    self.ast.attach(node, start);
                    if self.at(TokenKind::Comma) {
                        self.advance();
                        let end = self.parse_expression(&[TokenKind::RParen], 0)?;
                        self.ast.attach(node, end);
                    }
                    self.expect(TokenKind::RParen)?;
                },
                NodeKind::ETernary => {
                    let then_branch = self.parse_expression(&[TokenKind::Colon], 0)?;
                    self.expect(TokenKind::Colon)?;
                    let else_branch = self.parse_expression(terminators, binding.right)?;
                    self.ast.attach(node, then_branch);
                    self.ast.attach(node, else_branch);
                },
                _ => {
                    let rhs = self.parse_expression(terminators, binding.right)?;
                    self.ast.attach(node, rhs);
                },
            }

            lhs = node;
        }

        Ok(lhs)
    }

    /// Parses the token that starts an operand.
    ///
    /// Handles atoms, parenthesized expressions, prefix `-` and `!`, casts
    /// written as `type(expr)`, and host calls written as
    /// `system type name(types)(args)`.
    fn parse_prefix(&mut self, terminators: &[TokenKind]) -> ParseResult<u32> {
        let Some(token) = self.peek() else {
            return Err(self.error_at_end("an expression"));
        };

        match token.kind {
            TokenKind::Ident
            | TokenKind::IntLit
            | TokenKind::RealLit
            | TokenKind::StrLit
            | TokenKind::True
            | TokenKind::False => {
                let index = self.advance();
                Ok(self.ast.add_node(NodeKind::EAtom, index))
            },
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression(&[TokenKind::RParen], 0)?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            },
            TokenKind::Minus | TokenKind::Bang => {
                let kind = if token.kind == TokenKind::Minus {
                    NodeKind::ENeg
                } else {
                    NodeKind::ENot
                };
                let operator = self.advance();
                let node = self.ast.add_node(kind, operator);
                let operand = self.parse_expression(terminators, PREFIX_BP)?;
                self.ast.attach(node, operand);
                Ok(node)
            },
            TokenKind::Int | TokenKind::Real | TokenKind::String | TokenKind::Bool => {
                self.parse_cast()
            },
            TokenKind::System => self.parse_system(),
            found => Err(self.error_here(ParseError::ExpectedExpression { found })),
        }
    }

    /// Parses `type(expr)` into `ECast(type)[expr, Type]`.
    fn parse_cast(&mut self) -> ParseResult<u32> {
        let keyword = self.advance();
        let node = self.ast.add_node(NodeKind::ECast, keyword);
        let target = self.ast.add_node(NodeKind::Type, keyword);

        self.expect(TokenKind::LParen)?;
        let operand = self.parse_expression(&[TokenKind::RParen], 0)?;
        self.expect(TokenKind::RParen)?;

        self.ast.attach(node, operand);
        self.ast.attach(node, target);
        Ok(node)
    }

    /// Parses a host function call.
    ///
    /// Grammar: `"system" type IDENT "(" (type ("," type)*)? ")" "(" args ")"`
    ///
    /// Produces `ESystem(name)[return Type, parameter Type*, argument*]`.
    fn parse_system(&mut self) -> ParseResult<u32> {
        self.expect(TokenKind::System)?;
        let return_type = self.parse_type()?;
        let name = self.expect(TokenKind::Ident)?;
        let node = self.ast.add_node(NodeKind::ESystem, name);
        self.ast.attach(node, return_type);

        self.expect(TokenKind::LParen)?;
        let params = self.parse_comma_separated(TokenKind::RParen, Self::parse_type)?;
        self.expect(TokenKind::LParen)?;
        let args = self.parse_arguments()?;

        for child in params.into_iter().chain(args) {
            self.ast.attach(node, child);
        }
        Ok(node)
    }

    /// Parses call arguments after the opening parenthesis.
    fn parse_arguments(&mut self) -> ParseResult<Vec<u32>> {
        self.parse_comma_separated(TokenKind::RParen, |parser| {
                parser.parse_expression(&[TokenKind::Comma, TokenKind::RParen], 0)
            })
    }
}
