use crate::{
    ast::NodeKind,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses one statement, dispatching on its leading token.
    ///
    /// Grammar:
    /// ```text
    /// stmt := "var" type IDENT "=" expr ";"
    ///       | "{" stmt* "}"
    ///       | "if" "(" expr ")" stmt ("else" stmt)?
    ///       | "while" "(" expr ")" stmt
    ///       | "for" "(" (decl | expr ";") expr ";" expr ")" stmt
    ///       | "break" ";" | "continue" ";"
    ///       | "return" expr? ";"
    ///       | expr ";"
    /// ```
    ///
    /// # Returns
    /// The index of the statement node. Expression statements return the
    /// expression node itself.
    pub fn parse_statement(&mut self) -> ParseResult<u32> {
        match self.peek_kind() {
            Some(TokenKind::Var) => self.parse_declaration(),
            Some(TokenKind::LBrace) => self.parse_block(),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => self.parse_while(),
            Some(TokenKind::For) => self.parse_for(),
            Some(TokenKind::Break) => self.parse_jump(NodeKind::Break),
            Some(TokenKind::Continue) => self.parse_jump(NodeKind::Continue),
            Some(TokenKind::Return) => self.parse_return(),
            Some(_) => {
                let expr = self.parse_expression(&[TokenKind::Semicolon], 0)?;
                self.expect(TokenKind::Semicolon)?;
                Ok(expr)
            },
            None => Err(self.error_at_end("a statement")),
        }
    }

    /// Parses `var type name = init;` into `LocalDecl(name)[Type, init]`.
    fn parse_declaration(&mut self) -> ParseResult<u32> {
        self.expect(TokenKind::Var)?;
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Ident)?;
        let node = self.ast.add_node(NodeKind::LocalDecl, name);
        self.expect(TokenKind::Assign)?;
        let init = self.parse_expression(&[TokenKind::Semicolon], 0)?;
        self.expect(TokenKind::Semicolon)?;

        self.ast.attach(node, ty);
        self.ast.attach(node, init);
        Ok(node)
    }

    /// Parses `{ stmt* }`.
    fn parse_block(&mut self) -> ParseResult<u32> {
        let open = self.expect(TokenKind::LBrace)?;
        let node = self.ast.add_node(NodeKind::Block, open);

        loop {
            match self.peek_kind() {
                Some(TokenKind::RBrace) => {
                    self.advance();
                    return Ok(node);
                },
                Some(_) => {
                    let statement = self.parse_statement()?;
                    self.ast.attach(node, statement);
                },
                None => return Err(self.error_at_end(TokenKind::RBrace.name())),
            }
        }
    }

    /// Parses `( expr )`, the condition of `if` and `while`.
    fn parse_condition(&mut self) -> ParseResult<u32> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression(&[TokenKind::RParen], 0)?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }

    /// Parses an `if` statement into `CTree(if)[cond, then, else?]`.
    fn parse_if(&mut self) -> ParseResult<u32> {
        let keyword = self.expect(TokenKind::If)?;
        let node = self.ast.add_node(NodeKind::CTree, keyword);
        let condition = self.parse_condition()?;
        let then_branch = self.parse_statement()?;

        self.ast.attach(node, condition);
        self.ast.attach(node, then_branch);

        if self.at(TokenKind::Else) {
            self.advance();
            let else_branch = self.parse_statement()?;
            self.ast.attach(node, else_branch);
        }
        Ok(node)
    }

    /// Parses a `while` loop into `While[cond, body]`.
    fn parse_while(&mut self) -> ParseResult<u32> {
        let keyword = self.expect(TokenKind::While)?;
        let node = self.ast.add_node(NodeKind::While, keyword);
        let condition = self.parse_condition()?;
        let body = self.parse_statement()?;

        self.ast.attach(node, condition);
        self.ast.attach(node, body);
        Ok(node)
    }

    /// Parses a C-style `for` loop into `For[init, cond, inc, body]`.
    ///
    /// The initializer is either a `var` declaration or an expression.
    fn parse_for(&mut self) -> ParseResult<u32> {
        let keyword = self.expect(TokenKind::For)?;
        let node = self.ast.add_node(NodeKind::For, keyword);
        self.expect(TokenKind::LParen)?;

        let init = if self.at(TokenKind::Var) {
            self.parse_declaration()?
        } else {
            let init = self.parse_expression(&[TokenKind::Semicolon], 0)?;
            self.expect(TokenKind::Semicolon)?;
            init
        };
        let condition = self.parse_expression(&[TokenKind::Semicolon], 0)?;
        self.expect(TokenKind::Semicolon)?;
        let increment = self.parse_expression(&[TokenKind::RParen], 0)?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_statement()?;

        for child in [init, condition, increment, body] {
            self.ast.attach(node, child);
        }
        Ok(node)
    }

    /// Parses `break;` or `continue;`.
    fn parse_jump(&mut self, kind: NodeKind) -> ParseResult<u32> {
        let keyword = self.advance();
        self.expect(TokenKind::Semicolon)?;
        Ok(self.ast.add_node(kind, keyword))
    }

    /// Parses `return expr?;`.
    fn parse_return(&mut self) -> ParseResult<u32> {
        let keyword = self.expect(TokenKind::Return)?;
        let node = self.ast.add_node(NodeKind::Return, keyword);

        if !self.at(TokenKind::Semicolon) {
            let value = self.parse_expression(&[TokenKind::Semicolon], 0)?;
            self.ast.attach(node, value);
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(node)
    }
}
