use crate::{
    ast::{NodeKind, PrimType},
    error::SemaError,
    interpreter::analyzer::core::{Analyzer, SemaResult},
};

impl Analyzer<'_> {
    /// Checks one statement.
    ///
    /// Blocks, branches and loop bodies each get their own scope, popped once
    /// they have been checked. Expression statements are typed and their
    /// type discarded.
    pub fn check_statement(&mut self, node: u32) -> SemaResult<()> {
        let ast = &self.current().ast;

        match ast.kind(node) {
            NodeKind::LocalDecl => self.check_declaration(node),
            NodeKind::Block => {
                self.scoped(|this| {
                        for &child in ast.children(node) {
                            this.check_statement(child)?;
                        }
                        Ok(())
                    })
            },
            NodeKind::CTree => {
                self.check_condition(ast.child(node, 0))?;
                for &branch in &ast.children(node)[1..] {
                    self.scoped(|this| this.check_statement(branch))?;
                }
                Ok(())
            },
            NodeKind::While => {
                self.check_condition(ast.child(node, 0))?;
                self.check_loop_body(ast.child(node, 1))
            },
            NodeKind::For => {
                let [init, condition, increment, body] = ast.children(node) else {
                    return Ok(());
                };
                self.scoped(|this| {
                        this.check_statement(*init)?;
                        this.check_condition(*condition)?;
                        this.check_expression(*increment)?;
                        this.check_loop_body(*body)
                    })
            },
            NodeKind::Break if self.loop_depth == 0 => {
                Err(self.error(node, SemaError::BreakOutsideLoop))
            },
            NodeKind::Continue if self.loop_depth == 0 => {
                Err(self.error(node, SemaError::ContinueOutsideLoop))
            },
            NodeKind::Return => self.check_return(node),
            kind if kind.is_expression() => self.check_expression(node).map(drop),
            _ => Ok(()),
        }
    }

    /// Checks `var type name = init;` and declares the local.
    ///
    /// Only the innermost scope is searched for an earlier declaration, so
    /// nested blocks may shadow outer locals. The initializer is checked
    /// before the name is declared.
    fn check_declaration(&mut self, node: u32) -> SemaResult<()> {
        let module = self.current();
        let name = module.text_of(node);
        let ty = self.type_node(module.ast.child(node, 0));
        let init = module.ast.child(node, 1);

        if ty == PrimType::Void {
            return Err(self.error(node, SemaError::VoidVariable { name }));
        }
        if self.locals.find_in_scope(&name, self.scope).is_some() {
            return Err(self.error(node, SemaError::VariableRedefinition { name }));
        }

        let found = self.check_expression(init)?;
        if found != ty {
            return Err(self.error(init, SemaError::TypeMismatch { expected: ty, found }));
        }

        self.declare(name, ty, node);
        Ok(())
    }

    /// Requires a loop or branch condition to be `bool`.
    fn check_condition(&mut self, node: u32) -> SemaResult<()> {
        let found = self.check_expression(node)?;
        if found == PrimType::Bool {
            Ok(())
        } else {
            Err(self.error(node,
                           SemaError::TypeMismatch { expected: PrimType::Bool,
                                                     found }))
        }
    }

    /// Checks a loop body in its own scope, one loop deeper.
    fn check_loop_body(&mut self, body: u32) -> SemaResult<()> {
        self.loop_depth += 1;
        let result = self.scoped(|this| this.check_statement(body));
        self.loop_depth -= 1;
        result
    }

    /// Checks `return expr?;` against the function's return type.
    fn check_return(&mut self, node: u32) -> SemaResult<()> {
        let value = self.current().ast.children(node).first().copied();

        match (value, self.return_type) {
            (None, PrimType::Void) => Ok(()),
            (None, expected) => Err(self.error(node, SemaError::MissingReturnValue { expected })),
            (Some(_), PrimType::Void) => Err(self.error(node, SemaError::UnexpectedReturnValue)),
            (Some(value), expected) => {
                let found = self.check_expression(value)?;
                if found == expected {
                    Ok(())
                } else {
                    Err(self.error(value, SemaError::TypeMismatch { expected, found }))
                }
            },
        }
    }
}
