use crate::{
    ast::NodeKind,
    interpreter::{
        evaluator::core::{Action, Executor},
        symbol::Symbol,
        value::Value,
    },
};

impl Executor<'_> {
    /// Executes one statement.
    ///
    /// Expression statements are evaluated for their effects and their value
    /// dropped.
    ///
    /// # Returns
    /// The control-flow signal for the enclosing statement.
    pub fn exec(&mut self, node: u32) -> Action {
        let ast = &self.module().ast;

        match ast.kind(node) {
            NodeKind::LocalDecl => {
                self.exec_declaration(node);
                Action::None
            },
            NodeKind::Block => {
                self.scoped(|this| {
                        for &child in ast.children(node) {
                            let action = this.exec(child);
                            if action != Action::None {
                                return action;
                            }
                        }
                        Action::None
                    })
            },
            NodeKind::CTree => {
                let children = ast.children(node);
                if self.eval(children[0]).as_bool() {
                    self.scoped(|this| this.exec(children[1]))
                } else if let Some(&otherwise) = children.get(2) {
                    self.scoped(|this| this.exec(otherwise))
                } else {
                    Action::None
                }
            },
            NodeKind::While => self.exec_while(node),
            NodeKind::For => self.exec_for(node),
            NodeKind::Break => Action::Break,
            NodeKind::Continue => Action::Continue,
            NodeKind::Return => {
                let value = ast.children(node)
                               .first()
                               .map_or(Value::Void, |&value| self.eval(value));
                Action::Return(value)
            },
            kind if kind.is_expression() => {
                self.eval(node);
                Action::None
            },
            _ => Action::None,
        }
    }

    /// Evaluates a declaration's initializer and pushes the new local at the
    /// current scope.
    fn exec_declaration(&mut self, node: u32) {
        let module = self.module();
        let ty = self.type_node(module.ast.child(node, 0));
        let value = self.eval(module.ast.child(node, 1));

        self.frame.locals.push(Symbol { name: module.text_of(node),
                                        ty,
                                        module: self.frame.module,
                                        node,
                                        scope: self.frame.scope,
                                        value });
    }
}
