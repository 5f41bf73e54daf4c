use crate::interpreter::evaluator::core::{Action, Executor};

impl Executor<'_> {
    /// Executes `while (cond) body`.
    ///
    /// Each iteration runs the body in a fresh scope. `break` ends the loop,
    /// `continue` goes straight to the next condition check, and `return`
    /// leaves the loop and is handed upward.
    pub(in crate::interpreter::evaluator) fn exec_while(&mut self, node: u32) -> Action {
        let ast = &self.module().ast;
        let (condition, body) = (ast.child(node, 0), ast.child(node, 1));

        while self.eval(condition).as_bool() {
            match self.scoped(|this| this.exec(body)) {
                Action::Break => break,
                Action::Return(value) => return Action::Return(value),
                Action::None | Action::Continue => {},
            }
        }

        Action::None
    }

    /// Executes `for (init; cond; inc) body`.
    ///
    /// The initializer runs once in a scope wrapping the whole loop, so a
    /// variable it declares disappears when the loop ends. The increment runs
    /// after every iteration that is not left with `break` or `return`,
    /// including those ended by `continue`.
    pub(in crate::interpreter::evaluator) fn exec_for(&mut self, node: u32) -> Action {
        let ast = &self.module().ast;
        let [init, condition, increment, body] = ast.children(node) else {
            return Action::None;
        };

        self.scoped(|this| {
                this.exec(*init);
                while this.eval(*condition).as_bool() {
                    match this.scoped(|this| this.exec(*body)) {
                        Action::Break => break,
                        Action::Return(value) => return Action::Return(value),
                        Action::None | Action::Continue => {},
                    }
                    this.eval(*increment);
                }
                Action::None
            })
    }
}
