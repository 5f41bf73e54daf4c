use crate::{
    ast::PrimType,
    error::InvariantViolation,
    interpreter::{
        evaluator::core::{Action, Executor, Frame},
        symbol::Symbol,
        value::Value,
    },
};

impl Executor<'_> {
    /// Calls a function declared somewhere in the module set.
    ///
    /// Arguments are evaluated left to right in the caller's frame and bound
    /// to the parameters at scope 0 of a new frame that runs in the callee's
    /// module. The caller's frame is restored when the body finishes.
    ///
    /// # Returns
    /// The value of the `return` that ended the call, or the default value of
    /// the return type if the body ran off its end.
    pub(in crate::interpreter::evaluator) fn call_function(&mut self, node: u32) -> Value {
        let caller = self.module();
        let children = caller.ast.children(node);
        let name = caller.text_of(children[0]);

        let Some(function) = self.globals.find(&name) else {
            InvariantViolation::UnboundSymbol { name }.log();
            return Value::Void;
        };
        let module_index = function.module;
        let declaration = function.node;
        let callee = self.modules.module(module_index);
        let [ret, params, body] = callee.ast.children(declaration) else {
            return Value::Void;
        };
        let return_type = PrimType::from_token(callee.token_of(*ret).kind).unwrap_or(PrimType::Void);

        let mut frame = Frame::new(module_index);
        for (&param, &arg) in callee.ast.children(*params).iter().zip(&children[1..]) {
            let ty = PrimType::from_token(callee.token_of(callee.ast.child(param, 0)).kind)
                                                                        .unwrap_or(PrimType::Void);
            let value = self.eval(arg);
            frame.locals.push(Symbol { name: callee.text_of(param),
                                       ty,
                                       module: module_index,
                                       node: param,
                                       scope: 0,
                                       value });
        }

        let suspended = std::mem::replace(&mut self.frame, frame);
        self.depth += 1;
        log::debug!("calling '{name}' at depth {}", self.depth);
        let action = self.exec(*body);
        self.depth -= 1;
        self.frame = suspended;

        match action {
            Action::Return(value) => value,
            _ => Value::default_of(return_type),
        }
    }
}
