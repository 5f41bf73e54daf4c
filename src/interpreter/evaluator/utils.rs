use crate::{
    ast::PrimType,
    interpreter::{evaluator::core::Executor, module::Module},
};

impl<'a> Executor<'a> {
    /// Returns the module of the running function.
    pub(in crate::interpreter::evaluator) fn module(&self) -> &'a Module {
        self.modules.module(self.frame.module)
    }

    /// Reads the type a `Type` node of the running module names.
    pub(in crate::interpreter::evaluator) fn type_node(&self, node: u32) -> PrimType {
        PrimType::from_token(self.module().token_of(node).kind).unwrap_or(PrimType::Void)
    }

    /// Runs `body` one scope deeper, dropping the scope's locals afterwards.
    ///
    /// The local table has the same length afterwards as before.
    pub(in crate::interpreter::evaluator) fn scoped<T>(&mut self,
                                                       body: impl FnOnce(&mut Self) -> T)
                                                       -> T {
        self.frame.scope += 1;
        let result = body(self);
        self.frame.locals.pop_scope(self.frame.scope);
        self.frame.scope -= 1;
        result
    }
}
