use crate::{
    ast::NodeKind,
    error::InvariantViolation,
    interpreter::{
        evaluator::{
            binary::{arithmetic, compare, logic},
            core::Executor,
        },
        lexer::TokenKind,
        value::Value,
    },
};

/// Returns the arithmetic operator a compound assignment applies.
const fn compound_operator(kind: NodeKind) -> Option<NodeKind> {
    match kind {
        NodeKind::EAddAssign => Some(NodeKind::EAdd),
        NodeKind::ESubAssign => Some(NodeKind::ESub),
        NodeKind::EMulAssign => Some(NodeKind::EMul),
        NodeKind::EDivAssign => Some(NodeKind::EDiv),
        NodeKind::EModAssign => Some(NodeKind::EMod),
        _ => None,
    }
}

impl Executor<'_> {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// Operands are evaluated left to right, and both operands of the
    /// logical operators are always evaluated. Only the ternary skips an
    /// operand: it evaluates the selected branch alone.
    ///
    /// # Parameters
    /// - `node`: Expression node of the running module.
    ///
    /// # Returns
    /// The value, [`Value::Void`] for `void` calls.
    pub fn eval(&mut self, node: u32) -> Value {
        let ast = &self.module().ast;
        let kind = ast.kind(node);

        match kind {
            NodeKind::EAtom => self.eval_atom(node),
            NodeKind::ECall => self.call_function(node),
            NodeKind::ESystem => self.call_host(node),
            NodeKind::EAccess => self.eval_access(node),
            NodeKind::ENeg | NodeKind::ENot => {
                let operand = self.eval(ast.child(node, 0));
                Self::eval_unary(kind, &operand)
            },
            NodeKind::ECast => {
                let operand = self.eval(ast.child(node, 0));
                operand.cast(self.type_node(ast.child(node, 1)))
            },
            NodeKind::ETernary => {
                let branch = if self.eval(ast.child(node, 0)).as_bool() { 1 } else { 2 };
                self.eval(ast.child(node, branch))
            },
            kind if kind.is_assignment() => self.eval_assignment(node),
            NodeKind::EMul | NodeKind::EDiv | NodeKind::EMod | NodeKind::EAdd | NodeKind::ESub => {
                let (left, right) = self.eval_operands(node);
                arithmetic(kind, left, right)
            },
            NodeKind::ELess
            | NodeKind::ELessEqual
            | NodeKind::EGreater
            | NodeKind::EGreaterEqual
            | NodeKind::EEqual
            | NodeKind::ENotEqual => {
                let (left, right) = self.eval_operands(node);
                Value::Bool(compare(kind, &left, &right))
            },
            NodeKind::EAnd | NodeKind::EOr | NodeKind::EXor => {
                let (left, right) = self.eval_operands(node);
                Value::Bool(logic(kind, left.as_bool(), right.as_bool()))
            },
            _ => Value::Void,
        }
    }

    /// Evaluates both operands of a binary node, left first.
    fn eval_operands(&mut self, node: u32) -> (Value, Value) {
        let ast = &self.module().ast;
        let left = self.eval(ast.child(node, 0));
        let right = self.eval(ast.child(node, 1));
        (left, right)
    }

    /// Evaluates identifiers and literals.
    ///
    /// Identifiers read a copy of the local's current value.
    fn eval_atom(&self, node: u32) -> Value {
        let module = self.module();
        let token = module.token_of(node);

        match token.kind {
            TokenKind::IntLit => Value::Int(token.int_value(&module.source).unwrap_or_default()),
            TokenKind::RealLit => Value::Real(token.real_value(&module.source)),
            TokenKind::StrLit => Value::String(token.string_value(&module.source)),
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            _ => {
                let name = token.text(&module.source);
                if let Some(local) = self.frame.locals.find(&name) {
                    local.value.clone()
                } else {
                    InvariantViolation::UnboundSymbol { name }.log();
                    Value::Void
                }
            },
        }
    }

    /// Evaluates `text.(index)` and `text.(start, end)`.
    ///
    /// Indexing yields a one-byte string; an index outside the string is
    /// logged and yields `""`. Substring bounds are clamped into the string
    /// and swapped when reversed, and the end bound is exclusive.
    fn eval_access(&mut self, node: u32) -> Value {
        let children = self.module().ast.children(node);
        let bytes = self.eval(children[0]).into_bytes();
        let length = bytes.len();
        let first = self.eval(children[1]).as_int();

        let Some(&end) = children.get(2) else {
            return match usize::try_from(first).ok().and_then(|index| bytes.get(index)) {
                Some(&byte) => Value::String(vec![byte]),
                None => {
                    InvariantViolation::IndexOutOfBounds { index: first,
                                                           length }.log();
                    Value::String(Vec::new())
                },
            };
        };
        let second = self.eval(end).as_int();

        let clamp = |bound: i64| usize::try_from(bound.max(0)).unwrap_or(usize::MAX).min(length);
        let (mut low, mut high) = (clamp(first), clamp(second));
        if low > high {
            std::mem::swap(&mut low, &mut high);
        }

        Value::from(&bytes[low..high])
    }

    /// Evaluates plain and compound assignments.
    ///
    /// The right side is evaluated first; a compound assignment then combines
    /// it with the target's current value.
    ///
    /// # Returns
    /// A copy of the value stored.
    fn eval_assignment(&mut self, node: u32) -> Value {
        let module = self.module();
        let kind = module.ast.kind(node);
        let name = module.text_of(module.ast.child(node, 0));
        let value = self.eval(module.ast.child(node, 1));

        let Some(local) = self.frame.locals.find_mut(&name) else {
            InvariantViolation::UnboundSymbol { name }.log();
            return Value::Void;
        };

        local.value = match compound_operator(kind) {
            Some(operator) => {
                let current = std::mem::replace(&mut local.value, Value::Void);
                arithmetic(operator, current, value)
            },
            None => value,
        };
        local.value.clone()
    }
}
