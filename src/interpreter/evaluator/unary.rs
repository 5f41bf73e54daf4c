use crate::{
    ast::{NodeKind, PrimType},
    error::InvariantViolation,
    interpreter::{evaluator::core::Executor, value::Value},
};

impl Executor<'_> {
    /// Applies `-` or `!` to an evaluated operand.
    ///
    /// Integer negation wraps, so `-(-9223372036854775808)` stays put.
    ///
    /// # Example
    /// ```
    /// use satsu::{
    ///     ast::NodeKind,
    ///     interpreter::{evaluator::Executor, value::Value},
    /// };
    ///
    /// assert_eq!(Executor::eval_unary(NodeKind::ENeg, &Value::Int(4)), Value::Int(-4));
    /// assert_eq!(Executor::eval_unary(NodeKind::ENot, &Value::Bool(true)), Value::Bool(false));
    /// ```
    #[must_use]
    pub fn eval_unary(kind: NodeKind, operand: &Value) -> Value {
        match (kind, operand) {
            (NodeKind::ENeg, Value::Int(n)) => Value::Int(n.wrapping_neg()),
            (NodeKind::ENeg, Value::Real(r)) => Value::Real(-r),
            (NodeKind::ENot, _) => Value::Bool(!operand.as_bool()),
            _ => {
                InvariantViolation::ValueType { expected: PrimType::Int,
                                                found:    operand.prim_type(), }.log();
                Value::Int(0)
            },
        }
    }
}
