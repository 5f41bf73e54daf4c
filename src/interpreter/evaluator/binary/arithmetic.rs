use crate::{ast::NodeKind, error::InvariantViolation, interpreter::value::Value};

/// Applies `+`, `-`, `*`, `/` or `%` to two evaluated operands.
///
/// Integer arithmetic wraps on overflow. Integer division or remainder by
/// zero is logged and yields `0`. Real arithmetic follows IEEE 754, and `%`
/// on reals keeps the sign of the dividend. `+` on strings concatenates.
/// Operands of different types are logged and yield the left operand's
/// default value.
///
/// # Parameters
/// - `kind`: One of `EAdd`, `ESub`, `EMul`, `EDiv` or `EMod`.
/// - `left`: Left operand.
/// - `right`: Right operand.
///
/// # Example
/// ```
/// use satsu::{
///     ast::NodeKind,
///     interpreter::{evaluator::binary::arithmetic, value::Value},
/// };
///
/// assert_eq!(arithmetic(NodeKind::EDiv, Value::Int(-7), Value::Int(2)), Value::Int(-3));
/// assert_eq!(arithmetic(NodeKind::EMod, Value::Int(7), Value::Int(0)), Value::Int(0));
/// assert_eq!(arithmetic(NodeKind::EAdd, Value::from("ab"), Value::from("c")), Value::from("abc"));
/// assert_eq!(arithmetic(NodeKind::EAdd, Value::Int(i64::MAX), Value::Int(1)), Value::Int(i64::MIN));
/// ```
#[must_use]
pub fn arithmetic(kind: NodeKind, left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Value::Int(integer(kind, a, b)),
        (Value::Real(a), Value::Real(b)) => Value::Real(real(kind, a, b)),
        (Value::String(mut a), Value::String(b)) if kind == NodeKind::EAdd => {
            a.extend_from_slice(&b);
            Value::String(a)
        },
        (left, right) => {
            InvariantViolation::ValueType { expected: left.prim_type(),
                                            found:    right.prim_type(), }.log();
            Value::default_of(left.prim_type())
        },
    }
}

fn integer(kind: NodeKind, a: i64, b: i64) -> i64 {
    match kind {
        NodeKind::EAdd => a.wrapping_add(b),
        NodeKind::ESub => a.wrapping_sub(b),
        NodeKind::EMul => a.wrapping_mul(b),
        NodeKind::EDiv | NodeKind::EMod if b == 0 => {
            InvariantViolation::DivisionByZero.log();
            0
        },
        NodeKind::EDiv => a.wrapping_div(b),
        NodeKind::EMod => a.wrapping_rem(b),
        _ => 0,
    }
}

fn real(kind: NodeKind, a: f64, b: f64) -> f64 {
    match kind {
        NodeKind::EAdd => a + b,
        NodeKind::ESub => a - b,
        NodeKind::EMul => a * b,
        NodeKind::EDiv => a / b,
        NodeKind::EMod => a % b,
        _ => 0.0,
    }
}
