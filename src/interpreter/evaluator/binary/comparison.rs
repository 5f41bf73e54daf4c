use std::cmp::Ordering;

use crate::{ast::NodeKind, error::InvariantViolation, interpreter::value::Value};

/// Applies a relational or equality operator to two evaluated operands.
///
/// Integers and reals compare numerically and strings compare bytewise. A
/// comparison involving `NaN` is false except for `!=`.
///
/// # Example
/// ```
/// use satsu::{
///     ast::NodeKind,
///     interpreter::{evaluator::binary::compare, value::Value},
/// };
///
/// assert!(compare(NodeKind::ELess, &Value::from("abc"), &Value::from("abd")));
/// assert!(compare(NodeKind::EGreaterEqual, &Value::Int(3), &Value::Int(3)));
/// assert!(compare(NodeKind::ENotEqual, &Value::Real(f64::NAN), &Value::Real(f64::NAN)));
/// ```
#[must_use]
pub fn compare(kind: NodeKind, left: &Value, right: &Value) -> bool {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Real(a), Value::Real(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => a.partial_cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
        _ => {
            InvariantViolation::ValueType { expected: left.prim_type(),
                                            found:    right.prim_type(), }.log();
            None
        },
    };

    match ordering {
        Some(ordering) => match kind {
            NodeKind::ELess => ordering == Ordering::Less,
            NodeKind::ELessEqual => ordering != Ordering::Greater,
            NodeKind::EGreater => ordering == Ordering::Greater,
            NodeKind::EGreaterEqual => ordering != Ordering::Less,
            NodeKind::EEqual => ordering == Ordering::Equal,
            NodeKind::ENotEqual => ordering != Ordering::Equal,
            _ => false,
        },
        None => kind == NodeKind::ENotEqual,
    }
}
