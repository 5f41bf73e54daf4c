use crate::ast::NodeKind;

/// Applies `&&`, `||` or `^^` to two evaluated operands.
///
/// Both operands have already been evaluated; there is no short-circuit.
///
/// # Example
/// ```
/// use satsu::{ast::NodeKind, interpreter::evaluator::binary::logic};
///
/// assert!(logic(NodeKind::EXor, true, false));
/// assert!(!logic(NodeKind::EXor, true, true));
/// ```
#[must_use]
pub const fn logic(kind: NodeKind, left: bool, right: bool) -> bool {
    match kind {
        NodeKind::EAnd => left && right,
        NodeKind::EOr => left || right,
        NodeKind::EXor => left ^ right,
        _ => false,
    }
}
