use crate::{ast::NodeKind, interpreter::lexer::TokenKind};

/// Right binding power of the prefix operators `-` and `!`.
///
/// Lower than the postfix operators, so `-f(x)` negates the call result, and
/// higher than every infix operator.
pub const PREFIX_BP: u8 = 17;

/// How a token continues an expression that already has a left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Binding power toward the left operand.
    pub left:  u8,
    /// Binding power passed down when parsing the right operand.
    pub right: u8,
    /// Kind of the node the operator produces.
    pub kind:  NodeKind,
}

const fn binding(left: u8, right: u8, kind: NodeKind) -> Option<Binding> {
    Some(Binding { left, right, kind })
}

/// Returns the infix or postfix binding of a token.
///
/// A left power below the right power makes an operator left-associative;
/// assignments and the ternary have it the other way round.
///
/// # Returns
/// `None` if the token cannot continue an expression.
///
/// # Example
/// ```
/// use satsu::interpreter::{lexer::TokenKind, parser::binding::led};
///
/// let add = led(TokenKind::Plus).unwrap();
/// let mul = led(TokenKind::Star).unwrap();
///
/// assert!(mul.left > add.left);
/// assert!(led(TokenKind::Semicolon).is_none());
/// ```
#[must_use]
pub const fn led(kind: TokenKind) -> Option<Binding> {
    match kind {
        TokenKind::LParen => binding(19, 20, NodeKind::ECall),
        TokenKind::Dot => binding(19, 20, NodeKind::EAccess),
        TokenKind::Star => binding(15, 16, NodeKind::EMul),
        TokenKind::Slash => binding(15, 16, NodeKind::EDiv),
        TokenKind::Percent => binding(15, 16, NodeKind::EMod),
        TokenKind::Plus => binding(13, 14, NodeKind::EAdd),
        TokenKind::Minus => binding(13, 14, NodeKind::ESub),
        TokenKind::Less => binding(11, 12, NodeKind::ELess),
        TokenKind::LessEqual => binding(11, 12, NodeKind::ELessEqual),
        TokenKind::Greater => binding(11, 12, NodeKind::EGreater),
        TokenKind::GreaterEqual => binding(11, 12, NodeKind::EGreaterEqual),
        TokenKind::EqualEqual => binding(11, 12, NodeKind::EEqual),
        TokenKind::BangEqual => binding(11, 12, NodeKind::ENotEqual),
        TokenKind::AndAnd => binding(9, 10, NodeKind::EAnd),
        TokenKind::CaretCaret => binding(7, 8, NodeKind::EXor),
        TokenKind::PipePipe => binding(5, 6, NodeKind::EOr),
        TokenKind::Question => binding(4, 3, NodeKind::ETernary),
        TokenKind::Assign => binding(2, 1, NodeKind::EAssign),
        TokenKind::PlusAssign => binding(2, 1, NodeKind::EAddAssign),
        TokenKind::MinusAssign => binding(2, 1, NodeKind::ESubAssign),
        TokenKind::StarAssign => binding(2, 1, NodeKind::EMulAssign),
        TokenKind::SlashAssign => binding(2, 1, NodeKind::EDivAssign),
        TokenKind::PercentAssign => binding(2, 1, NodeKind::EModAssign),
        _ => None,
    }
}
