/// Parser state and the top-level parsing loop.
///
/// Holds the token cursor and the node arena under construction, and parses
/// the `import` and `func` elements that make up a module.
pub mod core;

/// Operator binding powers.
///
/// Maps each token that can continue an expression to its left and right
/// binding powers and the node kind it produces.
pub mod binding;

/// Pratt expression parsing.
///
/// Parses prefix forms, atoms, casts and system calls, then absorbs infix and
/// postfix operators while their binding power allows.
pub mod expression;

/// Statement parsing.
///
/// Parses declarations, blocks, conditionals, loops, jumps and expression
/// statements.
pub mod statement;

/// Utility functions for the parser.
///
/// Provides token cursor helpers, expectation checks and comma-separated list
/// parsing shared by the other parser modules.
pub mod utils;

pub use self::core::{ParseResult, Parser, parse};
