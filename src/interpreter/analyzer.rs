/// Analyzer state and the per-function driver.
///
/// Builds the global function table, then checks every function body with a
/// fresh local table.
pub mod core;

/// Statement checking.
///
/// Validates declarations, blocks, conditionals, loops and jumps, opening and
/// closing local scopes exactly as the executor will.
pub mod statement;

/// Expression typing.
///
/// Computes the static type of every expression and rejects operands, calls,
/// casts and assignments the type rules do not allow.
pub mod expression;

pub use self::{
    core::{Analyzer, analyze},
    expression::is_legal_cast,
};
