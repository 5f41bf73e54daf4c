/// Core execution logic and call frames.
///
/// Contains the executor state, the control-flow `Action` signal, call frames,
/// and the `execute` entry point with its startup checks.
pub mod core;

/// Statement execution.
///
/// Runs declarations, blocks, conditionals and jumps, opening and closing
/// local scopes as blocks are entered and left.
pub mod statement;

/// Loop execution.
///
/// Runs `while` and `for` loops, turning `break` and `continue` signals into
/// loop exits and early iterations.
pub mod for_loop;

/// Expression evaluation.
///
/// Evaluates atoms, casts, string access, the ternary operator and
/// assignments, and dispatches operators and calls.
pub mod expression;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical not.
pub mod unary;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons and logical operators on evaluated
/// operands.
pub mod binary;

/// Function evaluation.
///
/// Handles calls to functions declared in the module set and calls to host
/// functions, plus the base host functions.
pub mod function;

/// Host function registry.
///
/// Defines the table of functions the embedding program exposes to scripts,
/// and the context handle their callbacks receive.
pub mod host;

/// Utility functions for the executor.
///
/// Provides scope handling and tree lookups shared by the other executor
/// modules.
pub mod utils;

pub use self::{
    core::{Action, Executor, Frame, execute},
    host::{HostContext, HostFunction, HostTable, MAX_HOST_ARGS},
};
