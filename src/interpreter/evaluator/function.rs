/// Calls to functions declared in the module set.
///
/// Binds arguments into a fresh frame, runs the callee body in its own module
/// and restores the caller's frame.
pub mod core;

/// Calls to host functions.
///
/// Looks up `system` calls in the host table, checks them against the
/// registered signature and invokes the callback.
pub mod system;

/// The base host functions.
///
/// Implements `print`, `readln` and `shell` as registered by
/// [`HostTable::base`](crate::interpreter::evaluator::HostTable::base).
pub mod builtin;
