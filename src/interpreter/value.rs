/// Runtime value representation.
///
/// Defines the `Value` enum holding integers, reals, strings and booleans,
/// plus the `Void` marker produced by statements and void calls, along with
/// default values and typed accessors.
pub mod core;

/// Explicit casts between primitive types.
///
/// Implements the conversions behind `int(..)`, `real(..)`, `string(..)` and
/// `bool(..)`, following the lenient C library rules for parsing and
/// formatting numbers.
pub mod cast;

pub use self::core::Value;
