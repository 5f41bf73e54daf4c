/// Arithmetic operators.
///
/// Integer and real arithmetic plus string concatenation.
pub mod arithmetic;

/// Relational and equality operators.
pub mod comparison;

/// Logical operators.
pub mod logic;

pub use self::{arithmetic::arithmetic, comparison::compare, logic::logic};
