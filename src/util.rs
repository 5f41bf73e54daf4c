/// Numeric conversion and parsing helpers.
///
/// This module provides the conversions the executor needs when casting
/// between primitive types, following the lenient C library rules the
/// language inherits: integer parsing with automatic base detection, real
/// parsing of the longest numeric prefix, and fixed six-decimal formatting of
/// reals.
pub mod num;
