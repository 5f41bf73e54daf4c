/// Source-located diagnostics.
///
/// Defines the `Diagnostic` type every pipeline stage returns on failure: the
/// module that caused it, the byte span inside that module's source, and the
/// typed error. Also renders diagnostics as single-line source excerpts with a
/// caret under the offending span.
pub mod diagnostic;
/// Import resolution errors.
///
/// Covers imports that match no search path, imported files that cannot be
/// read, and lexing or parsing failures inside imported files.
pub mod import_error;
/// Lexing errors.
///
/// Defines the malformed-token errors raised while scanning source bytes,
/// such as unexpected bytes, overlong identifiers and unterminated strings.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all errors raised while building the syntax tree: unexpected or
/// missing tokens, tokens that cannot start or continue an expression, and
/// premature end of input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the fatal startup errors raised before execution begins and the
/// invariant violations the executor logs and recovers from while running.
pub mod runtime_error;
/// Semantic analysis errors.
///
/// Contains every error the analyzer can raise: redefinitions, type
/// mismatches, invalid assignment targets, illegal casts, and misuse of
/// `break`, `continue` and `return`.
pub mod sema_error;

pub use diagnostic::{Diagnostic, ErrorKind, Span};
pub use import_error::ImportError;
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::{HostError, InvariantViolation, StartupError};
pub use sema_error::SemaError;
