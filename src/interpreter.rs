/// The analyzer module type-checks a module set before it runs.
///
/// The analyzer collects every function declaration into a global table,
/// then walks each function body with a scoped local table, computing the
/// static type of every expression and rejecting ill-typed programs.
///
/// # Responsibilities
/// - Rejects duplicate functions, duplicate locals and `void` variables.
/// - Enforces exact type agreement for operators, calls and assignments.
/// - Validates casts, `return` shapes, and `break`/`continue` placement.
pub mod analyzer;
/// The evaluator module executes a checked module set.
///
/// The evaluator walks function bodies from the entry function, keeping the
/// locals of each call in a frame, threading control flow through an explicit
/// action signal, and dispatching host function calls.
///
/// # Responsibilities
/// - Evaluates expressions to runtime values and runs statements.
/// - Manages call frames and block scopes.
/// - Logs and degrades on runtime invariant violations.
pub mod evaluator;
/// The lexer module tokenizes source bytes for further parsing.
///
/// The lexer reads raw source bytes and produces a flat array of tokens, each
/// recording its kind, byte offset and byte length. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Recognizes keywords, identifiers, literals and operators.
/// - Skips whitespace and line comments.
/// - Reports malformed tokens with their exact byte span.
pub mod lexer;
/// The module module groups source files into a program.
///
/// A module couples one file's source, tokens and syntax tree. The resolver
/// follows `import` statements from the root module through caller-supplied
/// search paths until every imported file is part of the set.
///
/// # Responsibilities
/// - Locates imported files and identifies them by file identity.
/// - Reads, lexes and parses each file once.
/// - Attributes failures to the importing statement.
pub mod module;
/// The parser module builds the syntax tree from tokens.
///
/// The parser dispatches statements on their leading keyword and parses
/// expressions by precedence climbing, storing nodes in a flat arena.
///
/// # Responsibilities
/// - Converts tokens into arena-indexed AST nodes.
/// - Encodes operator precedence and associativity as binding powers.
/// - Reports syntax errors at the offending token.
pub mod parser;
/// The symbol module implements scoped symbol tables.
///
/// A symbol table is an ordered list searched from the end, which gives inner
/// declarations precedence over outer ones and lets a whole block's locals be
/// dropped at once.
pub mod symbol;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values produced while running: integers, reals,
/// strings and booleans, plus the void marker, together with default values
/// and explicit casts.
pub mod value;
