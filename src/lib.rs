//! # satsu
//!
//! satsu is a small statically typed scripting language written in Rust.
//! Source files are lexed, parsed into an arena-backed syntax tree, linked
//! with the files they import, type-checked, and finally run by a
//! tree-walking executor that reaches the outside world only through host
//! functions registered by the embedding program.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::path::Path;

use crate::{
    error::{Diagnostic, ImportError, Span},
    interpreter::{
        analyzer::analyze,
        evaluator::{HostTable, execute},
        module::{FileSystem, Module, ModuleSet, SourceLoader, resolve_imports},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the flat node arena every parsed file is stored in,
/// the node kinds it holds, and the primitive types of the language. Nodes
/// refer to their children and tokens by index, so a tree is a plain vector
/// with no references between nodes.
///
/// # Responsibilities
/// - Defines statement, type and expression node kinds.
/// - Stores nodes with their token index and ordered children.
/// - Renders trees for inspection.
pub mod ast;
/// Provides unified error types for every pipeline stage.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// resolving imports, analyzing or starting a program, and the `Diagnostic`
/// that locates them in the source that caused them.
///
/// # Responsibilities
/// - Defines one error enum per stage.
/// - Attaches module and byte span information to every failure.
/// - Renders failures as source excerpts with a caret under the span.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, import resolution, semantic
/// analysis and execution, together with the runtime value types and the host
/// function interface.
///
/// # Responsibilities
/// - Coordinates all pipeline stages.
/// - Provides entry points for each stage.
/// - Manages the flow of data and errors between stages.
pub mod interpreter;
/// General utilities for numeric conversion and parsing.
///
/// This module provides helpers used across the interpreter: checked
/// conversions for 32-bit spans, and the lenient number parsing and
/// formatting rules behind casts.
pub mod util;

/// Name of the function a program starts at unless told otherwise.
pub const DEFAULT_ENTRY: &str = "start";

/// Reads, links and checks a program stored on disk.
///
/// # Parameters
/// - `path`: The root source file.
/// - `search_paths`: Directories searched for imports, in priority order.
///
/// # Returns
/// The analyzed module set, ready for [`execute`].
///
/// # Errors
/// A [`Diagnostic`] from the first failing stage. Failures inside the root
/// file are attributed to module 0.
pub fn load_program<P>(path: impl AsRef<Path>, search_paths: &[P]) -> Result<ModuleSet, Diagnostic>
    where P: AsRef<Path>
{
    let path = path.as_ref();
    let name = path.display().to_string();
    let source = FileSystem.load(path).map_err(|e| {
                                          Diagnostic::new(Span::default(),
                                                          ImportError::Unreadable { path:   name.clone(),
                                                                                    reason: e.to_string(), })
                                      })?;
    let file_id = FileSystem.identify(path).unwrap_or_default();

    let root = Module::build(name, file_id, source).map_err(|e| e.in_module(0))?;
    let modules = resolve_imports(root, search_paths)?;
    analyze(&modules)?;
    Ok(modules)
}

/// Parses and checks a single in-memory module.
///
/// The module is named `<source>`. Since there are no search paths, any
/// `import` fails to resolve.
///
/// # Errors
/// A [`Diagnostic`] from the first failing stage.
pub fn load_source(source: &[u8]) -> Result<ModuleSet, Diagnostic> {
    let root = Module::build("<source>", 0, source.to_vec()).map_err(|e| e.in_module(0))?;
    let modules = resolve_imports::<&Path>(root, &[])?;
    analyze(&modules)?;
    Ok(modules)
}

/// Runs a single in-memory module through every stage.
///
/// # Parameters
/// - `source`: The program text.
/// - `host`: Functions the program may call through `system`.
/// - `entry`: Name of the entry function.
///
/// # Errors
/// A [`Diagnostic`] from the first failing stage, including startup errors
/// for a missing or malformed entry function.
///
/// # Examples
/// ```
/// use satsu::{DEFAULT_ENTRY, interpreter::evaluator::HostTable, run_source};
///
/// let host = HostTable::new();
///
/// let source = b"func void start() { var int x = 2 + 2; }";
/// assert!(run_source(source, &host, DEFAULT_ENTRY).is_ok());
///
/// // `x` is not declared.
/// let source = b"func void start() { x = 1; }";
/// assert!(run_source(source, &host, DEFAULT_ENTRY).is_err());
/// ```
pub fn run_source(source: &[u8], host: &HostTable, entry: &str) -> Result<(), Diagnostic> {
    let modules = load_source(source)?;
    execute(&modules, host, entry)
}
