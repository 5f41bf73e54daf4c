#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while resolving imports.
pub enum ImportError {
    /// No search path holds a file for the imported name.
    Unresolved {
        /// The imported identifier.
        name:     String,
        /// How many search paths were tried.
        searched: usize,
    },
    /// The imported file exists but could not be read.
    Unreadable {
        /// Path of the imported file.
        path:   String,
        /// The underlying I/O failure.
        reason: String,
    },
    /// The imported file failed to lex or parse.
    Invalid {
        /// Path of the imported file.
        path:   String,
        /// Line of the failure inside the imported file.
        line:   usize,
        /// Message of the inner failure.
        reason: String,
    },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved { name, searched } => {
                write!(f, "could not find module '{name}' in {searched} search path(s)")
            },
            Self::Unreadable { path, reason } => write!(f, "failed to read {path}: {reason}"),
            Self::Invalid { path, line, reason } => write!(f, "in {path}:{line}: {reason}"),
        }
    }
}

impl std::error::Error for ImportError {}
