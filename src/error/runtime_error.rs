use crate::{ast::PrimType, interpreter::evaluator::host::MAX_HOST_ARGS};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents the errors that stop a program before its first statement runs.
pub enum StartupError {
    /// No global symbol carries the entry name.
    MissingEntry {
        /// The requested entry name.
        name: String,
    },
    /// The entry symbol is not a function.
    EntryNotFunction {
        /// The requested entry name.
        name: String,
    },
    /// The entry function does not return `void`.
    EntryReturnsValue {
        /// The requested entry name.
        name:  String,
        /// The entry function's declared return type.
        found: PrimType,
    },
    /// The entry function declares parameters.
    EntryTakesArguments {
        /// The requested entry name.
        name:  String,
        /// Number of declared parameters.
        count: usize,
    },
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEntry { name } => {
                write!(f, "did not find entry function '{name}' in program")
            },
            Self::EntryNotFunction { name } => write!(f, "entry symbol '{name}' is not a function"),
            Self::EntryReturnsValue { name, found } => {
                write!(f, "entry function '{name}' must return void, not {found}")
            },
            Self::EntryTakesArguments { name, count } => {
                write!(f, "entry function '{name}' must not take arguments, it takes {count}")
            },
        }
    }
}

impl std::error::Error for StartupError {}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents the errors that can occur while registering host functions.
pub enum HostError {
    /// A function with the same name is already registered.
    DuplicateName {
        /// The function name.
        name: String,
    },
    /// The function declares more parameters than a system call can pass.
    TooManyArguments {
        /// The function name.
        name:  String,
        /// Number of declared parameters.
        count: usize,
    },
    /// A parameter is declared `void` or `func`.
    InvalidArgumentType {
        /// The function name.
        name:     String,
        /// One-based parameter position.
        position: usize,
        /// The offending type.
        found:    PrimType,
    },
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "system function {name} is already registered")
            },
            Self::TooManyArguments { name, count } => write!(f,
                                                             "system function {name} takes {count} arguments, at most {MAX_HOST_ARGS} are allowed"),
            Self::InvalidArgumentType { name,
                                        position,
                                        found, } => write!(f,
                                                           "argument {position} of system function {name} cannot have type {found}"),
        }
    }
}

impl std::error::Error for HostError {}

#[derive(Debug, Clone, PartialEq)]
/// Conditions the executor detects while running that semantic analysis
/// should have ruled out.
///
/// These are never returned to the caller. The executor logs them and carries
/// on with a default value of the expected type.
pub enum InvariantViolation {
    /// A system call names a function missing from the host table.
    UnknownHostFunction {
        /// The requested name.
        name: String,
    },
    /// A system call declares a return type the host function does not have.
    HostReturnType {
        /// The host function name.
        name:       String,
        /// Return type declared at the call site.
        declared:   PrimType,
        /// Return type registered in the host table.
        registered: PrimType,
    },
    /// A system call passes the wrong number of arguments.
    HostArgumentCount {
        /// The host function name.
        name:     String,
        /// Number of registered parameters.
        expected: usize,
        /// Number of arguments passed.
        found:    usize,
    },
    /// A system call argument has the wrong type.
    HostArgumentType {
        /// The host function name.
        name:     String,
        /// One-based argument position.
        position: usize,
        /// Registered parameter type.
        expected: PrimType,
        /// Type of the evaluated argument.
        found:    PrimType,
    },
    /// A host callback returned a value of the wrong type.
    HostResultType {
        /// The host function name.
        name:     String,
        /// Registered return type.
        expected: PrimType,
        /// Type of the returned value.
        found:    PrimType,
    },
    /// A runtime value did not have the type its expression was checked to
    /// have.
    ValueType {
        /// The checked type.
        expected: PrimType,
        /// The actual type.
        found:    PrimType,
    },
    /// A cast outside the explicit-cast matrix.
    UncheckedCast {
        /// Type of the operand.
        from: PrimType,
        /// Target type.
        to:   PrimType,
    },
    /// A string read outside its bounds.
    IndexOutOfBounds {
        /// The requested index.
        index:  i64,
        /// Length of the string in bytes.
        length: usize,
    },
    /// Integer division or remainder by zero.
    DivisionByZero,
    /// An identifier resolved to no symbol while running.
    UnboundSymbol {
        /// The identifier.
        name: String,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownHostFunction { name } => {
                write!(f, "system function {name} not in system function table")
            },
            Self::HostReturnType { name,
                                   declared,
                                   registered, } => write!(f,
                                                           "called system function {name} with return type {declared} instead of {registered}"),
            Self::HostArgumentCount { name, expected, found } => {
                write!(f, "system function {name} wants {expected} argument(s), {found} given")
            },
            Self::HostArgumentType { name,
                                     position,
                                     expected,
                                     found, } => write!(f,
                                                        "system function {name} given {found} for argument {position} when needed {expected}"),
            Self::HostResultType { name, expected, found } => {
                write!(f, "system function {name} returned {found} instead of {expected}")
            },
            Self::ValueType { expected, found } => {
                write!(f, "value of type {found} used where {expected} was checked")
            },
            Self::UncheckedCast { from, to } => write!(f, "cannot cast {from} to {to}"),
            Self::IndexOutOfBounds { index, length } => write!(f,
                                                               "tried to read index {index} of a string with length {length}"),
            Self::DivisionByZero => write!(f, "integer division by zero"),
            Self::UnboundSymbol { name } => write!(f, "symbol '{name}' is not bound at run time"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl InvariantViolation {
    /// Reports the violation on the error log.
    pub fn log(&self) {
        log::error!("runtime invariant violated: {self}");
    }
}
