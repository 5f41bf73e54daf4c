use crate::{ast::PrimType, interpreter::evaluator::host::MAX_HOST_ARGS};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during semantic analysis.
pub enum SemaError {
    /// Two top-level functions share a name.
    FunctionRedefinition {
        /// The function name.
        name:   String,
        /// Display name of the module holding the first definition.
        module: String,
        /// Line of the first definition.
        line:   usize,
    },
    /// A local variable is declared twice in the same scope.
    VariableRedefinition {
        /// The variable name.
        name: String,
    },
    /// A function declares two parameters with the same name.
    DuplicateArgument {
        /// The parameter name.
        name: String,
    },
    /// A variable or parameter is declared with type `void`.
    VoidVariable {
        /// The variable name.
        name: String,
    },
    /// An identifier that names no local variable and no function.
    UnknownSymbol {
        /// The identifier.
        name: String,
    },
    /// A function name is used where a value is required.
    FunctionAsValue {
        /// The function name.
        name: String,
    },
    /// The callee of a call expression is not a function name.
    NotCallable,
    /// A call passes the wrong number of arguments.
    ArgumentCount {
        /// The called function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments passed.
        found:    usize,
    },
    /// A call argument has the wrong type.
    ArgumentType {
        /// The called function.
        name:     String,
        /// One-based position of the argument.
        position: usize,
        /// The declared parameter type.
        expected: PrimType,
        /// The argument's type.
        found:    PrimType,
    },
    /// A system call declares more parameters than host functions accept.
    TooManySystemArguments {
        /// Number of declared parameters.
        found: usize,
    },
    /// A system call declares a `void` parameter.
    VoidParameter {
        /// One-based position of the parameter.
        position: usize,
    },
    /// A value of one type is used where another is required.
    TypeMismatch {
        /// The required type.
        expected: PrimType,
        /// The actual type.
        found:    PrimType,
    },
    /// The two operands of a binary operator have different types.
    OperandMismatch {
        /// The operator.
        op:    &'static str,
        /// Type of the left operand.
        left:  PrimType,
        /// Type of the right operand.
        right: PrimType,
    },
    /// An operator is applied to a type it does not support.
    InvalidOperand {
        /// The operator.
        op:    &'static str,
        /// The operand type.
        found: PrimType,
    },
    /// The two branches of a ternary have no common non-void type.
    TernaryMismatch {
        /// Type of the first branch.
        then_type: PrimType,
        /// Type of the second branch.
        else_type: PrimType,
    },
    /// The left side of an assignment is not a variable.
    NotAnLvalue,
    /// A cast outside the explicit-cast matrix.
    InvalidCast {
        /// The operand type.
        from: PrimType,
        /// The target type.
        to:   PrimType,
    },
    /// `return` with a value inside a `void` function.
    UnexpectedReturnValue,
    /// `return` without a value inside a non-`void` function.
    MissingReturnValue {
        /// The function's return type.
        expected: PrimType,
    },
    /// `break` outside of any loop.
    BreakOutsideLoop,
    /// `continue` outside of any loop.
    ContinueOutsideLoop,
    /// An integer literal that does not fit in 64 bits.
    IntegerOutOfRange,
}

impl std::fmt::Display for SemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FunctionRedefinition { name, module, line } => {
                write!(f, "redefinition of function '{name}', first defined at {module}:{line}")
            },
            Self::VariableRedefinition { name } => {
                write!(f, "redefinition of variable '{name}' in the same scope")
            },
            Self::DuplicateArgument { name } => write!(f, "duplicate argument name '{name}'"),
            Self::VoidVariable { name } => write!(f, "'{name}' cannot have type void"),
            Self::UnknownSymbol { name } => write!(f, "unknown symbol '{name}'"),
            Self::FunctionAsValue { name } => {
                write!(f, "function '{name}' cannot be used as a value")
            },
            Self::NotCallable => write!(f, "only functions can be called"),
            Self::ArgumentCount { name, expected, found } => {
                write!(f, "'{name}' takes {expected} argument(s), {found} given")
            },
            Self::ArgumentType { name,
                                 position,
                                 expected,
                                 found, } => {
                write!(f, "argument {position} of '{name}' must be {expected}, found {found}")
            },
            Self::TooManySystemArguments { found } => {
                write!(f, "system functions take at most {MAX_HOST_ARGS} arguments, {found} declared")
            },
            Self::VoidParameter { position } => {
                write!(f, "system function parameter {position} cannot have type void")
            },
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            },
            Self::OperandMismatch { op, left, right } => {
                write!(f, "operands of '{op}' must have the same type, found {left} and {right}")
            },
            Self::InvalidOperand { op, found } => write!(f, "'{op}' cannot be applied to {found}"),
            Self::TernaryMismatch { then_type,
                                    else_type, } => write!(f,
                                                           "ternary branches must share a non-void type, found {then_type} and {else_type}"),
            Self::NotAnLvalue => write!(f, "left side of assignment must be a variable"),
            Self::InvalidCast { from, to } => write!(f, "cannot cast {from} to {to}"),
            Self::UnexpectedReturnValue => write!(f, "void function cannot return a value"),
            Self::MissingReturnValue { expected } => {
                write!(f, "function must return a value of type {expected}")
            },
            Self::BreakOutsideLoop => write!(f, "break outside of a loop"),
            Self::ContinueOutsideLoop => write!(f, "continue outside of a loop"),
            Self::IntegerOutOfRange => write!(f, "integer literal is out of range"),
        }
    }
}

impl std::error::Error for SemaError {}
