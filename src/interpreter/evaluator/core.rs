use crate::{
    ast::PrimType,
    error::{Diagnostic, Span, StartupError},
    interpreter::{
        evaluator::host::HostTable,
        module::ModuleSet,
        symbol::{SymbolTable, globals},
        value::Value,
    },
};

/// The control-flow signal every statement returns.
///
/// Blocks stop at the first statement that returns anything but
/// [`Action::None`] and hand the signal upward. Loops consume `Break` and
/// `Continue`; function calls consume `Return`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Carry on with the next statement.
    None,
    /// Leave the function with a value, [`Value::Void`] for a bare `return`.
    Return(Value),
    /// Leave the innermost loop.
    Break,
    /// Start the next iteration of the innermost loop.
    Continue,
}

/// The locals of one active function call.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Parameters and locals with their current values.
    pub locals: SymbolTable<Value>,
    /// Index of the module holding the running function.
    pub module: usize,
    /// Current block nesting depth.
    pub scope:  u16,
}

impl Frame {
    /// Creates an empty frame for a function of the given module.
    #[must_use]
    pub fn new(module: usize) -> Self {
        Self { locals: SymbolTable::new(),
               module,
               scope: 0 }
    }
}

/// Stores the runtime state of one program run.
///
/// The running function's frame is held directly; caller frames are held by
/// the calls that suspended them and restored when the callee returns.
pub struct Executor<'a> {
    /// The program.
    pub(in crate::interpreter::evaluator) modules: &'a ModuleSet,
    /// Functions scripts may call through `system`.
    pub(in crate::interpreter::evaluator) host:    &'a HostTable,
    /// Every function of every module.
    pub(in crate::interpreter::evaluator) globals: SymbolTable<Value>,
    /// Frame of the running function.
    pub(in crate::interpreter::evaluator) frame:   Frame,
    /// Number of suspended caller frames.
    pub(in crate::interpreter::evaluator) depth:   usize,
}

impl<'a> Executor<'a> {
    /// Creates an executor for a checked module set.
    ///
    /// # Errors
    /// A semantic [`Diagnostic`] if two functions share a name, which
    /// analysis would already have reported.
    pub fn new(modules: &'a ModuleSet, host: &'a HostTable) -> Result<Self, Diagnostic> {
        Ok(Self { modules,
                  host,
                  globals: globals(modules, Value::Void)?,
                  frame: Frame::new(0),
                  depth: 0 })
    }

    /// Runs the named entry function to completion.
    ///
    /// The entry must be a `void` function taking no arguments.
    ///
    /// # Errors
    /// A startup [`Diagnostic`] if the entry is missing or has the wrong
    /// signature. Nothing runs in that case.
    pub fn run(&mut self, entry: &str) -> Result<(), Diagnostic> {
        let Some(symbol) = self.globals.find(entry) else {
            return Err(Diagnostic::new(Span::default(),
                                       StartupError::MissingEntry { name: entry.to_string() }));
        };
        let (module_index, node) = (symbol.module, symbol.node);
        let module = self.modules.module(module_index);
        let fail = |error: StartupError| {
            Diagnostic::new(module.span_of(node), error).in_module(module_index)
        };

        if symbol.ty != PrimType::Func {
            return Err(fail(StartupError::EntryNotFunction { name: entry.to_string() }));
        }
        let [ret, args, body] = module.ast.children(node) else {
            return Err(fail(StartupError::EntryNotFunction { name: entry.to_string() }));
        };
        let found = PrimType::from_token(module.token_of(*ret).kind).unwrap_or(PrimType::Void);
        if found != PrimType::Void {
            return Err(fail(StartupError::EntryReturnsValue { name: entry.to_string(),
                                                              found }));
        }
        let count = module.ast.children(*args).len();
        if count != 0 {
            return Err(fail(StartupError::EntryTakesArguments { name: entry.to_string(),
                                                                count }));
        }

        log::debug!("starting at '{entry}' in module {module_index}");
        self.frame = Frame::new(module_index);
        self.depth = 0;
        self.exec(*body);
        Ok(())
    }
}

/// Runs a checked module set from its entry function.
///
/// The module set must have passed [`analyze`](crate::interpreter::analyzer::analyze);
/// conditions analysis rules out are logged as invariant violations and
/// replaced by default values rather than stopping the run.
///
/// # Parameters
/// - `modules`: The program.
/// - `host`: Functions scripts may call through `system`.
/// - `entry`: Name of the entry function, usually
///   [`DEFAULT_ENTRY`](crate::DEFAULT_ENTRY).
///
/// # Errors
/// A startup [`Diagnostic`] if the entry is missing, is not a function,
/// returns a value or takes arguments.
///
/// # Example
/// ```
/// use satsu::interpreter::{
///     evaluator::{HostTable, execute},
///     module::{Module, ModuleSet},
/// };
///
/// let module = Module::build("demo", 1, b"func void start() { var int x = 1; }".to_vec()).unwrap();
/// let modules = ModuleSet::new(module);
/// let host = HostTable::new();
///
/// assert!(execute(&modules, &host, "start").is_ok());
/// assert!(execute(&modules, &host, "main").is_err());
/// ```
pub fn execute(modules: &ModuleSet, host: &HostTable, entry: &str) -> Result<(), Diagnostic> {
    Executor::new(modules, host)?.run(entry)
}
