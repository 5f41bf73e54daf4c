use crate::{
    ast::PrimType,
    error::HostError,
    interpreter::{evaluator::core::Frame, value::Value},
};

/// Most parameters a host function may take.
pub const MAX_HOST_ARGS: usize = 6;

/// The callback behind a host function.
///
/// It receives the calling frame and the evaluated arguments, already
/// checked against the registered parameter types.
pub type HostCallback = Box<dyn Fn(&mut HostContext<'_>, &[Value]) -> Value>;

/// Access to the calling function's locals from inside a host callback.
///
/// This is how host functions follow local-variable conventions such as the
/// `__rc` and `__out` locals the `shell` function fills in.
pub struct HostContext<'f> {
    frame: &'f mut Frame,
}

impl<'f> HostContext<'f> {
    /// Wraps the frame of the function making the call.
    pub fn new(frame: &'f mut Frame) -> Self {
        Self { frame }
    }

    /// Returns the value of the innermost local with the given name.
    #[must_use]
    pub fn local(&self, name: &str) -> Option<&Value> {
        self.frame.locals.find(name).map(|symbol| &symbol.value)
    }

    /// Mutable variant of [`HostContext::local`].
    pub fn local_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.frame.locals.find_mut(name).map(|symbol| &mut symbol.value)
    }

    /// Overwrites a local if it exists and already holds a value of the same
    /// type.
    ///
    /// # Returns
    /// Whether the local was written.
    pub fn set_local(&mut self, name: &str, value: Value) -> bool {
        match self.local_mut(name) {
            Some(slot) if slot.prim_type() == value.prim_type() => {
                *slot = value;
                true
            },
            _ => false,
        }
    }

    /// Index of the module holding the calling function.
    #[must_use]
    pub fn module(&self) -> usize {
        self.frame.module
    }
}

/// A function the embedding program exposes to scripts.
pub struct HostFunction {
    /// Name scripts call it by.
    pub name:        String,
    /// Type of the value the callback returns.
    pub return_type: PrimType,
    /// Types of the parameters, at most [`MAX_HOST_ARGS`].
    pub arg_types:   Vec<PrimType>,
    /// The implementation.
    pub callback:    HostCallback,
}

impl std::fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostFunction")
         .field("name", &self.name)
         .field("return_type", &self.return_type)
         .field("arg_types", &self.arg_types)
         .finish_non_exhaustive()
    }
}

/// An append-only registry of host functions, looked up by exact name.
#[derive(Debug, Default)]
pub struct HostTable {
    functions: Vec<HostFunction>,
}

impl HostTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding the base functions `print`, `readln` and
    /// `shell`.
    ///
    /// - `print(int fd, string text)` writes to standard output for fd 1 and
    ///   standard error for fd 2.
    /// - `readln(int fd) -> string` reads one line from standard input for
    ///   fd 0, without the line break.
    /// - `shell(string command) -> string` runs the command through `sh -c`
    ///   and returns its standard output. The exit status goes to the
    ///   caller's `__rc` int local and the output is also copied to its
    ///   `__out` string local, when they exist.
    #[must_use]
    pub fn base() -> Self {
        use crate::interpreter::evaluator::function::builtin::{print, readln, shell};

        let mut table = Self::new();
        let base: [(&str, PrimType, &[PrimType], fn(&mut HostContext<'_>, &[Value]) -> Value); 3] =
            [("print", PrimType::Void, &[PrimType::Int, PrimType::String], print),
             ("readln", PrimType::String, &[PrimType::Int], readln),
             ("shell", PrimType::String, &[PrimType::String], shell)];

        for (name, return_type, arg_types, callback) in base {
            if let Err(error) = table.register(name, return_type, arg_types, callback) {
                log::error!("failed to register base function: {error}");
            }
        }
        table
    }

    /// Adds a function to the table.
    ///
    /// # Parameters
    /// - `name`: Name scripts call it by; must not be registered yet.
    /// - `return_type`: Type the callback returns.
    /// - `arg_types`: Parameter types, at most [`MAX_HOST_ARGS`], none of
    ///   them `void`.
    /// - `callback`: The implementation.
    ///
    /// # Errors
    /// A [`HostError`] if the name is taken or the parameters are invalid.
    ///
    /// # Example
    /// ```
    /// use satsu::{
    ///     ast::PrimType,
    ///     interpreter::{evaluator::HostTable, value::Value},
    /// };
    ///
    /// let mut table = HostTable::new();
    /// table.register("twice", PrimType::Int, &[PrimType::Int], |_, args| {
    ///          Value::Int(args[0].as_int() * 2)
    ///      })
    ///      .unwrap();
    ///
    /// assert!(table.find("twice").is_some());
    /// assert!(table.register("twice", PrimType::Void, &[], |_, _| Value::Void).is_err());
    /// ```
    pub fn register<F>(&mut self,
                       name: &str,
                       return_type: PrimType,
                       arg_types: &[PrimType],
                       callback: F)
                       -> Result<&mut Self, HostError>
        where F: Fn(&mut HostContext<'_>, &[Value]) -> Value + 'static
    {
        if self.find(name).is_some() {
            return Err(HostError::DuplicateName { name: name.to_string() });
        }
        if arg_types.len() > MAX_HOST_ARGS {
            return Err(HostError::TooManyArguments { name:  name.to_string(),
                                                     count: arg_types.len(), });
        }
        if let Some(position) =
            arg_types.iter().position(|ty| matches!(ty, PrimType::Void | PrimType::Func))
        {
            return Err(HostError::InvalidArgumentType { name:     name.to_string(),
                                                        position: position + 1,
                                                        found:    arg_types[position], });
        }

        self.functions.push(HostFunction { name: name.to_string(),
                                           return_type,
                                           arg_types: arg_types.to_vec(),
                                           callback: Box::new(callback) });
        Ok(self)
    }

    /// Returns the function registered under `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&HostFunction> {
        self.functions.iter().find(|function| function.name == name)
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no function is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
