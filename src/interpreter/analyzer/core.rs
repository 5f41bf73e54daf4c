use crate::{
    ast::{NodeKind, PrimType},
    error::{Diagnostic, SemaError},
    interpreter::{
        module::{Module, ModuleSet},
        symbol::{Symbol, SymbolTable, globals},
    },
};

/// Result type used by the analyzer.
pub type SemaResult<T> = Result<T, Diagnostic>;

/// Checks the function bodies of a module set.
///
/// The analyzer mirrors the executor's bookkeeping: a local table per
/// function, a scope counter bumped on every block, and a loop depth for
/// validating `break` and `continue`.
pub struct Analyzer<'a> {
    /// The modules being checked.
    pub(in crate::interpreter::analyzer) modules:     &'a ModuleSet,
    /// Every function of every module.
    pub(in crate::interpreter::analyzer) globals:     SymbolTable<()>,
    /// Parameters and locals of the function being checked.
    pub(in crate::interpreter::analyzer) locals:      SymbolTable<()>,
    /// Index of the module holding the function being checked.
    pub(in crate::interpreter::analyzer) module:      usize,
    /// Current block nesting depth.
    pub(in crate::interpreter::analyzer) scope:       u16,
    /// Number of loops enclosing the current statement.
    pub(in crate::interpreter::analyzer) loop_depth:  u32,
    /// Declared return type of the function being checked.
    pub(in crate::interpreter::analyzer) return_type: PrimType,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer, building the global function table.
    ///
    /// # Errors
    /// A semantic [`Diagnostic`] if two functions share a name.
    pub fn new(modules: &'a ModuleSet) -> SemaResult<Self> {
        Ok(Self { modules,
                  globals: globals(modules, ())?,
                  locals: SymbolTable::new(),
                  module: 0,
                  scope: 0,
                  loop_depth: 0,
                  return_type: PrimType::Void })
    }

    /// Checks every function of every module, in module order.
    ///
    /// # Errors
    /// The first semantic [`Diagnostic`] found.
    pub fn check_all(&mut self) -> SemaResult<()> {
        for (index, module) in self.modules.iter().enumerate() {
            for node in module.top_level(NodeKind::FuncDecl) {
                self.check_function(index, node)?;
            }
        }
        Ok(())
    }

    /// Checks one function declaration.
    ///
    /// Parameters live in scope 0; a block body opens scope 1.
    fn check_function(&mut self, module: usize, node: u32) -> SemaResult<()> {
        self.module = module;
        self.locals = SymbolTable::new();
        self.scope = 0;
        self.loop_depth = 0;

        let source = self.current();
        let [ret, args, body] = source.ast.children(node) else {
            return Ok(());
        };
        let (ret, args, body) = (*ret, *args, *body);

        for &arg in source.ast.children(args) {
            let name = source.text_of(arg);
            let ty = self.type_node(source.ast.child(arg, 0));

            if ty == PrimType::Void {
                return Err(self.error(arg, SemaError::VoidVariable { name }));
            }
            if self.locals.find_in_scope(&name, 0).is_some() {
                return Err(self.error(arg, SemaError::DuplicateArgument { name }));
            }
            self.declare(name, ty, arg);
        }

        self.return_type = self.type_node(ret);
        log::debug!("checking function '{}' in module {module}", source.text_of(node));
        self.check_statement(body)
    }

    /// Returns the module holding the function being checked.
    pub(in crate::interpreter::analyzer) fn current(&self) -> &'a Module {
        self.modules.module(self.module)
    }

    /// Reads the type a `Type` node names.
    pub(in crate::interpreter::analyzer) fn type_node(&self, node: u32) -> PrimType {
        PrimType::from_token(self.current().token_of(node).kind).unwrap_or(PrimType::Void)
    }

    /// Pushes a local at the current scope.
    pub(in crate::interpreter::analyzer) fn declare(&mut self, name: String, ty: PrimType, node: u32) {
        self.locals.push(Symbol { name,
                                  ty,
                                  module: self.module,
                                  node,
                                  scope: self.scope,
                                  value: () });
    }

    /// Runs `check` one scope deeper, dropping the scope's locals afterwards.
    pub(in crate::interpreter::analyzer) fn scoped<T>(&mut self,
                                                      check: impl FnOnce(&mut Self) -> SemaResult<T>)
                                                      -> SemaResult<T> {
        self.scope += 1;
        let result = check(self);
        self.locals.pop_scope(self.scope);
        self.scope -= 1;
        result
    }

    /// Builds a diagnostic at a node's token in the current module.
    pub(in crate::interpreter::analyzer) fn error(&self, node: u32, error: SemaError) -> Diagnostic {
        Diagnostic::new(self.current().span_of(node), error).in_module(self.module)
    }
}

/// Type-checks a module set.
///
/// Pass one collects every function of every module into a global table and
/// rejects duplicate names. Pass two checks each function body against the
/// typing rules, stopping at the first error. The module set is only read,
/// so running the analysis twice gives the same verdict.
///
/// # Errors
/// The first semantic [`Diagnostic`] found.
///
/// # Example
/// ```
/// use satsu::interpreter::{
///     analyzer::analyze,
///     module::{Module, ModuleSet},
/// };
///
/// let good = Module::build("good", 1, b"func int one() { return 1; }".to_vec()).unwrap();
/// let bad = Module::build("bad", 2, b"func int one() { return true; }".to_vec()).unwrap();
///
/// assert!(analyze(&ModuleSet::new(good)).is_ok());
/// assert!(analyze(&ModuleSet::new(bad)).is_err());
/// ```
pub fn analyze(modules: &ModuleSet) -> SemaResult<()> {
    Analyzer::new(modules)?.check_all()
}
