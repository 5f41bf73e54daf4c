use crate::{
    ast::{NodeKind, PrimType},
    error::{Diagnostic, SemaError, diagnostic::line_of},
    interpreter::module::ModuleSet,
};

/// One entry of a [`SymbolTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol<V> {
    /// The declared name.
    pub name:   String,
    /// The declared type, or [`PrimType::Func`] for functions.
    pub ty:     PrimType,
    /// Index of the module holding the declaration.
    pub module: usize,
    /// Index of the declaring node in that module's tree.
    pub node:   u32,
    /// Block nesting depth of the declaration.
    pub scope:  u16,
    /// Per-entry payload: `()` while checking, the runtime value while
    /// running.
    pub value:  V,
}

/// An ordered list of symbols with most-recent-wins lookup.
///
/// Entries are pushed as declarations are met and looked up by scanning from
/// the end, so an inner declaration shadows an outer one with the same name.
/// Leaving a block removes the trailing entries of that block's scope and of
/// every deeper one in a single truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable<V> {
    symbols: Vec<Symbol<V>>,
}

impl<V> Default for SymbolTable<V> {
    fn default() -> Self {
        Self { symbols: Vec::new() }
    }
}

impl<V> SymbolTable<V> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a symbol.
    pub fn push(&mut self, symbol: Symbol<V>) {
        self.symbols.push(symbol);
    }

    /// Returns the most recently pushed symbol with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Symbol<V>> {
        self.symbols.iter().rev().find(|symbol| symbol.name == name)
    }

    /// Mutable variant of [`SymbolTable::find`].
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Symbol<V>> {
        self.symbols.iter_mut().rev().find(|symbol| symbol.name == name)
    }

    /// Returns the symbol with the given name declared in exactly `scope`,
    /// looking only at the trailing entries of that scope.
    #[must_use]
    pub fn find_in_scope(&self, name: &str, scope: u16) -> Option<&Symbol<V>> {
        self.symbols
            .iter()
            .rev()
            .take_while(|symbol| symbol.scope >= scope)
            .find(|symbol| symbol.scope == scope && symbol.name == name)
    }

    /// Removes the trailing run of symbols whose scope is at least `scope`.
    ///
    /// # Example
    /// ```
    /// use satsu::{
    ///     ast::PrimType,
    ///     interpreter::symbol::{Symbol, SymbolTable},
    /// };
    ///
    /// let symbol = |name: &str, scope| Symbol { name: name.to_string(),
    ///                                           ty: PrimType::Int,
    ///                                           module: 0,
    ///                                           node: 0,
    ///                                           scope,
    ///                                           value: () };
    /// let mut table = SymbolTable::new();
    /// table.push(symbol("x", 1));
    /// table.push(symbol("x", 2));
    /// table.push(symbol("y", 3));
    ///
    /// assert_eq!(table.find("x").unwrap().scope, 2);
    /// table.pop_scope(2);
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.find("x").unwrap().scope, 1);
    /// ```
    pub fn pop_scope(&mut self, scope: u16) {
        let keep = self.symbols
                       .iter()
                       .rposition(|symbol| symbol.scope < scope)
                       .map_or(0, |index| index + 1);
        self.symbols.truncate(keep);
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over the symbols in push order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol<V>> {
        self.symbols.iter()
    }
}

/// Builds the table of every function declared in a module set.
///
/// Each function gets an entry at scope 0 holding a copy of `value`.
///
/// # Errors
/// A semantic [`Diagnostic`] at the name of a function declared twice,
/// naming the module and line of the first declaration.
pub fn globals<V>(modules: &ModuleSet, value: V) -> Result<SymbolTable<V>, Diagnostic>
    where V: Clone
{
    let mut table = SymbolTable::new();

    for (index, module) in modules.iter().enumerate() {
        for node in module.top_level(NodeKind::FuncDecl) {
            let name = module.text_of(node);

            if let Some(first) = table.find(&name) {
                let original = modules.module(first.module);
                let position = original.span_of(first.node).position as usize;
                let error = SemaError::FunctionRedefinition { name,
                                                              module: original.name.clone(),
                                                              line: line_of(&original.source,
                                                                            position) };
                return Err(Diagnostic::new(module.span_of(node), error).in_module(index));
            }

            table.push(Symbol { name,
                                ty: PrimType::Func,
                                module: index,
                                node,
                                scope: 0,
                                value: value.clone() });
        }
    }

    Ok(table)
}
