use std::{
    collections::HashMap,
    fmt::Write as _,
    io,
    path::{Path, PathBuf},
};

use crate::{
    ast::{Ast, NodeKind, ROOT_NODE},
    error::{Diagnostic, ImportError, Span, diagnostic::line_of},
    interpreter::{
        lexer::{LexOutput, Token, lex},
        parser::parse,
    },
};

/// File extension of source files, without the dot.
pub const SOURCE_EXTENSION: &str = "ssu";

/// One lexed and parsed source file.
#[derive(Debug, Clone)]
pub struct Module {
    /// Name shown in diagnostics, usually the file path.
    pub name:    String,
    /// Identity of the underlying file, such as its inode.
    pub file_id: u64,
    /// The raw source bytes.
    pub source:  Vec<u8>,
    /// Tokens of `source`.
    pub lex:     LexOutput,
    /// Syntax tree built from `lex`.
    pub ast:     Ast,
}

impl Module {
    /// Lexes and parses a source file.
    ///
    /// # Parameters
    /// - `name`: Display name of the module.
    /// - `file_id`: Identity of the file the source was read from.
    /// - `source`: The source bytes.
    ///
    /// # Errors
    /// The lexing or parsing [`Diagnostic`], not yet attributed to a module.
    pub fn build(name: impl Into<String>, file_id: u64, source: Vec<u8>) -> Result<Self, Diagnostic> {
        let (lex, ast) = Self::syntax(&source)?;

        Ok(Self { name: name.into(),
                  file_id,
                  source,
                  lex,
                  ast })
    }

    fn syntax(source: &[u8]) -> Result<(LexOutput, Ast), Diagnostic> {
        let tokens = lex(source)?;
        let ast = parse(&tokens)?;
        Ok((tokens, ast))
    }

    /// Returns the token a node points at.
    #[must_use]
    pub fn token_of(&self, node: u32) -> Token {
        self.lex.token(self.ast.node(node).token)
    }

    /// Returns the text of the token a node points at.
    #[must_use]
    pub fn text_of(&self, node: u32) -> String {
        self.token_of(node).text(&self.source)
    }

    /// Returns the span of the token a node points at.
    #[must_use]
    pub fn span_of(&self, node: u32) -> Span {
        Span::of(&self.token_of(node))
    }

    /// Returns the indices of the top-level nodes of the given kind.
    pub fn top_level(&self, kind: NodeKind) -> impl Iterator<Item = u32> + '_ {
        self.ast
            .children(ROOT_NODE)
            .iter()
            .copied()
            .filter(move |&node| self.ast.kind(node) == kind)
    }
}

/// The root module and every module it imports, directly or not.
///
/// Index 0 is the root. No two modules share a file identity.
#[derive(Debug, Clone)]
pub struct ModuleSet {
    modules: Vec<Module>,
}

impl ModuleSet {
    /// Creates a set holding only the root module.
    #[must_use]
    pub fn new(root: Module) -> Self {
        Self { modules: vec![root] }
    }

    /// Returns the module at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    /// Returns the module at `index`, which must exist.
    #[must_use]
    pub fn module(&self, index: usize) -> &Module {
        &self.modules[index]
    }

    /// Returns the number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Always `false`: a set holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterates over the modules in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    /// Returns the index of the module read from the given file.
    #[must_use]
    pub fn find_file(&self, file_id: u64) -> Option<usize> {
        self.modules.iter().position(|module| module.file_id == file_id)
    }

    fn push(&mut self, module: Module) -> usize {
        self.modules.push(module);
        self.modules.len() - 1
    }

    /// Resolves the imports of every module in the set, transitively.
    ///
    /// This is [`resolve_imports_with`] working in place: on failure the set
    /// keeps every module loaded so far, so the diagnostic can be rendered
    /// with [`ModuleSet::render`] against the module holding the failed
    /// import.
    ///
    /// # Errors
    /// An import [`Diagnostic`] attributed to the importing module.
    pub fn resolve_with<P, L>(&mut self, search_paths: &[P], loader: &L) -> Result<(), Diagnostic>
        where P: AsRef<Path>,
              L: SourceLoader + ?Sized
    {
        let mut index = 0;

        while index < self.len() {
            let module = self.module(index);
            let imports: Vec<(String, Span)> =
                module.top_level(NodeKind::Import)
                      .map(|node| (module.text_of(node), module.span_of(node)))
                      .collect();

            for (name, span) in imports {
                let fail = |error: ImportError| Diagnostic::new(span, error).in_module(index);

                let Some((path, file_id)) = search_paths.iter().find_map(|directory| {
                                                                   let path = candidate_path(directory.as_ref(), &name);
                                                                   loader.identify(&path).map(|id| (path, id))
                                                               })
                else {
                    return Err(fail(ImportError::Unresolved { name,
                                                              searched: search_paths.len() }));
                };

                let display = path.display().to_string();
                if let Some(existing) = self.find_file(file_id) {
                    log::debug!("import '{name}' in module {index} is already module {existing}");
                    continue;
                }

                let source = loader.load(&path).map_err(|e| {
                                                    fail(ImportError::Unreadable { path:   display.clone(),
                                                                                   reason: e.to_string(), })
                                                })?;
                let (tokens, ast) = Module::syntax(&source).map_err(|inner| {
                                        let line = line_of(&source, inner.span.position as usize);
                                        fail(ImportError::Invalid { path: display.clone(),
                                                                    line,
                                                                    reason: inner.message() })
                                    })?;

                let added = self.push(Module { name: display.clone(),
                                               file_id,
                                               source,
                                               lex: tokens,
                                               ast });
                log::debug!("resolved import '{name}' to {display} as module {added}");
            }

            index += 1;
        }

        Ok(())
    }

    /// Lists the modules one per line with their sizes.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (index, module) in self.modules.iter().enumerate() {
            let _ = writeln!(out,
                             "{index:>3} {} id={} tokens={} nodes={}",
                             module.name,
                             module.file_id,
                             module.lex.len(),
                             module.ast.len());
        }
        out
    }

    /// Renders a diagnostic against the source of the module it names.
    ///
    /// Diagnostics without a module are rendered against the root.
    #[must_use]
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let module = self.module(diagnostic.module.unwrap_or(0).min(self.len() - 1));
        diagnostic.render(&module.name, &module.source)
    }
}

impl<'a> IntoIterator for &'a ModuleSet {
    type IntoIter = std::slice::Iter<'a, Module>;
    type Item = &'a Module;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

/// Where imported sources come from.
///
/// The resolver asks the loader for the identity of each candidate path and
/// reads only the first candidate that has one.
pub trait SourceLoader {
    /// Returns the identity of the file at `path`, or `None` if there is no
    /// such file. Two paths naming the same file must yield the same
    /// identity.
    fn identify(&self, path: &Path) -> Option<u64>;

    /// Reads the file at `path`.
    ///
    /// # Errors
    /// The underlying I/O failure.
    fn load(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Loads sources from the file system.
///
/// File identity is the inode number on Unix and a hash of the canonical path
/// elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystem;

impl SourceLoader for FileSystem {
    #[cfg(unix)]
    fn identify(&self, path: &Path) -> Option<u64> {
        use std::os::unix::fs::MetadataExt;

        std::fs::metadata(path).ok()
                               .filter(std::fs::Metadata::is_file)
                               .map(|metadata| metadata.ino())
    }

    #[cfg(not(unix))]
    fn identify(&self, path: &Path) -> Option<u64> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let canonical = std::fs::canonicalize(path).ok()?;
        if !canonical.is_file() {
            return None;
        }
        let mut hasher = DefaultHasher::new();
        canonical.hash(&mut hasher);
        Some(hasher.finish())
    }

    fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Loads sources from memory.
///
/// Each inserted file gets a fresh identity; [`MemorySource::alias`] makes a
/// second path name an existing file, the way a hard link would.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    paths: HashMap<PathBuf, u64>,
    files: HashMap<u64, Vec<u8>>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file and returns its identity.
    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<Vec<u8>>) -> u64 {
        let id = self.files.len() as u64 + 1;
        self.files.insert(id, source.into());
        self.paths.insert(path.into(), id);
        id
    }

    /// Makes `path` name the same file as `target`.
    ///
    /// # Returns
    /// The shared identity, or `None` if `target` is unknown.
    pub fn alias(&mut self, path: impl Into<PathBuf>, target: impl AsRef<Path>) -> Option<u64> {
        let id = *self.paths.get(target.as_ref())?;
        self.paths.insert(path.into(), id);
        Some(id)
    }
}

impl SourceLoader for MemorySource {
    fn identify(&self, path: &Path) -> Option<u64> {
        self.paths.get(path).copied()
    }

    fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.identify(path)
            .and_then(|id| self.files.get(&id))
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

/// Builds the candidate path of an import inside one search directory.
///
/// # Example
/// ```
/// use std::path::Path;
///
/// use satsu::interpreter::module::candidate_path;
///
/// assert_eq!(candidate_path(Path::new("lib"), "io"), Path::new("lib/io.ssu"));
/// assert_eq!(candidate_path(Path::new("lib/"), "io"), Path::new("lib/io.ssu"));
/// ```
#[must_use]
pub fn candidate_path(directory: &Path, name: &str) -> PathBuf {
    directory.join(format!("{name}.{SOURCE_EXTENSION}"))
}

/// Resolves the imports of a root module against the file system.
///
/// See [`resolve_imports_with`].
///
/// # Errors
/// An import [`Diagnostic`] for the first import that cannot be resolved,
/// read, lexed or parsed.
pub fn resolve_imports<P>(root: Module, search_paths: &[P]) -> Result<ModuleSet, Diagnostic>
    where P: AsRef<Path>
{
    resolve_imports_with(root, search_paths, &FileSystem)
}

/// Resolves the imports of a root module, transitively.
///
/// Modules are scanned in order, starting with the root, and every newly
/// found module is appended and scanned in turn until no module has unscanned
/// imports. For each `import name;` the search paths are tried in order and
/// the first `<path>/name.ssu` the loader can identify wins. A file whose
/// identity is already in the set is not read again, which also ends import
/// cycles.
///
/// # Parameters
/// - `root`: The entry module.
/// - `search_paths`: Directories to search, in priority order.
/// - `loader`: Where candidate files are identified and read.
///
/// # Returns
/// The module set, root first.
///
/// # Errors
/// An import [`Diagnostic`] at the importing token of the module holding the
/// failed import. Lexing and parsing failures inside the imported file are
/// reported there too, with the inner file, line and message in the text.
pub fn resolve_imports_with<P, L>(root: Module,
                                  search_paths: &[P],
                                  loader: &L)
                                  -> Result<ModuleSet, Diagnostic>
    where P: AsRef<Path>,
          L: SourceLoader + ?Sized
{
    let mut set = ModuleSet::new(root);
    set.resolve_with(search_paths, loader)?;
    Ok(set)
}
