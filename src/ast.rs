use std::fmt::Write as _;

use crate::interpreter::lexer::{LexOutput, TokenKind};

/// Index of the placeholder node every arena starts with.
pub const NULL_NODE: u32 = 0;
/// Index of the root node every arena starts with.
pub const ROOT_NODE: u32 = 1;

/// The kind of an AST node.
///
/// Kinds fall into three groups: structural nodes produced by the statement
/// parser, `Type` nodes naming a primitive type, and expression nodes
/// (prefixed with `E`) produced by the expression parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Placeholder occupying index 0 of every arena.
    Null,
    /// The module root. Children are imports and function declarations.
    Root,
    /// `import name;`
    Import,
    /// `func type name(args) body`
    FuncDecl,
    /// Reserved for module-level variables. Never produced by the parser.
    GlobalDecl,
    /// `var type name = init;`
    LocalDecl,
    /// Parenthesized parameter list of a function declaration.
    ArgList,
    /// One `type name` parameter.
    Arg,
    /// `return expr?;`
    Return,
    /// `if (cond) then else?`
    CTree,
    /// `while (cond) body`
    While,
    /// `for (init; cond; inc) body`
    For,
    /// `break;`
    Break,
    /// `continue;`
    Continue,
    /// `{ stmt* }`
    Block,
    /// A primitive type keyword.
    Type,
    /// Identifier, literal, `true` or `false`.
    EAtom,
    /// Host function call.
    ESystem,
    /// Function call.
    ECall,
    /// String index or substring.
    EAccess,
    /// Unary minus.
    ENeg,
    /// Logical not.
    ENot,
    /// Explicit cast.
    ECast,
    /// `*`
    EMul,
    /// `/`
    EDiv,
    /// `%`
    EMod,
    /// `+`
    EAdd,
    /// `-`
    ESub,
    /// `<`
    ELess,
    /// `<=`
    ELessEqual,
    /// `>`
    EGreater,
    /// `>=`
    EGreaterEqual,
    /// `==`
    EEqual,
    /// `!=`
    ENotEqual,
    /// `&&`
    EAnd,
    /// `||`
    EOr,
    /// `^^`
    EXor,
    /// `cond ? a : b`
    ETernary,
    /// `=`
    EAssign,
    /// `+=`
    EAddAssign,
    /// `-=`
    ESubAssign,
    /// `*=`
    EMulAssign,
    /// `/=`
    EDivAssign,
    /// `%=`
    EModAssign,
}

impl NodeKind {
    /// Returns the name used when dumping trees.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Root => "ROOT",
            Self::Import => "IMPORT",
            Self::FuncDecl => "FUNCDECL",
            Self::GlobalDecl => "GLOBALDECL",
            Self::LocalDecl => "LOCALDECL",
            Self::ArgList => "ARGLIST",
            Self::Arg => "ARG",
            Self::Return => "RETURN",
            Self::CTree => "CTREE",
            Self::While => "WHILE",
            Self::For => "FOR",
            Self::Break => "BREAK",
            Self::Continue => "CONTINUE",
            Self::Block => "BLOCK",
            Self::Type => "TYPE",
            Self::EAtom => "EATOM",
            Self::ESystem => "ESYSTEM",
            Self::ECall => "ECALL",
            Self::EAccess => "EACCESS",
            Self::ENeg => "ENEG",
            Self::ENot => "ENOT",
            Self::ECast => "ECAST",
            Self::EMul => "EMUL",
            Self::EDiv => "EDIV",
            Self::EMod => "EMOD",
            Self::EAdd => "EADD",
            Self::ESub => "ESUB",
            Self::ELess => "ELESS",
            Self::ELessEqual => "ELESSEQUAL",
            Self::EGreater => "EGREATER",
            Self::EGreaterEqual => "EGREATEREQUAL",
            Self::EEqual => "EEQUAL",
            Self::ENotEqual => "ENOTEQUAL",
            Self::EAnd => "EAND",
            Self::EOr => "EOR",
            Self::EXor => "EXOR",
            Self::ETernary => "ETERNARY",
            Self::EAssign => "EASSIGN",
            Self::EAddAssign => "EADDASSIGN",
            Self::ESubAssign => "ESUBASSIGN",
            Self::EMulAssign => "EMULASSIGN",
            Self::EDivAssign => "EDIVASSIGN",
            Self::EModAssign => "EMODASSIGN",
        }
    }

    /// Whether nodes of this kind are expressions.
    #[must_use]
    pub const fn is_expression(self) -> bool {
        matches!(self,
                 Self::EAtom
                 | Self::ESystem
                 | Self::ECall
                 | Self::EAccess
                 | Self::ENeg
                 | Self::ENot
                 | Self::ECast
                 | Self::EMul
                 | Self::EDiv
                 | Self::EMod
                 | Self::EAdd
                 | Self::ESub
                 | Self::ELess
                 | Self::ELessEqual
                 | Self::EGreater
                 | Self::EGreaterEqual
                 | Self::EEqual
                 | Self::ENotEqual
                 | Self::EAnd
                 | Self::EOr
                 | Self::EXor
                 | Self::ETernary
                 | Self::EAssign
                 | Self::EAddAssign
                 | Self::ESubAssign
                 | Self::EMulAssign
                 | Self::EDivAssign
                 | Self::EModAssign)
    }

    /// Whether nodes of this kind assign to their left operand.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(self,
                 Self::EAssign
                 | Self::EAddAssign
                 | Self::ESubAssign
                 | Self::EMulAssign
                 | Self::EDivAssign
                 | Self::EModAssign)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A primitive type of the language.
///
/// `Func` never types an expression. It marks symbol table entries that name
/// function declarations rather than variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Real,
    /// Owned byte string.
    String,
    /// Boolean.
    Bool,
    /// No value.
    Void,
    /// Function declaration.
    Func,
}

impl PrimType {
    /// Returns the keyword spelling of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Real => "real",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Void => "void",
            Self::Func => "func",
        }
    }

    /// Maps a type keyword to its type.
    ///
    /// # Example
    /// ```
    /// use satsu::{ast::PrimType, interpreter::lexer::TokenKind};
    ///
    /// assert_eq!(PrimType::from_token(TokenKind::Real), Some(PrimType::Real));
    /// assert_eq!(PrimType::from_token(TokenKind::Func), None);
    /// ```
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(Self::Int),
            TokenKind::Real => Some(Self::Real),
            TokenKind::String => Some(Self::String),
            TokenKind::Bool => Some(Self::Bool),
            TokenKind::Void => Some(Self::Void),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// What the node represents.
    pub kind:     NodeKind,
    /// Index of the node's token in the owning module's lexer output.
    pub token:    u32,
    /// Indices of the child nodes, in source order.
    pub children: Vec<u32>,
}

/// A syntax tree stored as a flat arena.
///
/// Children refer to other nodes by index. Node 0 is a placeholder and node 1
/// is the root, so every tree has at least two nodes. Each node except those
/// two is the child of exactly one other node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    /// The node arena.
    pub nodes: Vec<Node>,
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Ast {
    /// Creates a tree holding only the placeholder and an empty root.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![Node { kind:     NodeKind::Null,
                                  token:    0,
                                  children: Vec::new(), },
                           Node { kind:     NodeKind::Root,
                                  token:    0,
                                  children: Vec::new(), }], }
    }

    /// Appends a childless node and returns its index.
    pub fn add_node(&mut self, kind: NodeKind, token: u32) -> u32 {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(Node { kind,
                               token,
                               children: Vec::new() });
        index
    }

    /// Appends `child` to the children of `parent`.
    pub fn attach(&mut self, parent: u32, child: u32) {
        self.nodes[parent as usize].children.push(child);
    }

    /// Returns the node at `index`.
    #[must_use]
    pub fn node(&self, index: u32) -> &Node {
        &self.nodes[index as usize]
    }

    /// Returns the kind of the node at `index`.
    #[must_use]
    pub fn kind(&self, index: u32) -> NodeKind {
        self.node(index).kind
    }

    /// Returns the children of the node at `index`.
    #[must_use]
    pub fn children(&self, index: u32) -> &[u32] {
        &self.node(index).children
    }

    /// Returns the `nth` child of the node at `index`.
    #[must_use]
    pub fn child(&self, index: u32, nth: usize) -> u32 {
        self.node(index).children[nth]
    }

    /// Returns the number of nodes, placeholder and root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children(ROOT_NODE).is_empty()
    }

    /// Renders the tree one node per line, indenting two spaces per level.
    ///
    /// Each line shows the node kind followed by its token's kind and span.
    ///
    /// # Parameters
    /// - `lex`: The lexer output the node tokens index into.
    ///
    /// # Returns
    /// The rendered tree, ending with a newline.
    #[must_use]
    pub fn dump(&self, lex: &LexOutput) -> String {
        let mut out = String::new();
        let mut stack = vec![(ROOT_NODE, 0_usize)];

        while let Some((index, depth)) = stack.pop() {
            let node = self.node(index);
            let token = lex.token(node.token);
            let _ = writeln!(out, "{}{} | {token}", "  ".repeat(depth), node.kind);

            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        out
    }
}
