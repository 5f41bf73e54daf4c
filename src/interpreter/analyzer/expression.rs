use crate::{
    ast::{NodeKind, PrimType},
    error::SemaError,
    interpreter::{
        analyzer::core::{Analyzer, SemaResult},
        evaluator::host::MAX_HOST_ARGS,
        lexer::TokenKind,
    },
};

/// Whether an explicit cast from `from` to `to` is allowed.
///
/// Identity casts are not allowed, and neither are `string` to `bool` or
/// `bool` to `real`.
///
/// # Example
/// ```
/// use satsu::{ast::PrimType, interpreter::analyzer::is_legal_cast};
///
/// assert!(is_legal_cast(PrimType::Int, PrimType::String));
/// assert!(!is_legal_cast(PrimType::String, PrimType::Bool));
/// assert!(!is_legal_cast(PrimType::Int, PrimType::Int));
/// ```
#[must_use]
pub const fn is_legal_cast(from: PrimType, to: PrimType) -> bool {
    matches!((from, to),
             (PrimType::Int, PrimType::Real | PrimType::String | PrimType::Bool)
             | (PrimType::Real, PrimType::Int | PrimType::String)
             | (PrimType::String, PrimType::Int | PrimType::Real)
             | (PrimType::Bool, PrimType::Int | PrimType::String))
}

/// Spelling of an operator node, for diagnostics.
const fn operator(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::ENeg | NodeKind::ESub => "-",
        NodeKind::ENot => "!",
        NodeKind::EMul => "*",
        NodeKind::EDiv => "/",
        NodeKind::EMod => "%",
        NodeKind::EAdd => "+",
        NodeKind::ELess => "<",
        NodeKind::ELessEqual => "<=",
        NodeKind::EGreater => ">",
        NodeKind::EGreaterEqual => ">=",
        NodeKind::EEqual => "==",
        NodeKind::ENotEqual => "!=",
        NodeKind::EAnd => "&&",
        NodeKind::EOr => "||",
        NodeKind::EXor => "^^",
        NodeKind::EAssign => "=",
        NodeKind::EAddAssign => "+=",
        NodeKind::ESubAssign => "-=",
        NodeKind::EMulAssign => "*=",
        NodeKind::EDivAssign => "/=",
        NodeKind::EModAssign => "%=",
        _ => "?",
    }
}

/// Types an arithmetic or comparison operator accepts.
const fn accepts(kind: NodeKind, ty: PrimType) -> bool {
    match kind {
        NodeKind::EAdd
        | NodeKind::EAddAssign
        | NodeKind::ELess
        | NodeKind::ELessEqual
        | NodeKind::EGreater
        | NodeKind::EGreaterEqual
        | NodeKind::EEqual
        | NodeKind::ENotEqual => {
            matches!(ty, PrimType::Int | PrimType::Real | PrimType::String)
        },
        NodeKind::EAnd | NodeKind::EOr | NodeKind::EXor | NodeKind::ENot => {
            matches!(ty, PrimType::Bool)
        },
        NodeKind::EAssign => !matches!(ty, PrimType::Void | PrimType::Func),
        _ => matches!(ty, PrimType::Int | PrimType::Real),
    }
}

impl Analyzer<'_> {
    /// Computes and checks the type of an expression.
    ///
    /// # Returns
    /// The expression's type, never [`PrimType::Func`].
    ///
    /// # Errors
    /// A semantic diagnostic at the first ill-typed subexpression.
    pub fn check_expression(&mut self, node: u32) -> SemaResult<PrimType> {
        let ast = &self.current().ast;
        let kind = ast.kind(node);

        match kind {
            NodeKind::EAtom => self.check_atom(node),
            NodeKind::ECall => self.check_call(node),
            NodeKind::ESystem => self.check_system(node),
            NodeKind::EAccess => self.check_access(node),
            NodeKind::ECast => {
                let from = self.check_expression(ast.child(node, 0))?;
                let to = self.type_node(ast.child(node, 1));
                if is_legal_cast(from, to) {
                    Ok(to)
                } else {
                    Err(self.error(node, SemaError::InvalidCast { from, to }))
                }
            },
            NodeKind::ENeg | NodeKind::ENot => {
                let found = self.check_expression(ast.child(node, 0))?;
                if accepts(kind, found) {
                    Ok(found)
                } else {
                    Err(self.error(node,
                                   SemaError::InvalidOperand { op: operator(kind),
                                                               found }))
                }
            },
            NodeKind::ETernary => self.check_ternary(node),
            kind if kind.is_assignment() => self.check_assignment(node),
            NodeKind::EMul
            | NodeKind::EDiv
            | NodeKind::EMod
            | NodeKind::EAdd
            | NodeKind::ESub
            | NodeKind::ELess
            | NodeKind::ELessEqual
            | NodeKind::EGreater
            | NodeKind::EGreaterEqual
            | NodeKind::EEqual
            | NodeKind::ENotEqual
            | NodeKind::EAnd
            | NodeKind::EOr
            | NodeKind::EXor => self.check_binary(node),
            _ => Ok(PrimType::Void),
        }
    }

    /// Types identifiers and literals.
    ///
    /// Identifiers resolve through the locals first, then the functions; a
    /// function name is not a value.
    fn check_atom(&self, node: u32) -> SemaResult<PrimType> {
        let module = self.current();
        let token = module.token_of(node);

        match token.kind {
            TokenKind::IntLit => match token.int_value(&module.source) {
                Some(_) => Ok(PrimType::Int),
                None => Err(self.error(node, SemaError::IntegerOutOfRange)),
            },
            TokenKind::RealLit => Ok(PrimType::Real),
            TokenKind::StrLit => Ok(PrimType::String),
            TokenKind::True | TokenKind::False => Ok(PrimType::Bool),
            _ => {
                let name = module.text_of(node);
                if let Some(local) = self.locals.find(&name) {
                    Ok(local.ty)
                } else if self.globals.find(&name).is_some() {
                    Err(self.error(node, SemaError::FunctionAsValue { name }))
                } else {
                    Err(self.error(node, SemaError::UnknownSymbol { name }))
                }
            },
        }
    }

    /// Types a function call against the callee's declaration.
    ///
    /// Argument count and types must match exactly.
    fn check_call(&mut self, node: u32) -> SemaResult<PrimType> {
        let module = self.current();
        let children = module.ast.children(node);
        let callee = children[0];
        let args = &children[1..];

        let callee_token = module.token_of(callee);
        if module.ast.kind(callee) != NodeKind::EAtom || callee_token.kind != TokenKind::Ident {
            return Err(self.error(callee, SemaError::NotCallable));
        }
        let name = module.text_of(callee);
        if self.locals.find(&name).is_some() {
            return Err(self.error(callee, SemaError::NotCallable));
        }
        let Some(function) = self.globals.find(&name) else {
            return Err(self.error(callee, SemaError::UnknownSymbol { name }));
        };

        let declaring = self.modules.module(function.module);
        let [ret, params, _] = declaring.ast.children(function.node) else {
            return Ok(PrimType::Void);
        };
        let params = declaring.ast.children(*params);
        let return_type = PrimType::from_token(declaring.token_of(*ret).kind).unwrap_or(PrimType::Void);

        if params.len() != args.len() {
            return Err(self.error(callee,
                                  SemaError::ArgumentCount { name,
                                                             expected: params.len(),
                                                             found: args.len() }));
        }

        for (position, (&param, &arg)) in params.iter().zip(args).enumerate() {
            let expected = PrimType::from_token(declaring.token_of(declaring.ast.child(param, 0))
                                                         .kind).unwrap_or(PrimType::Void);
            let found = self.check_expression(arg)?;
            if found != expected {
                return Err(self.error(arg,
                                      SemaError::ArgumentType { name: name.clone(),
                                                                position: position + 1,
                                                                expected,
                                                                found }));
            }
        }

        Ok(return_type)
    }

    /// Types a host call against its own declared signature.
    fn check_system(&mut self, node: u32) -> SemaResult<PrimType> {
        let module = self.current();
        let children = module.ast.children(node);
        let return_type = self.type_node(children[0]);
        let declared = children[1..].iter()
                                    .take_while(|&&child| module.ast.kind(child) == NodeKind::Type)
                                    .count();
        let params = &children[1..=declared];
        let args = &children[1 + declared..];
        let name = module.text_of(node);

        if declared > MAX_HOST_ARGS {
            return Err(self.error(node, SemaError::TooManySystemArguments { found: declared }));
        }
        if params.len() != args.len() {
            return Err(self.error(node,
                                  SemaError::ArgumentCount { name,
                                                             expected: params.len(),
                                                             found: args.len() }));
        }

        for (position, (&param, &arg)) in params.iter().zip(args).enumerate() {
            let expected = self.type_node(param);
            if expected == PrimType::Void {
                return Err(self.error(param,
                                      SemaError::VoidParameter { position: position + 1 }));
            }
            let found = self.check_expression(arg)?;
            if found != expected {
                return Err(self.error(arg,
                                      SemaError::ArgumentType { name: name.clone(),
                                                                position: position + 1,
                                                                expected,
                                                                found }));
            }
        }

        Ok(return_type)
    }

    /// Types `text.(index)` and `text.(start, end)`.
    fn check_access(&mut self, node: u32) -> SemaResult<PrimType> {
        let children = self.current().ast.children(node);

        let found = self.check_expression(children[0])?;
        if found != PrimType::String {
            return Err(self.error(children[0],
                                  SemaError::TypeMismatch { expected: PrimType::String,
                                                            found }));
        }
        for &bound in &children[1..] {
            let found = self.check_expression(bound)?;
            if found != PrimType::Int {
                return Err(self.error(bound,
                                      SemaError::TypeMismatch { expected: PrimType::Int,
                                                                found }));
            }
        }

        Ok(PrimType::String)
    }

    /// Types arithmetic, comparison and logical operators.
    ///
    /// Both operands must share one type the operator accepts. Comparisons
    /// and logical operators yield `bool`, arithmetic yields the operand
    /// type.
    fn check_binary(&mut self, node: u32) -> SemaResult<PrimType> {
        let ast = &self.current().ast;
        let kind = ast.kind(node);
        let left = self.check_expression(ast.child(node, 0))?;
        let right = self.check_expression(ast.child(node, 1))?;

        if left != right {
            return Err(self.error(node,
                                  SemaError::OperandMismatch { op: operator(kind),
                                                               left,
                                                               right }));
        }
        if !accepts(kind, left) {
            return Err(self.error(node,
                                  SemaError::InvalidOperand { op:    operator(kind),
                                                              found: left, }));
        }

        Ok(match kind {
            NodeKind::EMul | NodeKind::EDiv | NodeKind::EMod | NodeKind::EAdd | NodeKind::ESub => {
                left
            },
            _ => PrimType::Bool,
        })
    }

    /// Types `cond ? a : b`.
    fn check_ternary(&mut self, node: u32) -> SemaResult<PrimType> {
        let ast = &self.current().ast;
        let condition = ast.child(node, 0);

        let found = self.check_expression(condition)?;
        if found != PrimType::Bool {
            return Err(self.error(condition,
                                  SemaError::TypeMismatch { expected: PrimType::Bool,
                                                            found }));
        }

        let then_type = self.check_expression(ast.child(node, 1))?;
        let else_type = self.check_expression(ast.child(node, 2))?;
        if then_type != else_type || then_type == PrimType::Void {
            return Err(self.error(node, SemaError::TernaryMismatch { then_type, else_type }));
        }

        Ok(then_type)
    }

    /// Types plain and compound assignments.
    ///
    /// The target must be an identifier naming a local variable.
    fn check_assignment(&mut self, node: u32) -> SemaResult<PrimType> {
        let module = self.current();
        let kind = module.ast.kind(node);
        let target = module.ast.child(node, 0);

        if module.ast.kind(target) != NodeKind::EAtom
           || module.token_of(target).kind != TokenKind::Ident
        {
            return Err(self.error(target, SemaError::NotAnLvalue));
        }
        let name = module.text_of(target);
        let expected = match self.locals.find(&name) {
            Some(local) => local.ty,
            None if self.globals.find(&name).is_some() => {
                return Err(self.error(target, SemaError::NotAnLvalue));
            },
            None => return Err(self.error(target, SemaError::UnknownSymbol { name })),
        };

        let value = module.ast.child(node, 1);
        let found = self.check_expression(value)?;
        if found != expected {
            return Err(self.error(value, SemaError::TypeMismatch { expected, found }));
        }
        if !accepts(kind, expected) {
            return Err(self.error(node,
                                  SemaError::InvalidOperand { op: operator(kind),
                                                              found: expected }));
        }

        Ok(expected)
    }
}
