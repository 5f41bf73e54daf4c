use crate::{
    ast::{NodeKind, PrimType},
    error::InvariantViolation,
    interpreter::{
        evaluator::{core::Executor, host::HostContext},
        value::Value,
    },
};

impl Executor<'_> {
    /// Calls a host function.
    ///
    /// The call site declares the return and parameter types; the host table
    /// holds the registered ones. Any disagreement, an unknown name, or a
    /// callback returning the wrong type is logged and the call yields the
    /// default value of the declared return type. The signature is checked
    /// before any argument is evaluated.
    pub(in crate::interpreter::evaluator) fn call_host(&mut self, node: u32) -> Value {
        let module = self.module();
        let children = module.ast.children(node);
        let name = module.text_of(node);
        let declared = self.type_node(children[0]);
        let (params, args): (Vec<u32>, Vec<u32>) =
            children[1..].iter()
                         .partition(|&&child| module.ast.kind(child) == NodeKind::Type);
        let fallback = Value::default_of(declared);

        let Some(function) = self.host.find(&name) else {
            InvariantViolation::UnknownHostFunction { name }.log();
            return fallback;
        };
        if function.return_type != declared {
            InvariantViolation::HostReturnType { name,
                                                 declared,
                                                 registered: function.return_type }.log();
            return fallback;
        }
        if args.len() != function.arg_types.len() {
            InvariantViolation::HostArgumentCount { name,
                                                    expected: function.arg_types.len(),
                                                    found: args.len() }.log();
            return fallback;
        }
        for (position, (&param, &expected)) in params.iter().zip(&function.arg_types).enumerate() {
            let found = self.type_node(param);
            if found != expected {
                InvariantViolation::HostArgumentType { name,
                                                       position: position + 1,
                                                       expected,
                                                       found }.log();
                return fallback;
            }
        }

        let values: Vec<Value> = args.iter().map(|&arg| self.eval(arg)).collect();
        if let Some(position) = values.iter()
                                      .zip(&function.arg_types)
                                      .position(|(value, &expected)| value.prim_type() != expected)
        {
            InvariantViolation::HostArgumentType { name,
                                                   position: position + 1,
                                                   expected: function.arg_types[position],
                                                   found: values[position].prim_type() }.log();
            return fallback;
        }

        let result = (function.callback)(&mut HostContext::new(&mut self.frame), &values);
        let expected = function.return_type;
        if result.prim_type() != expected && expected != PrimType::Void {
            InvariantViolation::HostResultType { name,
                                                 expected,
                                                 found: result.prim_type() }.log();
            return fallback;
        }

        if expected == PrimType::Void { Value::Void } else { result }
    }
}
