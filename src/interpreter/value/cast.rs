use crate::{
    ast::PrimType,
    error::InvariantViolation,
    interpreter::value::core::Value,
    util::num::{format_real, int_to_real, parse_int_prefix, parse_real_prefix, real_to_int},
};

impl Value {
    /// Converts the value to another primitive type.
    ///
    /// | from     | to       | result                                     |
    /// |----------|----------|--------------------------------------------|
    /// | `int`    | `real`   | nearest real                               |
    /// | `int`    | `string` | decimal digits                             |
    /// | `int`    | `bool`   | `true` unless zero                         |
    /// | `real`   | `int`    | truncated toward zero, saturating          |
    /// | `real`   | `string` | six decimals                               |
    /// | `string` | `int`    | longest integer prefix, base from prefix   |
    /// | `string` | `real`   | longest real prefix                        |
    /// | `bool`   | `int`    | `1` or `0`                                 |
    /// | `bool`   | `string` | `true` or `false`                          |
    ///
    /// Any other pair is logged and yields the target type's default value.
    ///
    /// # Example
    /// ```
    /// use satsu::{ast::PrimType, interpreter::value::Value};
    ///
    /// assert_eq!(Value::Real(-2.7).cast(PrimType::Int), Value::Int(-2));
    /// assert_eq!(Value::Real(0.5).cast(PrimType::String), Value::from("0.500000"));
    /// assert_eq!(Value::from("0x10 apples").cast(PrimType::Int), Value::Int(16));
    /// assert_eq!(Value::Bool(true).cast(PrimType::Int), Value::Int(1));
    /// ```
    #[must_use]
    pub fn cast(&self, to: PrimType) -> Self {
        match (self, to) {
            (Self::Int(n), PrimType::Real) => Self::Real(int_to_real(*n)),
            (Self::Int(n), PrimType::String) => Self::String(n.to_string().into_bytes()),
            (Self::Int(n), PrimType::Bool) => Self::Bool(*n != 0),
            (Self::Real(r), PrimType::Int) => Self::Int(real_to_int(*r)),
            (Self::Real(r), PrimType::String) => Self::String(format_real(*r).into_bytes()),
            (Self::String(_), PrimType::Int) => Self::Int(parse_int_prefix(&self.as_str())),
            (Self::String(_), PrimType::Real) => Self::Real(parse_real_prefix(&self.as_str())),
            (Self::Bool(b), PrimType::Int) => Self::Int(i64::from(*b)),
            (Self::Bool(b), PrimType::String) => Self::String(b.to_string().into_bytes()),
            _ => {
                InvariantViolation::UncheckedCast { from: self.prim_type(),
                                                    to }.log();
                Self::default_of(to)
            },
        }
    }
}
