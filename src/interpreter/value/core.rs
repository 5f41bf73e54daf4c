use std::borrow::Cow;

use crate::{ast::PrimType, error::InvariantViolation, util::num::format_real};

/// Represents a runtime value in the interpreter.
///
/// Strings are owned byte buffers, so copying a value copies its bytes:
/// assigning a string variable never aliases another. They are not required
/// to hold UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Real(f64),
    /// An owned byte string.
    String(Vec<u8>),
    /// A boolean.
    Bool(bool),
    /// The result of statements and `void` calls.
    Void,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v.into_bytes())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::String(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::String(v.to_vec())
    }
}

impl Value {
    /// Returns the zero value of a type.
    ///
    /// `0`, `0.0`, `""` and `false`; `void` and `func` give [`Value::Void`].
    ///
    /// # Example
    /// ```
    /// use satsu::{ast::PrimType, interpreter::value::Value};
    ///
    /// assert_eq!(Value::default_of(PrimType::Int), Value::Int(0));
    /// assert_eq!(Value::default_of(PrimType::String), Value::from(""));
    /// assert_eq!(Value::default_of(PrimType::Void), Value::Void);
    /// ```
    #[must_use]
    pub fn default_of(ty: PrimType) -> Self {
        match ty {
            PrimType::Int => Self::Int(0),
            PrimType::Real => Self::Real(0.0),
            PrimType::String => Self::String(Vec::new()),
            PrimType::Bool => Self::Bool(false),
            PrimType::Void | PrimType::Func => Self::Void,
        }
    }

    /// Returns the type of the value.
    #[must_use]
    pub const fn prim_type(&self) -> PrimType {
        match self {
            Self::Int(_) => PrimType::Int,
            Self::Real(_) => PrimType::Real,
            Self::String(_) => PrimType::String,
            Self::Bool(_) => PrimType::Bool,
            Self::Void => PrimType::Void,
        }
    }

    /// Logs a value of the wrong type.
    fn mismatch(&self, expected: PrimType) {
        InvariantViolation::ValueType { expected,
                                        found: self.prim_type() }.log();
    }

    /// Reads an integer, logging and yielding `0` for any other value.
    #[must_use]
    pub fn as_int(&self) -> i64 {
        if let Self::Int(n) = self {
            *n
        } else {
            self.mismatch(PrimType::Int);
            0
        }
    }

    /// Reads a real, logging and yielding `0.0` for any other value.
    #[must_use]
    pub fn as_real(&self) -> f64 {
        if let Self::Real(r) = self {
            *r
        } else {
            self.mismatch(PrimType::Real);
            0.0
        }
    }

    /// Reads a boolean, logging and yielding `false` for any other value.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        if let Self::Bool(b) = self {
            *b
        } else {
            self.mismatch(PrimType::Bool);
            false
        }
    }

    /// Borrows the bytes of a string, logging and yielding `b""` for any
    /// other value.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        if let Self::String(s) = self {
            s
        } else {
            self.mismatch(PrimType::String);
            b""
        }
    }

    /// Reads a string as text, replacing invalid UTF-8.
    ///
    /// # Example
    /// ```
    /// use satsu::interpreter::value::Value;
    ///
    /// assert_eq!(Value::from("caf\u{e9}").as_str(), "caf\u{e9}");
    /// assert_eq!(Value::from(&b"a\xffb"[..]).as_str(), "a\u{fffd}b");
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Takes the bytes of a string, logging and yielding an empty buffer for
    /// any other value.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        if let Self::String(s) = self {
            s
        } else {
            self.mismatch(PrimType::String);
            Vec::new()
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Real(r) => f.write_str(&format_real(*r)),
            Self::String(s) => f.write_str(&String::from_utf8_lossy(s)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Void => Ok(()),
        }
    }
}
