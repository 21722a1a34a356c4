//! Typed values and identifiers

use std::fmt;

use crate::types::Type;

/// An identifier, unique within one function build
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ident {
    /// User-supplied symbolic name (parameters, named results)
    Named(String),
    /// Auto-generated temporary, numbered from 0 per function build
    Tmp(u32),
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Named(name) => write!(f, "%{}", name),
            Ident::Tmp(n) => write!(f, "%{}", n),
        }
    }
}

/// A literal constant
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Null pointer
    Null,
    /// Unspecified value of the tagged type
    Undef,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(n) => write!(f, "{}", n),
            Constant::Float(x) => write!(f, "{:?}", x),
            Constant::Bool(b) => write!(f, "{}", b),
            Constant::Null => write!(f, "null"),
            Constant::Undef => write!(f, "undef"),
        }
    }
}

/// What a value refers to
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// A literal constant
    Const(Constant),
    /// An instruction result or parameter of the current function
    Local(Ident),
    /// A function or other global, by name
    Global(String),
}

/// A typed reference: the operand currency of the builder
///
/// Every operand carries its type so that result-type rules can be
/// computed without consulting any surrounding context.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub ty: Type,
    pub kind: ValueKind,
}

impl Value {
    /// Integer constant of the given type
    pub fn const_int(ty: Type, value: i64) -> Self {
        Self {
            ty,
            kind: ValueKind::Const(Constant::Int(value)),
        }
    }

    /// Floating-point constant of the given type
    pub fn const_float(ty: Type, value: f64) -> Self {
        Self {
            ty,
            kind: ValueKind::Const(Constant::Float(value)),
        }
    }

    /// Boolean constant (type `i1`)
    pub fn const_bool(value: bool) -> Self {
        Self {
            ty: Type::i1(),
            kind: ValueKind::Const(Constant::Bool(value)),
        }
    }

    /// Null pointer of the given pointer type
    pub fn null(ty: Type) -> Self {
        Self {
            ty,
            kind: ValueKind::Const(Constant::Null),
        }
    }

    /// Undefined value of the given type
    pub fn undef(ty: Type) -> Self {
        Self {
            ty,
            kind: ValueKind::Const(Constant::Undef),
        }
    }

    /// Reference to a local identifier
    pub fn local(ty: Type, ident: Ident) -> Self {
        Self {
            ty,
            kind: ValueKind::Local(ident),
        }
    }

    /// Reference to a named global
    pub fn global(ty: Type, name: impl Into<String>) -> Self {
        Self {
            ty,
            kind: ValueKind::Global(name.into()),
        }
    }

    /// The constant 32-bit integer payload, if this value is one
    ///
    /// Structure indexing requires its operand to be statically known;
    /// this is the qualifying check.
    pub fn as_const_u32(&self) -> Option<u32> {
        match (&self.ty, &self.kind) {
            (Type::Int { bits: 32 }, ValueKind::Const(Constant::Int(n))) => {
                u32::try_from(*n).ok()
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Const(c) => write!(f, "{}", c),
            ValueKind::Local(id) => write!(f, "{}", id),
            ValueKind::Global(name) => write!(f, "@{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        assert_eq!(Ident::Tmp(7).to_string(), "%7");
        assert_eq!(Ident::Named("n".to_string()).to_string(), "%n");
        assert_eq!(Value::const_int(Type::i32(), -3).to_string(), "-3");
        assert_eq!(Value::global(Type::i32(), "counter").to_string(), "@counter");
        assert_eq!(
            Value::local(Type::i8(), Ident::Tmp(0)).to_string(),
            "%0"
        );
    }

    #[test]
    fn test_const_u32_qualification() {
        assert_eq!(Value::const_int(Type::i32(), 1).as_const_u32(), Some(1));
        // Wrong width does not qualify
        assert_eq!(Value::const_int(Type::i64(), 1).as_const_u32(), None);
        // Negative indices do not qualify
        assert_eq!(Value::const_int(Type::i32(), -1).as_const_u32(), None);
        // Non-constants do not qualify
        let v = Value::local(Type::i32(), Ident::Tmp(0));
        assert_eq!(v.as_const_u32(), None);
    }
}
