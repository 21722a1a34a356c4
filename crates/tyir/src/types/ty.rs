//! IR type definitions
//!
//! Types are purely structural: the builder inspects them only as far as
//! needed to compute instruction result types, never for layout.

use std::fmt;

/// Floating-point kinds supported by the IR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatKind {
    F32,
    F64,
}

/// A first-class IR type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Void type (no value)
    Void,

    /// Integer type with the given bit width
    Int { bits: u8 },

    /// Floating-point type
    Float(FloatKind),

    /// Pointer to a pointee type
    Ptr(Box<Type>),

    /// Fixed-length array
    Array { element: Box<Type>, len: u64 },

    /// Fixed-length vector
    Vector { element: Box<Type>, len: u64 },

    /// Structure with ordered member types
    Struct { fields: Vec<Type> },

    /// Function type
    Function { params: Vec<Type>, ret: Box<Type> },
}

impl Type {
    // ==================== Constructors ====================

    /// Void type
    pub fn void() -> Self {
        Self::Void
    }

    /// 1-bit integer (booleans, comparison results)
    pub fn i1() -> Self {
        Self::Int { bits: 1 }
    }

    /// 8-bit integer
    pub fn i8() -> Self {
        Self::Int { bits: 8 }
    }

    /// 16-bit integer
    pub fn i16() -> Self {
        Self::Int { bits: 16 }
    }

    /// 32-bit integer
    pub fn i32() -> Self {
        Self::Int { bits: 32 }
    }

    /// 64-bit integer
    pub fn i64() -> Self {
        Self::Int { bits: 64 }
    }

    /// 32-bit float
    pub fn f32() -> Self {
        Self::Float(FloatKind::F32)
    }

    /// 64-bit float
    pub fn f64() -> Self {
        Self::Float(FloatKind::F64)
    }

    /// Pointer to `pointee`
    pub fn ptr(pointee: Type) -> Self {
        Self::Ptr(Box::new(pointee))
    }

    /// Array of `len` elements
    pub fn array(element: Type, len: u64) -> Self {
        Self::Array {
            element: Box::new(element),
            len,
        }
    }

    /// Vector of `len` lanes
    pub fn vector(element: Type, len: u64) -> Self {
        Self::Vector {
            element: Box::new(element),
            len,
        }
    }

    /// Structure with the given member types
    pub fn structure(fields: Vec<Type>) -> Self {
        Self::Struct { fields }
    }

    /// Function type
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Self::Function {
            params,
            ret: Box::new(ret),
        }
    }

    // ==================== Type queries ====================

    /// Is this the void type?
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Is this an integer type?
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int { .. })
    }

    /// Is this a floating-point type?
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Is this a pointer type?
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Ptr(_))
    }

    /// Is this a function type?
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function { .. })
    }

    /// Get the pointee type if this is a pointer
    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Self::Ptr(inner) => Some(inner),
            _ => None,
        }
    }

    /// Get the element type if this is an array or vector
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Self::Array { element, .. } | Self::Vector { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Get the member type at `index` if this is a struct
    pub fn field(&self, index: usize) -> Option<&Type> {
        match self {
            Self::Struct { fields } => fields.get(index),
            _ => None,
        }
    }

    /// Get bit width for integer types
    pub fn bits(&self) -> Option<u8> {
        match self {
            Self::Int { bits } => Some(*bits),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Int { bits } => write!(f, "i{}", bits),
            Self::Float(FloatKind::F32) => write!(f, "f32"),
            Self::Float(FloatKind::F64) => write!(f, "f64"),
            Self::Ptr(inner) => write!(f, "{}*", inner),
            Self::Array { element, len } => write!(f, "[{} x {}]", len, element),
            Self::Vector { element, len } => write!(f, "<{} x {}>", len, element),
            Self::Struct { fields } => {
                write!(f, "{{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, " }}")
            }
            Self::Function { params, ret } => {
                write!(f, "{} (", ret)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")")
            }
        }
    }
}
