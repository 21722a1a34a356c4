//! Language-agnostic type vocabulary for the IR

mod ty;

pub use ty::{FloatKind, Type};
