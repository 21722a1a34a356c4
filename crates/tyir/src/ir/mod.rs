//! Intermediate representation and its incremental builder
//!
//! Modules contain functions, functions contain ordered basic blocks,
//! and blocks contain ordered instructions closed by exactly one
//! terminator. Construction goes through [`Builder`].

mod block;
mod builder;
mod inst;
mod module;
mod ops;
mod value;

pub use block::{BasicBlock, Label, PartialBlock};
pub use builder::{Builder, Diag};
pub use inst::{BinOp, CastOp, FloatPredicate, Inst, IntPredicate, Term};
pub use module::{Definition, Function, Module};
pub use value::{Constant, Ident, Value, ValueKind};
