//! tyir - typed low-level IR and incremental module builder
//!
//! This library builds modules of a typed intermediate representation:
//! functions made of ordered basic blocks, each block an ordered
//! instruction sequence closed by exactly one control-transfer
//! instruction. The builder owns all construction state, finalizes
//! blocks automatically (synthesizing a void return where a terminator
//! is missing), and isolates per-function state so function bodies can
//! be built while nested inside a module build, including functions
//! that call themselves or siblings that are not finished yet.
//!
//! ## Architecture
//!
//! The library is organized into:
//! - **Types** (`types/`): structural type vocabulary (integers, floats,
//!   pointers, aggregates, functions)
//! - **IR** (`ir/`): values, instructions, blocks, modules, and the
//!   [`Builder`] with its opcode convenience layer
//! - **Common** (`common/`): shared infrastructure (errors)
//!
//! ## Example
//!
//! ```
//! use tyir::ir::{IntPredicate, Label};
//! use tyir::{Builder, Type, Value};
//!
//! # fn main() -> tyir::BuildResult<()> {
//! let mut b = Builder::new();
//! b.function(
//!     "abs",
//!     vec![("x".to_string(), Type::i32())],
//!     Type::i32(),
//!     |b, args| {
//!         let x = args[0].clone();
//!         let zero = Value::const_int(Type::i32(), 0);
//!         let neg = b.icmp(IntPredicate::Slt, x.clone(), zero.clone());
//!         b.cond_br(neg, Label::new("flip"), Label::new("done"));
//!
//!         b.block("flip");
//!         let flipped = b.sub(zero, x.clone());
//!         b.ret(flipped);
//!
//!         b.block("done");
//!         b.ret(x);
//!         Ok(())
//!     },
//! )?;
//! let module = b.finish()?;
//! print!("{module}");
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod ir;
pub mod types;

// Re-exports for convenience
pub use common::{BuildError, BuildResult};
pub use ir::{Builder, Diag, Module, Value};
pub use types::Type;
