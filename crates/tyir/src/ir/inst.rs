//! Instruction and terminator payloads
//!
//! The builder treats these as opaque tagged data: it only interprets
//! enough of them to compute result types and to tell instructions from
//! terminators.

use std::fmt;

use super::block::Label;
use super::value::Value;
use crate::types::Type;

/// Binary operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    SDiv,
    UDiv,
    SRem,
    URem,
    And,
    Or,
    Xor,
    Shl,
    LShr,
    AShr,
    FAdd,
    FSub,
    FMul,
    FDiv,
    FRem,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::SDiv => "sdiv",
            BinOp::UDiv => "udiv",
            BinOp::SRem => "srem",
            BinOp::URem => "urem",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::Xor => "xor",
            BinOp::Shl => "shl",
            BinOp::LShr => "lshr",
            BinOp::AShr => "ashr",
            BinOp::FAdd => "fadd",
            BinOp::FSub => "fsub",
            BinOp::FMul => "fmul",
            BinOp::FDiv => "fdiv",
            BinOp::FRem => "frem",
        };
        write!(f, "{}", s)
    }
}

/// Integer comparison predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntPredicate {
    Eq,
    Ne,
    Slt,
    Sle,
    Sgt,
    Sge,
    Ult,
    Ule,
    Ugt,
    Uge,
}

impl fmt::Display for IntPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IntPredicate::Eq => "eq",
            IntPredicate::Ne => "ne",
            IntPredicate::Slt => "slt",
            IntPredicate::Sle => "sle",
            IntPredicate::Sgt => "sgt",
            IntPredicate::Sge => "sge",
            IntPredicate::Ult => "ult",
            IntPredicate::Ule => "ule",
            IntPredicate::Ugt => "ugt",
            IntPredicate::Uge => "uge",
        };
        write!(f, "{}", s)
    }
}

/// Floating-point comparison predicates (ordered and unordered forms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatPredicate {
    Oeq,
    One,
    Olt,
    Ole,
    Ogt,
    Oge,
    Ord,
    Uno,
}

impl fmt::Display for FloatPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FloatPredicate::Oeq => "oeq",
            FloatPredicate::One => "one",
            FloatPredicate::Olt => "olt",
            FloatPredicate::Ole => "ole",
            FloatPredicate::Ogt => "ogt",
            FloatPredicate::Oge => "oge",
            FloatPredicate::Ord => "ord",
            FloatPredicate::Uno => "uno",
        };
        write!(f, "{}", s)
    }
}

/// Cast operations; the target type lives on the instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOp {
    Trunc,
    ZExt,
    SExt,
    FpTrunc,
    FpExt,
    FpToSi,
    FpToUi,
    SiToFp,
    UiToFp,
    PtrToInt,
    IntToPtr,
    Bitcast,
}

impl fmt::Display for CastOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CastOp::Trunc => "trunc",
            CastOp::ZExt => "zext",
            CastOp::SExt => "sext",
            CastOp::FpTrunc => "fptrunc",
            CastOp::FpExt => "fpext",
            CastOp::FpToSi => "fptosi",
            CastOp::FpToUi => "fptoui",
            CastOp::SiToFp => "sitofp",
            CastOp::UiToFp => "uitofp",
            CastOp::PtrToInt => "ptrtoint",
            CastOp::IntToPtr => "inttoptr",
            CastOp::Bitcast => "bitcast",
        };
        write!(f, "{}", s)
    }
}

/// An IR instruction payload
#[derive(Debug, Clone, PartialEq)]
pub enum Inst {
    /// dst = lhs op rhs
    Binary { op: BinOp, lhs: Value, rhs: Value },

    /// Integer comparison producing an `i1`
    ICmp {
        pred: IntPredicate,
        lhs: Value,
        rhs: Value,
    },

    /// Floating-point comparison producing an `i1`
    FCmp {
        pred: FloatPredicate,
        lhs: Value,
        rhs: Value,
    },

    /// Stack slot for a value of `ty`; yields a pointer to it
    Alloca { ty: Type },

    /// Read through a pointer
    Load { addr: Value },

    /// Write through a pointer
    Store { addr: Value, value: Value },

    /// Address of an element inside an aggregate, by static index walk
    ElementAddr { base: Value, indices: Vec<Value> },

    /// Conversion to the target type
    Cast { op: CastOp, value: Value, to: Type },

    /// Function call
    Call { callee: Value, args: Vec<Value> },
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Binary { op, lhs, rhs } => {
                write!(f, "{} {} {}, {}", op, lhs.ty, lhs, rhs)
            }
            Inst::ICmp { pred, lhs, rhs } => {
                write!(f, "icmp {} {} {}, {}", pred, lhs.ty, lhs, rhs)
            }
            Inst::FCmp { pred, lhs, rhs } => {
                write!(f, "fcmp {} {} {}, {}", pred, lhs.ty, lhs, rhs)
            }
            Inst::Alloca { ty } => write!(f, "alloca {}", ty),
            Inst::Load { addr } => write!(f, "load {} {}", addr.ty, addr),
            Inst::Store { addr, value } => {
                write!(f, "store {} {}, {} {}", value.ty, value, addr.ty, addr)
            }
            Inst::ElementAddr { base, indices } => {
                write!(f, "elemaddr {} {}", base.ty, base)?;
                for index in indices {
                    write!(f, ", {} {}", index.ty, index)?;
                }
                Ok(())
            }
            Inst::Cast { op, value, to } => {
                write!(f, "{} {} {} to {}", op, value.ty, value, to)
            }
            Inst::Call { callee, args } => {
                write!(f, "call {}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", arg.ty, arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A control-transfer instruction ending a basic block
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Unconditional branch
    Br { target: Label },

    /// Two-way conditional branch
    CondBr {
        cond: Value,
        then_dest: Label,
        else_dest: Label,
    },

    /// Multi-way branch on an integer value
    Switch {
        value: Value,
        default: Label,
        cases: Vec<(Value, Label)>,
    },

    /// Return; `None` is a void return
    Ret { value: Option<Value> },
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Br { target } => write!(f, "br label {}", target),
            Term::CondBr {
                cond,
                then_dest,
                else_dest,
            } => write!(
                f,
                "br {} {}, label {}, label {}",
                cond.ty, cond, then_dest, else_dest
            ),
            Term::Switch {
                value,
                default,
                cases,
            } => {
                write!(f, "switch {} {}, label {} [", value.ty, value, default)?;
                for (i, (case, target)) in cases.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {}: label {}", case, target)?;
                }
                write!(f, " ]")
            }
            Term::Ret { value: Some(v) } => write!(f, "ret {} {}", v.ty, v),
            Term::Ret { value: None } => write!(f, "ret void"),
        }
    }
}
