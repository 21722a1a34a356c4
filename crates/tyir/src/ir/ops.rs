//! Opcode-level convenience layer
//!
//! Each wrapper picks an opcode and a result-type rule (the left
//! operand's type, an explicitly supplied target type, or `i1` for
//! comparisons) and delegates to the two emission primitives. The only
//! non-mechanical member is `element_addr`, which statically walks an
//! aggregate type along its index sequence.

use super::block::Label;
use super::builder::Builder;
use super::inst::{BinOp, CastOp, FloatPredicate, Inst, IntPredicate, Term};
use super::value::Value;
use crate::common::{BuildError, BuildResult};
use crate::types::Type;

impl Builder {
    fn binary(&mut self, op: BinOp, lhs: Value, rhs: Value) -> Value {
        let ty = lhs.ty.clone();
        self.emit_inst(ty, Inst::Binary { op, lhs, rhs })
    }

    fn cast(&mut self, op: CastOp, value: Value, to: Type) -> Value {
        let ty = to.clone();
        self.emit_inst(ty, Inst::Cast { op, value, to })
    }

    // ==================== Integer arithmetic ====================

    pub fn add(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::Add, lhs, rhs)
    }

    pub fn sub(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::Sub, lhs, rhs)
    }

    pub fn mul(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::Mul, lhs, rhs)
    }

    pub fn sdiv(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::SDiv, lhs, rhs)
    }

    pub fn udiv(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::UDiv, lhs, rhs)
    }

    pub fn srem(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::SRem, lhs, rhs)
    }

    pub fn urem(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::URem, lhs, rhs)
    }

    // ==================== Bitwise ====================

    pub fn and(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::And, lhs, rhs)
    }

    pub fn or(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::Or, lhs, rhs)
    }

    pub fn xor(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::Xor, lhs, rhs)
    }

    pub fn shl(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::Shl, lhs, rhs)
    }

    pub fn lshr(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::LShr, lhs, rhs)
    }

    pub fn ashr(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::AShr, lhs, rhs)
    }

    // ==================== Floating-point arithmetic ====================

    pub fn fadd(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::FAdd, lhs, rhs)
    }

    pub fn fsub(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::FSub, lhs, rhs)
    }

    pub fn fmul(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::FMul, lhs, rhs)
    }

    pub fn fdiv(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::FDiv, lhs, rhs)
    }

    pub fn frem(&mut self, lhs: Value, rhs: Value) -> Value {
        self.binary(BinOp::FRem, lhs, rhs)
    }

    // ==================== Comparisons ====================

    /// Integer comparison; the result is an `i1`
    pub fn icmp(&mut self, pred: IntPredicate, lhs: Value, rhs: Value) -> Value {
        self.emit_inst(Type::i1(), Inst::ICmp { pred, lhs, rhs })
    }

    /// Floating-point comparison; the result is an `i1`
    pub fn fcmp(&mut self, pred: FloatPredicate, lhs: Value, rhs: Value) -> Value {
        self.emit_inst(Type::i1(), Inst::FCmp { pred, lhs, rhs })
    }

    // ==================== Memory ====================

    /// Stack slot for a value of `ty`; yields a pointer to it
    pub fn alloca(&mut self, ty: Type) -> Value {
        let result = Type::ptr(ty.clone());
        self.emit_inst(result, Inst::Alloca { ty })
    }

    /// Load through a pointer; the result has the pointee type
    pub fn load(&mut self, addr: Value) -> BuildResult<Value> {
        let ty = addr.ty.pointee().cloned().ok_or_else(|| {
            BuildError::load(format!("load through non-pointer type {}", addr.ty))
        })?;
        Ok(self.emit_inst(ty, Inst::Load { addr }))
    }

    /// Store `value` through a pointer
    pub fn store(&mut self, value: Value, addr: Value) -> Value {
        self.emit_inst(Type::void(), Inst::Store { addr, value })
    }

    /// Address of an element inside an aggregate
    ///
    /// Statically walks the base type along the index sequence: the
    /// first index steps across the pointer level without being
    /// inspected, a struct consumes a constant `i32` index selecting a
    /// member, and arrays and vectors consume one index each yielding
    /// the element type. The result points at the walked-to type.
    ///
    /// Fails the build if a struct index is not a constant `i32`, or if
    /// the walk reaches a type with no addressable elements.
    pub fn element_addr(&mut self, base: Value, indices: Vec<Value>) -> BuildResult<Value> {
        let ty = element_addr_type(&base.ty, &indices)?;
        Ok(self.emit_inst(ty, Inst::ElementAddr { base, indices }))
    }

    // ==================== Casts ====================

    pub fn trunc(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::Trunc, value, to)
    }

    pub fn zext(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::ZExt, value, to)
    }

    pub fn sext(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::SExt, value, to)
    }

    pub fn fptrunc(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::FpTrunc, value, to)
    }

    pub fn fpext(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::FpExt, value, to)
    }

    pub fn fptosi(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::FpToSi, value, to)
    }

    pub fn fptoui(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::FpToUi, value, to)
    }

    pub fn sitofp(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::SiToFp, value, to)
    }

    pub fn uitofp(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::UiToFp, value, to)
    }

    pub fn ptrtoint(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::PtrToInt, value, to)
    }

    pub fn inttoptr(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::IntToPtr, value, to)
    }

    pub fn bitcast(&mut self, value: Value, to: Type) -> Value {
        self.cast(CastOp::Bitcast, value, to)
    }

    // ==================== Calls ====================

    /// Call a function-typed value; the result has the return type
    pub fn call(&mut self, callee: Value, args: Vec<Value>) -> BuildResult<Value> {
        let Type::Function { ret, .. } = &callee.ty else {
            return Err(BuildError::call(format!(
                "callee has non-function type {}",
                callee.ty
            )));
        };
        let ty = (**ret).clone();
        Ok(self.emit_inst(ty, Inst::Call { callee, args }))
    }

    // ==================== Control transfers ====================

    pub fn br(&mut self, target: Label) {
        self.emit_term(Term::Br { target });
    }

    pub fn cond_br(&mut self, cond: Value, then_dest: Label, else_dest: Label) {
        self.emit_term(Term::CondBr {
            cond,
            then_dest,
            else_dest,
        });
    }

    pub fn switch(&mut self, value: Value, default: Label, cases: Vec<(Value, Label)>) {
        self.emit_term(Term::Switch {
            value,
            default,
            cases,
        });
    }

    pub fn ret(&mut self, value: Value) {
        self.emit_term(Term::Ret { value: Some(value) });
    }

    pub fn ret_void(&mut self) {
        self.emit_term(Term::Ret { value: None });
    }
}

/// Walk `base` along `indices` and return the addressed element's type,
/// one pointer level deep
fn element_addr_type(base: &Type, indices: &[Value]) -> BuildResult<Type> {
    let Some(pointee) = base.pointee() else {
        return Err(BuildError::element_addr(format!(
            "base has non-pointer type {}",
            base
        )));
    };
    let Some((_, rest)) = indices.split_first() else {
        return Err(BuildError::element_addr("empty index sequence"));
    };

    // The leading index steps across the pointer itself; its value is
    // never inspected.
    let mut current = pointee;
    for index in rest {
        current = match current {
            Type::Struct { fields } => {
                let member = index.as_const_u32().ok_or_else(|| {
                    BuildError::element_addr(format!(
                        "struct index `{}` is not a constant i32",
                        index
                    ))
                })?;
                fields.get(member as usize).ok_or_else(|| {
                    BuildError::element_addr(format!(
                        "struct index {} out of range ({} members)",
                        member,
                        fields.len()
                    ))
                })?
            }
            Type::Array { element, .. } | Type::Vector { element, .. } => &**element,
            other => {
                return Err(BuildError::element_addr(format!(
                    "cannot index into type {}",
                    other
                )));
            }
        };
    }
    Ok(Type::ptr(current.clone()))
}
