//! Basic blocks and their in-progress form

use std::fmt;

use super::inst::{Inst, Term};
use super::value::Ident;

/// A block name, used as a branch target
///
/// Labels are not resolved at construction time; whether a target block
/// exists is a question for an external verifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(pub String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An in-progress, unfinalized basic block
///
/// Owned exclusively by the builder context and mutated only through the
/// emission primitives. Instructions accumulate by appending to a `Vec`,
/// so emission order is preserved and accumulation stays amortized O(1).
#[derive(Debug, Clone)]
pub struct PartialBlock {
    pub label: Label,
    pub insts: Vec<(Ident, Inst)>,
    pub term: Option<Term>,
}

impl PartialBlock {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            insts: Vec::new(),
            term: None,
        }
    }

    /// True when nothing has been emitted into the block yet
    pub fn is_empty(&self) -> bool {
        self.insts.is_empty() && self.term.is_none()
    }

    /// Append an instruction bound to `ident`
    pub fn push(&mut self, ident: Ident, inst: Inst) {
        self.insts.push((ident, inst));
    }

    /// Set the terminator, returning the previous one if it was set
    pub fn terminate(&mut self, term: Term) -> Option<Term> {
        self.term.replace(term)
    }

    /// Convert into a finalized basic block
    ///
    /// A block that never received an explicit terminator gets a void
    /// return. That keeps the single-terminator invariant; whether a void
    /// return is *correct* for the enclosing function is left to an
    /// external verifier.
    pub fn finalize(self) -> BasicBlock {
        BasicBlock {
            label: self.label,
            insts: self.insts,
            term: self.term.unwrap_or(Term::Ret { value: None }),
        }
    }
}

/// A finalized basic block: ordered instructions and exactly one terminator
#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub label: Label,
    pub insts: Vec<(Ident, Inst)>,
    pub term: Term,
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for (ident, inst) in &self.insts {
            writeln!(f, "  {} = {}", ident, inst)?;
        }
        write!(f, "  {}", self.term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::inst::BinOp;
    use crate::ir::value::Value;
    use crate::types::Type;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_finalize_keeps_emission_order() {
        let mut partial = PartialBlock::new(Label::new("entry"));
        for i in 0..4 {
            partial.push(
                Ident::Tmp(i),
                Inst::Binary {
                    op: BinOp::Add,
                    lhs: Value::const_int(Type::i32(), i64::from(i)),
                    rhs: Value::const_int(Type::i32(), 1),
                },
            );
        }
        let block = partial.finalize();
        let idents: Vec<_> = block.insts.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(
            idents,
            vec![Ident::Tmp(0), Ident::Tmp(1), Ident::Tmp(2), Ident::Tmp(3)]
        );
    }

    #[test]
    fn test_finalize_synthesizes_void_return() {
        let mut partial = PartialBlock::new(Label::new("b"));
        partial.push(Ident::Tmp(0), Inst::Alloca { ty: Type::i32() });
        let block = partial.finalize();
        assert_eq!(block.term, Term::Ret { value: None });
    }

    #[test]
    fn test_terminate_reports_overwrite() {
        let mut partial = PartialBlock::new(Label::new("b"));
        assert_eq!(partial.terminate(Term::Ret { value: None }), None);
        let prev = partial.terminate(Term::Br {
            target: Label::new("next"),
        });
        assert_eq!(prev, Some(Term::Ret { value: None }));
        // Last write wins
        let block = partial.finalize();
        assert_eq!(
            block.term,
            Term::Br {
                target: Label::new("next")
            }
        );
    }
}
