//! Incremental IR builder
//!
//! The builder is the single owned, sequentially mutated state aggregate
//! of one module build: finished definitions, the current partial block,
//! the finished-blocks list of the function under construction, and the
//! fresh-name supply. All mutation funnels through the emission
//! primitives `emit_inst`, `emit_term` and `emit_defn`.

use std::collections::HashSet;
use std::fmt;
use std::mem;

use super::block::{BasicBlock, Label, PartialBlock};
use super::inst::{Inst, Term};
use super::module::{Definition, Function, Module};
use super::value::{Ident, Value};
use crate::common::{BuildError, BuildResult};
use crate::types::Type;

/// Non-fatal construction outcome, recorded instead of silently dropped
///
/// None of these stop a build. They mark places where the builder
/// accepted permissive input; an external verifier (or the caller) can
/// inspect them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diag {
    /// A terminator was set on a block that already had one; the last
    /// write won
    TerminatorOverwritten { block: Label },
    /// A partial block holding no instructions and no terminator was
    /// dropped instead of being emitted
    EmptyBlockDiscarded { block: Label },
    /// A block without an explicit terminator was finalized with a
    /// synthesized `ret void`
    ReturnSynthesized { block: Label },
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diag::TerminatorOverwritten { block } => {
                write!(f, "terminator of block `{}` was overwritten", block)
            }
            Diag::EmptyBlockDiscarded { block } => {
                write!(f, "empty block `{}` was discarded", block)
            }
            Diag::ReturnSynthesized { block } => {
                write!(f, "block `{}` was finalized with a synthesized `ret void`", block)
            }
        }
    }
}

/// Per-function build state, swapped out around nested function builds
struct Frame {
    partial: PartialBlock,
    blocks: Vec<BasicBlock>,
    next_tmp: u32,
}

/// Incremental builder for one module
///
/// A build is a sequence of `function` calls (each internally a sequence
/// of block finalizations driven by instruction and terminator emission)
/// closed by `finish`. Function bodies may be built while nested inside
/// other bodies; the per-function sub-state is saved and restored around
/// each build, so identifier spaces never collide across nesting levels.
pub struct Builder {
    defs: Vec<Definition>,
    partial: PartialBlock,
    blocks: Vec<BasicBlock>,
    next_tmp: u32,
    /// Declared functions still waiting for their definition
    pending: Vec<String>,
    defined: HashSet<String>,
    diags: Vec<Diag>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            partial: PartialBlock::new(Label::new("entry")),
            blocks: Vec::new(),
            next_tmp: 0,
            pending: Vec::new(),
            defined: HashSet::new(),
            diags: Vec::new(),
        }
    }

    // ==================== Fresh-name supply ====================

    /// Next unused identifier in the current function's scope
    ///
    /// Identifiers are numbered from 0 and strictly increase within one
    /// function build; nested builds get their own numbering.
    pub fn fresh(&mut self) -> Ident {
        let ident = Ident::Tmp(self.next_tmp);
        self.next_tmp += 1;
        ident
    }

    // ==================== Emission primitives ====================

    /// Append an instruction to the current partial block
    ///
    /// Allocates a fresh identifier for the result and returns a typed
    /// reference bound to it. No structural checks are made here: in
    /// particular, emitting into a block whose terminator is already set
    /// is accepted, and left for an external verifier to flag.
    pub fn emit_inst(&mut self, result_ty: Type, inst: Inst) -> Value {
        let ident = self.fresh();
        self.partial.push(ident.clone(), inst);
        Value::local(result_ty, ident)
    }

    /// Set the current partial block's terminator
    ///
    /// Last write wins; an overwrite is recorded as a diagnostic.
    pub fn emit_term(&mut self, term: Term) {
        if self.partial.terminate(term).is_some() {
            self.diags.push(Diag::TerminatorOverwritten {
                block: self.partial.label.clone(),
            });
        }
    }

    /// Append a finished top-level definition to the module
    pub fn emit_defn(&mut self, def: Definition) {
        self.defs.push(def);
    }

    // ==================== Block finalization ====================

    /// Finalize the current partial block and start the next one
    ///
    /// The finalized block keeps its emission order and gets a
    /// synthesized `ret void` if no terminator was set. A partial block
    /// with no instructions and no terminator is discarded rather than
    /// emitted, so a no-op `block` call never produces an empty block.
    /// Returns the new block's label for use as a branch target.
    pub fn block(&mut self, name: impl Into<String>) -> Label {
        let label = Label::new(name);
        let prev = mem::replace(&mut self.partial, PartialBlock::new(label.clone()));
        self.seal(prev);
        label
    }

    fn seal(&mut self, partial: PartialBlock) {
        if partial.is_empty() {
            self.diags.push(Diag::EmptyBlockDiscarded {
                block: partial.label,
            });
            return;
        }
        if partial.term.is_none() {
            self.diags.push(Diag::ReturnSynthesized {
                block: partial.label.clone(),
            });
        }
        self.blocks.push(partial.finalize());
    }

    // ==================== Function construction ====================

    /// Register a named, typed function placeholder
    ///
    /// The returned value is callable immediately, before the definition
    /// exists, which is what makes self- and forward-references
    /// expressible. `finish` fails if a declared function is never
    /// defined.
    pub fn declare(&mut self, name: impl Into<String>, params: Vec<Type>, ret: Type) -> Value {
        let name = name.into();
        let ty = Type::function(params, ret);
        if !self.defined.contains(&name) && !self.pending.contains(&name) {
            self.pending.push(name.clone());
        }
        Value::global(ty, name)
    }

    /// Build a function definition
    ///
    /// Saves the per-function sub-state (current partial block,
    /// finished-blocks list, fresh-name counter), resets it for the new
    /// body, and restores it afterwards, so bodies can be built while
    /// nested inside other bodies without identifier collisions.
    ///
    /// The body callback receives the builder and the parameter
    /// references. Its trailing partial block is finalized when it
    /// returns, under the same rules as `block`. The finished definition
    /// is appended to the module and a callable reference is returned;
    /// the same reference is already available inside the body via
    /// `declare` under the function's own name.
    pub fn function<F>(
        &mut self,
        name: impl Into<String>,
        params: Vec<(String, Type)>,
        ret: Type,
        body: F,
    ) -> BuildResult<Value>
    where
        F: FnOnce(&mut Self, Vec<Value>) -> BuildResult<()>,
    {
        let name = name.into();
        let fn_ref = self.declare(
            name.clone(),
            params.iter().map(|(_, ty)| ty.clone()).collect(),
            ret.clone(),
        );

        let saved = Frame {
            partial: mem::replace(&mut self.partial, PartialBlock::new(Label::new("entry"))),
            blocks: mem::take(&mut self.blocks),
            next_tmp: mem::replace(&mut self.next_tmp, 0),
        };

        let args = params
            .iter()
            .map(|(pname, ty)| Value::local(ty.clone(), Ident::Named(pname.clone())))
            .collect();
        let result = body(self, args);

        // Restore the enclosing state whether or not the body succeeded;
        // on failure the half-built blocks go down with the build.
        let trailing = mem::replace(&mut self.partial, saved.partial);
        if result.is_ok() {
            self.seal(trailing);
        }
        let blocks = mem::replace(&mut self.blocks, saved.blocks);
        self.next_tmp = saved.next_tmp;
        result?;

        self.pending.retain(|pending| *pending != name);
        self.defined.insert(name.clone());
        self.emit_defn(Definition::Function(Function {
            name,
            params,
            ret,
            blocks,
        }));
        Ok(fn_ref)
    }

    // ==================== Module finalization ====================

    /// Consume the builder, yielding the finished module
    ///
    /// Fails if any declared function was never defined.
    pub fn finish(self) -> BuildResult<Module> {
        if let Some(name) = self.pending.first() {
            return Err(BuildError::unresolved(name.clone()));
        }
        Ok(Module { defs: self.defs })
    }

    /// Diagnostics recorded so far, in the order they occurred
    pub fn diagnostics(&self) -> &[Diag] {
        &self.diags
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::inst::IntPredicate;
    use pretty_assertions::assert_eq;

    fn i32_const(n: i64) -> Value {
        Value::const_int(Type::i32(), n)
    }

    #[test]
    fn test_emission_order_and_fresh_idents() {
        let mut b = Builder::new();
        b.function("f", Vec::new(), Type::i32(), |b, _| {
            let mut acc = i32_const(0);
            for i in 1..=5 {
                acc = b.add(acc, i32_const(i));
            }
            b.ret(acc);
            Ok(())
        })
        .unwrap();

        let module = b.finish().unwrap();
        let func = module.functions().next().unwrap();
        let entry = func.entry().unwrap();
        let idents: Vec<_> = entry.insts.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(
            idents,
            (0..5).map(Ident::Tmp).collect::<Vec<_>>(),
            "identifiers must be distinct and strictly increasing from 0"
        );
    }

    #[test]
    fn test_consecutive_blocks_never_emit_empty_block() {
        let mut b = Builder::new();
        b.function("f", Vec::new(), Type::void(), |b, _| {
            b.block("a");
            b.block("b");
            b.ret_void();
            Ok(())
        })
        .unwrap();

        assert!(
            b.diagnostics()
                .iter()
                .any(|d| matches!(d, Diag::EmptyBlockDiscarded { .. }))
        );
        let module = b.finish().unwrap();
        let func = module.functions().next().unwrap();
        assert_eq!(func.blocks.len(), 1);
        assert_eq!(func.blocks[0].label, Label::new("b"));
    }

    #[test]
    fn test_missing_terminator_synthesizes_void_return() {
        let mut b = Builder::new();
        b.function("f", Vec::new(), Type::void(), |b, _| {
            b.add(i32_const(1), i32_const(2));
            Ok(())
        })
        .unwrap();

        assert!(
            b.diagnostics()
                .iter()
                .any(|d| matches!(d, Diag::ReturnSynthesized { .. }))
        );
        let module = b.finish().unwrap();
        let func = module.functions().next().unwrap();
        assert_eq!(func.blocks[0].term, Term::Ret { value: None });
    }

    #[test]
    fn test_terminator_overwrite_is_reported() {
        let mut b = Builder::new();
        b.function("f", Vec::new(), Type::void(), |b, _| {
            b.ret_void();
            b.br(Label::new("elsewhere"));
            Ok(())
        })
        .unwrap();

        assert!(
            b.diagnostics()
                .iter()
                .any(|d| matches!(d, Diag::TerminatorOverwritten { .. }))
        );
        // Last write wins
        let module = b.finish().unwrap();
        let func = module.functions().next().unwrap();
        assert_eq!(
            func.blocks[0].term,
            Term::Br {
                target: Label::new("elsewhere")
            }
        );
    }

    #[test]
    fn test_two_block_branch_scenario() {
        let mut b = Builder::new();
        b.function("f", Vec::new(), Type::void(), |b, _| {
            b.block("b1");
            let b2 = Label::new("b2");
            b.br(b2.clone());
            b.block("b2");
            b.ret_void();
            Ok(())
        })
        .unwrap();

        let module = b.finish().unwrap();
        let func = module.functions().next().unwrap();
        assert_eq!(func.blocks.len(), 2);
        assert_eq!(func.blocks[0].label, Label::new("b1"));
        assert_eq!(func.blocks[1].label, Label::new("b2"));
        assert_eq!(
            func.blocks[0].term,
            Term::Br {
                target: Label::new("b2")
            }
        );
        assert_eq!(func.blocks[1].term, Term::Ret { value: None });
    }

    #[test]
    fn test_nested_builds_are_isolated() {
        let mut b = Builder::new();
        b.function("outer", Vec::new(), Type::i32(), |b, _| {
            let first = b.add(i32_const(1), i32_const(2));

            // A sibling built mid-body gets its own identifier space and
            // block list.
            b.function("inner", Vec::new(), Type::i32(), |b, _| {
                let x = b.add(i32_const(3), i32_const(4));
                let y = b.add(x, i32_const(5));
                b.ret(y);
                Ok(())
            })?;

            let second = b.add(first, i32_const(6));
            b.ret(second);
            Ok(())
        })
        .unwrap();

        let module = b.finish().unwrap();
        let names: Vec<_> = module.functions().map(|f| f.name.as_str()).collect();
        // The nested build finalizes first
        assert_eq!(names, vec!["inner", "outer"]);

        let inner = module.functions().next().unwrap();
        let inner_idents: Vec<_> = inner.blocks[0]
            .insts
            .iter()
            .map(|(id, _)| id.clone())
            .collect();
        assert_eq!(inner_idents, vec![Ident::Tmp(0), Ident::Tmp(1)]);

        let outer = module.functions().nth(1).unwrap();
        let outer_idents: Vec<_> = outer.blocks[0]
            .insts
            .iter()
            .map(|(id, _)| id.clone())
            .collect();
        // The enclosing count resumes where it left off
        assert_eq!(outer_idents, vec![Ident::Tmp(0), Ident::Tmp(1)]);
        assert_eq!(outer.blocks.len(), 1);
    }

    #[test]
    fn test_definitions_keep_finalization_order() {
        let mut b = Builder::new();
        for name in ["f", "g", "h"] {
            b.function(name, Vec::new(), Type::void(), |b, _| {
                b.ret_void();
                Ok(())
            })
            .unwrap();
        }
        let module = b.finish().unwrap();
        let names: Vec<_> = module.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["f", "g", "h"]);
    }

    #[test]
    fn test_declared_but_undefined_fails_finish() {
        let mut b = Builder::new();
        b.declare("missing", vec![Type::i32()], Type::i32());
        let err = b.finish().unwrap_err();
        assert!(matches!(err, BuildError::Unresolved { name } if name == "missing"));
    }

    #[test]
    fn test_self_recursive_function() {
        let mut b = Builder::new();
        let fact = b.declare("fact", vec![Type::i32()], Type::i32());
        b.function(
            "fact",
            vec![("n".to_string(), Type::i32())],
            Type::i32(),
            |b, args| {
                let n = args[0].clone();
                let base = b.icmp(IntPredicate::Sle, n.clone(), i32_const(1));
                b.cond_br(base, Label::new("done"), Label::new("rec"));

                b.block("done");
                b.ret(i32_const(1));

                b.block("rec");
                let pred = b.sub(n.clone(), i32_const(1));
                let rec = b.call(fact.clone(), vec![pred])?;
                let result = b.mul(n, rec);
                b.ret(result);
                Ok(())
            },
        )
        .unwrap();

        let module = b.finish().unwrap();
        let func = module.functions().next().unwrap();
        assert_eq!(func.blocks.len(), 3);
        assert_eq!(func.blocks[0].label, Label::new("entry"));
        // The recursive call references the function by name
        let rendered = module.to_string();
        assert!(rendered.contains("call @fact(i32 %1)"));
    }

    #[test]
    fn test_body_error_restores_enclosing_state() {
        use crate::ir::value::ValueKind;

        let mut b = Builder::new();
        let result = b.function("broken", Vec::new(), Type::void(), |b, _| {
            b.add(i32_const(1), i32_const(2));
            // Loading through a non-pointer is fatal for the build
            b.load(i32_const(0))?;
            Ok(())
        });
        assert!(result.is_err());

        // The context is usable again afterwards, with its sub-state
        // restored: a later build numbers its identifiers from 0.
        b.function("g", Vec::new(), Type::void(), |b, _| {
            let v = b.add(i32_const(1), i32_const(1));
            assert_eq!(v.kind, ValueKind::Local(Ident::Tmp(0)));
            b.ret_void();
            Ok(())
        })
        .unwrap();

        // The failed function was declared when its build started but
        // never defined, so module finalization reports it.
        let err = b.finish().unwrap_err();
        assert!(matches!(err, BuildError::Unresolved { name } if name == "broken"));
    }
}
