//! Builds a self-recursive factorial function and prints the module.
//!
//! The function reference is declared before the body is built, so the
//! body can embed a call to it.

use tyir::ir::{IntPredicate, Label};
use tyir::{Builder, Type, Value};

fn main() -> anyhow::Result<()> {
    let mut b = Builder::new();

    let fact = b.declare("fact", vec![Type::i32()], Type::i32());
    b.function(
        "fact",
        vec![("n".to_string(), Type::i32())],
        Type::i32(),
        |b, args| {
            let n = args[0].clone();
            let one = Value::const_int(Type::i32(), 1);

            let base = b.icmp(IntPredicate::Sle, n.clone(), one.clone());
            b.cond_br(base, Label::new("base"), Label::new("rec"));

            b.block("base");
            b.ret(one.clone());

            b.block("rec");
            let pred = b.sub(n.clone(), one);
            let rec = b.call(fact.clone(), vec![pred])?;
            let result = b.mul(n, rec);
            b.ret(result);
            Ok(())
        },
    )?;

    let module = b.finish()?;
    print!("{module}");
    Ok(())
}
