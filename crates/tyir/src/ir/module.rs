//! Functions, top-level definitions, and modules

use std::fmt;

use super::block::BasicBlock;
use crate::types::Type;

/// A finished function definition
///
/// The first block is the entry block.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Vec<(String, Type)>,
    pub ret: Type,
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    /// The entry block, if the function has any blocks at all
    pub fn entry(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    /// The function's type: return type plus parameter types
    pub fn ty(&self) -> Type {
        Type::function(
            self.params.iter().map(|(_, ty)| ty.clone()).collect(),
            self.ret.clone(),
        )
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "define {} @{}(", self.ret, self.name)?;
        for (i, (name, ty)) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} %{}", ty, name)?;
        }
        writeln!(f, ") {{")?;
        for block in &self.blocks {
            writeln!(f, "{}", block)?;
        }
        write!(f, "}}")
    }
}

/// A top-level definition
#[derive(Debug, Clone)]
pub enum Definition {
    Function(Function),
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Definition::Function(func) => write!(f, "{}", func),
        }
    }
}

/// A module: ordered list of top-level definitions
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub defs: Vec<Definition>,
}

impl Module {
    pub fn new() -> Self {
        Self { defs: Vec::new() }
    }

    /// Iterate over the function definitions in order
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.defs.iter().map(|def| match def {
            Definition::Function(func) => func,
        })
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, def) in self.defs.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", def)?;
        }
        Ok(())
    }
}
