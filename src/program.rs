//! Bytecode program representation.
//!
//! A [`Program`] is an ordered, immutable sequence of [`Instruction`]s,
//! indexed `0..N-1`. Jump operands are absolute indices into this sequence.
//! Programs are produced by the [`Assembler`](crate::assembler::Assembler)
//! and stay immutable for the lifetime of a VM run; there is no on-disk
//! format.

use crate::isa::Opcode;
use crate::operand::Operand;
use std::fmt::{self, Display};

/// A single immutable opcode/operand pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    /// Operation to perform.
    pub opcode: Opcode,
    /// Attached operand; its active variant is implied by the opcode.
    pub operand: Operand,
}

impl Instruction {
    pub(crate) const fn new(opcode: Opcode, operand: Operand) -> Self {
        Self { opcode, operand }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Operand::None => write!(f, "{}", self.opcode.mnemonic()),
            Operand::Num(n) => write!(f, "{} {}", self.opcode.mnemonic(), n),
            Operand::Str(s) => write!(f, "{} \"{}\"", self.opcode.mnemonic(), s),
            Operand::Flag(b) => write!(f, "{} {}", self.opcode.mnemonic(), b),
            Operand::Target(t) => write!(f, "{} {}", self.opcode.mnemonic(), t),
        }
    }
}

/// An immutable instruction sequence ready for execution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub(crate) fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Returns the instruction at `index`, or `None` past the end.
    pub fn fetch(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Returns the number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns whether the program contains no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Returns the full instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}
