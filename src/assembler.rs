//! Fluent bytecode assembler.
//!
//! Builds a [`Program`] one instruction at a time through chained `emit`
//! calls. The assembler performs no semantic validation: it does not check
//! that jump targets are in range, that opcodes receive the operand kinds
//! they expect, or that the program ends in HALT. Such defects surface only
//! at run time in the VM. Correctness of the program is the caller's
//! responsibility.
//!
//! # Example
//!
//! ```
//! use krypton::assembler::Assembler;
//! use krypton::isa::Opcode;
//!
//! // (10 + 20) * 2
//! let program = Assembler::new()
//!     .emit_num(Opcode::PushNum, 10.0)
//!     .emit_num(Opcode::PushNum, 20.0)
//!     .emit(Opcode::Add)
//!     .emit_num(Opcode::PushNum, 2.0)
//!     .emit(Opcode::Mul)
//!     .emit(Opcode::Print)
//!     .emit(Opcode::Halt)
//!     .build();
//! assert_eq!(program.len(), 7);
//! ```

use crate::isa::Opcode;
use crate::operand::Operand;
use crate::program::{Instruction, Program};

/// Builder accumulating an instruction sequence.
///
/// Each `emit` method appends one instruction and returns the builder by
/// value for chaining; [`build`](Assembler::build) consumes the builder and
/// transfers the finished sequence out. A spent builder cannot be reused —
/// start over with [`Assembler::new`].
#[derive(Debug, Default)]
pub struct Assembler {
    program: Vec<Instruction>,
}

impl Assembler {
    /// Creates an assembler with an empty instruction sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an instruction with no operand (ADD, PRINT, HALT, ...).
    pub fn emit(mut self, opcode: Opcode) -> Self {
        self.program.push(Instruction::new(opcode, Operand::None));
        self
    }

    /// Appends an instruction with a numeric literal operand.
    pub fn emit_num(mut self, opcode: Opcode, value: f64) -> Self {
        self.program
            .push(Instruction::new(opcode, Operand::Num(value)));
        self
    }

    /// Appends an instruction with a textual literal operand.
    pub fn emit_str(mut self, opcode: Opcode, value: impl Into<String>) -> Self {
        self.program
            .push(Instruction::new(opcode, Operand::Str(value.into())));
        self
    }

    /// Appends an instruction with a boolean literal operand.
    pub fn emit_bool(mut self, opcode: Opcode, value: bool) -> Self {
        self.program
            .push(Instruction::new(opcode, Operand::Flag(value)));
        self
    }

    /// Appends an instruction with an absolute jump-target operand.
    pub fn emit_target(mut self, opcode: Opcode, target: usize) -> Self {
        self.program
            .push(Instruction::new(opcode, Operand::Target(target)));
        self
    }

    /// Consumes the builder and yields the finished immutable [`Program`].
    pub fn build(self) -> Program {
        Program::new(self.program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_empty() {
        let program = Assembler::new().build();
        assert!(program.is_empty());
    }

    #[test]
    fn emit_records_opcode_and_operand() {
        let program = Assembler::new()
            .emit_num(Opcode::PushNum, 1.5)
            .emit_str(Opcode::PushStr, "hello")
            .emit_bool(Opcode::PushBool, true)
            .emit(Opcode::PushNull)
            .emit_target(Opcode::Jump, 0)
            .build();

        let instructions = program.instructions();
        assert_eq!(instructions.len(), 5);
        assert_eq!(instructions[0].opcode, Opcode::PushNum);
        assert_eq!(instructions[0].operand, Operand::Num(1.5));
        assert_eq!(instructions[1].operand, Operand::Str("hello".into()));
        assert_eq!(instructions[2].operand, Operand::Flag(true));
        assert_eq!(instructions[3].operand, Operand::None);
        assert_eq!(instructions[4].operand, Operand::Target(0));
    }

    #[test]
    fn emit_preserves_order() {
        let program = Assembler::new()
            .emit(Opcode::Add)
            .emit(Opcode::Sub)
            .emit(Opcode::Halt)
            .build();
        let opcodes: Vec<_> = program.instructions().iter().map(|i| i.opcode).collect();
        assert_eq!(opcodes, vec![Opcode::Add, Opcode::Sub, Opcode::Halt]);
    }

    #[test]
    fn no_validation_of_targets_or_operand_kinds() {
        // Out-of-range target and mismatched operand kind both assemble;
        // they fail only when the VM executes them.
        let program = Assembler::new()
            .emit_target(Opcode::Jump, 9999)
            .emit_str(Opcode::PushNum, "not a number")
            .build();
        assert_eq!(program.len(), 2);
    }
}
