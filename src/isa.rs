//! Instruction Set Architecture (ISA) definitions.
//!
//! Defines the VM's instruction set. The
//! [`for_each_opcode!`](crate::for_each_opcode) macro holds the canonical
//! opcode definitions and invokes a callback macro for code generation, so
//! other modules can generate opcode-related code without duplicating the
//! list.
//!
//! This module generates:
//! - The [`Opcode`] enum
//! - [`Opcode::mnemonic`] for diagnostics
//! - [`Opcode::operand_kind`], the operand variant each opcode expects
//!
//! Programs are sequences of typed [`Instruction`](crate::program::Instruction)
//! values rather than encoded bytes; there is no binary wire format.

use crate::operand::OperandKind;

/// Invokes a callback macro with the complete opcode definition list.
///
/// Format per entry: `Name = "MNEMONIC" => OperandKind`.
#[macro_export]
macro_rules! for_each_opcode {
    ($callback:ident) => {
        $callback! {
            // =========================
            // Value materialization
            // =========================
            /// PUSH_NUM n ; push a new Number object holding n
            PushNum = "PUSH_NUM" => Num,
            /// PUSH_STR s ; push a new String object holding s
            PushStr = "PUSH_STR" => Str,
            /// PUSH_BOOL b ; push a new Boolean object holding b
            PushBool = "PUSH_BOOL" => Flag,
            /// PUSH_NULL ; push a new Null object
            PushNull = "PUSH_NULL" => None,
            // =========================
            // Arithmetic
            // =========================
            /// ADD ; pop right, pop left, push left + right
            Add = "ADD" => None,
            /// SUB ; pop right, pop left, push left - right
            Sub = "SUB" => None,
            /// MUL ; pop right, pop left, push left * right
            Mul = "MUL" => None,
            /// DIV ; pop right, pop left, push left / right (fatal on zero right operand)
            Div = "DIV" => None,
            // =========================
            // Output
            // =========================
            /// PRINT ; pop one object and write its textual form as one line
            Print = "PRINT" => None,
            // =========================
            // Control flow
            // =========================
            /// JUMP t ; set the instruction pointer to t
            Jump = "JUMP" => Target,
            /// JUMP_IF_FALSE t ; pop one object, jump to t if it is falsy
            JumpIfFalse = "JUMP_IF_FALSE" => Target,
            /// HALT ; terminate execution immediately
            Halt = "HALT" => None,
        }
    };
}

macro_rules! define_opcodes {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $mnemonic:literal => $kind:ident
        ),* $(,)?
    ) => {
        /// Operation selector for a single instruction.
        #[derive(Copy, Clone, Debug, Eq, PartialEq)]
        pub enum Opcode {
            $(
                $(#[$doc])*
                $name,
            )*
        }

        impl Opcode {
            /// Returns the assembly mnemonic for this opcode.
            pub const fn mnemonic(&self) -> &'static str {
                match self {
                    $( Opcode::$name => $mnemonic, )*
                }
            }

            /// Returns the operand kind this opcode expects.
            ///
            /// The VM rejects instructions whose operand variant does not
            /// match this kind with a
            /// [`ProgramError`](crate::errors::VMError::ProgramError).
            pub const fn operand_kind(&self) -> OperandKind {
                match self {
                    $( Opcode::$name => OperandKind::$kind, )*
                }
            }
        }
    };
}

for_each_opcode!(define_opcodes);
