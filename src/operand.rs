//! Polymorphic instruction operands.
//!
//! Each instruction carries exactly one [`Operand`]; which variant is active
//! is implied by the opcode (see [`isa`](crate::isa)). The assembler records
//! whatever it is given, and the VM checks the variant against the opcode's
//! expected [`OperandKind`] at execution time.

/// Operand attached to a single instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// No operand (ADD, PRINT, HALT, ...).
    None,
    /// Numeric literal (PUSH_NUM).
    Num(f64),
    /// Textual literal (PUSH_STR).
    Str(String),
    /// Boolean literal (PUSH_BOOL).
    Flag(bool),
    /// Absolute instruction index (JUMP, JUMP_IF_FALSE).
    Target(usize),
}

impl Operand {
    /// Returns the kind tag of the active variant.
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::None => OperandKind::None,
            Operand::Num(_) => OperandKind::Num,
            Operand::Str(_) => OperandKind::Str,
            Operand::Flag(_) => OperandKind::Flag,
            Operand::Target(_) => OperandKind::Target,
        }
    }
}

/// Kind tag for operand variants, used to check operand/opcode consistency
/// and to name the variants in error messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandKind {
    None,
    Num,
    Str,
    Flag,
    Target,
}

impl OperandKind {
    /// Returns a human-readable name for error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            OperandKind::None => "None",
            OperandKind::Num => "Number",
            OperandKind::Str => "String",
            OperandKind::Flag => "Boolean",
            OperandKind::Target => "JumpTarget",
        }
    }
}
