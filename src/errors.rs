use krypton_derive::Error;

/// Errors that abort a VM run.
///
/// Every variant is fatal: the VM stops at the failing instruction and
/// surfaces the error from [`run`](crate::vm::VM::run) without executing
/// anything further. There is no retry or resumption path.
#[derive(Debug, Error)]
pub enum VMError {
    /// Pop attempted with no operands on the stack.
    #[error("stack underflow: {mnemonic} at instruction {ip} found an empty stack")]
    StackUnderflow {
        mnemonic: &'static str,
        ip: usize,
    },
    /// An instruction received a heap value of the wrong variant.
    #[error("type mismatch: {mnemonic} at instruction {ip} expected {expected}, got {actual}")]
    TypeMismatch {
        mnemonic: &'static str,
        ip: usize,
        expected: &'static str,
        actual: &'static str,
    },
    /// DIV with a zero right operand.
    #[error("division by zero at instruction {ip}")]
    DivisionByZero { ip: usize },
    /// Jump target outside the program's valid index range.
    #[error("invalid jump target {target} at instruction {ip}: program has {len} instructions")]
    InvalidJumpTarget {
        target: usize,
        ip: usize,
        len: usize,
    },
    /// Malformed program: an operand variant inconsistent with its opcode.
    #[error("malformed program: {mnemonic} at instruction {ip} expected {expected} operand, got {actual}")]
    ProgramError {
        mnemonic: &'static str,
        ip: usize,
        expected: &'static str,
        actual: &'static str,
    },
}
