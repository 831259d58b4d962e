//! Core virtual machine implementation.
//!
//! The VM executes a [`Program`] on an operand stack of [`ObjectRef`]
//! handles. Every value lives in the collector's registry; the stack only
//! borrows. Execution is single-threaded and run-to-completion per step:
//! the fetch-decode-execute loop and the collector share one logical thread
//! of control, and a collection cycle is only ever interposed between two
//! instruction steps.
//!
//! # Execution model
//!
//! - Fetch the instruction at the pointer, execute it, and advance the
//!   pointer by one unless the instruction set it explicitly (JUMP, taken
//!   JUMP_IF_FALSE).
//! - The run terminates normally when a HALT executes or the pointer runs
//!   past the end of the program.
//! - Every [`GC_INTERVAL`]th executed instruction triggers a synchronous
//!   collection cycle with the current stack as the root set. The cadence
//!   counts executed steps, so it is insensitive to jumps and allocation
//!   pressure.
//!
//! All failures ([`VMError`]) are fatal: the VM stops at the failing
//! instruction with no resumption model.

use crate::errors::VMError;
use crate::gc::{GarbageCollector, ObjectRef};
use crate::isa::Opcode;
use crate::object::Object;
use crate::operand::Operand;
use crate::program::{Instruction, Program};
use std::io::Write;

/// Number of executed instructions between collection cycles.
pub const GC_INTERVAL: u64 = 5;

/// Control-flow outcome of a single executed instruction.
enum Flow {
    /// Advance the instruction pointer by one.
    Advance,
    /// Set the instruction pointer to the given index.
    Jump(usize),
    /// Terminate the run.
    Halt,
}

/// Stack-based bytecode virtual machine.
///
/// Owns the loaded program, the operand stack, the instruction pointer, and
/// the garbage collector. PRINT output goes to the sink passed to
/// [`run`](VM::run); the VM itself never writes to stdout.
#[derive(Debug, Default)]
pub struct VM {
    /// Program under execution.
    program: Program,
    /// Operand stack of non-owning handles into the registry.
    stack: Vec<ObjectRef>,
    /// Index of the next instruction to fetch.
    ip: usize,
    /// Registry of all live heap objects plus the collection algorithm.
    gc: GarbageCollector,
    /// Set by an executed HALT.
    halted: bool,
    /// Executed instruction count, drives the collection cadence.
    steps: u64,
}

impl VM {
    /// Creates a VM with no program loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `program`, replacing any previously loaded one.
    ///
    /// Resets the instruction pointer, operand stack, step counter, and the
    /// object registry, so the VM is reusable across programs.
    pub fn load_program(&mut self, program: Program) {
        self.program = program;
        self.stack.clear();
        self.ip = 0;
        self.halted = false;
        self.steps = 0;
        self.gc.reset();
    }

    /// Drives execution to termination, writing PRINT output to `out`.
    ///
    /// Returns `Ok(())` on normal termination (an executed HALT, or the
    /// pointer running past the end of the program) and the specific
    /// [`VMError`] on the first fatal condition. The operand stack being
    /// empty at normal halt is a contract between program author and
    /// caller; the VM does not enforce it.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), VMError> {
        crate::info!("[VM] execution started: {} instructions", self.program.len());

        while !self.halted {
            let Some(instruction) = self.program.fetch(self.ip) else {
                break;
            };
            let instruction = instruction.clone();

            match self.exec(&instruction, out)? {
                Flow::Advance => self.ip += 1,
                Flow::Jump(target) => self.ip = target,
                Flow::Halt => self.halted = true,
            }

            self.steps += 1;
            if self.steps % GC_INTERVAL == 0 {
                self.gc.collect(&self.stack);
            }
        }

        self.halted = true;
        crate::info!("[VM] halted after {} executed instructions", self.steps);
        Ok(())
    }

    /// Returns the operand stack, bottom first.
    pub fn stack(&self) -> &[ObjectRef] {
        &self.stack
    }

    /// Returns the collector and its registry for inspection.
    pub fn collector(&self) -> &GarbageCollector {
        &self.gc
    }

    /// Executes a single instruction.
    ///
    /// An operand variant inconsistent with the opcode is a
    /// [`VMError::ProgramError`]; the opcode list itself is closed by the
    /// [`Opcode`] enum.
    fn exec<W: Write>(&mut self, instruction: &Instruction, out: &mut W) -> Result<Flow, VMError> {
        let mnemonic = instruction.opcode.mnemonic();
        match (instruction.opcode, &instruction.operand) {
            (Opcode::PushNum, Operand::Num(n)) => self.op_push(Object::Number(*n)),
            (Opcode::PushStr, Operand::Str(s)) => self.op_push(Object::Str(s.clone())),
            (Opcode::PushBool, Operand::Flag(b)) => self.op_push(Object::Boolean(*b)),
            (Opcode::PushNull, Operand::None) => self.op_push(Object::Null),
            (Opcode::Add, Operand::None) => self.op_arith(mnemonic, |left, right| left + right),
            (Opcode::Sub, Operand::None) => self.op_arith(mnemonic, |left, right| left - right),
            (Opcode::Mul, Operand::None) => self.op_arith(mnemonic, |left, right| left * right),
            (Opcode::Div, Operand::None) => self.op_div(mnemonic),
            (Opcode::Print, Operand::None) => self.op_print(mnemonic, out),
            (Opcode::Jump, Operand::Target(target)) => self.op_jump(*target),
            (Opcode::JumpIfFalse, Operand::Target(target)) => {
                self.op_jump_if_false(mnemonic, *target)
            }
            (Opcode::Halt, Operand::None) => Ok(Flow::Halt),
            (opcode, operand) => Err(VMError::ProgramError {
                mnemonic,
                ip: self.ip,
                expected: opcode.operand_kind().name(),
                actual: operand.kind().name(),
            }),
        }
    }

    /// Materializes a value: registers it with the collector and pushes its
    /// handle. This is the only place heap objects are born.
    fn push(&mut self, object: Object) {
        let handle = self.gc.track(object);
        self.stack.push(handle);
    }

    /// Pops the top handle, or fails with [`VMError::StackUnderflow`].
    fn pop(&mut self, mnemonic: &'static str) -> Result<ObjectRef, VMError> {
        self.stack.pop().ok_or(VMError::StackUnderflow {
            mnemonic,
            ip: self.ip,
        })
    }

    /// Pops the top value and requires it to be a Number.
    fn pop_number(&mut self, mnemonic: &'static str) -> Result<f64, VMError> {
        let handle = self.pop(mnemonic)?;
        match self.gc.get(handle) {
            Object::Number(n) => Ok(*n),
            other => Err(VMError::TypeMismatch {
                mnemonic,
                ip: self.ip,
                expected: "Number",
                actual: other.type_name(),
            }),
        }
    }

    /// Fails with [`VMError::InvalidJumpTarget`] unless `target` is a valid
    /// instruction index. The valid range is `0..len`; jumping to `len`
    /// is not how a program ends — running off the end is.
    fn check_target(&self, target: usize) -> Result<(), VMError> {
        if target >= self.program.len() {
            return Err(VMError::InvalidJumpTarget {
                target,
                ip: self.ip,
                len: self.program.len(),
            });
        }
        Ok(())
    }

    fn op_push(&mut self, object: Object) -> Result<Flow, VMError> {
        self.push(object);
        Ok(Flow::Advance)
    }

    /// Shared body of ADD/SUB/MUL: pop right, pop left, push the result.
    fn op_arith(
        &mut self,
        mnemonic: &'static str,
        apply: fn(f64, f64) -> f64,
    ) -> Result<Flow, VMError> {
        let right = self.pop_number(mnemonic)?;
        let left = self.pop_number(mnemonic)?;
        self.push(Object::Number(apply(left, right)));
        Ok(Flow::Advance)
    }

    fn op_div(&mut self, mnemonic: &'static str) -> Result<Flow, VMError> {
        let right = self.pop_number(mnemonic)?;
        let left = self.pop_number(mnemonic)?;
        if right == 0.0 {
            return Err(VMError::DivisionByZero { ip: self.ip });
        }
        self.push(Object::Number(left / right));
        Ok(Flow::Advance)
    }

    fn op_print<W: Write>(&mut self, mnemonic: &'static str, out: &mut W) -> Result<Flow, VMError> {
        let handle = self.pop(mnemonic)?;
        let _ = writeln!(out, "{}", self.gc.get(handle));
        Ok(Flow::Advance)
    }

    fn op_jump(&mut self, target: usize) -> Result<Flow, VMError> {
        self.check_target(target)?;
        Ok(Flow::Jump(target))
    }

    fn op_jump_if_false(&mut self, mnemonic: &'static str, target: usize) -> Result<Flow, VMError> {
        let handle = self.pop(mnemonic)?;
        if self.gc.get(handle).is_falsy() {
            self.check_target(target)?;
            return Ok(Flow::Jump(target));
        }
        Ok(Flow::Advance)
    }
}
