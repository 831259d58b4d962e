//! Krypton: a stack-based bytecode virtual machine.
//!
//! Provides a fluent assembler, a typed instruction set, an execution loop
//! with explicit control flow, and an embedded mark-and-sweep garbage
//! collector.
//!
//! # Architecture
//!
//! - **Objects**: tagged heap values ([`object::Object`]: `Number`, `Str`,
//!   `Boolean`, `Null`) owned by the collector's registry
//! - **Instructions**: `{opcode, operand}` pairs; programs are immutable
//!   index-addressed sequences
//! - **Execution model**: operand stack of registry handles, absolute jumps,
//!   explicit or implicit halt
//! - **Collection**: synchronous mark-and-sweep at a fixed per-instruction
//!   cadence, rooted in the operand stack
//!
//! # Modules
//!
//! - [`assembler`]: Fluent builder producing immutable programs
//! - [`errors`]: Fatal execution error types
//! - [`gc`]: Object registry and mark-and-sweep collector
//! - [`isa`]: Instruction set definition and opcode metadata
//! - [`object`]: Tagged heap value model
//! - [`operand`]: Polymorphic instruction operands
//! - [`program`]: Instruction and program types
//! - [`vm`]: Core virtual machine implementation
//!
//! # Example
//!
//! ```
//! use krypton::assembler::Assembler;
//! use krypton::isa::Opcode;
//! use krypton::vm::VM;
//!
//! let program = Assembler::new()
//!     .emit_num(Opcode::PushNum, 10.0)
//!     .emit_num(Opcode::PushNum, 20.0)
//!     .emit(Opcode::Add)
//!     .emit(Opcode::Print)
//!     .emit(Opcode::Halt)
//!     .build();
//!
//! let mut vm = VM::new();
//! vm.load_program(program);
//! let mut out = Vec::new();
//! vm.run(&mut out).unwrap();
//! assert_eq!(out, b"30\n");
//! ```

pub mod assembler;
pub mod errors;
pub mod gc;
pub mod isa;
pub mod object;
pub mod operand;
pub mod program;
pub mod utils;
pub mod vm;
