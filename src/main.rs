//! Krypton VM demo driver.
//!
//! Assembles a small sample program — `(10 + 20) * 2` with a caption — and
//! runs it to completion, exiting nonzero if the VM reports a fatal error.

use krypton::assembler::Assembler;
use krypton::error;
use krypton::isa::Opcode;
use krypton::vm::VM;
use std::io;
use std::process;

fn main() {
    let program = Assembler::new()
        .emit_num(Opcode::PushNum, 10.0)
        .emit_num(Opcode::PushNum, 20.0)
        .emit(Opcode::Add)
        .emit_num(Opcode::PushNum, 2.0)
        .emit(Opcode::Mul)
        .emit(Opcode::Print)
        .emit_str(Opcode::PushStr, "calculation complete")
        .emit(Opcode::Print)
        .emit(Opcode::Halt)
        .build();

    let mut vm = VM::new();
    vm.load_program(program);

    if let Err(err) = vm.run(&mut io::stdout()) {
        error!("vm error: {err}");
        process::exit(1);
    }
}
