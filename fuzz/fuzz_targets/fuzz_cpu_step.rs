//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states and memory contents, then executes
//! a few instructions to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use lib8085::{FlatMemory, Flags, MemoryBus, CPU};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    h: u8,
    l: u8,
    sp: u16,
    /// Packed flag byte, as POP PSW would load it
    psw: u8,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instructions + operands)
    program: [u8; 16],
    /// Contents around the stack pointer
    stack: [u8; 8],
    /// Contents around HL
    data: [u8; 4],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let state = &input.cpu_state;
    let hl = ((state.h as u16) << 8) | state.l as u16;

    let mut memory = FlatMemory::new();
    let _ = memory.load_program(&input.memory.program, 0x8000);
    for (i, &byte) in input.memory.stack.iter().enumerate() {
        memory.write(state.sp.wrapping_add(i as u16), byte);
    }
    for (i, &byte) in input.memory.data.iter().enumerate() {
        memory.write(hl.wrapping_add(i as u16), byte);
    }

    let mut cpu = CPU::new(memory);
    cpu.set_a(state.a);
    cpu.set_b(state.b);
    cpu.set_c(state.c);
    cpu.set_d(state.d);
    cpu.set_e(state.e);
    cpu.set_hl(hl);
    cpu.set_sp(state.sp);
    cpu.set_flags(Flags::from_psw(state.psw));

    // Errors (unknown opcode, word access at 0xFFFF) are fine - just no panics
    for _ in 0..(input.steps % 8) {
        if !matches!(cpu.execute_instruction(), Ok(true)) {
            break;
        }
    }

    // Unused PSW bits must stay clear whatever ran
    assert_eq!(cpu.psw() & 0x2A, 0);
});
