//! # 8085 CPU Emulator Core
//!
//! An instruction-level Intel 8085 emulator and two-pass assembler, designed for
//! clarity and for driving from a front-end (native or WebAssembly).
//!
//! The crate models the processor's registers, flags, memory and
//! fetch-decode-execute cycle precisely enough to run real 8085 machine code with
//! bit-exact register, flag and memory results.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib8085::{assemble, FlatMemory, MemoryBus, CPU};
//!
//! let output = assemble("MVI A,#05\nMVI B,#03\nADD B\nHLT").unwrap();
//!
//! let mut memory = FlatMemory::new();
//! memory.load_program(&output.bytes, output.origin).unwrap();
//!
//! let mut cpu = CPU::new(memory);
//! while cpu.execute_instruction().unwrap() {}
//!
//! assert_eq!(cpu.a(), 0x08);
//! assert!(cpu.halted());
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus` trait
//! - **Pure ALU**: every flag-producing instruction goes through the `alu` functions
//! - **Table-Driven Design**: `OPCODE_TABLE` is shared by the decoder and the assembler
//! - **No hidden I/O**: logging goes through `tracing`; the library installs no subscriber
//!
//! ## Modules
//!
//! - `cpu` - CPU state, execution loop and breakpoints
//! - `alu` - 8-bit arithmetic/logic primitives and the `Flags` set
//! - `memory` - MemoryBus trait and the 64KB `FlatMemory`
//! - `opcodes` - Opcode metadata table
//! - `registers` - Register, register-pair and condition operand fields
//! - `assembler` - Two-pass assembler

pub mod alu;
pub mod assembler;
pub mod cpu;
pub mod memory;
pub mod opcodes;
pub mod registers;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use alu::{AluError, Flags};
pub use assembler::{assemble, assemble_with, AssemblerError, AssemblerOptions, AssemblerOutput};
pub use cpu::{RunOutcome, CPU, DEFAULT_ORIGIN, DEFAULT_SP};
pub use memory::{FlatMemory, MemoryBus, MemoryError};
pub use opcodes::{OpcodeMetadata, Operand, OPCODE_TABLE};
pub use registers::{Condition, Register, RegisterPair};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The fetched byte has no entry in the instruction table.
    ///
    /// `pc` is the address the opcode byte was fetched from. The program
    /// counter itself has already moved past it.
    UnknownOpcode { opcode: u8, pc: u16 },

    /// An instruction needed a memory access that is out of range.
    Memory(MemoryError),
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UnknownOpcode { opcode, pc } => {
                write!(f, "Unknown opcode: 0x{:02X} at PC: 0x{:04X}", opcode, pc)
            }
            ExecutionError::Memory(err) => write!(f, "Memory fault: {}", err),
        }
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecutionError::Memory(err) => Some(err),
            ExecutionError::UnknownOpcode { .. } => None,
        }
    }
}

impl From<MemoryError> for ExecutionError {
    fn from(err: MemoryError) -> Self {
        ExecutionError::Memory(err)
    }
}
