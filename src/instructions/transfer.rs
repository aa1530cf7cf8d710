//! # Data Transfer Instructions
//!
//! - MOV r1,r2 / MVI r: Register and immediate moves (M = memory at HL)
//! - LXI rp: Load a register pair with an immediate word
//! - LDA / STA: Accumulator to and from a direct address
//! - LDAX / STAX: Accumulator through BC or DE
//! - LHLD / SHLD: HL to and from a direct address
//! - XCHG: Swap HL and DE
//!
//! None of these affect the flags.

use crate::registers::{Register, RegisterPair};
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes MOV. Destination is bits 3-5, source bits 0-2.
///
/// 0x76 (`MOV M,M`) is HLT and never reaches this handler.
pub(crate) fn execute_mov<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = cpu.get_reg(Register::from_code(opcode));
    cpu.set_reg(Register::from_code(opcode >> 3), value);
    Ok(())
}

pub(crate) fn execute_mvi<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = cpu.fetch_byte();
    cpu.set_reg(Register::from_code(opcode >> 3), value);
    Ok(())
}

pub(crate) fn execute_lxi<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = cpu.fetch_word()?;
    cpu.set_pair(RegisterPair::from_opcode(opcode), value);
    Ok(())
}

pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let addr = cpu.fetch_word()?;
    cpu.a = cpu.memory.read(addr);
    Ok(())
}

pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let addr = cpu.fetch_word()?;
    cpu.memory.write(addr, cpu.a);
    Ok(())
}

/// LDAX B / LDAX D. Bit 4 selects DE.
pub(crate) fn execute_ldax<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let addr = cpu.get_pair(RegisterPair::from_opcode(opcode));
    cpu.a = cpu.memory.read(addr);
    Ok(())
}

pub(crate) fn execute_stax<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let addr = cpu.get_pair(RegisterPair::from_opcode(opcode));
    cpu.memory.write(addr, cpu.a);
    Ok(())
}

/// LHLD: L from `addr`, H from `addr + 1`.
pub(crate) fn execute_lhld<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let addr = cpu.fetch_word()?;
    let value = cpu.memory.read_word(addr)?;
    cpu.set_hl(value);
    Ok(())
}

pub(crate) fn execute_shld<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let addr = cpu.fetch_word()?;
    let value = cpu.hl();
    cpu.memory.write_word(addr, value)?;
    Ok(())
}

pub(crate) fn execute_xchg<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    std::mem::swap(&mut cpu.h, &mut cpu.d);
    std::mem::swap(&mut cpu.l, &mut cpu.e);
    Ok(())
}
