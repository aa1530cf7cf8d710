//! # Stack Instructions
//!
//! - PUSH rp / PUSH PSW: SP -= 2, store the pair at SP
//! - POP rp / POP PSW: load the pair from SP, SP += 2
//! - XTHL: Exchange HL with the word on top of the stack
//! - SPHL: SP = HL
//!
//! The stack holds words little-endian, so the high register of a pair lives
//! at SP + 1. PSW pushes A as the high byte and the packed flags as the low.

use crate::registers::RegisterPair;
use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_push<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = cpu.get_pair(RegisterPair::from_stack_opcode(opcode));
    cpu.push_word(value)
}

/// Executes POP. POP PSW restores only the five defined flag bits.
pub(crate) fn execute_pop<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = cpu.pop_word()?;
    cpu.set_pair(RegisterPair::from_stack_opcode(opcode), value);
    Ok(())
}

pub(crate) fn execute_xthl<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let top = cpu.memory.read_word(cpu.sp)?;
    let hl = cpu.hl();
    cpu.memory.write_word(cpu.sp, hl)?;
    cpu.set_hl(top);
    Ok(())
}

pub(crate) fn execute_sphl<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.sp = cpu.hl();
    Ok(())
}
