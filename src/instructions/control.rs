//! # Control Instructions
//!
//! - NOP: No Operation
//! - HLT: Halt until reset
//! - EI / DI: Set or clear the interrupt enable latch
//! - RIM / SIM: Interrupt mask access
//!
//! No interrupt sources are modelled, so EI/DI only toggle a latch that RIM
//! reports back, and SIM accepts and discards its mask.

use tracing::debug;

use crate::{ExecutionError, MemoryBus, CPU};

/// Interrupt-enable bit in the byte RIM loads into A.
const RIM_IE_BIT: u8 = 0x08;

pub(crate) fn execute_nop<M: MemoryBus>(_cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    Ok(())
}

/// Executes HLT. PC is left pointing past the HLT byte.
pub(crate) fn execute_hlt<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.halted = true;
    Ok(())
}

pub(crate) fn execute_ei<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.interrupt_enabled = true;
    Ok(())
}

pub(crate) fn execute_di<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.interrupt_enabled = false;
    Ok(())
}

/// Executes RIM. Only the interrupt-enable bit is reported; masks, pending
/// interrupts and serial input read as zero.
pub(crate) fn execute_rim<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.a = if cpu.interrupt_enabled { RIM_IE_BIT } else { 0 };
    Ok(())
}

pub(crate) fn execute_sim<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    debug!("SIM 0x{:02X} ignored", cpu.a);
    Ok(())
}
