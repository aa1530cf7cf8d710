//! # Branch Instructions
//!
//! This module implements control transfer:
//! - JMP / Jcc: Jump, unconditionally or on a flag condition
//! - CALL / Ccc: Push the return address and jump
//! - RET / Rcc: Pop the return address
//! - RST n: One-byte call to `n * 8`
//! - PCHL: Jump to the address in HL
//!
//! The return address pushed by CALL/RST is the address of the next instruction.
//! A conditional jump or call that is not taken still consumes its two address
//! bytes.

use crate::registers::Condition;
use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.pc = cpu.fetch_word()?;
    Ok(())
}

pub(crate) fn execute_jmp_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let target = cpu.fetch_word()?;
    if cpu.condition_met(Condition::from_opcode(opcode)) {
        cpu.pc = target;
    }
    Ok(())
}

pub(crate) fn execute_call<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let target = cpu.fetch_word()?;
    cpu.push_word(cpu.pc)?;
    cpu.pc = target;
    Ok(())
}

pub(crate) fn execute_call_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let target = cpu.fetch_word()?;
    if cpu.condition_met(Condition::from_opcode(opcode)) {
        cpu.push_word(cpu.pc)?;
        cpu.pc = target;
    }
    Ok(())
}

pub(crate) fn execute_ret<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.pc = cpu.pop_word()?;
    Ok(())
}

pub(crate) fn execute_ret_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    if cpu.condition_met(Condition::from_opcode(opcode)) {
        cpu.pc = cpu.pop_word()?;
    }
    Ok(())
}

/// Executes RST n: the vector is bits 3-5 of the opcode times eight.
pub(crate) fn execute_rst<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    cpu.push_word(cpu.pc)?;
    cpu.pc = (opcode & 0x38) as u16;
    Ok(())
}

pub(crate) fn execute_pchl<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.pc = cpu.hl();
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{FlatMemory, MemoryBus, CPU};

    fn setup(program: &[u8]) -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.load_program(program, 0x8000).unwrap();
        CPU::new(mem)
    }

    #[test]
    fn test_call_pushes_next_address() {
        // CALL 0x9000
        let mut cpu = setup(&[0xCD, 0x00, 0x90]);

        cpu.execute_instruction().unwrap();

        assert_eq!(cpu.pc(), 0x9000);
        assert_eq!(cpu.sp(), 0xFFFD);
        assert_eq!(cpu.memory().read_word(0xFFFD), Ok(0x8003));
    }

    #[test]
    fn test_untaken_jump_skips_operand() {
        // JZ 0x9000 with Z clear
        let mut cpu = setup(&[0xCA, 0x00, 0x90]);

        cpu.execute_instruction().unwrap();

        assert_eq!(cpu.pc(), 0x8003);
    }

    #[test]
    fn test_rst_vector() {
        // RST 5
        let mut cpu = setup(&[0xEF]);

        cpu.execute_instruction().unwrap();

        assert_eq!(cpu.pc(), 0x0028);
        assert_eq!(cpu.memory().read_word(cpu.sp()), Ok(0x8001));
    }

    #[test]
    fn test_conditional_return_taken_on_minus() {
        // RM
        let mut cpu = setup(&[0xF8]);
        cpu.set_sp(0x9000);
        cpu.memory_mut().write_word(0x9000, 0x1234).unwrap();
        cpu.set_flag_s(true);

        cpu.execute_instruction().unwrap();

        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.sp(), 0x9002);
    }
}
