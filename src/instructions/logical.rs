//! # Logical Instructions
//!
//! - ANA / ANI, XRA / XRI, ORA / ORI: Bitwise ops on the accumulator
//! - RLC / RRC / RAL / RAR: Accumulator rotates (carry only)
//! - CMA: Complement accumulator (no flags)
//! - STC / CMC: Set or complement carry

use super::alu_operand;
use crate::{alu, ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_ana<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = alu_operand(cpu, opcode);
    let (result, flags) = alu::and(cpu.a, value);
    cpu.a = result;
    cpu.flags = flags;
    Ok(())
}

pub(crate) fn execute_xra<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = alu_operand(cpu, opcode);
    let (result, flags) = alu::xor(cpu.a, value);
    cpu.a = result;
    cpu.flags = flags;
    Ok(())
}

pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = alu_operand(cpu, opcode);
    let (result, flags) = alu::or(cpu.a, value);
    cpu.a = result;
    cpu.flags = flags;
    Ok(())
}

/// Executes RLC (0x07), RRC (0x0F), RAL (0x17) or RAR (0x1F).
///
/// RLC/RRC copy the bit rotated out into carry. RAL/RAR rotate through carry.
pub(crate) fn execute_rotate<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let a = cpu.a;
    let carry_in = cpu.flags.c as u8;

    let (result, carry_out) = match opcode {
        0x07 => (a.rotate_left(1), a & 0x80 != 0),
        0x0F => (a.rotate_right(1), a & 0x01 != 0),
        0x17 => ((a << 1) | carry_in, a & 0x80 != 0),
        _ => ((a >> 1) | (carry_in << 7), a & 0x01 != 0),
    };

    cpu.a = result;
    cpu.flags.c = carry_out;
    Ok(())
}

pub(crate) fn execute_cma<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.a = !cpu.a;
    Ok(())
}

pub(crate) fn execute_stc<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.flags.c = true;
    Ok(())
}

pub(crate) fn execute_cmc<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.flags.c = !cpu.flags.c;
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
    fn test_ral_rotates_through_carry() {
        // RAL
        let mut cpu = setup(&[0x17]);
        cpu.set_a(0x80);
        cpu.set_flag_c(false);

        cpu.execute_instruction().unwrap();

        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.flag_c());
    }

    #[test]
    fn test_rrc_copies_low_bit() {
        // RRC
        let mut cpu = setup(&[0x0F]);
        cpu.set_a(0x01);

        cpu.execute_instruction().unwrap();

        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.flag_c());
    }

    #[test]
    fn test_xra_a_clears_accumulator() {
        // XRA A
        let mut cpu = setup(&[0xAF]);
        cpu.set_a(0x5A);
        cpu.set_flag_c(true);

        cpu.execute_instruction().unwrap();

        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.flag_z());
        assert!(cpu.flag_p());
        assert!(!cpu.flag_c());
    }

    #[test]
    fn test_cma_leaves_flags() {
        // CMA
        let mut cpu = setup(&[0x2F]);
        cpu.set_a(0x0F);

        cpu.execute_instruction().unwrap();

        assert_eq!(cpu.a(), 0xF0);
        assert!(!cpu.flag_s());
    }
}
