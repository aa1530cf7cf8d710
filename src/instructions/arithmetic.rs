//! # Arithmetic Instructions
//!
//! This module implements the accumulator arithmetic group and the
//! increment/decrement family:
//! - ADD / ADC / ADI / ACI: Add (with carry)
//! - SUB / SBB / SUI / SBI: Subtract (with borrow)
//! - CMP / CPI: Compare (subtract, discard result)
//! - INR / DCR: 8-bit increment/decrement (carry preserved)
//! - INX / DCX: 16-bit increment/decrement (no flags)
//! - DAD: Add a register pair to HL (carry only)
//! - DAA: Decimal adjust accumulator

use super::alu_operand;
use crate::registers::{Register, RegisterPair};
use crate::{alu, ExecutionError, MemoryBus, CPU};

/// Executes ADD/ADC/ADI/ACI.
///
/// Bit 3 of the opcode selects the carry-in form.
pub(crate) fn execute_add<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = alu_operand(cpu, opcode);
    let carry_in = opcode & 0x08 != 0 && cpu.flags.c;

    let (result, flags) = alu::add(cpu.a, value, carry_in);
    cpu.a = result;
    cpu.flags = flags;
    Ok(())
}

/// Executes SUB/SBB/SUI/SBI.
pub(crate) fn execute_sub<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = alu_operand(cpu, opcode);
    let borrow_in = opcode & 0x08 != 0 && cpu.flags.c;

    let (result, flags) = alu::sub(cpu.a, value, borrow_in);
    cpu.a = result;
    cpu.flags = flags;
    Ok(())
}

/// Executes CMP/CPI: flags as for SUB, accumulator unchanged.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let value = alu_operand(cpu, opcode);
    let (_, flags) = alu::sub(cpu.a, value, false);
    cpu.flags = flags;
    Ok(())
}

/// Executes INR. All flags except carry are updated.
pub(crate) fn execute_inr<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let reg = Register::from_code(opcode >> 3);
    let (result, mut flags) = alu::add(cpu.get_reg(reg), 1, false);
    flags.c = cpu.flags.c;

    cpu.set_reg(reg, result);
    cpu.flags = flags;
    Ok(())
}

/// Executes DCR. All flags except carry are updated.
pub(crate) fn execute_dcr<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let reg = Register::from_code(opcode >> 3);
    let (result, mut flags) = alu::sub(cpu.get_reg(reg), 1, false);
    flags.c = cpu.flags.c;

    cpu.set_reg(reg, result);
    cpu.flags = flags;
    Ok(())
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let pair = RegisterPair::from_opcode(opcode);
    let value = cpu.get_pair(pair).wrapping_add(1);
    cpu.set_pair(pair, value);
    Ok(())
}

pub(crate) fn execute_dcx<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let pair = RegisterPair::from_opcode(opcode);
    let value = cpu.get_pair(pair).wrapping_sub(1);
    cpu.set_pair(pair, value);
    Ok(())
}

/// Executes DAD: HL += rp. Only carry is affected.
pub(crate) fn execute_dad<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    let operand = cpu.get_pair(RegisterPair::from_opcode(opcode));
    let (result, carry) = cpu.hl().overflowing_add(operand);
    cpu.set_hl(result);
    cpu.flags.c = carry;
    Ok(())
}

/// Executes DAA.
///
/// Adds 0x06 when the low nibble exceeds 9 or AC is set, and 0x60 when the
/// accumulator exceeds 0x99 or carry is set. Carry is never cleared by DAA.
pub(crate) fn execute_daa<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let a = cpu.a;
    let mut correction = 0;
    let mut carry = cpu.flags.c;

    if a & 0x0F > 9 || cpu.flags.ac {
        correction |= 0x06;
    }
    if a > 0x99 || cpu.flags.c {
        correction |= 0x60;
        carry = true;
    }

    let (result, mut flags) = alu::add(a, correction, false);
    flags.c = carry;
    cpu.a = result;
    cpu.flags = flags;
    Ok(())
}
