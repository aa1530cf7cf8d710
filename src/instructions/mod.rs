//! # 8085 Instruction Implementations
//!
//! This module contains the implementations of all 8085 instructions, organized by category.
//! Each instruction is implemented as a standalone function that takes a mutable reference
//! to the CPU and the opcode byte. Register, pair and condition operands are decoded from
//! the opcode's bit fields (see [`crate::registers`]).
//!
//! ## Categories
//!
//! - **transfer**: Data movement (MOV, MVI, LXI, LDA, STA, LDAX, STAX, LHLD, SHLD, XCHG)
//! - **arithmetic**: ADD, ADC, SUB, SBB, CMP and immediates, INR, DCR, INX, DCX, DAD, DAA
//! - **logical**: ANA, XRA, ORA and immediates, rotates, CMA, STC, CMC
//! - **branch**: JMP, CALL, RET and their conditional forms, RST, PCHL
//! - **stack**: PUSH, POP, XTHL, SPHL
//! - **control**: NOP, HLT, EI, DI, RIM, SIM

pub mod arithmetic;
pub mod branch;
pub mod control;
pub mod logical;
pub mod stack;
pub mod transfer;

use crate::registers::Register;
use crate::{ExecutionError, MemoryBus, CPU};

/// Dispatches an already-fetched opcode to its handler.
///
/// PC points just past the opcode byte on entry; handlers fetch their own
/// immediate operands.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<(), ExecutionError> {
    match opcode {
        0x00 => control::execute_nop(cpu),
        0x76 => control::execute_hlt(cpu),
        0x20 => control::execute_rim(cpu),
        0x30 => control::execute_sim(cpu),
        0xF3 => control::execute_di(cpu),
        0xFB => control::execute_ei(cpu),

        0x02 | 0x12 => transfer::execute_stax(cpu, opcode),
        0x0A | 0x1A => transfer::execute_ldax(cpu, opcode),
        0x22 => transfer::execute_shld(cpu),
        0x2A => transfer::execute_lhld(cpu),
        0x32 => transfer::execute_sta(cpu),
        0x3A => transfer::execute_lda(cpu),
        0xEB => transfer::execute_xchg(cpu),
        0x40..=0x7F => transfer::execute_mov(cpu, opcode),

        0x07 | 0x0F | 0x17 | 0x1F => logical::execute_rotate(cpu, opcode),
        0x27 => arithmetic::execute_daa(cpu),
        0x2F => logical::execute_cma(cpu),
        0x37 => logical::execute_stc(cpu),
        0x3F => logical::execute_cmc(cpu),

        0x80..=0x8F | 0xC6 | 0xCE => arithmetic::execute_add(cpu, opcode),
        0x90..=0x9F | 0xD6 | 0xDE => arithmetic::execute_sub(cpu, opcode),
        0xB8..=0xBF | 0xFE => arithmetic::execute_cmp(cpu, opcode),
        0xA0..=0xA7 | 0xE6 => logical::execute_ana(cpu, opcode),
        0xA8..=0xAF | 0xEE => logical::execute_xra(cpu, opcode),
        0xB0..=0xB7 | 0xF6 => logical::execute_ora(cpu, opcode),

        0xC3 => branch::execute_jmp(cpu),
        0xCD => branch::execute_call(cpu),
        0xC9 => branch::execute_ret(cpu),
        0xE9 => branch::execute_pchl(cpu),

        0xE3 => stack::execute_xthl(cpu),
        0xF9 => stack::execute_sphl(cpu),

        _ if opcode & 0xCF == 0x01 => transfer::execute_lxi(cpu, opcode),
        _ if opcode & 0xCF == 0x03 => arithmetic::execute_inx(cpu, opcode),
        _ if opcode & 0xCF == 0x0B => arithmetic::execute_dcx(cpu, opcode),
        _ if opcode & 0xCF == 0x09 => arithmetic::execute_dad(cpu, opcode),
        _ if opcode & 0xCF == 0xC1 => stack::execute_pop(cpu, opcode),
        _ if opcode & 0xCF == 0xC5 => stack::execute_push(cpu, opcode),

        _ if opcode & 0xC7 == 0x04 => arithmetic::execute_inr(cpu, opcode),
        _ if opcode & 0xC7 == 0x05 => arithmetic::execute_dcr(cpu, opcode),
        _ if opcode & 0xC7 == 0x06 => transfer::execute_mvi(cpu, opcode),
        _ if opcode & 0xC7 == 0xC0 => branch::execute_ret_if(cpu, opcode),
        _ if opcode & 0xC7 == 0xC2 => branch::execute_jmp_if(cpu, opcode),
        _ if opcode & 0xC7 == 0xC4 => branch::execute_call_if(cpu, opcode),
        _ if opcode & 0xC7 == 0xC7 => branch::execute_rst(cpu, opcode),

        _ => Err(ExecutionError::UnknownOpcode {
            opcode,
            pc: cpu.pc.wrapping_sub(1),
        }),
    }
}

/// Source operand of the accumulator group: an immediate byte for the
/// `0xC6`-`0xFE` column, otherwise the register in bits 0-2.
pub(crate) fn alu_operand<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    if opcode & 0xC0 == 0xC0 {
        cpu.fetch_byte()
    } else {
        cpu.get_reg(Register::from_code(opcode))
    }
}
