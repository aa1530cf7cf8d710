//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 8085 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A) and the general registers B, C, D, E, H, L
//! - **Register pairs**: BC, DE, HL, always derived from the 8-bit halves
//! - **Program counter** (PC): 16-bit address of the next byte to fetch
//! - **Stack pointer** (SP): 16-bit, grows downward, word-sized pushes
//! - **Status flags**: S, Z, AC, P, C (see [`Flags`])
//! - **Halted / interrupt-enable** latches
//!
//! ## Execution Model
//!
//! - `execute_instruction()`: Execute one instruction; `Ok(false)` once halted
//! - `run()`: Execute until halt, a breakpoint, or a step budget runs out
//!
//! There is no way back from Halted other than `reset()`.

use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use crate::instructions;
use crate::registers::{Condition, Register, RegisterPair};
use crate::{ExecutionError, Flags, MemoryBus, OpcodeMetadata, OPCODE_TABLE};

/// Conventional program origin; PC starts here.
pub const DEFAULT_ORIGIN: u16 = 0x8000;

/// Initial stack pointer.
pub const DEFAULT_SP: u16 = 0xFFFF;

/// Why a call to [`CPU::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The CPU executed HLT (or was already halted).
    Halted { steps: u64 },

    /// PC reached a breakpoint; the instruction there has not run yet.
    Breakpoint { address: u16, steps: u64 },

    /// The step budget ran out.
    StepLimit { steps: u64 },
}

impl RunOutcome {
    /// Number of instructions executed by the run.
    pub fn steps(&self) -> u64 {
        match *self {
            RunOutcome::Halted { steps }
            | RunOutcome::Breakpoint { steps, .. }
            | RunOutcome::StepLimit { steps } => steps,
        }
    }
}

/// 8085 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use lib8085::{FlatMemory, CPU};
///
/// let cpu = CPU::new(FlatMemory::new());
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFFFF);
/// assert_eq!(cpu.a(), 0x00);
/// assert!(!cpu.halted());
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator
    pub(crate) a: u8,

    pub(crate) b: u8,
    pub(crate) c: u8,
    pub(crate) d: u8,
    pub(crate) e: u8,
    pub(crate) h: u8,
    pub(crate) l: u8,

    /// Program counter (address of next byte to fetch)
    pub(crate) pc: u16,

    /// Stack pointer (address of the last pushed byte)
    pub(crate) sp: u16,

    pub(crate) flags: Flags,

    /// Set by HLT; cleared only by reset
    pub(crate) halted: bool,

    /// Interrupt enable latch (EI/DI); no interrupts are delivered
    pub(crate) interrupt_enabled: bool,

    breakpoints: BTreeSet<u16>,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU in its power-on state over the given memory.
    ///
    /// - PC = 0x8000, SP = 0xFFFF
    /// - All registers and flags cleared
    /// - Not halted, interrupts disabled
    pub fn new(memory: M) -> Self {
        Self {
            a: 0x00,
            b: 0x00,
            c: 0x00,
            d: 0x00,
            e: 0x00,
            h: 0x00,
            l: 0x00,
            pc: DEFAULT_ORIGIN,
            sp: DEFAULT_SP,
            flags: Flags::default(),
            halted: false,
            interrupt_enabled: false,
            breakpoints: BTreeSet::new(),
            memory,
        }
    }

    /// Returns the CPU to its power-on state. Memory and breakpoints are kept.
    pub fn reset(&mut self) {
        self.a = 0;
        self.b = 0;
        self.c = 0;
        self.d = 0;
        self.e = 0;
        self.h = 0;
        self.l = 0;
        self.pc = DEFAULT_ORIGIN;
        self.sp = DEFAULT_SP;
        self.flags = Flags::default();
        self.halted = false;
        self.interrupt_enabled = false;
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Return `Ok(false)` without fetching if the CPU is halted
    /// 2. Fetch the opcode byte at PC and advance PC
    /// 3. Look up the opcode in `OPCODE_TABLE`
    /// 4. Run the handler, which may fetch operand bytes, and return `Ok(true)`
    ///
    /// # Errors
    ///
    /// - `UnknownOpcode` if the byte has no implemented table entry. The error
    ///   carries the address the opcode was fetched from.
    /// - `Memory` if the instruction needs a word that straddles 0xFFFF.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8085::{ExecutionError, FlatMemory, MemoryBus, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x8000, 0x00); // NOP
    /// mem.write(0x8001, 0xDB); // IN (not emulated)
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.execute_instruction(), Ok(true));
    /// assert_eq!(
    ///     cpu.execute_instruction(),
    ///     Err(ExecutionError::UnknownOpcode { opcode: 0xDB, pc: 0x8001 })
    /// );
    /// ```
    pub fn execute_instruction(&mut self) -> Result<bool, ExecutionError> {
        if self.halted {
            return Ok(false);
        }

        let pc = self.pc;
        let opcode = self.fetch_byte();
        let metadata = &OPCODE_TABLE[opcode as usize];

        if !metadata.implemented {
            warn!("unknown opcode 0x{:02X} at 0x{:04X}", opcode, pc);
            return Err(ExecutionError::UnknownOpcode { opcode, pc });
        }

        trace!("{:04X}: {:02X} {}", pc, opcode, metadata.mnemonic);
        instructions::execute(self, opcode)?;

        if self.halted {
            debug!("halted at 0x{:04X}", pc);
        }
        Ok(true)
    }

    /// Runs until the CPU halts, reaches a breakpoint, or executes `max_steps`
    /// instructions.
    ///
    /// Breakpoints are checked before each instruction except the first, so a
    /// run started on a breakpoint address moves past it.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8085::{FlatMemory, MemoryBus, RunOutcome, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load_program(&[0x00, 0x00, 0x76], 0x8000).unwrap(); // NOP; NOP; HLT
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.add_breakpoint(0x8001);
    ///
    /// assert_eq!(cpu.run(100), Ok(RunOutcome::Breakpoint { address: 0x8001, steps: 1 }));
    /// assert_eq!(cpu.run(100), Ok(RunOutcome::Halted { steps: 2 }));
    /// ```
    pub fn run(&mut self, max_steps: u64) -> Result<RunOutcome, ExecutionError> {
        let mut steps = 0;

        while steps < max_steps {
            if self.halted {
                return Ok(RunOutcome::Halted { steps });
            }
            if steps > 0 && self.breakpoints.contains(&self.pc) {
                return Ok(RunOutcome::Breakpoint {
                    address: self.pc,
                    steps,
                });
            }
            self.execute_instruction()?;
            steps += 1;
        }

        if self.halted {
            Ok(RunOutcome::Halted { steps })
        } else {
            Ok(RunOutcome::StepLimit { steps })
        }
    }

    // ========== Breakpoints ==========

    /// Stops `run()` before the instruction at `address` executes.
    pub fn add_breakpoint(&mut self, address: u16) {
        self.breakpoints.insert(address);
    }

    /// Returns true if a breakpoint was removed.
    pub fn remove_breakpoint(&mut self, address: u16) -> bool {
        self.breakpoints.remove(&address)
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Breakpoint addresses in ascending order.
    pub fn breakpoints(&self) -> impl Iterator<Item = u16> + '_ {
        self.breakpoints.iter().copied()
    }

    // ========== Fetch and operand helpers ==========

    /// Reads the byte at PC and advances PC (wrapping).
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let byte = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    /// Reads the little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> Result<u16, ExecutionError> {
        let word = self.memory.read_word(self.pc)?;
        self.pc = self.pc.wrapping_add(2);
        Ok(word)
    }

    /// Reads an 8-bit operand; M reads memory at HL.
    pub(crate) fn get_reg(&self, reg: Register) -> u8 {
        match reg {
            Register::A => self.a,
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
            Register::E => self.e,
            Register::H => self.h,
            Register::L => self.l,
            Register::M => self.memory.read(self.hl()),
        }
    }

    /// Writes an 8-bit operand; M writes memory at HL.
    pub(crate) fn set_reg(&mut self, reg: Register, value: u8) {
        match reg {
            Register::A => self.a = value,
            Register::B => self.b = value,
            Register::C => self.c = value,
            Register::D => self.d = value,
            Register::E => self.e = value,
            Register::H => self.h = value,
            Register::L => self.l = value,
            Register::M => {
                let addr = self.hl();
                self.memory.write(addr, value);
            }
        }
    }

    /// Reads a register pair, SP, or the PSW word (A in the high byte).
    pub(crate) fn get_pair(&self, pair: RegisterPair) -> u16 {
        match pair {
            RegisterPair::BC => self.bc(),
            RegisterPair::DE => self.de(),
            RegisterPair::HL => self.hl(),
            RegisterPair::SP => self.sp,
            RegisterPair::PSW => self.psw(),
        }
    }

    pub(crate) fn set_pair(&mut self, pair: RegisterPair, value: u16) {
        match pair {
            RegisterPair::BC => self.set_bc(value),
            RegisterPair::DE => self.set_de(value),
            RegisterPair::HL => self.set_hl(value),
            RegisterPair::SP => self.sp = value,
            RegisterPair::PSW => {
                self.a = (value >> 8) as u8;
                self.flags = Flags::from_psw(value as u8);
            }
        }
    }

    /// Pushes a word: SP -= 2, then writes it at SP. SP is unchanged on failure.
    pub(crate) fn push_word(&mut self, value: u16) -> Result<(), ExecutionError> {
        let sp = self.sp.wrapping_sub(2);
        self.memory.write_word(sp, value)?;
        self.sp = sp;
        Ok(())
    }

    /// Pops a word: reads it at SP, then SP += 2.
    pub(crate) fn pop_word(&mut self) -> Result<u16, ExecutionError> {
        let value = self.memory.read_word(self.sp)?;
        self.sp = self.sp.wrapping_add(2);
        Ok(value)
    }

    pub(crate) fn condition_met(&self, condition: Condition) -> bool {
        match condition {
            Condition::NotZero => !self.flags.z,
            Condition::Zero => self.flags.z,
            Condition::NoCarry => !self.flags.c,
            Condition::Carry => self.flags.c,
            Condition::ParityOdd => !self.flags.p,
            Condition::ParityEven => self.flags.p,
            Condition::Plus => !self.flags.s,
            Condition::Minus => self.flags.s,
        }
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn c(&self) -> u8 {
        self.c
    }

    pub fn d(&self) -> u8 {
        self.d
    }

    pub fn e(&self) -> u8 {
        self.e
    }

    pub fn h(&self) -> u8 {
        self.h
    }

    pub fn l(&self) -> u8 {
        self.l
    }

    /// Returns the BC pair, `(B << 8) | C`.
    pub fn bc(&self) -> u16 {
        ((self.b as u16) << 8) | self.c as u16
    }

    /// Returns the DE pair, `(D << 8) | E`.
    pub fn de(&self) -> u16 {
        ((self.d as u16) << 8) | self.e as u16
    }

    /// Returns the HL pair, `(H << 8) | L`. This is the address M refers to.
    pub fn hl(&self) -> u16 {
        ((self.h as u16) << 8) | self.l as u16
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    pub fn sp(&self) -> u16 {
        self.sp
    }

    /// Returns the program status word: A in the high byte, packed flags in the low.
    ///
    /// Flag byte layout (S Z 0 AC 0 P 0 C):
    /// - Bit 7: S (Sign)
    /// - Bit 6: Z (Zero)
    /// - Bit 4: AC (Auxiliary Carry)
    /// - Bit 2: P (Parity)
    /// - Bit 0: C (Carry)
    pub fn psw(&self) -> u16 {
        ((self.a as u16) << 8) | self.flags.to_psw() as u16
    }

    /// Returns true once HLT has executed.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Returns the EI/DI latch.
    pub fn interrupt_enabled(&self) -> bool {
        self.interrupt_enabled
    }

    /// Returns metadata for the instruction at PC without executing it.
    pub fn next_instruction(&self) -> OpcodeMetadata {
        OPCODE_TABLE[self.memory.read(self.pc) as usize]
    }

    // ========== Status Flag Getters ==========

    /// Returns all five flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Returns true if the Sign flag is set.
    pub fn flag_s(&self) -> bool {
        self.flags.s
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flags.z
    }

    /// Returns true if the Auxiliary Carry flag is set.
    pub fn flag_ac(&self) -> bool {
        self.flags.ac
    }

    /// Returns true if the Parity flag is set (even parity).
    pub fn flag_p(&self) -> bool {
        self.flags.p
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flags.c
    }

    // ========== Memory Access ==========

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Setters ==========
    //
    // These bypass instruction semantics. They exist for tests, debuggers and
    // register editors.

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_b(&mut self, value: u8) {
        self.b = value;
    }

    pub fn set_c(&mut self, value: u8) {
        self.c = value;
    }

    pub fn set_d(&mut self, value: u8) {
        self.d = value;
    }

    pub fn set_e(&mut self, value: u8) {
        self.e = value;
    }

    pub fn set_h(&mut self, value: u8) {
        self.h = value;
    }

    pub fn set_l(&mut self, value: u8) {
        self.l = value;
    }

    pub fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = value as u8;
    }

    pub fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = value as u8;
    }

    pub fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u16) {
        self.sp = value;
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    pub fn set_flag_s(&mut self, value: bool) {
        self.flags.s = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flags.z = value;
    }

    pub fn set_flag_ac(&mut self, value: bool) {
        self.flags.ac = value;
    }

    pub fn set_flag_p(&mut self, value: bool) {
        self.flags.p = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flags.c = value;
    }

    pub fn set_interrupt_enabled(&mut self, value: bool) {
        self.interrupt_enabled = value;
    }
}
