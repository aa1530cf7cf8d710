//! # Register Operand Fields
//!
//! The 8085 encodes its register operands in fixed bit fields of the opcode:
//!
//! - A 3-bit field (`DDD`/`SSS`) selects one of B, C, D, E, H, L, M, A, where
//!   M is the memory byte addressed by the HL pair
//! - A 2-bit field (`RP`) selects BC, DE, HL, or SP (PSW for PUSH/POP)
//!
//! The enums here are what the instruction decoder and the assembler encoder
//! agree on, so both sides use the same numbering.

/// An 8-bit register operand, in opcode field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    B = 0,
    C = 1,
    D = 2,
    E = 3,
    H = 4,
    L = 5,
    /// Memory at the address held in HL.
    M = 6,
    A = 7,
}

impl Register {
    /// All operands in field order.
    pub const ALL: [Register; 8] = [
        Register::B,
        Register::C,
        Register::D,
        Register::E,
        Register::H,
        Register::L,
        Register::M,
        Register::A,
    ];

    /// Decodes the low three bits of `code`.
    pub fn from_code(code: u8) -> Self {
        Self::ALL[(code & 0x07) as usize]
    }

    /// Returns the 3-bit field value.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Assembly name of the operand.
    pub fn name(self) -> &'static str {
        match self {
            Register::B => "B",
            Register::C => "C",
            Register::D => "D",
            Register::E => "E",
            Register::H => "H",
            Register::L => "L",
            Register::M => "M",
            Register::A => "A",
        }
    }

    /// Parses an assembly operand name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|reg| reg.name().eq_ignore_ascii_case(name))
    }
}

/// A 16-bit register pair operand, in opcode field order.
///
/// Field value 3 means SP for LXI/INX/DCX/DAD and PSW for PUSH/POP; the two
/// readings are kept as separate variants so handlers can't confuse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterPair {
    BC,
    DE,
    HL,
    SP,
    PSW,
}

impl RegisterPair {
    /// Decodes bits 4-5 of an opcode for LXI, INX, DCX and DAD.
    pub fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 4) & 0x03 {
            0 => RegisterPair::BC,
            1 => RegisterPair::DE,
            2 => RegisterPair::HL,
            _ => RegisterPair::SP,
        }
    }

    /// Decodes bits 4-5 of a PUSH or POP opcode.
    pub fn from_stack_opcode(opcode: u8) -> Self {
        match Self::from_opcode(opcode) {
            RegisterPair::SP => RegisterPair::PSW,
            pair => pair,
        }
    }

    /// Assembly name of the operand (`B` for BC, `D` for DE, `H` for HL).
    pub fn name(self) -> &'static str {
        match self {
            RegisterPair::BC => "B",
            RegisterPair::DE => "D",
            RegisterPair::HL => "H",
            RegisterPair::SP => "SP",
            RegisterPair::PSW => "PSW",
        }
    }

    /// Parses a pair operand name, ignoring case. `B`, `D` and `H` name pairs here.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            RegisterPair::BC,
            RegisterPair::DE,
            RegisterPair::HL,
            RegisterPair::SP,
            RegisterPair::PSW,
        ]
        .into_iter()
        .find(|pair| pair.name().eq_ignore_ascii_case(name))
    }
}

/// Branch condition encoded in bits 3-5 of Jcc/Ccc/Rcc opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    pub fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }
}
