//! # Arithmetic Logic Unit
//!
//! Pure 8-bit arithmetic and logic primitives. Every flag-producing CPU
//! instruction goes through exactly one of [`add`], [`sub`], [`and`], [`or`] or
//! [`xor`]; the CPU then copies the returned [`Flags`] into its status register
//! (minus whatever the instruction is documented to leave alone, e.g. carry for
//! INR/DCR).
//!
//! Zero, sign and parity are always computed from the masked 8-bit result. The
//! unmasked sum/difference is only used to decide carry/borrow.

use std::fmt;

/// The five 8085 condition flags.
///
/// # Examples
///
/// ```
/// use lib8085::Flags;
///
/// let flags = Flags::from_psw(0b1100_0101);
/// assert!(flags.s && flags.z && flags.p && flags.c);
/// assert!(!flags.ac);
/// assert_eq!(flags.to_psw(), 0b1100_0101);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Sign: bit 7 of the result
    pub s: bool,
    /// Zero: result == 0
    pub z: bool,
    /// Auxiliary carry: carry out of bit 3 (borrow into bit 4 for subtraction)
    pub ac: bool,
    /// Parity: even number of set bits in the result
    pub p: bool,
    /// Carry: carry out of bit 7, or borrow for subtraction
    pub c: bool,
}

impl Flags {
    pub const SIGN: u8 = 0b1000_0000;
    pub const ZERO: u8 = 0b0100_0000;
    pub const AUX_CARRY: u8 = 0b0001_0000;
    pub const PARITY: u8 = 0b0000_0100;
    pub const CARRY: u8 = 0b0000_0001;

    /// Packs the flags into the low byte of the PSW.
    ///
    /// Bits 5, 3 and 1 are always zero.
    pub fn to_psw(self) -> u8 {
        let mut psw = 0;
        if self.s {
            psw |= Self::SIGN;
        }
        if self.z {
            psw |= Self::ZERO;
        }
        if self.ac {
            psw |= Self::AUX_CARRY;
        }
        if self.p {
            psw |= Self::PARITY;
        }
        if self.c {
            psw |= Self::CARRY;
        }
        psw
    }

    /// Unpacks a PSW flag byte. Bits 5, 3 and 1 are ignored.
    pub fn from_psw(psw: u8) -> Self {
        Self {
            s: psw & Self::SIGN != 0,
            z: psw & Self::ZERO != 0,
            ac: psw & Self::AUX_CARRY != 0,
            p: psw & Self::PARITY != 0,
            c: psw & Self::CARRY != 0,
        }
    }

    /// Sign, zero and parity for an 8-bit result; AC and C cleared.
    fn szp(result: u8) -> Self {
        Self {
            s: result & 0x80 != 0,
            z: result == 0,
            ac: false,
            p: parity(result),
            c: false,
        }
    }
}

/// Error returned when an ALU operand does not fit in a byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AluError {
    OperandOutOfRange { a: u32, b: u32 },
}

impl fmt::Display for AluError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AluError::OperandOutOfRange { a, b } => {
                write!(f, "Invalid ALU operands: a=0x{:02X}, b=0x{:02X}", a, b)
            }
        }
    }
}

impl std::error::Error for AluError {}

/// Returns true when `value` has an even number of set bits.
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

/// 8-bit addition with optional carry in.
///
/// ```
/// use lib8085::alu;
///
/// let (result, flags) = alu::add(0xFF, 0x01, false);
/// assert_eq!(result, 0x00);
/// assert!(flags.z && flags.c && flags.ac);
/// ```
pub fn add(a: u8, b: u8, carry_in: bool) -> (u8, Flags) {
    let cin = carry_in as u16;
    let raw = a as u16 + b as u16 + cin;
    let result = raw as u8;

    let mut flags = Flags::szp(result);
    flags.c = raw > 0xFF;
    flags.ac = (a & 0x0F) as u16 + (b & 0x0F) as u16 + cin > 0x0F;
    (result, flags)
}

/// 8-bit subtraction `a - b - borrow_in`.
///
/// Carry reports a borrow out of bit 7; AC reports a borrow out of the low nibble.
pub fn sub(a: u8, b: u8, borrow_in: bool) -> (u8, Flags) {
    let bin = borrow_in as i16;
    let raw = a as i16 - b as i16 - bin;
    let result = raw as u8;

    let mut flags = Flags::szp(result);
    flags.c = raw < 0;
    flags.ac = ((a & 0x0F) as i16) < (b & 0x0F) as i16 + bin;
    (result, flags)
}

/// Bitwise AND. Carry is cleared and AC is always set on the 8085.
pub fn and(a: u8, b: u8) -> (u8, Flags) {
    let result = a & b;
    let mut flags = Flags::szp(result);
    flags.ac = true;
    (result, flags)
}

/// Bitwise OR. Carry and AC are cleared.
pub fn or(a: u8, b: u8) -> (u8, Flags) {
    let result = a | b;
    (result, Flags::szp(result))
}

/// Bitwise exclusive OR. Carry and AC are cleared.
pub fn xor(a: u8, b: u8) -> (u8, Flags) {
    let result = a ^ b;
    (result, Flags::szp(result))
}

fn operands(a: u32, b: u32) -> Result<(u8, u8), AluError> {
    match (u8::try_from(a), u8::try_from(b)) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        _ => Err(AluError::OperandOutOfRange { a, b }),
    }
}

/// [`add`] for operands supplied in a wider type; rejects anything above 0xFF.
pub fn checked_add(a: u32, b: u32, carry_in: bool) -> Result<(u8, Flags), AluError> {
    let (a, b) = operands(a, b)?;
    Ok(add(a, b, carry_in))
}

/// [`sub`] for operands supplied in a wider type; rejects anything above 0xFF.
pub fn checked_sub(a: u32, b: u32, borrow_in: bool) -> Result<(u8, Flags), AluError> {
    let (a, b) = operands(a, b)?;
    Ok(sub(a, b, borrow_in))
}
