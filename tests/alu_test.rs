//! Tests for the ALU primitives and flag packing.

use lib8085::alu::{self, parity};
use lib8085::{AluError, Flags};

// ========== Addition ==========

#[test]
fn test_add_simple() {
    let (result, flags) = alu::add(0x05, 0x03, false);

    assert_eq!(result, 0x08);
    assert!(!flags.z);
    assert!(!flags.c);
    assert!(!flags.s);
    assert!(!flags.ac);
    assert!(!flags.p); // 0b0000_1000 has one bit set
}

#[test]
fn test_add_sign_and_parity() {
    let (result, flags) = alu::add(0x70, 0x10, false);

    assert_eq!(result, 0x80);
    assert!(flags.s);
    assert!(!flags.p);
    assert!(!flags.c);
}

#[test]
fn test_add_carry_out() {
    let (result, flags) = alu::add(0xF0, 0x20, false);

    assert_eq!(result, 0x10);
    assert!(flags.c);
    assert!(!flags.ac);
}

#[test]
fn test_add_ff_plus_one() {
    let (result, flags) = alu::add(0xFF, 0x01, false);

    assert_eq!(result, 0x00);
    assert!(flags.z);
    assert!(flags.c);
    assert!(flags.ac);
    assert!(flags.p);
    assert!(!flags.s);
}

// ========== Subtraction ==========

#[test]
fn test_sub_simple() {
    let (result, flags) = alu::sub(0x09, 0x04, false);

    assert_eq!(result, 0x05);
    assert!(!flags.c);
    assert!(!flags.ac);
    assert!(flags.p);
}

#[test]
fn test_sub_low_nibble_borrow() {
    let (result, flags) = alu::sub(0x10, 0x01, false);

    assert_eq!(result, 0x0F);
    assert!(flags.ac);
    assert!(!flags.c);
}

#[test]
fn test_sub_with_borrow_in() {
    let (result, flags) = alu::sub(0x05, 0x05, true);

    assert_eq!(result, 0xFF);
    assert!(flags.c);
    assert!(flags.s);
}

// ========== Logical ==========

#[test]
fn test_and_sets_aux_carry_clears_carry() {
    let (result, flags) = alu::and(0xF0, 0x3C);

    assert_eq!(result, 0x30);
    assert!(flags.ac);
    assert!(!flags.c);
    assert!(flags.p);
}

#[test]
fn test_or_and_xor_clear_carries() {
    let (result, flags) = alu::or(0x0F, 0xF0);
    assert_eq!(result, 0xFF);
    assert!(!flags.c && !flags.ac);
    assert!(flags.s && flags.p);

    let (result, flags) = alu::xor(0xAA, 0xAA);
    assert_eq!(result, 0x00);
    assert!(flags.z);
    assert!(!flags.c && !flags.ac);
}

// ========== Helpers ==========

#[test]
fn test_parity() {
    assert!(parity(0x00));
    assert!(parity(0x03));
    assert!(!parity(0x01));
    assert!(!parity(0x7F));
    assert!(parity(0xFF));
}

#[test]
fn test_checked_operands() {
    assert_eq!(
        alu::checked_add(256, 0, false),
        Err(AluError::OperandOutOfRange { a: 256, b: 0 })
    );
    assert_eq!(alu::checked_sub(0x10, 0x01, false), Ok(alu::sub(0x10, 0x01, false)));
}

#[test]
fn test_psw_round_trip() {
    let flags = Flags {
        s: true,
        z: false,
        ac: true,
        p: false,
        c: true,
    };

    assert_eq!(flags.to_psw(), 0x91);
    assert_eq!(Flags::from_psw(0x91), flags);
}
