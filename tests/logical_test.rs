//! Tests for the logical group: ANA/ANI, XRA/XRI, ORA/ORI, rotates, CMA,
//! STC and CMC.

use lib8085::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with `program` loaded at 0x8000
fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load_program(program, 0x8000).unwrap();
    CPU::new(memory)
}

// ========== Bitwise ==========

#[test]
fn test_ana_register() {
    // ANA B
    let mut cpu = setup_cpu(&[0xA0]);
    cpu.set_a(0xF3);
    cpu.set_b(0x3F);
    cpu.set_flag_c(true);

    cpu.execute_instruction().unwrap();

    assert_eq!(cpu.a(), 0x33);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_ac());
    assert!(cpu.flag_p());
}

#[test]
fn test_ani_to_zero() {
    // ANI 0x0F
    let mut cpu = setup_cpu(&[0xE6, 0x0F]);
    cpu.set_a(0xF0);

    cpu.execute_instruction().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_xri_and_ori() {
    // XRI 0xFF ; ORI 0x01
    let mut cpu = setup_cpu(&[0xEE, 0xFF, 0xF6, 0x01]);
    cpu.set_a(0x0F);

    cpu.execute_instruction().unwrap();
    assert_eq!(cpu.a(), 0xF0);
    assert!(cpu.flag_s());

    cpu.execute_instruction().unwrap();
    assert_eq!(cpu.a(), 0xF1);
    assert!(!cpu.flag_p());
    assert!(!cpu.flag_ac());
}

#[test]
fn test_ora_m() {
    // ORA M
    let mut cpu = setup_cpu(&[0xB6]);
    cpu.set_hl(0x9000);
    cpu.memory_mut().write(0x9000, 0x80);
    cpu.set_a(0x01);

    cpu.execute_instruction().unwrap();

    assert_eq!(cpu.a(), 0x81);
}

// ========== Rotates ==========

#[test]
fn test_rlc() {
    // RLC
    let mut cpu = setup_cpu(&[0x07]);
    cpu.set_a(0x81);

    cpu.execute_instruction().unwrap();

    assert_eq!(cpu.a(), 0x03);
    assert!(cpu.flag_c());
}

#[test]
fn test_rar_shifts_carry_in() {
    // RAR
    let mut cpu = setup_cpu(&[0x1F]);
    cpu.set_a(0x02);
    cpu.set_flag_c(true);

    cpu.execute_instruction().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(!cpu.flag_c());
}

#[test]
fn test_rotates_touch_only_carry() {
    // RLC
    let mut cpu = setup_cpu(&[0x07]);
    cpu.set_a(0x00);
    cpu.set_flag_z(false);
    cpu.set_flag_s(true);

    cpu.execute_instruction().unwrap();

    assert!(!cpu.flag_z());
    assert!(cpu.flag_s());
}

// ========== Accumulator and Carry ==========

#[test]
fn test_cma() {
    // CMA
    let mut cpu = setup_cpu(&[0x2F]);
    cpu.set_a(0x51);

    cpu.execute_instruction().unwrap();

    assert_eq!(cpu.a(), 0xAE);
    assert_eq!(cpu.flags().to_psw(), 0x00);
}

#[test]
fn test_stc_cmc() {
    // STC ; CMC ; CMC
    let mut cpu = setup_cpu(&[0x37, 0x3F, 0x3F]);

    cpu.execute_instruction().unwrap();
    assert!(cpu.flag_c());

    cpu.execute_instruction().unwrap();
    assert!(!cpu.flag_c());

    cpu.execute_instruction().unwrap();
    assert!(cpu.flag_c());
}
