//! End-to-end tests: assemble source, load it at its origin and run it.

use lib8085::{assemble, ExecutionError, FlatMemory, MemoryBus, RunOutcome, CPU};

/// Assembles `source` and returns a CPU ready to run it.
fn load(source: &str) -> CPU<FlatMemory> {
    let output = assemble(source).unwrap();
    let mut memory = FlatMemory::new();
    memory.load_program(&output.bytes, output.origin).unwrap();
    CPU::new(memory)
}

#[test]
fn test_add_two_numbers() {
    let mut cpu = load("MVI A,#05\nMVI B,#03\nADD B\nHLT");

    while cpu.execute_instruction().unwrap() {}

    assert_eq!(cpu.a(), 0x08);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
    assert_eq!(cpu.pc(), 0x8006);
    assert!(cpu.halted());
}

#[test]
fn test_increment_overflow() {
    let mut cpu = load("MVI A,#FF\nINR A\nHLT");

    let outcome = cpu.run(100).unwrap();

    assert_eq!(outcome, RunOutcome::Halted { steps: 3 });
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_s());
    assert!(cpu.flag_ac());
    assert!(!cpu.flag_c());
}

#[test]
fn test_infinite_loop_on_label() {
    let mut cpu = load("LOOP: MVI A,#01\nJMP LOOP");

    for _ in 0..10 {
        cpu.execute_instruction().unwrap();
        assert_eq!(cpu.a(), 0x01);
        assert_eq!(cpu.pc(), 0x8002);

        cpu.set_a(0x00);
        cpu.execute_instruction().unwrap();
        assert_eq!(cpu.pc(), 0x8000);
    }

    assert_eq!(cpu.run(1000), Ok(RunOutcome::StepLimit { steps: 1000 }));
    assert!(!cpu.halted());
}

#[test]
fn test_unknown_opcode_in_memory() {
    let mut memory = FlatMemory::new();
    memory.write(0x8000, 0xCB);
    let mut cpu = CPU::new(memory);

    assert_eq!(
        cpu.execute_instruction(),
        Err(ExecutionError::UnknownOpcode {
            opcode: 0xCB,
            pc: 0x8000
        })
    );
}

#[test]
fn test_multiply_by_repeated_addition() {
    let source = "
        MVI B,#07
        MVI C,#06
        XRA A
LOOP:   ADD B
        DCR C
        JNZ LOOP
        STA 9000H
        HLT
    ";
    let mut cpu = load(source);

    let outcome = cpu.run(1000).unwrap();

    assert!(matches!(outcome, RunOutcome::Halted { .. }));
    assert_eq!(cpu.a(), 42);
    assert_eq!(cpu.memory().read(0x9000), 42);
}

#[test]
fn test_subroutine_call() {
    let source = "
        LXI SP,#9000
        MVI A,#10
        CALL DOUBLE
        CALL DOUBLE
        HLT
DOUBLE: ADD A
        RET
    ";
    let mut cpu = load(source);

    cpu.run(100).unwrap();

    assert_eq!(cpu.a(), 0x40);
    assert_eq!(cpu.sp(), 0x9000);
    assert!(cpu.halted());
}

#[test]
fn test_memory_block_sum() {
    let source = "
        LXI H,DATA
        MVI C,#04
        XRA A
NEXT:   ADD M
        INX H
        DCR C
        JNZ NEXT
        HLT
DATA:   NOP
    ";
    let output = assemble(source).unwrap();
    let data = output.lookup_symbol("DATA").unwrap();

    let mut memory = FlatMemory::new();
    memory.load_program(&output.bytes, output.origin).unwrap();
    memory.load_program(&[1, 2, 3, 4], data).unwrap();
    let mut cpu = CPU::new(memory);

    cpu.run(100).unwrap();

    assert_eq!(cpu.a(), 10);
    assert_eq!(cpu.hl(), data + 4);
}

#[test]
fn test_bcd_counter() {
    // Count 0..=99 in BCD; the 100th increment carries out
    let source = "
        XRA A
LOOP:   ADI #01
        DAA
        JNC LOOP
        HLT
    ";
    let mut cpu = load(source);

    cpu.run(1000).unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
}
