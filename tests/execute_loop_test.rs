//! Execution loop tests
//!
//! Verifies the fetch-decode-execute cycle, unknown opcode handling, halting,
//! bounded runs and breakpoints.

use lib8085::{ExecutionError, FlatMemory, MemoryBus, MemoryError, RunOutcome, CPU};

/// Helper function to create a CPU with `program` loaded at 0x8000
fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load_program(program, 0x8000).unwrap();
    CPU::new(memory)
}

// ========== Unknown Opcodes ==========

#[test]
fn test_unknown_opcode_reports_fetch_address() {
    let mut cpu = setup_cpu(&[0x08]);

    match cpu.execute_instruction() {
        Err(ExecutionError::UnknownOpcode { opcode, pc }) => {
            assert_eq!(opcode, 0x08);
            assert_eq!(pc, 0x8000);
        }
        other => panic!("Expected UnknownOpcode, got {:?}", other),
    }

    // PC has moved past the opcode byte
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_every_undefined_opcode_faults() {
    for opcode in [
        0x08u8, 0x10, 0x18, 0x28, 0x38, 0xCB, 0xD3, 0xD9, 0xDB, 0xDD, 0xED, 0xFD,
    ] {
        let mut cpu = setup_cpu(&[opcode]);
        assert_eq!(
            cpu.execute_instruction(),
            Err(ExecutionError::UnknownOpcode { opcode, pc: 0x8000 }),
            "opcode 0x{:02X}",
            opcode
        );
    }
}

#[test]
fn test_unknown_opcode_display() {
    let err = ExecutionError::UnknownOpcode {
        opcode: 0xDD,
        pc: 0x8004,
    };
    assert_eq!(err.to_string(), "Unknown opcode: 0xDD at PC: 0x8004");
}

#[test]
fn test_memory_fault_is_propagated() {
    // JMP with its address straddling 0xFFFF
    let mut memory = FlatMemory::new();
    memory.write(0xFFFE, 0xC3);
    memory.write(0xFFFF, 0x00);
    let mut cpu = CPU::new(memory);
    cpu.set_pc(0xFFFE);

    assert_eq!(
        cpu.execute_instruction(),
        Err(ExecutionError::Memory(MemoryError::AddressOutOfRange {
            address: 0x10000
        }))
    );
}

// ========== NOP / HLT ==========

#[test]
fn test_two_nops_change_only_pc() {
    let mut cpu = setup_cpu(&[0x00, 0x00]);
    cpu.set_a(0x12);
    cpu.set_bc(0x3456);
    let flags = cpu.flags();
    let sp = cpu.sp();

    assert_eq!(cpu.execute_instruction(), Ok(true));
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.execute_instruction(), Ok(true));
    assert_eq!(cpu.pc(), 0x8002);

    assert_eq!(cpu.a(), 0x12);
    assert_eq!(cpu.bc(), 0x3456);
    assert_eq!(cpu.flags(), flags);
    assert_eq!(cpu.sp(), sp);
    assert_eq!(cpu.memory().slice(0x8000, 3), &[0x00, 0x00, 0x00]);
}

#[test]
fn test_pc_wraps_at_top_of_memory() {
    let mut cpu = setup_cpu(&[]);
    cpu.set_pc(0xFFFF);

    cpu.execute_instruction().unwrap();

    assert_eq!(cpu.pc(), 0x0000);
}

#[test]
fn test_hlt_stops_execution() {
    let mut cpu = setup_cpu(&[0x76, 0x3C]);

    assert_eq!(cpu.execute_instruction(), Ok(true));
    assert!(cpu.halted());
    assert_eq!(cpu.pc(), 0x8001);

    // Further calls do nothing
    assert_eq!(cpu.execute_instruction(), Ok(false));
    assert_eq!(cpu.execute_instruction(), Ok(false));
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.pc(), 0x8001);
}

// ========== Interrupt Latch ==========

#[test]
fn test_ei_di_and_rim() {
    // EI ; RIM ; DI ; MOV B,A ; RIM ; SIM
    let mut cpu = setup_cpu(&[0xFB, 0x20, 0xF3, 0x47, 0x20, 0x30]);

    cpu.execute_instruction().unwrap();
    assert!(cpu.interrupt_enabled());

    cpu.execute_instruction().unwrap();
    assert_eq!(cpu.a(), 0x08);

    cpu.execute_instruction().unwrap();
    assert!(!cpu.interrupt_enabled());

    cpu.execute_instruction().unwrap();
    cpu.execute_instruction().unwrap();
    assert_eq!(cpu.b(), 0x08);
    assert_eq!(cpu.a(), 0x00);

    cpu.execute_instruction().unwrap();
    assert_eq!(cpu.pc(), 0x8006);
}

// ========== run() ==========

#[test]
fn test_run_to_halt() {
    // MVI A,1 ; INR A ; HLT
    let mut cpu = setup_cpu(&[0x3E, 0x01, 0x3C, 0x76]);

    assert_eq!(cpu.run(100), Ok(RunOutcome::Halted { steps: 3 }));
    assert_eq!(cpu.a(), 0x02);

    // Already halted: nothing more runs
    assert_eq!(cpu.run(100), Ok(RunOutcome::Halted { steps: 0 }));
}

#[test]
fn test_run_with_zero_budget() {
    let mut cpu = setup_cpu(&[0x00]);

    assert_eq!(cpu.run(0), Ok(RunOutcome::StepLimit { steps: 0 }));
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_run_propagates_errors() {
    let mut cpu = setup_cpu(&[0x00, 0xCB]);

    assert_eq!(
        cpu.run(10),
        Err(ExecutionError::UnknownOpcode {
            opcode: 0xCB,
            pc: 0x8001
        })
    );
}

// ========== Breakpoints ==========

#[test]
fn test_breakpoint_stops_before_instruction() {
    // NOP ; MVI A,5 ; HLT
    let mut cpu = setup_cpu(&[0x00, 0x3E, 0x05, 0x76]);
    cpu.add_breakpoint(0x8001);

    assert_eq!(
        cpu.run(100),
        Ok(RunOutcome::Breakpoint {
            address: 0x8001,
            steps: 1
        })
    );
    assert_eq!(cpu.a(), 0x00);

    // Resuming steps over the breakpoint
    assert_eq!(cpu.run(100), Ok(RunOutcome::Halted { steps: 2 }));
    assert_eq!(cpu.a(), 0x05);
}

#[test]
fn test_breakpoint_in_loop_hits_every_iteration() {
    // LOOP: INR B ; JMP LOOP
    let mut cpu = setup_cpu(&[0x04, 0xC3, 0x00, 0x80]);
    cpu.add_breakpoint(0x8000);

    for iteration in 1..=3u8 {
        let outcome = cpu.run(100).unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Breakpoint {
                address: 0x8000,
                steps: 2
            }
        );
        assert_eq!(cpu.b(), iteration);
    }
}

#[test]
fn test_remove_and_clear_breakpoints() {
    let mut cpu = setup_cpu(&[0x00, 0x00, 0x76]);
    cpu.add_breakpoint(0x8001);
    cpu.add_breakpoint(0x8002);

    assert!(cpu.remove_breakpoint(0x8001));
    assert!(!cpu.remove_breakpoint(0x8001));
    assert_eq!(cpu.breakpoints().collect::<Vec<_>>(), vec![0x8002]);

    cpu.clear_breakpoints();
    assert_eq!(cpu.run(100), Ok(RunOutcome::Halted { steps: 3 }));
}

#[test]
fn test_reset_after_halt_allows_rerun() {
    // MVI A,7 ; HLT
    let mut cpu = setup_cpu(&[0x3E, 0x07, 0x76]);
    cpu.run(10).unwrap();
    assert!(cpu.halted());

    cpu.reset();

    assert!(!cpu.halted());
    assert_eq!(cpu.run(10), Ok(RunOutcome::Halted { steps: 2 }));
    assert_eq!(cpu.a(), 0x07);
}
