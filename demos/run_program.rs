//! Assemble, load and run example
//!
//! Multiplies two numbers by repeated addition and prints the CPU state
//! after the program halts.
//!
//! This example shows:
//! - Assembling a program with labels
//! - Loading it at its origin
//! - Stepping with a breakpoint, then running to HLT

use lib8085::{assemble, FlatMemory, MemoryBus, RunOutcome, CPU};

const PROGRAM: &str = r#"
; A = B * C
        MVI B,#07       ; multiplicand
        MVI C,#06       ; multiplier
        XRA A
LOOP:   ADD B
        DCR C
        JNZ LOOP
        STA 9000H
        HLT
"#;

fn main() {
    println!("8085 Emulator - Run Program Example");
    println!("===================================\n");

    let output = match assemble(PROGRAM) {
        Ok(output) => output,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            std::process::exit(1);
        }
    };

    let mut memory = FlatMemory::new();
    if let Err(err) = memory.load_program(&output.bytes, output.origin) {
        eprintln!("{}", err);
        std::process::exit(1);
    }

    let mut cpu = CPU::new(memory);

    // Stop at the top of the loop once to show breakpoints
    let loop_addr = output.lookup_symbol("LOOP").unwrap_or(output.origin);
    cpu.add_breakpoint(loop_addr);

    loop {
        match cpu.run(10_000) {
            Ok(RunOutcome::Breakpoint { address, steps }) => {
                println!(
                    "Breakpoint at 0x{:04X} ({}) after {} steps: A=0x{:02X} C=0x{:02X}",
                    address,
                    cpu.next_instruction().mnemonic,
                    steps,
                    cpu.a(),
                    cpu.c()
                );
            }
            Ok(RunOutcome::Halted { steps }) => {
                println!("Halted after {} more steps\n", steps);
                break;
            }
            Ok(RunOutcome::StepLimit { .. }) => {
                println!("Step limit reached");
                break;
            }
            Err(err) => {
                eprintln!("Execution error: {}", err);
                break;
            }
        }
    }

    println!("CPU Final State:");
    println!("----------------");
    println!("  A:  0x{:02X}", cpu.a());
    println!("  BC: 0x{:04X}", cpu.bc());
    println!("  DE: 0x{:04X}", cpu.de());
    println!("  HL: 0x{:04X}", cpu.hl());
    println!("  PC: 0x{:04X}", cpu.pc());
    println!("  SP: 0x{:04X}", cpu.sp());
    println!("  PSW: 0x{:04X} (SZ-A-P-C: {:08b})", cpu.psw(), cpu.psw() as u8);
    println!("  [0x9000] = {}", cpu.memory().read(0x9000));
}
